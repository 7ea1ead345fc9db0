use crate::core::materials::Material;

/// An axis-aligned box solid described by its half-extents, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub half_x: f64,
    pub half_y: f64,
    pub half_z: f64,
}

impl BoxShape {
    pub fn new(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            half_x,
            half_y,
            half_z,
        }
    }

    /// Builds the shape from full widths along each axis.
    pub fn from_full(x: f64, y: f64, z: f64) -> Self {
        Self::new(x / 2.0, y / 2.0, z / 2.0)
    }
}

/// Optional visualization/region/limits attribute strings carried through
/// from the specification for downstream consumers; the builders never
/// interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeAttributes {
    pub vis: Option<String>,
    pub region: Option<String>,
    pub limits: Option<String>,
}

/// A reusable (shape, material, sensitivity) tuple, independent of where it
/// is placed.
///
/// Regions are deliberately shared: the station builder creates one absorber
/// region and one sensor region and places them at every station, and the
/// layer builder creates one region per layer type, reused across repeats.
/// Sensitivity is a property of the region and is inherited verbatim by
/// every placement of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub shape: BoxShape,
    pub material: Material,
    pub sensitive: bool,
    pub attributes: VolumeAttributes,
}

impl Region {
    pub fn new(name: impl Into<String>, shape: BoxShape, material: Material) -> Self {
        Self {
            name: name.into(),
            shape,
            material,
            sensitive: false,
            attributes: VolumeAttributes::default(),
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_attributes(mut self, attributes: VolumeAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}
