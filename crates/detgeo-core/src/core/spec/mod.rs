//! Declarative detector specification: the read-only input of the build
//! pass, deserialized once from TOML and never mutated afterwards.

pub mod layering;

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Malformed or inconsistent specification input. Always fatal to the
/// build; a bad specification does not change between attempts.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Detector '{0}' declares neither a [layered] nor a [stations] section")]
    MissingVariant(String),

    #[error("Detector '{0}' declares both a [layered] and a [stations] section")]
    AmbiguousVariant(String),

    #[error("Layer {layer} slice {slice} has non-positive thickness {value} mm")]
    NonPositiveSliceThickness {
        layer: usize,
        slice: usize,
        value: f64,
    },

    #[error("Layer {layer} declares non-positive thickness {value} mm")]
    NonPositiveLayerThickness { layer: usize, value: f64 },

    #[error("Layer {0} declares no slices")]
    EmptyLayer(usize),

    #[error("Station parameter '{parameter}' must be positive, got {value} mm")]
    NonPositiveStationParameter { parameter: &'static str, value: f64 },

    #[error("Module offset must not be negative, got {value} mm")]
    NegativeModuleOffset { value: f64 },

    #[error(
        "Derived plane gap is negative ({gap} mm): pitch {pitch} mm cannot hold absorber {absorber} mm plus 2 x {offset} mm module offset"
    )]
    NegativePlaneGap {
        gap: f64,
        pitch: f64,
        absorber: f64,
        offset: f64,
    },
}

fn default_repeat() -> u32 {
    1
}

/// One passive or sensitive slab within a layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceSpec {
    pub material: String,
    /// Slab thickness along the build axis, mm.
    pub thickness: f64,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub vis: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub limits: Option<String>,
}

/// One declared layer type: a slice stack repeated `repeat` times.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerSpec {
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Authoritative layer thickness override, mm. When absent the slice
    /// sum is authoritative.
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(rename = "slice")]
    pub slices: Vec<SliceSpec>,
    #[serde(default)]
    pub vis: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub limits: Option<String>,
}

/// Full envelope widths along x/y/z, mm.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Variant A input: repeated layers of slices stacked along the build axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayeredSpec {
    pub dimensions: Dimensions,
    #[serde(rename = "layer")]
    pub layers: Vec<LayerSpec>,
}

/// Variant B input: a fixed count of absorber + X/Y sensor-plane stations.
/// All lengths in mm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationSpec {
    pub n_stations: u32,
    /// Station-to-station spacing along the build axis.
    pub pitch: f64,
    pub absorber_thickness: f64,
    /// Gap between the absorber's trailing face and the first sensor plane.
    pub module_offset: f64,
    pub sensor_width: f64,
    pub sensor_length: f64,
    pub sensor_thickness: f64,
    pub env_width: f64,
    pub env_height: f64,
    /// Global z of the first absorber's leading face.
    pub z_position: f64,
    pub absorber_material: String,
    pub sensor_material: String,
}

/// Which builder variant a specification selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorVariant<'a> {
    Layered(&'a LayeredSpec),
    Stations(&'a StationSpec),
}

/// The declarative description of one detector instance.
///
/// Exactly one of the `layered`/`stations` sections must be present; the
/// `readout` list is the identifier schema declared once per detector class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorSpec {
    pub name: String,
    pub id: i64,
    /// Ordered identifier field names, e.g. `["system", "layer", "slice"]`.
    pub readout: Vec<String>,
    #[serde(default)]
    pub layered: Option<LayeredSpec>,
    #[serde(default)]
    pub stations: Option<StationSpec>,
}

impl DetectorSpec {
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|e| SpecError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| SpecError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn variant(&self) -> Result<DetectorVariant<'_>, SpecError> {
        match (&self.layered, &self.stations) {
            (Some(layered), None) => Ok(DetectorVariant::Layered(layered)),
            (None, Some(stations)) => Ok(DetectorVariant::Stations(stations)),
            (None, None) => Err(SpecError::MissingVariant(self.name.clone())),
            (Some(_), Some(_)) => Err(SpecError::AmbiguousVariant(self.name.clone())),
        }
    }
}
