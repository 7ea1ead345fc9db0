use super::{LayerSpec, SpecError};
use std::fmt;

/// A declared slice-sum thickness that disagrees with the layer's
/// authoritative thickness. Non-fatal: the authoritative value wins, but
/// the disagreement is surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyWarning {
    pub layer_type: usize,
    pub declared: f64,
    pub slice_sum: f64,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "layer type {}: declared thickness {} mm disagrees with slice sum {} mm (declared value wins)",
            self.layer_type, self.declared, self.slice_sum
        )
    }
}

const THICKNESS_AGREEMENT_TOLERANCE_MM: f64 = 1e-9;

/// Pre-computed authoritative layer thicknesses, one entry per declared
/// layer type in declaration order.
///
/// The layer builder looks thicknesses up here instead of summing slices on
/// its own, which guards against spec/thickness mismatches: an explicit
/// `thickness` on the layer node supersedes the slice sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Layering {
    thicknesses: Vec<f64>,
    warnings: Vec<ConsistencyWarning>,
}

impl Layering {
    pub fn from_layers(layers: &[LayerSpec]) -> Result<Self, SpecError> {
        let mut thicknesses = Vec::with_capacity(layers.len());
        let mut warnings = Vec::new();

        for (layer_type, layer) in layers.iter().enumerate() {
            if layer.slices.is_empty() {
                return Err(SpecError::EmptyLayer(layer_type));
            }
            let mut slice_sum = 0.0;
            for (slice_index, slice) in layer.slices.iter().enumerate() {
                if slice.thickness <= 0.0 {
                    return Err(SpecError::NonPositiveSliceThickness {
                        layer: layer_type,
                        slice: slice_index,
                        value: slice.thickness,
                    });
                }
                slice_sum += slice.thickness;
            }

            let authoritative = match layer.thickness {
                Some(declared) => {
                    if declared <= 0.0 {
                        return Err(SpecError::NonPositiveLayerThickness {
                            layer: layer_type,
                            value: declared,
                        });
                    }
                    if (declared - slice_sum).abs() > THICKNESS_AGREEMENT_TOLERANCE_MM {
                        warnings.push(ConsistencyWarning {
                            layer_type,
                            declared,
                            slice_sum,
                        });
                    }
                    declared
                }
                None => slice_sum,
            };
            thicknesses.push(authoritative);
        }

        Ok(Self {
            thicknesses,
            warnings,
        })
    }

    /// Authoritative thickness of one layer type, by declaration index.
    pub fn thickness(&self, layer_type: usize) -> Option<f64> {
        self.thicknesses.get(layer_type).copied()
    }

    pub fn len(&self) -> usize {
        self.thicknesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thicknesses.is_empty()
    }

    pub fn warnings(&self) -> &[ConsistencyWarning] {
        &self.warnings
    }
}
