use super::error::BuildError;
use super::progress::{BuildProgress, ProgressReporter};
use crate::core::geometry::transform::Transform;
use crate::core::identifiers::{CellId, IdSchema};
use crate::core::materials::MaterialCatalog;
use crate::core::models::element::Placement;
use crate::core::models::region::{BoxShape, Region, VolumeAttributes};
use crate::core::models::tree::DetectorTree;
use crate::core::spec::layering::{ConsistencyWarning, Layering};
use crate::core::spec::LayeredSpec;
use nalgebra::Vector3;
use tracing::{debug, warn};

/// Builds the repeated-layer (calorimeter-style) variant.
///
/// Layers are stacked along z starting at minus half the envelope depth,
/// with the authoritative per-type thickness taken from the pre-computed
/// [`Layering`] table. The layer instance index runs over every physical
/// repeat across all types in declaration order; the slice index restarts
/// at zero inside each layer instance. One region is created per layer type
/// (and per slice position within it) and reused across repeats.
pub fn build_layered(
    name: &str,
    id: i64,
    layered: &LayeredSpec,
    schema: &IdSchema,
    catalog: &MaterialCatalog,
    reporter: &ProgressReporter,
) -> Result<(DetectorTree, Vec<ConsistencyWarning>), BuildError> {
    let layering = Layering::from_layers(&layered.layers)?;
    for warning in layering.warnings() {
        warn!("{warning}");
    }

    let total_instances: u64 = layered.layers.iter().map(|l| u64::from(l.repeat)).sum();
    reporter.report(BuildProgress::Started {
        units: total_instances,
    });

    let dims = layered.dimensions;
    let half_x = dims.x / 2.0;
    let half_y = dims.y / 2.0;
    let half_z = dims.z / 2.0;

    let envelope = Region::new(
        format!("{name}_env"),
        BoxShape::new(half_x, half_y, half_z),
        catalog.air().clone(),
    );
    let mut tree = DetectorTree::new(name, id, envelope, Vector3::zeros());
    let root = tree.root();
    let base = CellId::empty().append(schema, "system", id)?;

    let mut layer_num: i64 = 0;
    let mut cursor = -half_z;

    // The type index follows declaration order and advances even for
    // repeat = 0 entries; the instance index only counts placed layers.
    for (layer_type, layer) in layered.layers.iter().enumerate() {
        let thickness = layering
            .thickness(layer_type)
            .ok_or(BuildError::LayerTypeNotFound { index: layer_type })?;

        let layer_region = tree.add_region(
            Region::new(
                format!("layerType{layer_type}"),
                BoxShape::new(half_x, half_y, thickness / 2.0),
                catalog.air().clone(),
            )
            .with_attributes(VolumeAttributes {
                vis: layer.vis.clone(),
                region: layer.region.clone(),
                limits: layer.limits.clone(),
            }),
        );

        let mut slice_regions = Vec::with_capacity(layer.slices.len());
        for (slice_index, slice) in layer.slices.iter().enumerate() {
            let material = catalog
                .get(&slice.material)
                .ok_or_else(|| BuildError::MaterialNotFound {
                    name: slice.material.clone(),
                })?
                .clone();
            let mut region = Region::new(
                format!("layerType{layer_type}_slice{slice_index}"),
                BoxShape::new(half_x, half_y, slice.thickness / 2.0),
                material,
            )
            .with_attributes(VolumeAttributes {
                vis: slice.vis.clone(),
                region: slice.region.clone(),
                limits: slice.limits.clone(),
            });
            if slice.sensitive {
                region = region.sensitive();
            }
            slice_regions.push(tree.add_region(region));
        }

        for _ in 0..layer.repeat {
            let layer_id = base.append(schema, "layer", layer_num)?;
            let layer_element = tree.attach(
                root,
                format!("layer{layer_num}"),
                layer_num,
                layer_region,
                Placement::new(
                    Transform::translation(Vector3::new(0.0, 0.0, cursor + thickness / 2.0)),
                    layer_id.clone(),
                ),
            )?;

            let mut slice_cursor = -(thickness / 2.0);
            for (slice_num, (slice, &slice_region)) in
                layer.slices.iter().zip(&slice_regions).enumerate()
            {
                slice_cursor += slice.thickness / 2.0;
                let slice_id = layer_id.append(schema, "slice", slice_num as i64)?;
                tree.attach(
                    layer_element,
                    format!("slice{slice_num}"),
                    slice_num as i64,
                    slice_region,
                    Placement::new(
                        Transform::translation(Vector3::new(0.0, 0.0, slice_cursor)),
                        slice_id,
                    ),
                )?;
                slice_cursor += slice.thickness / 2.0;
            }

            cursor += thickness;
            layer_num += 1;
            reporter.report(BuildProgress::UnitPlaced);
        }
    }

    debug!(
        layers = layer_num,
        elements = tree.len(),
        "layered build pass complete"
    );
    reporter.report(BuildProgress::Finished {
        elements: tree.len(),
    });
    Ok((tree, layering.warnings().to_vec()))
}
