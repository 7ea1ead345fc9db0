use crate::core::models::tree::DetectorTree;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Element tree is internally inconsistent: dangling handle")]
    DanglingHandle,
}

/// Writes the sensitive-element readout map as CSV.
///
/// One row per readout-contributing element: name, sequential index, the
/// full composite identifier, the global center position and half-extents,
/// and the region's material. Bit packing of the identifier is left to the
/// downstream readout decoder; the identifier is exported symbolically.
pub fn write_readout_map<W: Write>(tree: &DetectorTree, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "element", "index", "cell_id", "x_mm", "y_mm", "z_mm", "half_x_mm", "half_y_mm",
        "half_z_mm", "material",
    ])?;

    for &id in tree.sensitive_elements() {
        let element = tree.element(id).ok_or(ExportError::DanglingHandle)?;
        let region = tree.region(element.region).ok_or(ExportError::DanglingHandle)?;
        let position = tree.global_position(id).ok_or(ExportError::DanglingHandle)?;
        let cell_id = element
            .placement
            .as_ref()
            .map(|p| p.cell_id.to_string())
            .unwrap_or_default();

        csv.write_record([
            element.name.clone(),
            element.index.to_string(),
            cell_id,
            position.x.to_string(),
            position.y.to_string(),
            position.z.to_string(),
            region.shape.half_x.to_string(),
            region.shape.half_y.to_string(),
            region.shape.half_z.to_string(),
            region.material.name.clone(),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::transform::Transform;
    use crate::core::identifiers::{CellId, IdSchema};
    use crate::core::materials::MaterialCatalog;
    use crate::core::models::element::Placement;
    use crate::core::models::region::{BoxShape, Region};
    use nalgebra::Vector3;

    #[test]
    fn readout_map_lists_only_sensitive_elements() {
        let catalog = MaterialCatalog::new();
        let schema = IdSchema::new(vec!["system".to_string(), "layer".to_string()]).unwrap();
        let mut tree = DetectorTree::new(
            "det",
            1,
            Region::new("env", BoxShape::new(50.0, 50.0, 50.0), catalog.air().clone()),
            Vector3::zeros(),
        );

        let silicon = catalog.get("Silicon").unwrap().clone();
        let absorber = tree.add_region(Region::new(
            "absorber",
            BoxShape::new(50.0, 50.0, 1.0),
            catalog.get("Tungsten").unwrap().clone(),
        ));
        let sensor =
            tree.add_region(Region::new("sensor", BoxShape::new(40.0, 20.0, 0.15), silicon).sensitive());

        let base = CellId::empty().append(&schema, "system", 1).unwrap();
        tree.attach(
            tree.root(),
            "absorber0",
            0,
            absorber,
            Placement::new(
                Transform::translation(Vector3::new(0.0, 0.0, -2.0)),
                base.append(&schema, "layer", 0).unwrap(),
            ),
        )
        .unwrap();
        tree.attach(
            tree.root(),
            "plane_0",
            0,
            sensor,
            Placement::new(
                Transform::translation(Vector3::new(0.0, 0.0, 1.5)),
                base.append(&schema, "layer", 1).unwrap(),
            ),
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_readout_map(&tree, &mut buffer).unwrap();
        let out = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 2); // header + one sensitive row
        assert!(lines[1].starts_with("plane_0,0,system:1/layer:1,0,0,1.5"));
        assert!(lines[1].ends_with("Silicon"));
    }
}
