use crate::builders::error::BuildError;
use crate::builders::layered::build_layered;
use crate::builders::progress::ProgressReporter;
use crate::builders::stations::build_stations;
use crate::core::identifiers::IdSchema;
use crate::core::materials::MaterialCatalog;
use crate::core::models::tree::DetectorTree;
use crate::core::spec::layering::ConsistencyWarning;
use crate::core::spec::{DetectorSpec, DetectorVariant};
use tracing::{info, instrument};

/// The finished, immutable description of one detector instance.
///
/// Produced by a single build pass and read-only for its whole lifetime, so
/// it may be shared by any number of downstream readers without further
/// synchronization.
#[derive(Debug, Clone)]
pub struct DetectorModel {
    pub name: String,
    pub id: i64,
    pub schema: IdSchema,
    pub tree: DetectorTree,
    pub warnings: Vec<ConsistencyWarning>,
}

/// Builds a detector model from its declarative specification.
///
/// A pure function of its inputs: building twice from the same
/// specification yields identical trees. Any error aborts the pass before
/// a tree is exposed; there is no partial construction.
#[instrument(skip_all, name = "detector_build", fields(detector = %spec.name))]
pub fn build(
    spec: &DetectorSpec,
    catalog: &MaterialCatalog,
    reporter: &ProgressReporter,
) -> Result<DetectorModel, BuildError> {
    let schema = IdSchema::new(spec.readout.clone())?;
    info!(id = spec.id, "starting detector build pass");

    let (tree, warnings) = match spec.variant()? {
        DetectorVariant::Layered(layered) => {
            build_layered(&spec.name, spec.id, layered, &schema, catalog, reporter)?
        }
        DetectorVariant::Stations(stations) => (
            build_stations(&spec.name, spec.id, stations, &schema, catalog, reporter)?,
            Vec::new(),
        ),
    };

    info!(
        elements = tree.len(),
        sensitive = tree.sensitive_elements().len(),
        warnings = warnings.len(),
        "detector build pass finished"
    );
    Ok(DetectorModel {
        name: spec.name.clone(),
        id: spec.id,
        schema,
        tree,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layered_toml() -> DetectorSpec {
        toml::from_str(
            r#"
            name = "SiPixel"
            id = 4
            readout = ["system", "layer", "slice"]

            [layered]
            dimensions = { x = 100.0, y = 100.0, z = 60.0 }

            [[layered.layer]]
            repeat = 2

            [[layered.layer.slice]]
            material = "Tungsten"
            thickness = 2.0

            [[layered.layer.slice]]
            material = "Silicon"
            thickness = 0.3
            sensitive = true
            "#,
        )
        .unwrap()
    }

    #[test]
    fn build_dispatches_on_the_declared_variant() {
        let catalog = MaterialCatalog::new();
        let model = build(&layered_toml(), &catalog, &ProgressReporter::new()).unwrap();

        assert_eq!(model.name, "SiPixel");
        // envelope + 2 layers + 4 slices
        assert_eq!(model.tree.len(), 7);
        assert_eq!(model.tree.sensitive_elements().len(), 2);
        assert_eq!(model.schema.fields(), ["system", "layer", "slice"]);
    }

    #[test]
    fn invalid_schema_aborts_before_any_geometry_work() {
        let mut spec = layered_toml();
        spec.readout = vec!["layer".to_string(), "layer".to_string()];
        let catalog = MaterialCatalog::new();
        assert!(matches!(
            build(&spec, &catalog, &ProgressReporter::new()),
            Err(BuildError::Id(_))
        ));
    }
}
