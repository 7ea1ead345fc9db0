use crate::cli::BuildArgs;
use crate::error::Result;
use detgeo::builders::progress::{BuildProgress, ProgressReporter};
use detgeo::core::io::readout_map::write_readout_map;
use detgeo::core::materials::MaterialCatalog;
use detgeo::core::spec::DetectorSpec;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    let spec = DetectorSpec::load(&args.spec)?;
    let mut catalog = MaterialCatalog::new();
    if let Some(materials) = &args.materials {
        catalog.extend_from_file(materials)?;
    }

    let bar = ProgressBar::hidden();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let reporter = ProgressReporter::with_callback(Box::new({
        let bar = bar.clone();
        move |event| match event {
            BuildProgress::Started { units } => {
                bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                bar.set_length(units);
                bar.set_message("placing");
            }
            BuildProgress::UnitPlaced => bar.inc(1),
            BuildProgress::Finished { .. } => bar.finish_and_clear(),
        }
    }));

    let model = detgeo::build(&spec, &catalog, &reporter)?;
    for warning in &model.warnings {
        warn!("{warning}");
    }

    println!(
        "{} (id {}): {} elements, {} sensitive, schema [{}]",
        model.name,
        model.id,
        model.tree.len(),
        model.tree.sensitive_elements().len(),
        model.schema.fields().join(", "),
    );

    if let Some(path) = &args.readout_map {
        let file = BufWriter::new(File::create(path)?);
        write_readout_map(&model.tree, file)?;
        info!("Readout map written to '{}'", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BuildArgs;
    use std::io::Write;

    #[test]
    fn build_writes_one_readout_row_per_sensitive_plane() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("target.toml");
        let map_path = dir.path().join("readout.csv");
        let mut file = File::create(&spec_path).unwrap();
        writeln!(
            file,
            r#"
            name = "SiTarget"
            id = 1
            readout = ["system", "layer", "plane"]

            [stations]
            n_stations = 2
            pitch = 10.0
            absorber_thickness = 2.0
            module_offset = 0.5
            sensor_width = 20.0
            sensor_length = 20.0
            sensor_thickness = 0.3
            env_width = 100.0
            env_height = 50.0
            z_position = -50.0
            absorber_material = "Tungsten"
            sensor_material = "Silicon"
            "#
        )
        .unwrap();

        run(BuildArgs {
            spec: spec_path,
            materials: None,
            readout_map: Some(map_path.clone()),
        })
        .unwrap();

        let map = std::fs::read_to_string(&map_path).unwrap();
        let lines: Vec<_> = map.lines().collect();
        // header + 2 stations x 2 planes
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("system:1/layer:0/plane:0"));
        assert!(lines[4].contains("system:1/layer:1/plane:1"));
    }

    #[test]
    fn missing_spec_file_surfaces_the_offending_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(BuildArgs {
            spec: dir.path().join("nonexistent.toml"),
            materials: None,
            readout_map: None,
        });
        assert!(matches!(result, Err(crate::error::CliError::Spec(_))));
    }
}
