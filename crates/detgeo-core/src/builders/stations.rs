use super::error::BuildError;
use super::progress::{BuildProgress, ProgressReporter};
use crate::core::geometry::transform::{localize, Transform};
use crate::core::identifiers::{CellId, IdSchema};
use crate::core::materials::MaterialCatalog;
use crate::core::models::element::Placement;
use crate::core::models::region::{BoxShape, Region};
use crate::core::models::tree::DetectorTree;
use crate::core::spec::{SpecError, StationSpec};
use nalgebra::Point3;
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

// Each sensor plane is a 4 x 2 grid of sensors with 1 mm gaps, modeled as
// one full-area slab per view.
const SENSOR_COLUMNS: f64 = 4.0;
const SENSOR_ROWS: f64 = 2.0;
const SENSOR_GAP_MM: f64 = 1.0;
const ENVELOPE_MARGIN_MM: f64 = 1.0;

/// Builds the fixed-station (tracker-style) variant: per station one
/// absorber slab followed by an unrotated X sensor plane and a Y plane
/// rotated 90 degrees about the build axis.
///
/// Positions are computed along the global z axis and converted into the
/// envelope's local frame by subtracting the envelope center. A single
/// absorber region and a single sensor region are shared by every station;
/// the `plane` identifier field distinguishes the two views in the cell
/// identifier.
pub fn build_stations(
    name: &str,
    id: i64,
    stations: &StationSpec,
    schema: &IdSchema,
    catalog: &MaterialCatalog,
    reporter: &ProgressReporter,
) -> Result<DetectorTree, BuildError> {
    let pitch = stations.pitch;
    let absorber = stations.absorber_thickness;
    let offset = stations.module_offset;
    let sensor = stations.sensor_thickness;
    let z0 = stations.z_position;

    // Dimensions must be validated before the gap derivation: a negative
    // absorber thickness would enlarge the derived gap and slip past the
    // gap check below.
    for (parameter, value) in [
        ("pitch", pitch),
        ("absorber_thickness", absorber),
        ("sensor_thickness", sensor),
        ("sensor_width", stations.sensor_width),
        ("sensor_length", stations.sensor_length),
        ("env_width", stations.env_width),
        ("env_height", stations.env_height),
    ] {
        if value <= 0.0 {
            return Err(BuildError::Spec(SpecError::NonPositiveStationParameter {
                parameter,
                value,
            }));
        }
    }
    if offset < 0.0 {
        return Err(BuildError::Spec(SpecError::NegativeModuleOffset {
            value: offset,
        }));
    }

    // plane_gap = pitch - absorber - 2 * module_offset
    let plane_gap = pitch - absorber - 2.0 * offset;
    if plane_gap < 0.0 {
        return Err(BuildError::Spec(SpecError::NegativePlaneGap {
            gap: plane_gap,
            pitch,
            absorber,
            offset,
        }));
    }

    reporter.report(BuildProgress::Started {
        units: u64::from(stations.n_stations),
    });

    let absorber_material = catalog
        .get(&stations.absorber_material)
        .ok_or_else(|| BuildError::MaterialNotFound {
            name: stations.absorber_material.clone(),
        })?
        .clone();
    let sensor_material = catalog
        .get(&stations.sensor_material)
        .ok_or_else(|| BuildError::MaterialNotFound {
            name: stations.sensor_material.clone(),
        })?
        .clone();

    let full_plane_width = SENSOR_COLUMNS * stations.sensor_width + (SENSOR_COLUMNS - 1.0) * SENSOR_GAP_MM;
    let full_plane_height = SENSOR_ROWS * stations.sensor_length + (SENSOR_ROWS - 1.0) * SENSOR_GAP_MM;

    let total_z = f64::from(stations.n_stations.saturating_sub(1)) * pitch
        + absorber
        + offset
        + sensor
        + plane_gap
        + sensor
        + 2.0 * ENVELOPE_MARGIN_MM;
    let envelope_center_z = z0 + total_z / 2.0 - ENVELOPE_MARGIN_MM;
    let envelope_center = Point3::new(0.0, 0.0, envelope_center_z);

    let envelope = Region::new(
        format!("{name}_env"),
        BoxShape::from_full(stations.env_width, stations.env_height, total_z),
        catalog.air().clone(),
    );
    let mut tree = DetectorTree::new(name, id, envelope, envelope_center.coords);
    let root = tree.root();
    let base = CellId::empty().append(schema, "system", id)?;

    // Reusable prototypes: one absorber slab spanning the envelope cross
    // section, one sensitive slab covering the full active area.
    let absorber_region = tree.add_region(Region::new(
        format!("{name}_absorber"),
        BoxShape::from_full(stations.env_width, stations.env_height, absorber),
        absorber_material,
    ));
    let sensor_region = tree.add_region(
        Region::new(
            format!("{name}_si"),
            BoxShape::from_full(full_plane_width, full_plane_height, sensor),
            sensor_material,
        )
        .sensitive(),
    );

    for i in 0..i64::from(stations.n_stations) {
        let gz_absorber_start = z0 + i as f64 * pitch;
        let gz_absorber = gz_absorber_start + absorber / 2.0;
        let gz_x_plane = gz_absorber_start + absorber + offset + sensor / 2.0;
        let gz_y_plane = gz_x_plane + sensor / 2.0 + plane_gap + sensor / 2.0;

        let station_id = base.append(schema, "layer", i)?;

        let local_absorber = localize(&Point3::new(0.0, 0.0, gz_absorber), &envelope_center);
        tree.attach(
            root,
            format!("absorber{i}"),
            i,
            absorber_region,
            Placement::new(Transform::translation(local_absorber), station_id.clone()),
        )?;

        for plane in 0..2i64 {
            let gz = if plane == 0 { gz_x_plane } else { gz_y_plane };
            let local = localize(&Point3::new(0.0, 0.0, gz), &envelope_center);

            // Y plane: rotate 90 degrees about z so the slab's local x stays
            // the measurement axis; the X plane stays a pure translation.
            let transform = if plane == 0 {
                Transform::translation(local)
            } else {
                Transform::rotated_z(local, FRAC_PI_2)
            };

            tree.attach(
                root,
                format!("plane_{}", i * 2 + plane),
                i * 2 + plane,
                sensor_region,
                Placement::new(transform, station_id.append(schema, "plane", plane)?),
            )?;
        }
        reporter.report(BuildProgress::UnitPlaced);
    }

    debug!(
        stations = stations.n_stations,
        elements = tree.len(),
        plane_gap_mm = plane_gap,
        "station build pass complete"
    );
    reporter.report(BuildProgress::Finished {
        elements: tree.len(),
    });
    Ok(tree)
}
