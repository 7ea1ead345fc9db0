use super::store::{EventStore, ReadoutError};
use tracing::info;

/// MIP value for a 0.3 mm silicon sensor, in GeV (9 keV).
pub const DEFAULT_MIP_GEV: f64 = 9.0e-6;

/// Default minimum energy, in MIP counts, for a hit to be kept.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Multiplies every hit's energy by a fixed factor and emits one output
/// record per input record, unconditionally. Used to convert deposited
/// energies from GeV into MIP counts.
#[derive(Debug, Clone)]
pub struct EnergyRescale {
    input: String,
    output: String,
    factor: f64,
}

impl EnergyRescale {
    pub fn new(input: impl Into<String>, output: impl Into<String>, factor: f64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            factor,
        }
    }

    /// Rescale into MIP counts: `factor = 1 / mip_value`.
    pub fn from_mip_value(input: impl Into<String>, output: impl Into<String>, mip_gev: f64) -> Self {
        Self::new(input, output, 1.0 / mip_gev)
    }

    /// Runs the transform over one event, returning the record count.
    pub fn execute(&self, store: &mut EventStore) -> Result<usize, ReadoutError> {
        let input = store.get(&self.input)?;
        let output: Vec<_> = input
            .iter()
            .map(|hit| {
                let mut rescaled = *hit;
                rescaled.energy = hit.energy * self.factor;
                rescaled
            })
            .collect();
        let count = output.len();
        store.insert(self.output.clone(), output)?;
        info!("EnergyRescale: {count} hits processed");
        Ok(count)
    }
}

/// Copies hits whose energy is strictly above a configured threshold into
/// the output collection; everything else is dropped. The comparison never
/// fails: well-formed records carry no exceptional values.
#[derive(Debug, Clone)]
pub struct ThresholdFilter {
    input: String,
    output: String,
    threshold: f64,
}

impl ThresholdFilter {
    pub fn new(input: impl Into<String>, output: impl Into<String>, threshold: f64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            threshold,
        }
    }

    /// Runs the filter over one event, returning the passing count.
    pub fn execute(&self, store: &mut EventStore) -> Result<usize, ReadoutError> {
        let input = store.get(&self.input)?;
        let total = input.len();
        let output: Vec<_> = input
            .iter()
            .filter(|hit| hit.energy > self.threshold)
            .copied()
            .collect();
        let passing = output.len();
        store.insert(self.output.clone(), output)?;
        info!("ThresholdFilter: {total} in, {passing} passing threshold");
        Ok(passing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::hit::HitRecord;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn hits(energies: &[f64]) -> Vec<HitRecord> {
        energies
            .iter()
            .enumerate()
            .map(|(i, &e)| HitRecord::new(i as u64, e, Point3::origin()))
            .collect()
    }

    #[test]
    fn threshold_keeps_only_strictly_greater_energies() {
        let mut store = EventStore::new();
        store
            .insert("SiTargetHitsMIP", hits(&[0.2, 0.6, 0.5, 1.1]))
            .unwrap();

        let filter = ThresholdFilter::new("SiTargetHitsMIP", "SiTargetDigiHits", 0.5);
        let passing = filter.execute(&mut store).unwrap();
        assert_eq!(passing, 2);

        let out = store.get("SiTargetDigiHits").unwrap();
        let energies: Vec<_> = out.iter().map(|h| h.energy).collect();
        // 0.5 itself is excluded: the comparison is strict.
        assert_eq!(energies, vec![0.6, 1.1]);
    }

    #[test]
    fn rescale_by_inverse_mip_turns_one_mip_into_unity() {
        let mut store = EventStore::new();
        store.insert("SiTargetHits", hits(&[9.0e-6])).unwrap();

        let rescale =
            EnergyRescale::from_mip_value("SiTargetHits", "SiTargetHitsMIP", DEFAULT_MIP_GEV);
        rescale.execute(&mut store).unwrap();

        let out = store.get("SiTargetHitsMIP").unwrap();
        assert_eq!(out.len(), 1);
        assert!(f64_approx_equal(out[0].energy, 1.0));
    }

    #[test]
    fn rescale_emits_one_output_per_input_unconditionally() {
        let mut store = EventStore::new();
        store
            .insert("SiTargetHits", hits(&[0.0, 1.0e-6, 5.0e-5]))
            .unwrap();

        let rescale = EnergyRescale::new("SiTargetHits", "SiTargetHitsMIP", 2.0);
        let count = rescale.execute(&mut store).unwrap();
        assert_eq!(count, 3);
        assert_eq!(store.get("SiTargetHitsMIP").unwrap().len(), 3);
    }

    #[test]
    fn transforms_preserve_cell_id_and_position() {
        let mut store = EventStore::new();
        let hit = HitRecord::new(0xdead, 2.0e-5, Point3::new(1.0, 2.0, 3.0));
        store.insert("in", vec![hit]).unwrap();

        EnergyRescale::from_mip_value("in", "mid", DEFAULT_MIP_GEV)
            .execute(&mut store)
            .unwrap();
        ThresholdFilter::new("mid", "out", DEFAULT_THRESHOLD)
            .execute(&mut store)
            .unwrap();

        let out = store.get("out").unwrap();
        assert_eq!(out[0].cell_id, 0xdead);
        assert_eq!(out[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn missing_input_collection_is_fatal() {
        let mut store = EventStore::new();
        let filter = ThresholdFilter::new("nope", "out", 0.5);
        assert!(matches!(
            filter.execute(&mut store),
            Err(ReadoutError::MissingCollection(_))
        ));
    }
}
