use nalgebra::Point3;

/// One readout record: the bit-packed cell identifier of the sensitive
/// placement it originated from, a deposited energy, and a global position.
///
/// The identifier is carried opaquely; decoding bit fields back into named
/// values belongs to the external readout decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub cell_id: u64,
    pub energy: f64,
    pub position: Point3<f64>,
}

impl HitRecord {
    pub fn new(cell_id: u64, energy: f64, position: Point3<f64>) -> Self {
        Self {
            cell_id,
            energy,
            position,
        }
    }
}

/// A named, ordered hit collection as read from or written to an event.
pub type HitCollection = Vec<HitRecord>;
