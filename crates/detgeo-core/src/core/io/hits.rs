use crate::core::models::hit::{HitCollection, HitRecord};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HitIoError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Flat CSV row form of a [`HitRecord`]. Energies in GeV unless a rescale
/// transform has been applied upstream; positions in mm.
#[derive(Debug, Serialize, Deserialize)]
struct HitRow {
    cell_id: u64,
    energy: f64,
    x_mm: f64,
    y_mm: f64,
    z_mm: f64,
}

pub fn read_hits<R: Read>(reader: R) -> Result<HitCollection, HitIoError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut hits = Vec::new();
    for row in csv.deserialize() {
        let row: HitRow = row?;
        hits.push(HitRecord::new(
            row.cell_id,
            row.energy,
            Point3::new(row.x_mm, row.y_mm, row.z_mm),
        ));
    }
    Ok(hits)
}

pub fn write_hits<W: Write>(hits: &[HitRecord], writer: W) -> Result<(), HitIoError> {
    let mut csv = csv::Writer::from_writer(writer);
    for hit in hits {
        csv.serialize(HitRow {
            cell_id: hit.cell_id,
            energy: hit.energy,
            x_mm: hit.position.x,
            y_mm: hit.position.y,
            z_mm: hit.position.z,
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_collection_survives_write_and_read() {
        let hits = vec![
            HitRecord::new(0x0401, 9.0e-6, Point3::new(1.0, -2.0, 30.5)),
            HitRecord::new(0x0402, 1.2e-5, Point3::new(0.0, 0.0, 31.0)),
        ];
        let mut buffer = Vec::new();
        write_hits(&hits, &mut buffer).unwrap();
        let read_back = read_hits(buffer.as_slice()).unwrap();
        assert_eq!(read_back, hits);
    }

    #[test]
    fn reader_rejects_malformed_rows() {
        let data = "cell_id,energy,x_mm,y_mm,z_mm\nnot-a-number,1.0,0,0,0\n";
        assert!(read_hits(data.as_bytes()).is_err());
    }
}
