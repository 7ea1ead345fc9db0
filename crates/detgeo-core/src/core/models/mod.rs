//! Data structures of the placed geometry: regions, elements, placements,
//! the element tree, and readout hit records.

pub mod element;
pub mod hit;
pub mod ids;
pub mod region;
pub mod tree;
