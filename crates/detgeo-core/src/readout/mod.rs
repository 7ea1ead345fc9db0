//! # Readout Module
//!
//! Per-record transforms applied downstream of the geometry: named hit
//! collections in an event store, a unit-rescale step (GeV to MIP counts)
//! and a threshold filter. Each transform reads one named input collection
//! and writes one named output collection; a missing input is fatal.

pub mod store;
pub mod transforms;

pub use store::{EventStore, ReadoutError};
pub use transforms::{EnergyRescale, ThresholdFilter, DEFAULT_MIP_GEV, DEFAULT_THRESHOLD};
