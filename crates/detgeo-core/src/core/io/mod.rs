//! File I/O: the sensitive readout-map export and CSV hit collections.

pub mod hits;
pub mod readout_map;
