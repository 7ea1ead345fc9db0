//! # Workflows Module
//!
//! The public entry point: takes a parsed specification and a material
//! catalog, runs the matching builder variant, and hands back the finished
//! immutable detector model.

pub mod build;

pub use build::{build, DetectorModel};
