//! # Geometry Module
//!
//! Rigid-transform algebra used to place detector volumes: rotation +
//! translation composition and conversion of global build coordinates into
//! a parent volume's local frame.

pub mod transform;
