//! # DetGeo Core Library
//!
//! A library for assembling hierarchical, spatially-placed detector models
//! from declarative specifications, stamping each placed region with a
//! composite cell identifier for later readout decoding.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to keep
//! the build pass testable and the finished model safely shareable.
//!
//! - **[`core`]: The Foundation.** Immutable specification input, pure
//!   transform and identifier algebra, the material catalog, the placed
//!   element tree, and file I/O.
//!
//! - **[`builders`]: The Construction Pass.** The stateful, strictly
//!   sequential walk that turns one specification into one element tree:
//!   the repeated-layer variant (calorimeter-style) and the fixed-station
//!   variant (tracker-style), with their cursor and index bookkeeping.
//!
//! - **[`workflows`]: The Public API.** The `build` entry point dispatching
//!   on the declared variant and returning the finished [`DetectorModel`].
//!
//! The [`readout`] module carries the downstream per-record transforms
//! (energy rescale and threshold filter) that operate on hit collections
//! recorded against the sensitive placements of a finished model.

pub mod builders;
pub mod core;
pub mod readout;
pub mod workflows;

pub use workflows::{build, DetectorModel};
