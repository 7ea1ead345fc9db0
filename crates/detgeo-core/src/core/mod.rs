//! # Core Module
//!
//! Stateless foundations of the detector description: the declarative
//! specification model, the transform algebra, composite identifiers, the
//! material catalog, the placed element tree, and file I/O.
//!
//! ## Overview
//!
//! Everything in this module is either immutable input (the parsed
//! specification), a pure function (transform composition, identifier
//! appends, material lookups), or a value produced exactly once by the
//! build pass and read-only afterwards (the element tree). The stateful
//! walk that turns a specification into a tree lives in [`crate::builders`];
//! the user-facing entry point lives in [`crate::workflows`].
//!
//! ## Submodules
//!
//! - **Specification input** ([`spec`]) - TOML-backed declarative layer/slice
//!   and station/plane descriptions plus the layering thickness service
//! - **Geometry** ([`geometry`]) - rotation + translation composition and
//!   global-to-local coordinate conversion
//! - **Identifiers** ([`identifiers`]) - schema-ordered composite cell
//!   identifiers accumulated down the element tree
//! - **Materials** ([`materials`]) - built-in and user-extendable material
//!   catalog
//! - **Models** ([`models`]) - regions, elements, placements, the element
//!   tree, and readout hit records
//! - **File I/O** ([`io`]) - sensitive readout-map export and CSV hit files

pub mod geometry;
pub mod identifiers;
pub mod io;
pub mod materials;
pub mod models;
pub mod spec;
