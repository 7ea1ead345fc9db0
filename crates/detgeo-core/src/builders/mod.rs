//! # Builders Module
//!
//! The stateful construction pass: a single-threaded, strictly sequential
//! walk over one declarative specification that turns it into a placed
//! element tree.
//!
//! Axial cursors and type/instance indices are mutable running state with a
//! total order dependency on declaration order, so no two builders may ever
//! share them; each sub-detector build owns an independent cursor and index
//! state. The pass performs no I/O and cannot suspend; on any error the
//! partially built tree is dropped and never observed by a caller.

pub mod error;
pub mod layered;
pub mod progress;
pub mod stations;
