//! Core types for the deluge flood automaton.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! dense row-major [`Grid2`] storage, the [`FloodState`] that owns the three
//! per-cell grids (elevation, standing water, excess volume), step
//! identifiers, and the setup-time error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod state;

pub use error::GridError;
pub use grid::Grid2;
pub use id::StepId;
pub use state::FloodState;
