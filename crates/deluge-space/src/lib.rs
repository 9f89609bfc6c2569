//! Grid topology for the deluge flood automaton.
//!
//! [`GridTopology`] answers, for a cell and a [`Direction`], whether a
//! neighbour exists and what its elevation, water depth and cell height
//! are. Edges absorb: a cell on the top row has no `Up` neighbour, a
//! corner has exactly two neighbours.
//!
//! Axis convention, applied everywhere: `Up` decreases the row, `Down`
//! increases the row, `Left` decreases the column, `Right` increases the
//! column.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod topology;

pub use direction::{Direction, DirectionSet};
pub use topology::{GridTopology, Neighbour};
