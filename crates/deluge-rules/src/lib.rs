//! Local rules of the deluge flood automaton.
//!
//! Every step, each cell holding excess volume is classified into one
//! [`Regime`] and the matching [`Action`] plans a [`Transfer`] that moves
//! that volume into standing water or onto neighbours.
//!
//! # Regimes (checked in this order)
//!
//! 1. [`Regime::Ponding`]: every neighbour is strictly higher. The cell fills.
//! 2. [`Regime::Spreading`]: every neighbour is level. Volume splits evenly.
//! 3. [`Regime::Rising`]: some neighbours level, the rest higher. The cell
//!    rises by a capped increment, overflow goes to the level neighbours.
//! 4. [`Regime::Partitioning`]: anything else. Volume drains toward lower
//!    neighbours, weighted by projected depth.
//!
//! Heights compared are always cell heights, `elevation + water`.
//!
//! [`raise_boundary`] runs once before the first step; [`end_sim`] decides
//! when the run is over. [`level_pit`] is an auxiliary elevation-mutating
//! rule, not applied by the default driver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod classify;
pub mod leveling;
pub mod preprocess;
pub mod termination;
pub mod transfer;

pub use action::{
    Action, PartitionCoefficients, Partitioning, Ponding, Rising, RuleSet, Spreading,
};
pub use classify::{
    classify, is_do_nothing, is_ponding, is_rising, is_spreading, CellContext, NeighbourHeight,
    Regime,
};
pub use leveling::level_pit;
pub use preprocess::{raise_boundary, BOUNDARY_RAISE};
pub use termination::end_sim;
pub use transfer::{Transfer, TransferBuffer};
