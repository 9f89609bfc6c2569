//! Test utilities for deluge development.
//!
//! [`fixtures`] holds the standard elevation grids used across the
//! workspace's tests and benches; the functions here assert the volume
//! invariants every rule must keep.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use deluge_core::FloodState;

/// Tolerance scaled to the volume being compared.
pub fn volume_tolerance(expected: f64) -> f64 {
    1e-9 * expected.abs().max(1.0)
}

/// Panic unless `sum(water) + sum(excess)` equals `expected` within
/// [`volume_tolerance`].
pub fn assert_volume(state: &FloodState, expected: f64) {
    let got = state.total_volume();
    assert!(
        (got - expected).abs() <= volume_tolerance(expected),
        "total volume {got} differs from expected {expected}"
    );
}

/// Panic if any water or excess cell is negative.
pub fn assert_non_negative(state: &FloodState) {
    for (name, grid) in [("water", state.water()), ("excess", state.excess())] {
        if let Some((cell, v)) = grid.iter_cells().find(|(_, v)| *v < 0.0) {
            panic!("{name} at {cell:?} is negative: {v}");
        }
    }
}

/// Cells holding standing water, row-major.
pub fn wet_cells(state: &FloodState) -> Vec<(usize, usize)> {
    state
        .water()
        .iter_cells()
        .filter(|(_, v)| *v > 0.0)
        .map(|(cell, _)| cell)
        .collect()
}
