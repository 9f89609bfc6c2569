//! Per-step metrics for the flood driver.

use deluge_core::StepId;
use deluge_rules::Regime;
use serde::Serialize;

/// How many cells fell into each regime during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegimeCounts {
    /// Ponding cells.
    pub ponding: usize,
    /// Spreading cells.
    pub spreading: usize,
    /// Rising cells.
    pub rising: usize,
    /// Partitioning cells.
    pub partitioning: usize,
}

impl RegimeCounts {
    /// Count one cell in `regime`.
    pub fn record(&mut self, regime: Regime) {
        match regime {
            Regime::Ponding => self.ponding += 1,
            Regime::Spreading => self.spreading += 1,
            Regime::Rising => self.rising += 1,
            Regime::Partitioning => self.partitioning += 1,
        }
    }

    /// Count for `regime`.
    pub fn get(&self, regime: Regime) -> usize {
        match regime {
            Regime::Ponding => self.ponding,
            Regime::Spreading => self.spreading,
            Regime::Rising => self.rising,
            Regime::Partitioning => self.partitioning,
        }
    }

    /// Cells classified in total.
    pub fn total(&self) -> usize {
        self.ponding + self.spreading + self.rising + self.partitioning
    }
}

/// Metrics collected during a single step.
///
/// The driver fills these after each [`step()`](crate::FloodWorld::step);
/// [`last_metrics()`](crate::FloodWorld::last_metrics) returns the most
/// recent ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StepMetrics {
    /// Step that produced these metrics.
    pub step: StepId,
    /// Cells classified during the scan. In-place scans also count cells
    /// that only received volume earlier in the same scan.
    pub active_cells: usize,
    /// Regime of each active cell.
    pub regimes: RegimeCounts,
    /// Partitioning cells that found no neighbour below the projected
    /// surface and moved nothing.
    pub stalled_partitions: usize,
    /// `sum(water) + sum(excess)` after the step.
    pub total_volume: f64,
    /// Largest excess left in any cell after the step.
    pub max_excess: f64,
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
}
