//! Step-by-step snapshots for animation.

use deluge_core::{FloodState, Grid2, StepId};
use serde::{Deserialize, Serialize};

/// Water and excess grids as they stood after one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Step after which the snapshot was taken; `0` is the seeded state.
    pub step: StepId,
    /// Standing water depth.
    pub water: Grid2,
    /// Mobile excess volume.
    pub excess: Grid2,
}

impl Snapshot {
    /// Copy the mutable grids out of `state`.
    pub fn capture(step: StepId, state: &FloodState) -> Self {
        Self {
            step,
            water: state.water().clone(),
            excess: state.excess().clone(),
        }
    }

    /// `sum(water) + sum(excess)`.
    pub fn total_volume(&self) -> f64 {
        self.water.sum() + self.excess.sum()
    }
}
