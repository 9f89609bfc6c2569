//! Pit leveling: turning excess volume into ground.

use deluge_core::FloodState;
use deluge_space::{Direction, GridTopology};

/// Level a strict interior pit toward its lowest neighbour's elevation.
///
/// A pit is a cell with all four neighbours present and every neighbour's
/// *elevation* strictly greater than its own. The cell's elevation rises
/// by `min(lowest_neighbour - elevation, excess)` and its excess drops by
/// the same amount, so excess never goes negative.
///
/// Returns the raise applied, or `None` if the cell is not a strict
/// interior pit. Volume is not conserved: leveled water becomes ground.
pub fn level_pit(
    topology: &GridTopology,
    state: &mut FloodState,
    row: usize,
    col: usize,
) -> Option<f64> {
    let own = state.elevation()[(row, col)];
    let mut lowest = f64::INFINITY;
    for dir in Direction::ALL {
        let neighbour = topology.neighbor_elevation(state, row, col, dir)?;
        if neighbour <= own {
            return None;
        }
        lowest = lowest.min(neighbour);
    }
    let raise = (lowest - own).min(state.excess()[(row, col)]);
    state.elevation_mut()[(row, col)] += raise;
    state.excess_mut()[(row, col)] -= raise;
    tracing::debug!(row, col, raise, "leveled pit");
    Some(raise)
}
