//! Planned volume movements and the two ways of committing them.

use deluge_core::{FloodState, Grid2};
use smallvec::SmallVec;

/// Where one cell's excess volume goes this step.
///
/// A transfer always accounts for the whole excess it was planned from:
/// `to_water + outflow() + retained` equals the excess volume read by
/// the action.
#[derive(Clone, Debug, PartialEq)]
pub struct Transfer {
    /// The cell giving up volume.
    pub origin: (usize, usize),
    /// Volume settled into standing water at `origin`.
    pub to_water: f64,
    /// Volume added to each neighbour's excess.
    pub to_neighbours: SmallVec<[((usize, usize), f64); 4]>,
    /// Excess left at `origin` afterwards.
    pub retained: f64,
    /// Partitioning found no positive depth and moved nothing.
    pub stalled: bool,
}

impl Transfer {
    /// A transfer that keeps everything where it is.
    pub fn hold(origin: (usize, usize), excess: f64) -> Self {
        Self {
            origin,
            to_water: 0.0,
            to_neighbours: SmallVec::new(),
            retained: excess,
            stalled: false,
        }
    }

    /// Volume sent to neighbours.
    pub fn outflow(&self) -> f64 {
        self.to_neighbours.iter().map(|(_, v)| v).sum()
    }

    /// Volume accounted for by this transfer.
    pub fn total(&self) -> f64 {
        self.to_water + self.outflow() + self.retained
    }

    /// Commit immediately, so later cells in the same scan see the result.
    pub fn apply(&self, state: &mut FloodState) {
        let (_, water, excess) = state.split_mut();
        water[self.origin] += self.to_water;
        for &(cell, amount) in &self.to_neighbours {
            excess[cell] += amount;
        }
        excess[self.origin] = self.retained;
    }
}

/// Accumulates a step's transfers against a frozen state.
///
/// Each active cell's excess becomes its `retained` share; inactive cells
/// keep theirs. Inflow from neighbours is summed separately and both are
/// written back in [`commit`](TransferBuffer::commit), which makes the
/// step independent of scan order.
#[derive(Clone, Debug)]
pub struct TransferBuffer {
    water_delta: Grid2,
    base: Grid2,
    inflow: Grid2,
}

impl TransferBuffer {
    /// Start a step from `state`'s current excess.
    pub fn begin(state: &FloodState) -> Self {
        let base = state.excess().clone();
        let mut zeros = base.clone();
        zeros.as_mut_slice().fill(0.0);
        Self {
            water_delta: zeros.clone(),
            base,
            inflow: zeros,
        }
    }

    /// Record one cell's transfer.
    pub fn record(&mut self, transfer: &Transfer) {
        self.water_delta[transfer.origin] += transfer.to_water;
        self.base[transfer.origin] = transfer.retained;
        for &(cell, amount) in &transfer.to_neighbours {
            self.inflow[cell] += amount;
        }
    }

    /// Write the step into `state`: `water += delta`, `excess = base + inflow`.
    pub fn commit(self, state: &mut FloodState) {
        let (_, water, excess) = state.split_mut();
        for (w, d) in water.as_mut_slice().iter_mut().zip(self.water_delta.as_slice()) {
            *w += *d;
        }
        let merged = self.base.as_slice().iter().zip(self.inflow.as_slice());
        for (e, (b, i)) in excess.as_mut_slice().iter_mut().zip(merged) {
            *e = *b + *i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn flat_state() -> FloodState {
        let mut s = FloodState::dry(Grid2::zeros(1, 3).unwrap()).unwrap();
        s.inject(0, 1, 6.0).unwrap();
        s
    }

    fn split_left_right() -> Transfer {
        Transfer {
            origin: (0, 1),
            to_water: 1.0,
            to_neighbours: smallvec![((0, 0), 2.0), ((0, 2), 2.0)],
            retained: 1.0,
            stalled: false,
        }
    }

    #[test]
    fn hold_retains_everything() {
        let t = Transfer::hold((2, 3), 4.5);
        assert_eq!(t.total(), 4.5);
        assert_eq!(t.outflow(), 0.0);
    }

    #[test]
    fn apply_moves_volume() {
        let mut s = flat_state();
        split_left_right().apply(&mut s);
        assert_eq!(s.excess().as_slice(), &[2.0, 1.0, 2.0]);
        assert_eq!(s.water().as_slice(), &[0.0, 1.0, 0.0]);
        assert_eq!(s.total_volume(), 6.0);
    }

    #[test]
    fn buffer_defers_until_commit() {
        let mut s = flat_state();
        let mut buf = TransferBuffer::begin(&s);
        buf.record(&split_left_right());
        assert_eq!(s.excess()[(0, 1)], 6.0);
        buf.commit(&mut s);
        assert_eq!(s.excess().as_slice(), &[2.0, 1.0, 2.0]);
        assert_eq!(s.water()[(0, 1)], 1.0);
    }

    #[test]
    fn buffer_keeps_inactive_cells_and_sums_inflow() {
        let mut s = flat_state();
        s.inject(0, 0, 0.5).unwrap();
        s.inject(0, 2, 3.0).unwrap();
        let mut buf = TransferBuffer::begin(&s);
        buf.record(&split_left_right());
        // (0, 2) sends everything back to the middle.
        buf.record(&Transfer {
            origin: (0, 2),
            to_water: 0.0,
            to_neighbours: smallvec![((0, 1), 3.0)],
            retained: 0.0,
            stalled: false,
        });
        buf.commit(&mut s);
        assert_eq!(s.excess().as_slice(), &[2.5, 4.0, 2.0]);
        assert_eq!(s.total_volume(), 9.5);
    }
}
