//! The stepping driver.
//!
//! [`FloodWorld`] owns the [`FloodState`] for one run. Each call to
//! [`step()`](FloodWorld::step) is one full scan of the grid: skip cells
//! without excess, classify the rest, plan and commit their transfers.
//! [`run()`](FloodWorld::run) repeats until [`end_sim`] holds or the step
//! cap is reached.
//!
//! # Update order
//!
//! With [`UpdateOrder::InPlace`] each transfer is applied before the next
//! cell is read, so a cell can see volume that moved earlier in the same
//! scan. With [`UpdateOrder::Buffered`] every cell reads the start-of-step
//! state and the step is committed at once.

use std::time::{Duration, Instant};

use deluge_core::{FloodState, Grid2, StepId};
use deluge_rules::{
    end_sim, is_do_nothing, raise_boundary, CellContext, Regime, RuleSet, Transfer,
    TransferBuffer,
};
use deluge_space::GridTopology;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::{ConfigError, FloodConfig, SimParams, UpdateOrder};
use crate::metrics::{RegimeCounts, StepMetrics};
use crate::trajectory::Snapshot;

// ── RunOutcome ──────────────────────────────────────────────────

/// How [`FloodWorld::run`] ended.
///
/// Not converging is an outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every cell's excess is at or below the threshold.
    Converged {
        /// Steps taken by this call.
        steps: u64,
    },
    /// The step cap was hit first.
    StepLimitReached {
        /// Steps taken by this call.
        steps: u64,
        /// Largest excess still held by a cell.
        residual_excess: f64,
    },
}

impl RunOutcome {
    /// Whether the run settled.
    pub fn converged(&self) -> bool {
        matches!(self, RunOutcome::Converged { .. })
    }

    /// Steps taken.
    pub fn steps(&self) -> u64 {
        match *self {
            RunOutcome::Converged { steps } | RunOutcome::StepLimitReached { steps, .. } => steps,
        }
    }
}

#[derive(Default)]
struct ScanTally {
    active: usize,
    regimes: RegimeCounts,
    stalled: usize,
}

impl ScanTally {
    fn record(&mut self, regime: Regime, transfer: &Transfer) {
        self.active += 1;
        self.regimes.record(regime);
        if transfer.stalled {
            self.stalled += 1;
            let (row, col) = transfer.origin;
            warn!(
                row,
                col,
                excess = transfer.retained,
                "partitioning stalled: no neighbour below projected surface"
            );
        }
    }
}

/// Whole microseconds in `d`, saturating at `u64::MAX`.
fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

// ── FloodWorld ──────────────────────────────────────────────────

/// Single-threaded driver for one flood run.
///
/// Created from a [`FloodConfig`] via [`new()`](FloodWorld::new), which
/// raises masked-out cells exactly once and injects the seeds.
///
/// # Examples
///
/// ```
/// use deluge_core::Grid2;
/// use deluge_engine::{FloodConfig, FloodSeed, FloodWorld};
///
/// let elevation = Grid2::from_rows(vec![
///     vec![9.0, 5.0, 9.0],
///     vec![6.0, 1.0, 7.0],
///     vec![9.0, 8.0, 9.0],
/// ])
/// .unwrap();
/// let seed = FloodSeed { row: 1, col: 1, volume: 3.0 };
/// let mut world = FloodWorld::new(FloodConfig::new(elevation, vec![seed])).unwrap();
///
/// let outcome = world.run();
/// assert!(outcome.converged());
/// assert_eq!(world.water()[(1, 1)], 3.0);
/// ```
pub struct FloodWorld {
    state: FloodState,
    topology: GridTopology,
    rules: RuleSet,
    params: SimParams,
    step: StepId,
    last_metrics: StepMetrics,
    trajectory: Vec<Snapshot>,
}

impl FloodWorld {
    /// Validate `config` and build a ready-to-step world.
    pub fn new(config: FloodConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let FloodConfig {
            mut elevation,
            boundary_mask,
            seeds,
            params,
        } = config;

        if let Some(mask) = &boundary_mask {
            let raised = raise_boundary(&mut elevation, mask, params.boundary_raise)?;
            debug!(raised, raise = params.boundary_raise, "raised boundary cells");
        }

        let mut state = FloodState::dry(elevation)?;
        for seed in &seeds {
            state.inject(seed.row, seed.col, seed.volume)?;
        }

        let topology = GridTopology::of_state(&state);
        let rules = RuleSet::new(params.increment_constant, params.partition);
        let trajectory = if params.record_trajectory {
            vec![Snapshot::capture(StepId(0), &state)]
        } else {
            Vec::new()
        };
        debug!(
            rows = topology.rows(),
            cols = topology.cols(),
            seeds = seeds.len(),
            volume = state.total_volume(),
            "flood world ready"
        );

        Ok(Self {
            state,
            topology,
            rules,
            params,
            step: StepId(0),
            last_metrics: StepMetrics::default(),
            trajectory,
        })
    }

    /// Run one full scan and return its metrics.
    pub fn step(&mut self) -> StepMetrics {
        let start = Instant::now();
        let tally = match self.params.update_order {
            UpdateOrder::InPlace => self.scan_in_place(),
            UpdateOrder::Buffered => self.scan_buffered(),
        };
        self.step = self.step.next();

        let metrics = StepMetrics {
            step: self.step,
            active_cells: tally.active,
            regimes: tally.regimes,
            stalled_partitions: tally.stalled,
            total_volume: self.state.total_volume(),
            max_excess: self.state.excess().max(),
            total_us: micros(start.elapsed()),
        };
        debug!(
            step = self.step.0,
            active = metrics.active_cells,
            ponding = metrics.regimes.ponding,
            spreading = metrics.regimes.spreading,
            rising = metrics.regimes.rising,
            partitioning = metrics.regimes.partitioning,
            max_excess = metrics.max_excess,
            "step complete"
        );
        if self.params.record_trajectory {
            self.trajectory.push(Snapshot::capture(self.step, &self.state));
        }
        self.last_metrics = metrics.clone();
        metrics
    }

    fn scan_in_place(&mut self) -> ScanTally {
        let mut tally = ScanTally::default();
        for (row, col) in self.topology.cells() {
            if is_do_nothing(&self.state, row, col) {
                continue;
            }
            let ctx = CellContext::gather(&self.topology, &self.state, row, col);
            let (regime, transfer) = self.rules.plan(&ctx);
            tally.record(regime, &transfer);
            transfer.apply(&mut self.state);
        }
        tally
    }

    fn scan_buffered(&mut self) -> ScanTally {
        let mut tally = ScanTally::default();
        let mut buffer = TransferBuffer::begin(&self.state);
        for (row, col) in self.topology.cells() {
            if is_do_nothing(&self.state, row, col) {
                continue;
            }
            let ctx = CellContext::gather(&self.topology, &self.state, row, col);
            let (regime, transfer) = self.rules.plan(&ctx);
            tally.record(regime, &transfer);
            buffer.record(&transfer);
        }
        buffer.commit(&mut self.state);
        tally
    }

    /// Whether no cell holds more than the threshold of excess.
    pub fn is_settled(&self) -> bool {
        end_sim(self.state.excess(), self.params.threshold)
    }

    /// Step until settled or `max_steps` steps have been taken by this call.
    pub fn run(&mut self) -> RunOutcome {
        let (rows, cols) = self.state.shape();
        let span = info_span!(
            "flood_run",
            rows,
            cols,
            order = ?self.params.update_order,
            max_steps = self.params.max_steps
        );
        let _guard = span.enter();

        let mut steps = 0;
        loop {
            if self.is_settled() {
                info!(
                    steps,
                    water = self.state.water().sum(),
                    "flood converged"
                );
                return RunOutcome::Converged { steps };
            }
            if steps >= self.params.max_steps {
                let residual_excess = self.state.excess().max();
                warn!(steps, residual_excess, "step limit reached before convergence");
                return RunOutcome::StepLimitReached {
                    steps,
                    residual_excess,
                };
            }
            self.step();
            steps += 1;
        }
    }

    /// The full state.
    pub fn state(&self) -> &FloodState {
        &self.state
    }

    /// Standing water depth: the flood map once settled.
    pub fn water(&self) -> &Grid2 {
        self.state.water()
    }

    /// Excess volume still in motion.
    pub fn excess(&self) -> &Grid2 {
        self.state.excess()
    }

    /// Elevation after the boundary raise.
    pub fn elevation(&self) -> &Grid2 {
        self.state.elevation()
    }

    /// Run parameters.
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Steps completed so far.
    pub fn current_step(&self) -> StepId {
        self.step
    }

    /// Metrics of the most recent step; zeroed before the first.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Snapshots from step 0 onward, empty unless `record_trajectory` is set.
    pub fn trajectory(&self) -> &[Snapshot] {
        &self.trajectory
    }

    /// Consume the world, keeping the final state.
    pub fn into_state(self) -> FloodState {
        self.state
    }
}

impl std::fmt::Debug for FloodWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloodWorld")
            .field("shape", &self.state.shape())
            .field("current_step", &self.step)
            .field("update_order", &self.params.update_order)
            .field("total_volume", &self.state.total_volume())
            .field("trajectory_len", &self.trajectory.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloodSeed;
    use deluge_core::GridError;

    fn seed(row: usize, col: usize, volume: f64) -> FloodSeed {
        FloodSeed { row, col, volume }
    }

    fn flat_config(volume: f64) -> FloodConfig {
        FloodConfig::new(Grid2::filled(3, 3, 5.0).unwrap(), vec![seed(1, 1, volume)])
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut c = flat_config(1.0);
        c.seeds.push(seed(7, 0, 1.0));
        match FloodWorld::new(c) {
            Err(ConfigError::Grid(GridError::CellOutOfBounds { row: 7, .. })) => {}
            other => panic!("expected CellOutOfBounds, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn seeds_on_one_cell_accumulate() {
        let mut c = flat_config(2.0);
        c.seeds.push(seed(1, 1, 3.0));
        let world = FloodWorld::new(c).unwrap();
        assert_eq!(world.excess()[(1, 1)], 5.0);
        assert_eq!(world.current_step(), StepId(0));
    }

    #[test]
    fn mask_raises_once() {
        let mut c = flat_config(1.0);
        let mut mask = Grid2::filled(3, 3, 1.0).unwrap();
        mask[(0, 0)] = 0.0;
        c.boundary_mask = Some(mask);
        let mut world = FloodWorld::new(c).unwrap();
        assert_eq!(world.elevation()[(0, 0)], 105.0);
        world.step();
        world.step();
        assert_eq!(world.elevation()[(0, 0)], 105.0);
        assert_eq!(world.elevation()[(1, 1)], 5.0);
    }

    #[test]
    fn zero_volume_settles_immediately() {
        let mut world = FloodWorld::new(flat_config(0.0)).unwrap();
        assert!(world.is_settled());
        assert_eq!(world.run(), RunOutcome::Converged { steps: 0 });
    }

    #[test]
    fn step_time_saturates() {
        assert_eq!(micros(Duration::from_millis(3)), 3_000);
        assert_eq!(micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn buffered_step_reports_spreading_metrics() {
        let mut c = flat_config(20.0);
        c.params.update_order = UpdateOrder::Buffered;
        let mut world = FloodWorld::new(c).unwrap();
        let m = world.step();
        assert_eq!(m.step, StepId(1));
        assert_eq!(m.active_cells, 1);
        assert_eq!(m.regimes.spreading, 1);
        assert_eq!(m.total_volume, 20.0);
        assert_eq!(m.max_excess, 4.0);
        assert_eq!(world.last_metrics(), &m);
    }

    #[test]
    fn in_place_step_cascades_through_later_cells() {
        let mut world = FloodWorld::new(flat_config(20.0)).unwrap();
        let m = world.step();
        // (1, 2) and (2, 1) receive from the seed and spread in the same
        // scan; (2, 2) then receives from both.
        assert_eq!(m.active_cells, 4);
        assert_eq!(m.regimes.spreading, 4);
        assert_eq!(m.regimes.total(), 4);
        assert!((m.total_volume - 20.0).abs() < 1e-12);
        assert_eq!(world.excess()[(1, 1)], 6.0);
        assert_eq!(m.max_excess, 6.0);
        assert_eq!(world.water().sum(), 0.0);
    }

    #[test]
    fn level_plateau_never_settles() {
        let mut c = flat_config(20.0);
        c.params.max_steps = 25;
        let mut world = FloodWorld::new(c).unwrap();
        match world.run() {
            RunOutcome::StepLimitReached {
                steps,
                residual_excess,
            } => {
                assert_eq!(steps, 25);
                assert!(residual_excess > 1e-3);
            }
            other => panic!("expected StepLimitReached, got {other:?}"),
        }
        assert!((world.state().total_volume() - 20.0).abs() < 1e-9);
        assert_eq!(world.current_step(), StepId(25));
    }

    #[test]
    fn trajectory_records_every_step() {
        let mut c = flat_config(20.0);
        c.params.record_trajectory = true;
        let mut world = FloodWorld::new(c).unwrap();
        world.step();
        world.step();
        let t = world.trajectory();
        assert_eq!(t.len(), 3);
        assert_eq!(t[0].step, StepId(0));
        assert_eq!(t[0].excess[(1, 1)], 20.0);
        assert_eq!(t[2].step, StepId(2));
        for snap in t {
            assert!((snap.total_volume() - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn trajectory_off_by_default() {
        let mut world = FloodWorld::new(flat_config(20.0)).unwrap();
        world.step();
        assert!(world.trajectory().is_empty());
    }

    #[test]
    fn lone_cell_absorbs_everything() {
        let c = FloodConfig::new(Grid2::filled(1, 1, 3.0).unwrap(), vec![seed(0, 0, 2.5)]);
        let mut world = FloodWorld::new(c).unwrap();
        assert_eq!(world.run(), RunOutcome::Converged { steps: 1 });
        assert_eq!(world.water()[(0, 0)], 2.5);
        assert_eq!(world.last_metrics().regimes.ponding, 1);
    }

    #[test]
    fn run_outcome_accessors() {
        let c = RunOutcome::Converged { steps: 3 };
        let s = RunOutcome::StepLimitReached {
            steps: 9,
            residual_excess: 0.5,
        };
        assert!(c.converged());
        assert!(!s.converged());
        assert_eq!((c.steps(), s.steps()), (3, 9));
    }
}
