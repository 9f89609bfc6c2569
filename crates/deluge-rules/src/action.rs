//! The [`Action`] trait and one implementation per regime.

use crate::classify::{classify, CellContext, Regime};
use crate::transfer::Transfer;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Plans how a classified cell gives up its excess volume.
///
/// # Contract
///
/// - `plan()` is pure: it reads only the [`CellContext`] and its own
///   parameters, and the returned [`Transfer`] accounts for exactly
///   `ctx.excess`.
/// - No amount in the transfer is negative.
/// - Only neighbours present in `ctx.neighbours` receive volume.
///
/// # Examples
///
/// ```
/// use deluge_core::{FloodState, Grid2};
/// use deluge_rules::{Action, CellContext, Spreading};
/// use deluge_space::GridTopology;
///
/// let mut state = FloodState::dry(Grid2::filled(3, 3, 5.0).unwrap()).unwrap();
/// state.inject(1, 1, 20.0).unwrap();
/// let topo = GridTopology::of_state(&state);
/// let ctx = CellContext::gather(&topo, &state, 1, 1);
///
/// let t = Spreading.plan(&ctx);
/// assert_eq!(t.retained, 4.0);
/// assert!(t.to_neighbours.iter().all(|&(_, v)| v == 4.0));
/// ```
pub trait Action {
    /// Name for logs.
    fn name(&self) -> &str;

    /// The regime this action handles.
    fn regime(&self) -> Regime;

    /// Plan the cell's transfer for this step.
    fn plan(&self, ctx: &CellContext) -> Transfer;
}

/// Fill the basin up to the lowest neighbour, keep the rest mobile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ponding;

impl Action for Ponding {
    fn name(&self) -> &str {
        "ponding"
    }

    fn regime(&self) -> Regime {
        Regime::Ponding
    }

    fn plan(&self, ctx: &CellContext) -> Transfer {
        let mut t = Transfer::hold(ctx.cell, 0.0);
        // Non-positive only when called off-regime; then nothing settles.
        let difference = ctx
            .min_neighbour_height()
            .map(|min| (min - ctx.height).max(0.0));
        match difference {
            Some(difference) if ctx.excess > difference => {
                t.to_water = difference;
                t.retained = ctx.excess - difference;
            }
            _ => t.to_water = ctx.excess,
        }
        t
    }
}

/// Split evenly between the cell and every neighbour; the cell's share
/// stays mobile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spreading;

impl Action for Spreading {
    fn name(&self) -> &str {
        "spreading"
    }

    fn regime(&self) -> Regime {
        Regime::Spreading
    }

    fn plan(&self, ctx: &CellContext) -> Transfer {
        let share = ctx.excess / (ctx.neighbours.len() + 1) as f64;
        let mut t = Transfer::hold(ctx.cell, share);
        t.to_neighbours = ctx.neighbours.iter().map(|n| (n.cell, share)).collect();
        t
    }
}

/// Rise by at most `increment` per step, overflow to level neighbours.
#[derive(Clone, Copy, Debug)]
pub struct Rising {
    /// Per-step rise cap.
    pub increment: f64,
}

impl Action for Rising {
    fn name(&self) -> &str {
        "rising"
    }

    fn regime(&self) -> Regime {
        Regime::Rising
    }

    fn plan(&self, ctx: &CellContext) -> Transfer {
        let mut t = Transfer::hold(ctx.cell, 0.0);
        if self.increment > ctx.excess {
            t.to_water = ctx.excess;
            return t;
        }
        let level: SmallVec<[(usize, usize); 4]> = ctx
            .neighbours
            .iter()
            .filter(|n| n.height == ctx.height)
            .map(|n| n.cell)
            .collect();
        if level.is_empty() {
            // No level neighbour to overflow to.
            t.to_water = ctx.excess;
            return t;
        }
        t.to_water = self.increment;
        let share = (ctx.excess - self.increment) / level.len() as f64;
        t.to_neighbours = level.into_iter().map(|cell| (cell, share)).collect();
        t
    }
}

/// Empirical surface rise `a * excess^b` used by [`Partitioning`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionCoefficients {
    /// Multiplier.
    pub a: f64,
    /// Exponent.
    pub b: f64,
}

impl Default for PartitionCoefficients {
    fn default() -> Self {
        Self { a: 0.09, b: 0.25 }
    }
}

/// Drain toward neighbours below the projected surface, in proportion to
/// how far below it each one sits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Partitioning {
    /// Surface-rise coefficients.
    pub coefficients: PartitionCoefficients,
}

impl Partitioning {
    /// Projected rise of the surface for `excess`.
    pub fn increased_height(&self, excess: f64) -> f64 {
        self.coefficients.a * excess.powf(self.coefficients.b)
    }
}

impl Action for Partitioning {
    fn name(&self) -> &str {
        "partitioning"
    }

    fn regime(&self) -> Regime {
        Regime::Partitioning
    }

    fn plan(&self, ctx: &CellContext) -> Transfer {
        let surface = ctx.height + self.increased_height(ctx.excess);
        let depths: SmallVec<[((usize, usize), f64); 4]> = ctx
            .neighbours
            .iter()
            .map(|n| (n.cell, (surface - n.height).max(0.0)))
            .collect();
        let sum: f64 = depths.iter().map(|(_, d)| d).sum();
        if sum <= 0.0 {
            let mut t = Transfer::hold(ctx.cell, ctx.excess);
            t.stalled = true;
            return t;
        }
        let mut t = Transfer::hold(ctx.cell, 0.0);
        t.to_neighbours = depths
            .into_iter()
            .filter(|&(_, d)| d > 0.0)
            .map(|(cell, d)| (cell, d / sum * ctx.excess))
            .collect();
        t
    }
}

/// The four actions with their parameters, dispatched by regime.
#[derive(Clone, Copy, Debug)]
pub struct RuleSet {
    ponding: Ponding,
    spreading: Spreading,
    rising: Rising,
    partitioning: Partitioning,
}

impl RuleSet {
    /// Rules with the given rise cap and partition coefficients.
    pub fn new(increment: f64, coefficients: PartitionCoefficients) -> Self {
        Self {
            ponding: Ponding,
            spreading: Spreading,
            rising: Rising { increment },
            partitioning: Partitioning { coefficients },
        }
    }

    /// The action handling `regime`.
    pub fn action(&self, regime: Regime) -> &dyn Action {
        match regime {
            Regime::Ponding => &self.ponding,
            Regime::Spreading => &self.spreading,
            Regime::Rising => &self.rising,
            Regime::Partitioning => &self.partitioning,
        }
    }

    /// Classify the cell and plan its transfer.
    pub fn plan(&self, ctx: &CellContext) -> (Regime, Transfer) {
        let regime = classify(ctx);
        let transfer = self.action(regime).plan(ctx);
        tracing::trace!(
            row = ctx.cell.0,
            col = ctx.cell.1,
            regime = regime.as_str(),
            excess = ctx.excess,
            "planned transfer"
        );
        (regime, transfer)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(1.0, PartitionCoefficients::default())
    }
}
