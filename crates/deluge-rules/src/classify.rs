//! Per-cell regime classification.

use deluge_core::FloodState;
use deluge_space::{Direction, DirectionSet, GridTopology};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The hydraulic regime of a cell for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Local basin: only receives.
    Ponding,
    /// Level plateau: splits evenly with all neighbours.
    Spreading,
    /// Filling to the level of an adjoining plateau.
    Rising,
    /// Fallback: drains toward lower neighbours.
    Partitioning,
}

impl Regime {
    /// All regimes in classification priority order.
    pub const ALL: [Regime; 4] = [
        Regime::Ponding,
        Regime::Spreading,
        Regime::Rising,
        Regime::Partitioning,
    ];

    /// Lowercase name used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Ponding => "ponding",
            Regime::Spreading => "spreading",
            Regime::Rising => "rising",
            Regime::Partitioning => "partitioning",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One existing neighbour and its cell height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighbourHeight {
    /// Direction from the centre cell.
    pub dir: Direction,
    /// Neighbour coordinate.
    pub cell: (usize, usize),
    /// `elevation + water` at the neighbour.
    pub height: f64,
}

/// Everything a rule needs to know about one cell, read once.
///
/// Classification and actions work from this snapshot so that they never
/// touch the grids directly.
#[derive(Clone, Debug, PartialEq)]
pub struct CellContext {
    /// The cell being updated.
    pub cell: (usize, usize),
    /// Its cell height.
    pub height: f64,
    /// Its excess volume.
    pub excess: f64,
    /// Existing neighbours in canonical direction order.
    pub neighbours: SmallVec<[NeighbourHeight; 4]>,
}

impl CellContext {
    /// Read the cell and its neighbours from `state`.
    pub fn gather(topology: &GridTopology, state: &FloodState, row: usize, col: usize) -> Self {
        let neighbours = topology
            .neighbours(row, col)
            .into_iter()
            .map(|n| NeighbourHeight {
                dir: n.dir,
                cell: (n.row, n.col),
                height: state.cell_height(n.row, n.col),
            })
            .collect();
        Self {
            cell: (row, col),
            height: state.cell_height(row, col),
            excess: state.excess()[(row, col)],
            neighbours,
        }
    }

    /// Directions with a neighbour.
    pub fn existing(&self) -> DirectionSet {
        self.neighbours.iter().map(|n| n.dir).collect()
    }

    /// Directions whose neighbour is exactly level with this cell.
    pub fn equal_set(&self) -> DirectionSet {
        self.neighbours
            .iter()
            .filter(|n| n.height == self.height)
            .map(|n| n.dir)
            .collect()
    }

    /// Directions whose neighbour is strictly higher.
    pub fn higher_set(&self) -> DirectionSet {
        self.neighbours
            .iter()
            .filter(|n| n.height > self.height)
            .map(|n| n.dir)
            .collect()
    }

    /// Lowest neighbour cell height, `None` without neighbours.
    pub fn min_neighbour_height(&self) -> Option<f64> {
        self.neighbours.iter().map(|n| n.height).reduce(f64::min)
    }
}

/// A cell without excess volume is skipped for the step.
pub fn is_do_nothing(state: &FloodState, row: usize, col: usize) -> bool {
    state.excess()[(row, col)] == 0.0
}

/// Every existing neighbour is strictly higher. Vacuously true without
/// neighbours.
pub fn is_ponding(ctx: &CellContext) -> bool {
    ctx.higher_set() == ctx.existing()
}

/// Every existing neighbour is exactly level.
pub fn is_spreading(ctx: &CellContext) -> bool {
    ctx.equal_set() == ctx.existing()
}

/// At least one level neighbour, every other neighbour strictly higher.
pub fn is_rising(ctx: &CellContext) -> bool {
    let equal = ctx.equal_set();
    let rest = ctx.existing().difference(equal);
    !equal.is_empty() && rest.is_subset(ctx.higher_set())
}

/// Classify in priority order: ponding, spreading, rising, partitioning.
pub fn classify(ctx: &CellContext) -> Regime {
    if is_ponding(ctx) {
        Regime::Ponding
    } else if is_spreading(ctx) {
        Regime::Spreading
    } else if is_rising(ctx) {
        Regime::Rising
    } else {
        Regime::Partitioning
    }
}
