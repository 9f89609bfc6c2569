//! 4-connected grid topology with absorbing edges.

use crate::direction::{Direction, DirectionSet};
use deluge_core::{FloodState, Grid2, GridError};
use smallvec::SmallVec;

/// A resolved neighbour: the direction it lies in and its coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbour {
    /// Direction from the centre cell.
    pub dir: Direction,
    /// Neighbour row.
    pub row: usize,
    /// Neighbour column.
    pub col: usize,
}

/// Shape-only view of a `rows x cols` grid answering neighbour queries.
///
/// Edges absorb: out-of-grid neighbours are omitted, so corners have two
/// neighbours, other edge cells three and interior cells four. Value
/// accessors take the [`FloodState`] explicitly; the topology itself
/// holds no grid data.
///
/// # Examples
///
/// ```
/// use deluge_space::{Direction, GridTopology};
///
/// let topo = GridTopology::new(4, 4).unwrap();
/// assert_eq!(topo.existing_neighbors(0, 0).len(), 2);
/// assert_eq!(topo.existing_neighbors(1, 1).len(), 4);
/// assert_eq!(topo.neighbor_index(0, 2, Direction::Up), None);
/// assert_eq!(topo.neighbor_index(0, 2, Direction::Right), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridTopology {
    rows: usize,
    cols: usize,
}

impl GridTopology {
    /// Create a topology with `rows * cols` cells.
    ///
    /// Returns `Err(GridError::Empty)` if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self { rows, cols })
    }

    /// Topology matching a grid's shape.
    pub fn of_grid(grid: &Grid2) -> Self {
        let (rows, cols) = grid.shape();
        Self { rows, cols }
    }

    /// Topology matching a state's shape.
    pub fn of_state(state: &FloodState) -> Self {
        let (rows, cols) = state.shape();
        Self { rows, cols }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `(row, col)` lies inside the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// The neighbour's coordinate along the axis `dir` moves on: a row for
    /// `Up`/`Down`, a column for `Left`/`Right`. `None` on that edge.
    ///
    /// # Panics
    ///
    /// If `(row, col)` is not on the grid.
    pub fn neighbor_index(&self, row: usize, col: usize, dir: Direction) -> Option<usize> {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        let (dr, dc) = dir.offset();
        if dir.is_vertical() {
            resolve_axis(row, dr, self.rows)
        } else {
            resolve_axis(col, dc, self.cols)
        }
    }

    /// Full coordinate of the neighbour in `dir`, if it exists.
    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let i = self.neighbor_index(row, col, dir)?;
        if dir.is_vertical() {
            Some((i, col))
        } else {
            Some((row, i))
        }
    }

    /// Directions in which a neighbour exists.
    pub fn existing_neighbors(&self, row: usize, col: usize) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.neighbor_index(row, col, d).is_some())
            .collect()
    }

    /// Resolved neighbours in canonical direction order.
    pub fn neighbours(&self, row: usize, col: usize) -> SmallVec<[Neighbour; 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                self.neighbor(row, col, dir)
                    .map(|(row, col)| Neighbour { dir, row, col })
            })
            .collect()
    }

    /// Elevation of the neighbour in `dir`.
    pub fn neighbor_elevation(
        &self,
        state: &FloodState,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Option<f64> {
        self.neighbor(row, col, dir)
            .map(|cell| state.elevation()[cell])
    }

    /// Standing water depth of the neighbour in `dir`.
    pub fn neighbor_water(
        &self,
        state: &FloodState,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Option<f64> {
        self.neighbor(row, col, dir).map(|cell| state.water()[cell])
    }

    /// Cell height (`elevation + water`) of the neighbour in `dir`.
    pub fn neighbor_cell_height(
        &self,
        state: &FloodState,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Option<f64> {
        self.neighbor(row, col, dir)
            .map(|(r, c)| state.cell_height(r, c))
    }

    /// All cells in row-major scan order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }
}

/// Step `val` by `delta` along an axis of length `len`; `None` off-grid.
fn resolve_axis(val: usize, delta: i8, len: usize) -> Option<usize> {
    match delta {
        -1 => val.checked_sub(1),
        1 if val + 1 < len => Some(val + 1),
        0 => Some(val),
        _ => None,
    }
}
