//! The flood state: three same-shaped grids mutated in place by the rules.

use crate::error::GridError;
use crate::grid::Grid2;

/// Owns the elevation, standing-water and excess-volume grids of one run.
///
/// - **elevation**: ground height, fixed after preprocessing.
/// - **water**: settled water depth ("fluid at rest"), never negative.
/// - **excess**: mobile volume still being redistributed, never negative.
///
/// All three grids share one shape for the lifetime of the state. The
/// surface used by every neighbour comparison is the *cell height*,
/// `elevation + water`.
#[derive(Clone, Debug, PartialEq)]
pub struct FloodState {
    elevation: Grid2,
    water: Grid2,
    excess: Grid2,
}

impl FloodState {
    /// Build a state from explicit grids.
    ///
    /// Refuses mismatched shapes, non-finite values, and negative water or
    /// excess volume.
    pub fn new(elevation: Grid2, water: Grid2, excess: Grid2) -> Result<Self, GridError> {
        let shape = elevation.shape();
        water.ensure_shape("water", shape)?;
        excess.ensure_shape("excess", shape)?;
        elevation.ensure_finite("elevation")?;
        water.ensure_finite("water")?;
        excess.ensure_finite("excess")?;
        for (name, grid) in [("water", &water), ("excess", &excess)] {
            if let Some(((row, col), value)) = grid.iter_cells().find(|(_, v)| *v < 0.0) {
                return Err(GridError::NegativeVolume {
                    name,
                    row,
                    col,
                    value,
                });
            }
        }
        Ok(Self {
            elevation,
            water,
            excess,
        })
    }

    /// A dry state over `elevation`: zero water, zero excess everywhere.
    pub fn dry(elevation: Grid2) -> Result<Self, GridError> {
        let (rows, cols) = elevation.shape();
        let water = Grid2::zeros(rows, cols)?;
        let excess = Grid2::zeros(rows, cols)?;
        Self::new(elevation, water, excess)
    }

    /// Add `volume` of mobile water at `(row, col)`.
    ///
    /// Repeated injections at one cell accumulate.
    pub fn inject(&mut self, row: usize, col: usize, volume: f64) -> Result<(), GridError> {
        if !self.excess.contains(row, col) {
            let (rows, cols) = self.shape();
            return Err(GridError::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        if !volume.is_finite() {
            return Err(GridError::NonFinite {
                name: "seed volume",
                row,
                col,
                value: volume,
            });
        }
        if volume < 0.0 {
            return Err(GridError::NegativeVolume {
                name: "seed volume",
                row,
                col,
                value: volume,
            });
        }
        self.excess[(row, col)] += volume;
        Ok(())
    }

    /// `(rows, cols)` shared by all three grids.
    pub fn shape(&self) -> (usize, usize) {
        self.elevation.shape()
    }

    /// Ground elevation.
    pub fn elevation(&self) -> &Grid2 {
        &self.elevation
    }

    /// Standing water depth.
    pub fn water(&self) -> &Grid2 {
        &self.water
    }

    /// Mobile excess volume.
    pub fn excess(&self) -> &Grid2 {
        &self.excess
    }

    /// Mutable elevation, for preprocessing and pit leveling.
    pub fn elevation_mut(&mut self) -> &mut Grid2 {
        &mut self.elevation
    }

    /// Mutable standing water.
    pub fn water_mut(&mut self) -> &mut Grid2 {
        &mut self.water
    }

    /// Mutable excess volume.
    pub fn excess_mut(&mut self) -> &mut Grid2 {
        &mut self.excess
    }

    /// Split borrow: elevation read-only, water and excess writable.
    pub fn split_mut(&mut self) -> (&Grid2, &mut Grid2, &mut Grid2) {
        (&self.elevation, &mut self.water, &mut self.excess)
    }

    /// `elevation + water` at `(row, col)`.
    #[inline]
    pub fn cell_height(&self, row: usize, col: usize) -> f64 {
        self.elevation[(row, col)] + self.water[(row, col)]
    }

    /// Cell height for every cell, for renderers.
    pub fn cell_heights(&self) -> Grid2 {
        let mut out = self.elevation.clone();
        for (h, w) in out.as_mut_slice().iter_mut().zip(self.water.as_slice()) {
            *h += *w;
        }
        out
    }

    /// `sum(water) + sum(excess)`.
    pub fn total_volume(&self) -> f64 {
        self.water.sum() + self.excess.sum()
    }

    /// Consume the state, returning `(elevation, water, excess)`.
    pub fn into_parts(self) -> (Grid2, Grid2, Grid2) {
        (self.elevation, self.water, self.excess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<f64>>) -> Grid2 {
        Grid2::from_rows(rows).unwrap()
    }

    #[test]
    fn mismatched_shapes_refused() {
        let elevation = Grid2::zeros(3, 3).unwrap();
        let water = Grid2::zeros(3, 2).unwrap();
        let excess = Grid2::zeros(3, 3).unwrap();
        match FloodState::new(elevation, water, excess) {
            Err(GridError::ShapeMismatch { name: "water", .. }) => {}
            other => panic!("expected water ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn negative_excess_refused() {
        let elevation = Grid2::zeros(2, 2).unwrap();
        let water = Grid2::zeros(2, 2).unwrap();
        let excess = grid(vec![vec![0.0, 0.0], vec![-1.0, 0.0]]);
        match FloodState::new(elevation, water, excess) {
            Err(GridError::NegativeVolume {
                name: "excess",
                row: 1,
                col: 0,
                ..
            }) => {}
            other => panic!("expected NegativeVolume, got {other:?}"),
        }
    }

    #[test]
    fn nan_elevation_refused() {
        let elevation = grid(vec![vec![1.0, f64::NAN]]);
        assert!(matches!(
            FloodState::dry(elevation),
            Err(GridError::NonFinite {
                name: "elevation",
                ..
            })
        ));
    }

    #[test]
    fn inject_accumulates() {
        let mut s = FloodState::dry(Grid2::zeros(3, 3).unwrap()).unwrap();
        s.inject(1, 1, 10.0).unwrap();
        s.inject(1, 1, 2.5).unwrap();
        assert_eq!(s.excess()[(1, 1)], 12.5);
        assert_eq!(s.total_volume(), 12.5);
    }

    #[test]
    fn inject_rejects_bad_input() {
        let mut s = FloodState::dry(Grid2::zeros(3, 3).unwrap()).unwrap();
        assert!(matches!(
            s.inject(3, 0, 1.0),
            Err(GridError::CellOutOfBounds { row: 3, .. })
        ));
        assert!(matches!(
            s.inject(0, 0, -1.0),
            Err(GridError::NegativeVolume { .. })
        ));
        assert!(matches!(
            s.inject(0, 0, f64::INFINITY),
            Err(GridError::NonFinite { .. })
        ));
        assert_eq!(s.total_volume(), 0.0);
    }

    #[test]
    fn cell_height_adds_water_to_ground() {
        let elevation = grid(vec![vec![5.0, 6.0]]);
        let water = grid(vec![vec![1.5, 0.0]]);
        let excess = Grid2::zeros(1, 2).unwrap();
        let s = FloodState::new(elevation, water, excess).unwrap();
        assert_eq!(s.cell_height(0, 0), 6.5);
        assert_eq!(s.cell_height(0, 1), 6.0);
        assert_eq!(s.cell_heights().as_slice(), &[6.5, 6.0]);
    }

    #[test]
    fn split_mut_allows_disjoint_writes() {
        let mut s = FloodState::dry(Grid2::zeros(1, 2).unwrap()).unwrap();
        s.inject(0, 0, 4.0).unwrap();
        let (elevation, water, excess) = s.split_mut();
        assert_eq!(elevation[(0, 0)], 0.0);
        water[(0, 0)] += 1.0;
        excess[(0, 0)] -= 1.0;
        assert_eq!(s.total_volume(), 4.0);
    }
}
