//! Dense row-major 2D grid of `f64` values.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A dense `rows x cols` grid of real values stored row-major.
///
/// Cell `(row, col)` lives at flat index `row * cols + col`. The shape is
/// fixed at construction; nothing in the crate resizes a grid afterwards.
///
/// Indexing with `grid[(row, col)]` panics on out-of-range coordinates,
/// which are programming errors. Use [`get`](Grid2::get) when the
/// coordinate comes from outside.
///
/// Serialises as nested rows (`[[f64; cols]; rows]`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Grid2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid2 {
    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Create a zero-filled grid.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, 0.0)
    }

    /// Wrap flat row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if data.len() != rows * cols {
            return Err(GridError::DataLength {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid from nested rows, rejecting ragged input.
    ///
    /// # Examples
    ///
    /// ```
    /// use deluge_core::Grid2;
    ///
    /// let g = Grid2::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(g.shape(), (2, 2));
    /// assert_eq!(g[(1, 0)], 3.0);
    /// assert!(Grid2::from_rows(vec![vec![1.0], vec![2.0, 3.0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(GridError::Empty);
        }
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(GridError::Ragged {
                    row: r,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `(row, col)` lies inside the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Flat row-major index of `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `(row, col)` is out of range.
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Inverse of [`flat_index`](Grid2::flat_index).
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Checked read.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if self.contains(row, col) {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Checked write; reports the coordinate when it is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), GridError> {
        if !self.contains(row, col) {
            return Err(GridError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable flat row-major view.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest cell value.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest cell value.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Iterate `((row, col), value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i / cols, i % cols), v))
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Reject NaN and infinities, naming the grid in the error.
    pub fn ensure_finite(&self, name: &'static str) -> Result<(), GridError> {
        match self.iter_cells().find(|(_, v)| !v.is_finite()) {
            Some(((row, col), value)) => Err(GridError::NonFinite {
                name,
                row,
                col,
                value,
            }),
            None => Ok(()),
        }
    }

    /// Require this grid to have `expected` shape.
    pub fn ensure_shape(&self, name: &'static str, expected: (usize, usize)) -> Result<(), GridError> {
        if self.shape() != expected {
            return Err(GridError::ShapeMismatch {
                name,
                expected,
                got: self.shape(),
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Grid2 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Grid2 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid2 {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

impl From<Grid2> for Vec<Vec<f64>> {
    fn from(grid: Grid2) -> Self {
        grid.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(Grid2::zeros(0, 3), Err(GridError::Empty));
        assert_eq!(Grid2::zeros(3, 0), Err(GridError::Empty));
        assert_eq!(Grid2::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid2::from_rows(vec![vec![]]), Err(GridError::Empty));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid2::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(matches!(
            Grid2::from_vec(2, 2, vec![0.0; 3]),
            Err(GridError::DataLength {
                expected: 4,
                got: 3
            })
        ));
    }

    #[test]
    fn row_major_layout() {
        let g = Grid2::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.flat_index(1, 2), 5);
        assert_eq!(g.coords(4), (1, 1));
        assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(g[(1, 0)], 3.0);
    }

    #[test]
    fn checked_access() {
        let mut g = Grid2::zeros(2, 2).unwrap();
        assert_eq!(g.get(2, 0), None);
        assert!(g.set(0, 2, 1.0).is_err());
        g.set(1, 1, 7.5).unwrap();
        assert_eq!(g.get(1, 1), Some(7.5));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn flat_index_column_overflow_panics() {
        // (0, 5) would alias (1, 2) on a 2x3 grid.
        let g = Grid2::zeros(2, 3).unwrap();
        let _ = g.flat_index(0, 5);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_range_panics() {
        let g = Grid2::zeros(2, 2).unwrap();
        let _ = g[(0, 2)];
    }

    #[test]
    fn reductions() {
        let g = Grid2::from_rows(vec![vec![1.0, -2.0], vec![4.0, 0.5]]).unwrap();
        assert_eq!(g.sum(), 3.5);
        assert_eq!(g.max(), 4.0);
        assert_eq!(g.min(), -2.0);
    }

    #[test]
    fn ensure_finite_reports_first_bad_cell() {
        let g = Grid2::from_rows(vec![vec![1.0, 2.0], vec![f64::NAN, f64::INFINITY]]).unwrap();
        match g.ensure_finite("elevation") {
            Err(GridError::NonFinite { name, row, col, .. }) => {
                assert_eq!((name, row, col), ("elevation", 1, 0));
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }
    }

    #[test]
    fn ensure_shape_names_grid() {
        let g = Grid2::zeros(2, 3).unwrap();
        assert!(g.ensure_shape("mask", (2, 3)).is_ok());
        assert_eq!(
            g.ensure_shape("mask", (3, 3)),
            Err(GridError::ShapeMismatch {
                name: "mask",
                expected: (3, 3),
                got: (2, 3)
            })
        );
    }

    #[test]
    fn serde_uses_nested_rows() {
        let g = Grid2::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
        let back: Grid2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(serde_json::from_str::<Grid2>("[[1.0],[2.0,3.0]]").is_err());
    }

    proptest! {
        #[test]
        fn flat_index_and_coords_agree(rows in 1usize..20, cols in 1usize..20, seed in 0usize..400) {
            let g = Grid2::zeros(rows, cols).unwrap();
            let i = seed % g.len();
            let (r, c) = g.coords(i);
            prop_assert!(g.contains(r, c));
            prop_assert_eq!(g.flat_index(r, c), i);
        }
    }
}
