//! Setup-time error type for grids and flood state.

use thiserror::Error;

/// Errors arising from grid construction or state setup.
///
/// All of these are detected before the first simulation step; a run
/// never starts from a state that produced one of them.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// Attempted to construct a grid with zero rows or zero columns.
    #[error("grid must have at least one row and one column")]
    Empty,
    /// A row of a nested-vector grid has the wrong length.
    #[error("ragged grid: row {row} has {got} columns, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },
    /// Flat data length does not match `rows * cols`.
    #[error("grid data has {got} values, expected {expected}")]
    DataLength {
        /// `rows * cols`.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Two grids that must share a shape do not.
    #[error("{name} grid is {got:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Which grid is out of shape.
        name: &'static str,
        /// The reference `(rows, cols)`.
        expected: (usize, usize),
        /// The offending `(rows, cols)`.
        got: (usize, usize),
    },
    /// A grid holds NaN or an infinity.
    #[error("{name} grid has non-finite value {value} at ({row}, {col})")]
    NonFinite {
        /// Which grid.
        name: &'static str,
        /// Row of the first offending cell.
        row: usize,
        /// Column of the first offending cell.
        col: usize,
        /// The offending value.
        value: f64,
    },
    /// A coordinate lies outside the grid.
    #[error("cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    CellOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },
    /// A water quantity is negative.
    #[error("{name} at ({row}, {col}) is negative: {value}")]
    NegativeVolume {
        /// Which quantity.
        name: &'static str,
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_cell() {
        let err = GridError::CellOutOfBounds {
            row: 9,
            col: 2,
            rows: 9,
            cols: 9,
        };
        assert_eq!(err.to_string(), "cell (9, 2) out of bounds for 9x9 grid");

        let err = GridError::ShapeMismatch {
            name: "water",
            expected: (3, 3),
            got: (3, 4),
        };
        assert!(err.to_string().contains("water grid is (3, 4)"));
    }
}
