//! One-time elevation adjustment before the first step.

use deluge_core::{Grid2, GridError};

/// Height added to every cell outside the modelled domain.
pub const BOUNDARY_RAISE: f64 = 100.0;

/// Raise every cell whose mask value is `0` by `raise`, turning it into a
/// wall. Returns how many cells were raised.
///
/// Must run exactly once per run; the engine guarantees this.
///
/// # Examples
///
/// ```
/// use deluge_core::Grid2;
/// use deluge_rules::{raise_boundary, BOUNDARY_RAISE};
///
/// let mut elevation = Grid2::filled(1, 3, 2.0).unwrap();
/// let mask = Grid2::from_rows(vec![vec![0.0, 1.0, 1.0]]).unwrap();
/// assert_eq!(raise_boundary(&mut elevation, &mask, BOUNDARY_RAISE), Ok(1));
/// assert_eq!(elevation.as_slice(), &[102.0, 2.0, 2.0]);
/// ```
pub fn raise_boundary(
    elevation: &mut Grid2,
    mask: &Grid2,
    raise: f64,
) -> Result<usize, GridError> {
    mask.ensure_shape("boundary mask", elevation.shape())?;
    let mut raised = 0;
    for (h, &m) in elevation.as_mut_slice().iter_mut().zip(mask.as_slice()) {
        if m == 0.0 {
            *h += raise;
            raised += 1;
        }
    }
    Ok(raised)
}
