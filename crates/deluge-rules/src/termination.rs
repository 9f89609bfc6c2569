//! Run termination.

use deluge_core::Grid2;

/// `true` once no cell holds more than `threshold` excess volume.
pub fn end_sim(excess: &Grid2, threshold: f64) -> bool {
    excess.as_slice().iter().all(|&v| v <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_ends_immediately() {
        assert!(end_sim(&Grid2::zeros(4, 4).unwrap(), 0.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        let g = Grid2::from_rows(vec![vec![0.001, 0.0005]]).unwrap();
        assert!(end_sim(&g, 0.001));
        assert!(!end_sim(&g, 0.0009));
    }
}
