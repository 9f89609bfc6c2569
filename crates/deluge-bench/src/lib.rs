//! Benchmark profiles for the deluge flood automaton.
//!
//! - [`reference_profile`]: the surveyed 9x9 DEM with its standard seed
//! - [`terraced_profile`]: square terraced terrain flooded at the centre

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use deluge_engine::{FloodConfig, FloodSeed, UpdateOrder};
use deluge_test_utils::fixtures::{
    reference_dem_9x9, terraced_grid, REFERENCE_SEED, REFERENCE_VOLUME,
};

/// The reference 9x9 scenario under `order`.
pub fn reference_profile(order: UpdateOrder) -> FloodConfig {
    let (row, col) = REFERENCE_SEED;
    let mut config = FloodConfig::new(
        reference_dem_9x9(),
        vec![FloodSeed {
            row,
            col,
            volume: REFERENCE_VOLUME,
        }],
    );
    config.params.update_order = order;
    config
}

/// `size x size` terraced terrain with `volume` seeded at the centre cell.
///
/// The step cap is left at its default; benches that step a fixed number
/// of times never reach it.
pub fn terraced_profile(size: usize, volume: f64, order: UpdateOrder) -> FloodConfig {
    let mut config = FloodConfig::new(
        terraced_grid(size, size),
        vec![FloodSeed {
            row: size / 2,
            col: size / 2,
            volume,
        }],
    );
    config.params.update_order = order;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use deluge_engine::FloodWorld;

    #[test]
    fn profiles_validate() {
        for order in [UpdateOrder::InPlace, UpdateOrder::Buffered] {
            assert!(reference_profile(order).validate().is_ok());
            let config = terraced_profile(100, 5_000.0, order);
            assert_eq!(config.elevation.shape(), (100, 100));
            assert!(FloodWorld::new(config).is_ok());
        }
    }
}
