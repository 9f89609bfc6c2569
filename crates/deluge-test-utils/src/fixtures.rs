//! Standard elevation grids.
//!
//! - [`reference_dem_9x9`]: surveyed 9×9 elevation sample, flooded at
//!   [`REFERENCE_SEED`] with [`REFERENCE_VOLUME`].
//! - [`flat_grid`]: uniform elevation, pure spreading.
//! - [`pit_grid`]: 3×3 with a strict central pit.
//! - [`walled_bowl`]: flat floor with a mask marking the outer ring as
//!   outside the domain.
//! - [`terraced_grid`]: deterministic pseudo-random terrain for benches.

use deluge_core::Grid2;

/// Seed cell of the reference scenario.
pub const REFERENCE_SEED: (usize, usize) = (8, 4);

/// Seed volume of the reference scenario.
pub const REFERENCE_VOLUME: f64 = 35.0;

const REFERENCE_DEM: [[f64; 9]; 9] = [
    [2540.0, 2548.0, 2525.0, 2530.0, 2530.0, 2534.0, 2512.0, 2522.0, 2538.0],
    [2543.0, 2522.0, 2530.0, 2530.0, 2521.0, 2520.0, 2527.0, 2509.0, 2519.0],
    [2547.0, 2533.0, 2533.0, 2523.0, 2523.0, 2536.0, 2507.0, 2510.0, 2527.0],
    [2509.0, 2529.0, 2509.0, 2530.0, 2502.0, 2514.0, 2527.0, 2510.0, 2522.0],
    [2533.0, 2525.0, 2517.0, 2532.0, 2541.0, 2517.0, 2501.0, 2503.0, 2515.0],
    [2529.0, 2548.0, 2535.0, 2528.0, 2520.0, 2519.0, 2512.0, 2525.0, 2506.0],
    [2529.0, 2500.0, 2533.0, 2506.0, 2549.0, 2523.0, 2546.0, 2509.0, 2514.0],
    [2513.0, 2508.0, 2518.0, 2503.0, 2526.0, 2508.0, 2530.0, 2541.0, 2511.0],
    [2539.0, 2549.0, 2506.0, 2541.0, 2507.0, 2522.0, 2503.0, 2543.0, 2547.0],
];

/// The surveyed 9×9 elevation sample.
pub fn reference_dem_9x9() -> Grid2 {
    let data = REFERENCE_DEM.iter().flatten().copied().collect();
    Grid2::from_vec(9, 9, data).expect("reference DEM is 9x9")
}

/// Uniform elevation.
pub fn flat_grid(rows: usize, cols: usize, elevation: f64) -> Grid2 {
    Grid2::filled(rows, cols, elevation).expect("non-empty grid")
}

/// 3×3 grid whose centre (`center`) sits below its four orthogonal
/// neighbours (5, 6, 7, 8 for up, left, right, down); corners at 20.
pub fn pit_grid(center: f64) -> Grid2 {
    Grid2::from_rows(vec![
        vec![20.0, 5.0, 20.0],
        vec![6.0, center, 7.0],
        vec![20.0, 8.0, 20.0],
    ])
    .expect("3x3 pit")
}

/// `size x size` floor at `floor` plus a mask with `0` on the outer ring.
pub fn walled_bowl(size: usize, floor: f64) -> (Grid2, Grid2) {
    let elevation = flat_grid(size, size, floor);
    let mut mask = flat_grid(size, size, 1.0);
    for r in 0..size {
        for c in 0..size {
            if r == 0 || c == 0 || r + 1 == size || c + 1 == size {
                mask[(r, c)] = 0.0;
            }
        }
    }
    (elevation, mask)
}

/// Deterministic terrain with plateaus and ties, for benches and larger
/// property runs.
pub fn terraced_grid(rows: usize, cols: usize) -> Grid2 {
    let data = (0..rows * cols)
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let ridge = ((r * 7 + c * 13) % 11) as f64;
            let slope = (r + c) as f64 * 0.5;
            (ridge + slope).floor()
        })
        .collect();
    Grid2::from_vec(rows, cols, data).expect("non-empty grid")
}
