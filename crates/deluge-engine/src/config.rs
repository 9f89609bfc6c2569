//! Run configuration, validation, and error types.
//!
//! [`FloodConfig`] is the builder input for a [`FloodWorld`](crate::FloodWorld).
//! [`validate()`](FloodConfig::validate) checks every structural invariant
//! up front so that stepping never has to.

use deluge_core::{Grid2, GridError};
use deluge_rules::{PartitionCoefficients, BOUNDARY_RAISE};
use serde::{Deserialize, Serialize};

// ── UpdateOrder ────────────────────────────────────────────────────

/// How the cells of one step see each other's updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Row-major scan, each transfer applied before the next cell is
    /// classified. Order-dependent and bit-reproducible.
    #[default]
    InPlace,
    /// Every cell classified against the start-of-step state; transfers
    /// are accumulated and committed together at step end.
    Buffered,
}

// ── SimParams ──────────────────────────────────────────────────────

/// Numeric parameters of a run. Every field has a default, so a scenario
/// file may give any subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Per-step rise cap of the rising rule. Default: 1.0.
    pub increment_constant: f64,
    /// Excess volume at or below which a cell counts as settled. Default: 1e-3.
    pub threshold: f64,
    /// Step cap for [`FloodWorld::run`](crate::FloodWorld::run). Default: 10 000.
    pub max_steps: u64,
    /// Update order. Default: [`UpdateOrder::InPlace`].
    pub update_order: UpdateOrder,
    /// Partitioning surface-rise coefficients. Default: `a = 0.09, b = 0.25`.
    pub partition: PartitionCoefficients,
    /// Elevation added to masked-out cells. Default: 100.
    pub boundary_raise: f64,
    /// Keep a water/excess snapshot after every step. Default: false.
    pub record_trajectory: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            increment_constant: 1.0,
            threshold: 1e-3,
            max_steps: 10_000,
            update_order: UpdateOrder::InPlace,
            partition: PartitionCoefficients::default(),
            boundary_raise: BOUNDARY_RAISE,
            record_trajectory: false,
        }
    }
}

/// Volume injected as excess at one cell before the first step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloodSeed {
    /// Row of the source cell.
    pub row: usize,
    /// Column of the source cell.
    pub col: usize,
    /// Volume to inject.
    pub volume: f64,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`FloodConfig::validate()`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A grid or seed failed a structural check.
    #[error("grid: {0}")]
    Grid(#[from] GridError),
    /// `increment_constant` is NaN, infinite, zero, or negative.
    #[error("increment_constant must be finite and positive, got {value}")]
    InvalidIncrement {
        /// The invalid value.
        value: f64,
    },
    /// `threshold` is NaN, infinite, or negative.
    #[error("threshold must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// The invalid value.
        value: f64,
    },
    /// `max_steps` is zero.
    #[error("max_steps must be at least 1")]
    ZeroStepLimit,
    /// A partition coefficient is NaN, infinite, zero, or negative.
    #[error("partition coefficients must be finite and positive, got a={a} b={b}")]
    InvalidPartition {
        /// Multiplier.
        a: f64,
        /// Exponent.
        b: f64,
    },
    /// `boundary_raise` is NaN, infinite, or negative.
    #[error("boundary_raise must be finite and non-negative, got {value}")]
    InvalidBoundaryRaise {
        /// The invalid value.
        value: f64,
    },
}

// ── FloodConfig ────────────────────────────────────────────────────

/// Complete configuration for one flood run.
///
/// Serialises as a scenario file (see [`scenario`](crate::scenario)).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloodConfig {
    /// Ground elevation, before the boundary raise.
    pub elevation: Grid2,
    /// Domain mask; `0` marks cells outside the modelled area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_mask: Option<Grid2>,
    /// Source cells. Seeds on the same cell accumulate.
    #[serde(default)]
    pub seeds: Vec<FloodSeed>,
    /// Numeric parameters.
    #[serde(default)]
    pub params: SimParams,
}

impl FloodConfig {
    /// A config with default parameters and no mask.
    pub fn new(elevation: Grid2, seeds: Vec<FloodSeed>) -> Self {
        Self {
            elevation,
            boundary_mask: None,
            seeds,
            params: SimParams::default(),
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Elevation must be finite everywhere.
        self.elevation.ensure_finite("elevation")?;

        // 2. Mask, if present, matches elevation and is finite.
        if let Some(mask) = &self.boundary_mask {
            mask.ensure_shape("boundary mask", self.elevation.shape())?;
            mask.ensure_finite("boundary mask")?;
        }

        // 3. Seeds land on the grid with finite, non-negative volume.
        let (rows, cols) = self.elevation.shape();
        for seed in &self.seeds {
            let FloodSeed { row, col, volume } = *seed;
            if !self.elevation.contains(row, col) {
                return Err(GridError::CellOutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                }
                .into());
            }
            if !volume.is_finite() {
                return Err(GridError::NonFinite {
                    name: "seed volume",
                    row,
                    col,
                    value: volume,
                }
                .into());
            }
            if volume < 0.0 {
                return Err(GridError::NegativeVolume {
                    name: "seed volume",
                    row,
                    col,
                    value: volume,
                }
                .into());
            }
        }

        // 4. Parameters.
        let p = &self.params;
        if !p.increment_constant.is_finite() || p.increment_constant <= 0.0 {
            return Err(ConfigError::InvalidIncrement {
                value: p.increment_constant,
            });
        }
        if !p.threshold.is_finite() || p.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold { value: p.threshold });
        }
        if p.max_steps == 0 {
            return Err(ConfigError::ZeroStepLimit);
        }
        let PartitionCoefficients { a, b } = p.partition;
        if !a.is_finite() || !b.is_finite() || a <= 0.0 || b <= 0.0 {
            return Err(ConfigError::InvalidPartition { a, b });
        }
        if !p.boundary_raise.is_finite() || p.boundary_raise < 0.0 {
            return Err(ConfigError::InvalidBoundaryRaise {
                value: p.boundary_raise,
            });
        }
        Ok(())
    }

    /// Sum of all seed volumes.
    pub fn seeded_volume(&self) -> f64 {
        self.seeds.iter().map(|s| s.volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FloodConfig {
        FloodConfig::new(
            Grid2::filled(3, 3, 1.0).unwrap(),
            vec![FloodSeed {
                row: 1,
                col: 1,
                volume: 5.0,
            }],
        )
    }

    #[test]
    fn default_config_validates() {
        assert!(valid().validate().is_ok());
        assert_eq!(valid().seeded_volume(), 5.0);
    }

    #[test]
    fn mask_shape_mismatch_rejected() {
        let mut c = valid();
        c.boundary_mask = Some(Grid2::zeros(3, 4).unwrap());
        match c.validate() {
            Err(ConfigError::Grid(GridError::ShapeMismatch { name, .. })) => {
                assert_eq!(name, "boundary mask");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn seed_out_of_bounds_rejected() {
        let mut c = valid();
        c.seeds[0].row = 3;
        match c.validate() {
            Err(ConfigError::Grid(GridError::CellOutOfBounds { row: 3, .. })) => {}
            other => panic!("expected CellOutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn negative_seed_rejected() {
        let mut c = valid();
        c.seeds[0].volume = -1.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Grid(GridError::NegativeVolume { .. }))
        ));
    }

    #[test]
    fn bad_params_rejected() {
        let cases: [(fn(&mut SimParams), &str); 5] = [
            (|p| p.increment_constant = 0.0, "increment"),
            (|p| p.threshold = f64::NAN, "threshold"),
            (|p| p.max_steps = 0, "max_steps"),
            (|p| p.partition.b = -0.25, "partition"),
            (|p| p.boundary_raise = f64::INFINITY, "boundary_raise"),
        ];
        for (mutate, label) in cases {
            let mut c = valid();
            mutate(&mut c.params);
            let err = c.validate().unwrap_err();
            assert!(err.to_string().contains(label), "{label}: {err}");
        }
    }

    #[test]
    fn zero_threshold_allowed() {
        let mut c = valid();
        c.params.threshold = 0.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::ZeroStepLimit.to_string(),
            "max_steps must be at least 1"
        );
        let wrapped: ConfigError = GridError::Empty.into();
        assert!(wrapped.to_string().starts_with("grid: "));
    }
}
