//! JSON scenario files.
//!
//! A scenario is a serialised [`FloodConfig`]:
//!
//! ```json
//! {
//!   "elevation": [[2540, 2548], [2543, 2522]],
//!   "boundary_mask": [[0, 1], [1, 1]],
//!   "seeds": [{ "row": 1, "col": 1, "volume": 35.0 }],
//!   "params": { "increment_constant": 0.5, "update_order": "buffered" }
//! }
//! ```
//!
//! `boundary_mask` and every `params` field are optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, FloodConfig};

/// Errors from loading or saving a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The file could not be read or written.
    #[error("failed to access scenario {path:?}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid scenario document.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    /// The scenario parsed but describes an invalid run.
    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),
}

impl FloodConfig {
    /// Parse and validate a scenario document.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let config: FloodConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a scenario file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            rows = config.elevation.rows(),
            cols = config.elevation.cols(),
            seeds = config.seeds.len(),
            "scenario loaded"
        );
        Ok(config)
    }

    /// Pretty-printed scenario document.
    pub fn to_json_string(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the scenario to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
