//! `deluge validate`: load a scenario and report what it describes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deluge::engine::FloodConfig;
use tracing::info;

/// Arguments of `deluge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Scenario file (JSON)
    pub scenario: PathBuf,
}

/// Execute `deluge validate`.
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = FloodConfig::from_file(&args.scenario)
        .with_context(|| format!("validation failed for {}", args.scenario.display()))?;
    let (rows, cols) = config.elevation.shape();
    info!(
        rows,
        cols,
        seeds = config.seeds.len(),
        volume = config.seeded_volume(),
        masked = config.boundary_mask.is_some(),
        "scenario is valid"
    );
    println!(
        "{}: {rows}x{cols} grid, {} seed(s), {} units of water",
        args.scenario.display(),
        config.seeds.len(),
        config.seeded_volume()
    );
    Ok(())
}
