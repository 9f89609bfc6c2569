//! `deluge run`: step a scenario to equilibrium and write the flood map.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use deluge::engine::{FloodConfig, FloodWorld, SimParams, UpdateOrder};
use tracing::info;

/// Arguments of `deluge run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scenario file (JSON)
    pub scenario: PathBuf,

    /// Write the final water depth grid here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Record every step and write the snapshots here
    #[arg(long)]
    pub trajectory: Option<PathBuf>,

    /// Override the step cap
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Override the settling threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the rising increment
    #[arg(long)]
    pub increment: Option<f64>,

    /// Classify every cell against the start-of-step state
    #[arg(long)]
    pub buffered: bool,
}

/// Fold command-line overrides into the scenario's parameters.
fn apply_overrides(params: &mut SimParams, args: &RunArgs) {
    if let Some(n) = args.max_steps {
        params.max_steps = n;
    }
    if let Some(t) = args.threshold {
        params.threshold = t;
    }
    if let Some(i) = args.increment {
        params.increment_constant = i;
    }
    if args.buffered {
        params.update_order = UpdateOrder::Buffered;
    }
    if args.trajectory.is_some() {
        params.record_trajectory = true;
    }
}

fn write_json(path: &Path, json: &str, what: &str) -> Result<()> {
    fs::write(path, json)
        .with_context(|| format!("failed to write {what} to {}", path.display()))?;
    info!(path = %path.display(), "{what} written");
    Ok(())
}

/// Execute `deluge run`.
pub fn execute(args: RunArgs) -> Result<()> {
    let mut config = FloodConfig::from_file(&args.scenario)
        .with_context(|| format!("failed to load {}", args.scenario.display()))?;
    apply_overrides(&mut config.params, &args);
    let seeded = config.seeded_volume();

    let mut world = FloodWorld::new(config).context("invalid run parameters")?;
    let outcome = world.run();

    let state = world.state();
    info!(
        converged = outcome.converged(),
        steps = outcome.steps(),
        seeded,
        water = state.water().sum(),
        excess = state.excess().sum(),
        "run finished"
    );

    let water = serde_json::to_string_pretty(world.water())?;
    match &args.output {
        Some(path) => write_json(path, &water, "water grid")?,
        None => println!("{water}"),
    }

    if let Some(path) = &args.trajectory {
        let snapshots = serde_json::to_string_pretty(world.trajectory())?;
        write_json(path, &snapshots, "trajectory")?;
    }
    Ok(())
}
