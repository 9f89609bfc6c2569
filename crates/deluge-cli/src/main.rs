//! `deluge` command-line tool.
//!
//! Runs flood scenarios from JSON files, checks them, and sizes grids
//! over a geographic bounding box.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Cellular-automaton flood redistribution over elevation grids.
#[derive(Debug, Parser)]
#[command(name = "deluge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cellular-automaton flood redistribution over elevation grids", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a scenario to equilibrium
    Run(commands::run::RunArgs),
    /// Load and validate a scenario without running it
    Validate(commands::validate::ValidateArgs),
    /// Print the real-world size of a grid over a bounding box
    Extent(commands::extent::ExtentArgs),
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Extent(args) => commands::extent::execute(args),
    }
}
