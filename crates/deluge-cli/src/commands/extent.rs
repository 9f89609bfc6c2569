//! `deluge extent`: real-world size of a grid laid over a bounding box.

use anyhow::{Context, Result};
use clap::Args;
use deluge::geo::GeoExtent;

/// Arguments of `deluge extent`.
#[derive(Debug, Args)]
pub struct ExtentArgs {
    /// Northern edge, degrees latitude
    #[arg(long, allow_negative_numbers = true)]
    pub north: f64,

    /// Southern edge, degrees latitude
    #[arg(long, allow_negative_numbers = true)]
    pub south: f64,

    /// Eastern edge, degrees longitude
    #[arg(long, allow_negative_numbers = true)]
    pub east: f64,

    /// Western edge, degrees longitude
    #[arg(long, allow_negative_numbers = true)]
    pub west: f64,

    /// Grid rows
    #[arg(long)]
    pub rows: usize,

    /// Grid columns
    #[arg(long)]
    pub cols: usize,
}

fn describe(args: &ExtentArgs) -> Result<String> {
    let extent = GeoExtent::new(args.north, args.south, args.east, args.west)
        .context("invalid bounding box")?;
    let (cell_h, cell_w) = extent
        .cell_size_km(args.rows, args.cols)
        .context("invalid grid size")?;
    let (lat, lon) = extent.center();
    Ok(format!(
        "extent: {:.4} km x {:.4} km (N-S x E-W), centred on {lat:.5}, {lon:.5}\n\
         cell:   {:.2} m x {:.2} m over {}x{} cells",
        extent.height_km(),
        extent.width_km(),
        cell_h * 1000.0,
        cell_w * 1000.0,
        args.rows,
        args.cols,
    ))
}

/// Execute `deluge extent`.
pub fn execute(args: ExtentArgs) -> Result<()> {
    println!("{}", describe(&args)?);
    Ok(())
}
