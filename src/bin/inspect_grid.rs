use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cruraster::{summarize, CutPoints, GridShape};

/// Print the statistics cruraster would derive from a CRU ASCII grid file
#[derive(Parser, Debug)]
#[command(name = "inspect_grid")]
struct Args {
    /// Path to the CRU ASCII grid file
    file: PathBuf,

    /// Exact number of time steps the file must contain
    #[arg(short, long)]
    time_steps: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let summary = summarize(&input, GridShape::HALF_DEGREE, args.time_steps)
        .with_context(|| format!("failed to analyze {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Inspecting CRU grid file: {}", args.file.display());

    println!("\n=== GRID ===");
    println!("  time steps:  {}", summary.time_steps);
    println!("  dimensions:  {} x {}", summary.columns, summary.rows);
    let total = summary.columns * summary.rows;
    println!(
        "  valid cells: {} of {} ({:.1}%)",
        summary.valid_cells,
        total,
        100.0 * summary.valid_cells as f64 / total as f64
    );

    println!("\n=== MEAN VALUES ===");
    println!("  min: {:.3}", summary.min);
    println!("  max: {:.3}", summary.max);

    println!("\n=== CUT POINTS ===");
    print_cut_points(&summary.cut_points);

    Ok(())
}

fn print_cut_points(cuts: &CutPoints) {
    let labels = ["p05", "p45", "p55", "p75", "p95"];
    for (label, value) in labels.iter().zip(cuts.as_array()) {
        println!("  {}: {:.3}", label, value);
    }
}
