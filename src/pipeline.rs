//! The conversion pipeline: read, aggregate, scale, rasterize.
//!
//! Each stage consumes the previous one's output in full. Nothing is written
//! to the output until the image has been encoded, so a failed run leaves no
//! partial image behind.

use image::RgbaImage;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::time::Instant;
use tracing::info;

use crate::aggregate::{aggregate, MeanGrid};
use crate::colormaps::{ColorScale, CutPoints};
use crate::config::{Config, IoPaths};
use crate::error::Result;
use crate::logging::{
    generate_run_id, log_grid_stats, log_operation_end, log_operation_start, log_timed_operation,
};
use crate::reader::{read_grids, GridShape};
use crate::render::{encode_image, rasterize};

/// What the aggregated data looks like, without rendering it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub time_steps: usize,
    pub rows: usize,
    pub columns: usize,
    pub valid_cells: usize,
    pub min: f64,
    pub max: f64,
    pub cut_points: CutPoints,
}

/// A finished conversion
#[derive(Debug)]
pub struct Conversion {
    pub summary: GridSummary,
    pub image: RgbaImage,
}

/// Mean grid and color scale of the input, before rasterization
struct Analysis {
    time_steps: usize,
    means: MeanGrid,
    scale: ColorScale,
}

fn analyze(
    run_id: &str,
    input: &str,
    shape: GridShape,
    time_steps: Option<usize>,
) -> Result<Analysis> {
    let grids = log_timed_operation(run_id, "read", || read_grids(input, shape, time_steps))?;
    let means = log_timed_operation(run_id, "aggregate", || aggregate(&grids, shape))?;
    let scale = log_timed_operation(run_id, "scale", || {
        ColorScale::from_values(&means.valid_values())
    })?;

    log_grid_stats(
        run_id,
        grids.len(),
        shape.cells(),
        means.valid_count(),
        scale.cut_points(),
    );

    Ok(Analysis {
        time_steps: grids.len(),
        means,
        scale,
    })
}

fn summarize_analysis(analysis: &Analysis) -> GridSummary {
    let values = analysis.means.valid_values();
    GridSummary {
        time_steps: analysis.time_steps,
        rows: analysis.means.rows(),
        columns: analysis.means.columns(),
        valid_cells: values.len(),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        cut_points: *analysis.scale.cut_points(),
    }
}

/// Read, aggregate and build the color scale without rendering
pub fn summarize(input: &str, shape: GridShape, time_steps: Option<usize>) -> Result<GridSummary> {
    let run_id = generate_run_id();
    let analysis = analyze(&run_id, input, shape, time_steps)?;
    Ok(summarize_analysis(&analysis))
}

/// Convert CRU ASCII text into a color-mapped raster
pub fn convert(input: &str, shape: GridShape, config: &Config) -> Result<Conversion> {
    let run_id = generate_run_id();
    let analysis = analyze(&run_id, input, shape, config.grid.time_steps)?;
    let image = log_timed_operation(&run_id, "rasterize", || {
        rasterize(&analysis.means, &analysis.scale, config.output.background)
    })?;

    Ok(Conversion {
        summary: summarize_analysis(&analysis),
        image,
    })
}

/// Run a full conversion of the half-degree grid from the configured input
/// to the configured output.
pub fn run(config: &Config, paths: &IoPaths) -> Result<()> {
    let start = Instant::now();
    let source = paths
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    log_operation_start("convert", Some(&source));

    let result = run_inner(config, paths);
    log_operation_end("convert", start, result.is_ok());
    result
}

fn run_inner(config: &Config, paths: &IoPaths) -> Result<()> {
    let format = config.output_format()?;

    let mut input = String::new();
    match &paths.input {
        Some(path) => {
            File::open(path)?.read_to_string(&mut input)?;
        }
        None => {
            io::stdin().lock().read_to_string(&mut input)?;
        }
    }

    let conversion = convert(&input, GridShape::HALF_DEGREE, config)?;
    let bytes = encode_image(&conversion.image, format)?;

    match &paths.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(&bytes)?;
            file.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    info!(
        bytes = bytes.len(),
        format = ?format,
        time_steps = conversion.summary.time_steps,
        "Image written"
    );

    Ok(())
}
