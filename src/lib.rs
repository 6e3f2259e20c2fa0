//! # cruraster
//!
//! Convert CRU TS fixed-width ASCII climate grids into color-mapped raster images.
//!
//! The input is a stack of 0.5 degree global grids (720 x 360 cells), one per
//! month. Every cell is averaged over the whole series, the distribution of
//! the averages picks a purple -> green -> red color scale, and the result is
//! painted north-up into an RGBA TIFF.
//!
//! ## Pipeline
//!
//! - **Reader** ([`reader`]): validates the fixed-width layout and parses one grid per time step
//! - **Aggregator** ([`aggregate`]): per-cell mean over the valid readings
//! - **Scale builder** ([`colormaps`]): percentile cut points and the two color ramps
//! - **Rasterizer** ([`render`]): paints and encodes the image
//!
//! [`pipeline`] wires the stages together.

pub mod aggregate;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reader;
pub mod render;

pub use aggregate::{aggregate, Accumulator, MeanGrid};
pub use colormaps::{ColorScale, Colormap, CutPoints, Ramp};
pub use config::{Config, IoPaths};
pub use error::{CruError, Result};
pub use logging::{
    generate_run_id, init_tracing, log_error, log_grid_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use pipeline::{convert, run, summarize, Conversion, GridSummary};
pub use reader::{read_grids, read_grids_from, GridShape, RawGrid, NA_SENTINEL};
pub use render::{encode_image, rasterize, OutputFormat, DEFAULT_BACKGROUND};
