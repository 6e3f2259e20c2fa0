//! cruraster - convert CRU ASCII climate grids into color-mapped images
//!
//! Reads the grid text from a file or stdin and writes the image to a file or
//! stdout. Any malformed input aborts with a non-zero exit status before a
//! single image byte is written.

use std::process::ExitCode;
use tracing::info;

use cruraster::{init_tracing, log_error, pipeline, Config};

fn main() -> ExitCode {
    // Load and validate configuration
    let loaded = Config::load().and_then(|(config, paths)| {
        config.validate()?;
        Ok((config, paths))
    });

    let (config, paths) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing("info");
            log_error(&e, "configuration");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);

    info!("Starting cruraster v{}", env!("CARGO_PKG_VERSION"));

    match pipeline::run(&config, &paths) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "conversion");
            ExitCode::FAILURE
        }
    }
}
