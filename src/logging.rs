//! Logging utilities for cruraster.
//!
//! Logs are structured `tracing` events written to stderr, since stdout
//! carries the image bytes.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::colormaps::CutPoints;
use crate::error::CruError;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Run one pipeline stage, logging its duration under the run id
pub fn log_timed_operation<F, R>(run_id: &str, operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, run_id = run_id, "Starting stage");

    let result = f();

    debug!(
        operation = operation,
        run_id = run_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Stage completed"
    );

    result
}

/// Log what the aggregated grid looks like before it is rendered
pub fn log_grid_stats(
    run_id: &str,
    time_steps: usize,
    total_cells: usize,
    valid_cells: usize,
    cuts: &CutPoints,
) {
    info!(
        operation = "aggregate",
        run_id = run_id,
        time_steps = time_steps,
        total_cells = total_cells,
        valid_cells = valid_cells,
        p05 = cuts.p05,
        p45 = cuts.p45,
        p55 = cuts.p55,
        p75 = cuts.p75,
        p95 = cuts.p95,
        "Grid statistics"
    );
}

/// Log an error with context
pub fn log_error(error: &CruError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

/// Generate a unique id for one conversion run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
