//! Error types for cruraster.
//!
//! Every failure in the conversion pipeline is fatal, so a single enum covers
//! input-shape problems, parse problems and output problems alike.

use thiserror::Error;

/// The main error type for cruraster operations.
#[derive(Error, Debug)]
pub enum CruError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The input does not contain a whole number of grids
    #[error("Invalid line count: expected {expected}, found {actual}")]
    LineCount { expected: String, actual: usize },

    /// A line has the wrong number of characters (newline included)
    #[error("Invalid line width on line {line}: expected {expected}, found {actual}")]
    LineWidth {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A fixed-width field is not an integer
    #[error("Parse error on line {line}, column {column}: invalid field {field:?}")]
    Parse {
        line: usize,
        column: usize,
        field: String,
    },

    /// Grids with mismatched dimensions were combined
    #[error("Grid shape mismatch: expected {expected_rows}x{expected_columns}, found {rows}x{columns}")]
    GridShape {
        expected_rows: usize,
        expected_columns: usize,
        rows: usize,
        columns: usize,
    },

    /// No cell received a valid sample in any time step
    #[error("No valid data: every cell is missing in every time step")]
    NoValidData,

    /// Color ramp construction errors
    #[error("Color scale error: {message}")]
    ColorScale { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CruError
pub type Result<T> = std::result::Result<T, CruError>;
