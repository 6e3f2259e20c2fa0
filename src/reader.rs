//! Fixed-width CRU ASCII grid reader.
//!
//! A CRU TS ASCII file is a stack of grids, one per time step. Each grid has
//! `rows` lines of `columns` right-aligned integer fields, every field exactly
//! `field_width` characters wide, and every line terminated by a newline.
//! The whole input is checked for shape before a single field is parsed.

use ndarray::Array2;
use std::borrow::Cow;
use std::io::Read;
use tracing::debug;

use crate::error::{CruError, Result};

/// Integer marking a missing reading in the input
pub const NA_SENTINEL: i32 = -999;

/// Dimensions of one grid and the width of its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of fields per line (longitude cells)
    pub columns: usize,
    /// Number of lines per time step (latitude cells)
    pub rows: usize,
    /// Characters per field
    pub field_width: usize,
}

impl GridShape {
    /// The 0.5 degree global grid used by CRU TS: 720 x 360 cells, 8-character fields
    pub const HALF_DEGREE: GridShape = GridShape::new(720, 360, 8);

    pub const fn new(columns: usize, rows: usize, field_width: usize) -> Self {
        Self {
            columns,
            rows,
            field_width,
        }
    }

    /// Expected length of every input line, trailing newline included
    pub fn line_width(&self) -> usize {
        self.columns * self.field_width + 1
    }

    /// Number of cells in one grid
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }

    /// Reject shapes with a zero dimension
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 || self.field_width == 0 {
            return Err(CruError::Config {
                message: format!(
                    "Grid shape must be non-empty: {} columns, {} rows, field width {}",
                    self.columns, self.rows, self.field_width
                ),
            });
        }
        Ok(())
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::HALF_DEGREE
    }
}

/// One time step of readings. `None` marks a missing reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    values: Array2<Option<i32>>,
}

impl RawGrid {
    pub fn new(values: Array2<Option<i32>>) -> Self {
        Self { values }
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    /// Reading at (row, column); `None` if missing or out of bounds
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        self.values.get((row, column)).copied().flatten()
    }

    pub fn values(&self) -> &Array2<Option<i32>> {
        &self.values
    }
}

/// Read the whole stream into memory and parse it into grids.
pub fn read_grids_from<R: Read>(
    mut reader: R,
    shape: GridShape,
    time_steps: Option<usize>,
) -> Result<Vec<RawGrid>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    read_grids(&input, shape, time_steps)
}

/// Parse CRU ASCII text into one grid per time step.
///
/// With `time_steps` set the input must hold exactly that many grids,
/// otherwise any positive number of whole grids is accepted.
pub fn read_grids(
    input: &str,
    shape: GridShape,
    time_steps: Option<usize>,
) -> Result<Vec<RawGrid>> {
    shape.validate()?;

    // CRLF files are read as if their lines ended in a bare newline
    let input = if input.contains("\r\n") {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    };
    let lines: Vec<&str> = input.split_inclusive('\n').collect();

    check_line_count(lines.len(), shape, time_steps)?;

    let line_width = shape.line_width();
    for (index, line) in lines.iter().enumerate() {
        if line.len() != line_width || !line.ends_with('\n') {
            return Err(CruError::LineWidth {
                line: index + 1,
                expected: line_width,
                actual: line.len(),
            });
        }
    }

    debug!(
        lines = lines.len(),
        time_steps = lines.len() / shape.rows,
        "Input shape validated"
    );

    lines
        .chunks(shape.rows)
        .enumerate()
        .map(|(step, block)| parse_grid(block, step * shape.rows, shape))
        .collect()
}

fn check_line_count(actual: usize, shape: GridShape, time_steps: Option<usize>) -> Result<()> {
    match time_steps {
        Some(steps) => {
            let expected = shape.rows * steps;
            if actual != expected {
                return Err(CruError::LineCount {
                    expected: format!("{} ({} rows x {} time steps)", expected, shape.rows, steps),
                    actual,
                });
            }
        }
        None => {
            if actual == 0 || actual % shape.rows != 0 {
                return Err(CruError::LineCount {
                    expected: format!("a positive multiple of {}", shape.rows),
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// Parse one block of `shape.rows` lines. `first_line` is the 0-based index
/// of the block's first line in the whole input, used for error locations.
fn parse_grid(block: &[&str], first_line: usize, shape: GridShape) -> Result<RawGrid> {
    let mut cells = Vec::with_capacity(shape.cells());

    for (offset, line) in block.iter().enumerate() {
        let bytes = line.as_bytes();
        for column in 0..shape.columns {
            let start = column * shape.field_width;
            let raw = &bytes[start..start + shape.field_width];
            let value = parse_field(raw).ok_or_else(|| CruError::Parse {
                line: first_line + offset + 1,
                column: column + 1,
                field: String::from_utf8_lossy(raw).into_owned(),
            })?;
            cells.push(value);
        }
    }

    let values = Array2::from_shape_vec((shape.rows, shape.columns), cells).map_err(|_| {
        CruError::GridShape {
            expected_rows: shape.rows,
            expected_columns: shape.columns,
            rows: block.len(),
            columns: shape.columns,
        }
    })?;

    Ok(RawGrid::new(values))
}

/// Parse a single field. The outer `None` is a parse failure, the inner
/// `None` a missing reading.
fn parse_field(raw: &[u8]) -> Option<Option<i32>> {
    let text = std::str::from_utf8(raw).ok()?.trim();
    let value: i32 = text.parse().ok()?;
    Some((value != NA_SENTINEL).then_some(value))
}
