//! Test data generation utilities.
//!
//! This module renders grids into the CRU fixed-width ASCII layout so tests
//! can feed the reader exactly what a real data file would contain.

use cruraster::{GridShape, NA_SENTINEL};

/// Render one time step per entry of `steps`. Each step is a list of rows,
/// each row a list of readings; `None` is written as the NA sentinel.
pub fn grid_text(steps: &[Vec<Vec<Option<i32>>>], field_width: usize) -> String {
    let mut text = String::new();
    for step in steps {
        for row in step {
            for value in row {
                let value = value.unwrap_or(NA_SENTINEL);
                text.push_str(&format!("{:>width$}", value, width = field_width));
            }
            text.push('\n');
        }
    }
    text
}

/// A full-size time step whose readings vary smoothly with latitude and
/// longitude, with the polar rows missing like ocean/ice cells in CRU data.
pub fn synthetic_step(shape: GridShape, step: usize) -> Vec<Vec<Option<i32>>> {
    (0..shape.rows)
        .map(|row| {
            (0..shape.columns)
                .map(|column| {
                    if row < 10 || row >= shape.rows - 10 {
                        None
                    } else {
                        let lat = row as i32 - shape.rows as i32 / 2;
                        let base = 300 - lat.abs() * 2;
                        Some(base + (column % 37) as i32 + step as i32 * 5)
                    }
                })
                .collect()
        })
        .collect()
}

/// Text of `time_steps` synthetic time steps on the given shape
pub fn synthetic_series(shape: GridShape, time_steps: usize) -> String {
    let steps: Vec<_> = (0..time_steps).map(|t| synthetic_step(shape, t)).collect();
    grid_text(&steps, shape.field_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_text_layout() {
        let text = grid_text(&[vec![vec![Some(1), None]]], 8);
        assert_eq!(text, "       1    -999\n");
    }
}
