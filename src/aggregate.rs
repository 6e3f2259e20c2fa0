//! Per-cell averaging across the time series.

use ndarray::{Array2, Zip};

use crate::error::{CruError, Result};
use crate::reader::{GridShape, RawGrid};

/// Running per-cell sum and sample count.
///
/// `count[(y, x)]` is the number of grids added so far with a reading at
/// (y, x), and `sum[(y, x)]` is the total of those readings.
#[derive(Debug, Clone)]
pub struct Accumulator {
    sum: Array2<f64>,
    count: Array2<u32>,
}

impl Accumulator {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            sum: Array2::zeros((rows, columns)),
            count: Array2::zeros((rows, columns)),
        }
    }

    /// Fold one time step into the running totals
    pub fn add(&mut self, grid: &RawGrid) -> Result<()> {
        if grid.values().dim() != self.sum.dim() {
            return Err(CruError::GridShape {
                expected_rows: self.sum.nrows(),
                expected_columns: self.sum.ncols(),
                rows: grid.rows(),
                columns: grid.columns(),
            });
        }

        Zip::from(&mut self.sum)
            .and(&mut self.count)
            .and(grid.values())
            .for_each(|sum, count, value| {
                if let Some(value) = value {
                    *sum += f64::from(*value);
                    *count += 1;
                }
            });

        Ok(())
    }

    pub fn count(&self, row: usize, column: usize) -> u32 {
        self.count[(row, column)]
    }

    pub fn sum(&self, row: usize, column: usize) -> f64 {
        self.sum[(row, column)]
    }

    /// Divide sums by counts; cells that never saw a reading become missing
    pub fn finish(self) -> MeanGrid {
        let values = Zip::from(&self.sum)
            .and(&self.count)
            .map_collect(|&sum, &count| (count > 0).then(|| sum / f64::from(count)));
        MeanGrid::new(values)
    }
}

/// Per-cell mean over the whole series. `None` marks a cell with no readings.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanGrid {
    values: Array2<Option<f64>>,
}

impl MeanGrid {
    pub fn new(values: Array2<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied().flatten()
    }

    pub fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    /// All non-missing means, in row-major order
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(|v| *v).collect()
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Average a series of grids cell by cell.
pub fn aggregate(grids: &[RawGrid], shape: GridShape) -> Result<MeanGrid> {
    let accumulator = grids.iter().try_fold(
        Accumulator::new(shape.rows, shape.columns),
        |mut acc, grid| {
            acc.add(grid)?;
            Ok::<_, CruError>(acc)
        },
    )?;
    Ok(accumulator.finish())
}
