//! Percentile cut points and the two-segment climate color scale.
//!
//! The scale runs purple -> blue -> green over the cool half of the data and
//! green -> orange -> red over the warm half, with the 5th and 95th
//! percentiles as its ends so outliers do not flatten the rest of the range.

use serde::Serialize;

use super::colormap::{Colormap, Ramp};
use crate::error::{CruError, Result};

/// Fractional positions of the cut points in the sorted values
pub const CUT_FRACTIONS: [f64; 5] = [0.05, 0.45, 0.55, 0.75, 0.95];

/// Colors of the ramp below the median cut point
pub const COOL_COLORS: [&str; 3] = ["purple", "blue", "green"];

/// Colors of the ramp above the median cut point
pub const WARM_COLORS: [&str; 3] = ["green", "orange", "red"];

/// Percentile-derived values parametrizing the scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutPoints {
    pub p05: f64,
    pub p45: f64,
    pub p55: f64,
    pub p75: f64,
    pub p95: f64,
}

impl CutPoints {
    /// Pick cut points from unordered values.
    ///
    /// Each cut point is the sorted value at index `floor(fraction * n)`,
    /// clamped to the last index.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(CruError::NoValidData);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let at = |fraction: f64| sorted[((fraction * n as f64) as usize).min(n - 1)];

        Ok(Self {
            p05: at(CUT_FRACTIONS[0]),
            p45: at(CUT_FRACTIONS[1]),
            p55: at(CUT_FRACTIONS[2]),
            p75: at(CUT_FRACTIONS[3]),
            p95: at(CUT_FRACTIONS[4]),
        })
    }

    /// Clip a value into [p05, p95]
    pub fn clip(&self, value: f64) -> f64 {
        value.max(self.p05).min(self.p95)
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.p05, self.p45, self.p55, self.p75, self.p95]
    }
}

/// The cool and warm ramps together with their cut points
#[derive(Debug)]
pub struct ColorScale {
    cuts: CutPoints,
    cool: Ramp,
    warm: Ramp,
}

impl ColorScale {
    /// Build the scale from every valid cell value
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::new(CutPoints::from_values(values)?)
    }

    pub fn new(cuts: CutPoints) -> Result<Self> {
        let cool = Ramp::new("cool", COOL_COLORS, [cuts.p05, cuts.p45, cuts.p55])?;
        let warm = Ramp::new("warm", WARM_COLORS, [cuts.p55, cuts.p75, cuts.p95])?;
        Ok(Self { cuts, cool, warm })
    }

    pub fn cut_points(&self) -> &CutPoints {
        &self.cuts
    }

    /// Clip the value to the outer cut points, then color it with the warm
    /// ramp at or above the median cut point and the cool ramp below it.
    pub fn color_for(&self, value: f64) -> [u8; 4] {
        let value = self.cuts.clip(value);
        if value >= self.cuts.p55 {
            self.warm.map(value)
        } else {
            self.cool.map(value)
        }
    }
}

impl Colormap for ColorScale {
    fn map(&self, value: f64) -> [u8; 4] {
        self.color_for(value)
    }

    fn name(&self) -> &str {
        "cru"
    }
}
