//! Colormap trait and the three-anchor ramp.
//!
//! A ramp maps a data value onto a piecewise-linear color gradient whose
//! anchors sit at data values rather than at normalized positions.

use std::fmt;

use colorgrad::{Color, CustomGradient, Gradient};

use crate::error::{CruError, Result};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a data value to an RGBA color
    fn map(&self, value: f64) -> [u8; 4];

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Piecewise-linear RGB gradient over three (value, color) anchors.
///
/// Values below the first anchor take the first color, values above the last
/// anchor take the last color. A ramp whose anchors all coincide renders every
/// value with its first color, and a zero-width segment resolves to its upper
/// anchor's color.
pub struct Ramp {
    name: String,
    domain: [f64; 3],
    segments: [Gradient; 2],
}

impl Ramp {
    /// Build a ramp from CSS color names and non-decreasing anchor values
    pub fn new(name: &str, colors: [&str; 3], domain: [f64; 3]) -> Result<Self> {
        let finite = domain.iter().all(|v| v.is_finite());
        if !finite || domain[0] > domain[1] || domain[1] > domain[2] {
            return Err(CruError::ColorScale {
                message: format!("ramp '{}' has an invalid domain {:?}", name, domain),
            });
        }

        let segment = |from: &str, to: &str| {
            CustomGradient::new()
                .html_colors(&[from, to])
                .build()
                .map_err(|e| CruError::ColorScale {
                    message: format!("failed to build ramp '{}': {}", name, e),
                })
        };

        Ok(Self {
            name: name.to_string(),
            domain,
            segments: [segment(colors[0], colors[1])?, segment(colors[1], colors[2])?],
        })
    }

    pub fn domain(&self) -> [f64; 3] {
        self.domain
    }

    /// True when all anchors share one value
    pub fn is_degenerate(&self) -> bool {
        self.domain[0] == self.domain[2]
    }
}

/// Position of `value` within [low, high], or 1.0 when the span is empty
fn fraction(value: f64, low: f64, high: f64) -> f64 {
    if high > low {
        (value - low) / (high - low)
    } else {
        1.0
    }
}

impl Colormap for Ramp {
    fn map(&self, value: f64) -> [u8; 4] {
        let [low, mid, high] = self.domain;
        if self.is_degenerate() || value.is_nan() {
            return to_rgba8(&self.segments[0].at(0.0));
        }

        let value = value.clamp(low, high);
        let color = if value < mid {
            self.segments[0].at(fraction(value, low, mid))
        } else {
            self.segments[1].at(fraction(value, mid, high))
        };
        to_rgba8(&color)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ramp")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .finish()
    }
}

/// Convert a gradient color to 8-bit RGB with an opaque alpha channel
pub fn to_rgba8(color: &Color) -> [u8; 4] {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [channel(color.r), channel(color.g), channel(color.b), 255]
}
