//! Color scale construction for climate rasters.
//!
//! This module derives the percentile cut points of the data and builds the
//! purple -> green -> red scale used to render it.

pub mod colormap;
pub mod scale;

pub use colormap::{to_rgba8, Colormap, Ramp};
pub use scale::{ColorScale, CutPoints, COOL_COLORS, CUT_FRACTIONS, WARM_COLORS};
