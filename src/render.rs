//! Rasterization of the mean grid and image encoding.

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::str::FromStr;
use tracing::debug;

use crate::aggregate::MeanGrid;
use crate::colormaps::Colormap;
use crate::error::{CruError, Result};

/// Fill for cells without data
pub const DEFAULT_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Lossless output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tiff,
    Png,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            "png" => Ok(OutputFormat::Png),
            _ => Err(CruError::Config {
                message: format!("Invalid output format: {}. Must be one of: tiff, png", s),
            }),
        }
    }
}

/// Paint every cell of the grid through the colormap.
///
/// Row 0 of the grid is the southernmost latitude and lands on the bottom
/// image row, so north is up. Missing cells keep the background.
pub fn rasterize(
    grid: &MeanGrid,
    colormap: &dyn Colormap,
    background: [u8; 4],
) -> Result<RgbaImage> {
    let width = image_dimension(grid.columns(), "width")?;
    let height = image_dimension(grid.rows(), "height")?;

    let mut img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba(background));

    let mut painted = 0usize;
    for ((row, column), value) in grid.values().indexed_iter() {
        if let Some(value) = value {
            let y = height - 1 - row as u32;
            img.put_pixel(column as u32, y, Rgba(colormap.map(*value)));
            painted += 1;
        }
    }

    debug!(
        colormap = colormap.name(),
        width = width,
        height = height,
        painted = painted,
        "Raster painted"
    );

    Ok(img)
}

fn image_dimension(cells: usize, axis: &str) -> Result<u32> {
    match u32::try_from(cells) {
        Ok(0) | Err(_) => Err(CruError::ImageGeneration {
            message: format!("Invalid image {}: {}", axis, cells),
        }),
        Ok(n) => Ok(n),
    }
}

/// Encode the image into an in-memory buffer
pub fn encode_image(img: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format.image_format())
        .map_err(|e| CruError::ImageGeneration {
            message: format!("Failed to encode {:?} image: {}", format, e),
        })?;
    Ok(buffer.into_inner())
}
