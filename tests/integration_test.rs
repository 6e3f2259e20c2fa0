//! Integration tests for the cruraster pipeline
//!
//! These tests drive the library end-to-end, from fixed-width text to decoded
//! image bytes.

mod common;

use common::{assertions, image_utils, test_data};
use cruraster::{
    aggregate, convert, encode_image, read_grids, Config, CruError, CutPoints, GridShape,
    OutputFormat, DEFAULT_BACKGROUND,
};
use image::ImageFormat;
use pretty_assertions::assert_eq;

const TINY: GridShape = GridShape::new(2, 2, 8);

/// Two time steps of a 2 x 2 grid:
/// (0,0) = [10, NA], (0,1) = [NA, NA], (1,0) = [20, 30], (1,1) = [0, 0]
fn small_example() -> String {
    test_data::grid_text(
        &[
            vec![vec![Some(10), None], vec![Some(20), Some(0)]],
            vec![vec![None, None], vec![Some(30), Some(0)]],
        ],
        8,
    )
}

#[test]
fn test_small_example_end_to_end() {
    let conversion = convert(&small_example(), TINY, &Config::default()).unwrap();
    let bytes = encode_image(&conversion.image, OutputFormat::Tiff).unwrap();

    image_utils::assert_image_format(&bytes, ImageFormat::Tiff).unwrap();
    let decoded = image_utils::load_image_from_bytes(&bytes).unwrap();
    image_utils::assert_image_dimensions(&decoded, 2, 2).unwrap();
    let img = decoded.to_rgba8();

    // Grid row 0 lands on image row 1, grid row 1 on image row 0
    assert_eq!(img.get_pixel(1, 1).0, DEFAULT_BACKGROUND);
    for (x, y) in [(0, 1), (0, 0), (1, 0)] {
        assert_ne!(img.get_pixel(x, y).0, DEFAULT_BACKGROUND, "pixel ({x}, {y})");
        assert_eq!(img.get_pixel(x, y).0[3], 255);
    }

    // Means 0, 10, 25: the lowest is purple, the highest red
    assert_eq!(img.get_pixel(1, 0).0, [128, 0, 128, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn test_small_example_means() {
    let grids = read_grids(&small_example(), TINY, Some(2)).unwrap();
    let means = aggregate(&grids, TINY).unwrap();

    assert_eq!(means.get(0, 0), Some(10.0));
    assert_eq!(means.get(0, 1), None);
    assert_eq!(means.get(1, 0), Some(25.0));
    assert_eq!(means.get(1, 1), Some(0.0));
}

#[test]
fn test_reader_shape_invariant() {
    let shape = GridShape::HALF_DEGREE;
    let input = test_data::synthetic_series(shape, 3);

    let grids = read_grids(&input, shape, Some(3)).unwrap();
    assert_eq!(grids.len(), 3);
    for grid in &grids {
        assert_eq!(grid.rows(), 360);
        assert_eq!(grid.columns(), 720);
    }
}

#[test]
fn test_shape_errors_are_fatal() {
    let shape = GridShape::HALF_DEGREE;
    let input = test_data::synthetic_series(shape, 2);

    // One row short
    let truncated: String = input.split_inclusive('\n').skip(1).collect();
    assert!(matches!(
        read_grids(&truncated, shape, None),
        Err(CruError::LineCount { actual: 719, .. })
    ));

    // One character missing on one line
    let mut lines: Vec<String> = input.split_inclusive('\n').map(str::to_string).collect();
    lines[400].remove(0);
    let narrowed = lines.concat();
    assert!(matches!(
        read_grids(&narrowed, shape, None),
        Err(CruError::LineWidth { line: 401, .. })
    ));
}

#[test]
fn test_mean_of_partial_samples() {
    // Five time steps; the cell at (1, 0) has readings only in steps 0, 2 and 4
    let step = |value: Option<i32>| vec![vec![Some(1), Some(1)], vec![value, None]];
    let input = test_data::grid_text(
        &[
            step(Some(7)),
            step(None),
            step(Some(-4)),
            step(None),
            step(Some(12)),
        ],
        8,
    );

    let grids = read_grids(&input, TINY, Some(5)).unwrap();
    let means = aggregate(&grids, TINY).unwrap();

    assertions::assert_approx_eq(means.get(1, 0).unwrap(), 5.0, None);
    assert_eq!(means.get(1, 1), None);
    assert_eq!(means.get(0, 0), Some(1.0));
}

#[test]
fn test_full_size_conversion() {
    let shape = GridShape::HALF_DEGREE;
    let input = test_data::synthetic_series(shape, 2);

    let conversion = convert(&input, shape, &Config::default()).unwrap();
    let img = &conversion.image;
    assert_eq!(img.dimensions(), (720, 360));
    assert_eq!(conversion.summary.time_steps, 2);
    assert_eq!(conversion.summary.valid_cells, 340 * 720);

    // The ten missing rows at each pole are background, nothing else is
    assert_eq!(image_utils::count_pixels(img, DEFAULT_BACKGROUND), 20 * 720);
    for x in [0, 359, 719] {
        assert_eq!(img.get_pixel(x, 0).0, DEFAULT_BACKGROUND);
        assert_eq!(img.get_pixel(x, 359).0, DEFAULT_BACKGROUND);
        assert_ne!(img.get_pixel(x, 180).0, DEFAULT_BACKGROUND);
    }

    assertions::assert_non_decreasing(&conversion.summary.cut_points.as_array());
}

#[test]
fn test_custom_background() {
    let mut config = Config::default();
    config.output.background = [255, 255, 255, 0];

    let conversion = convert(&small_example(), TINY, &config).unwrap();
    assert_eq!(conversion.image.get_pixel(1, 1).0, [255, 255, 255, 0]);
}

#[test]
fn test_percentile_monotonicity_on_skewed_data() {
    let mut values: Vec<f64> = (0..500).map(|i| (i as f64).powi(3) / 1e4).collect();
    values.extend(std::iter::repeat(-273.0).take(37));
    values.push(f64::MAX / 2.0);

    let cuts = CutPoints::from_values(&values).unwrap();
    assertions::assert_non_decreasing(&cuts.as_array());
}
