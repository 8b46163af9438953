//! Rasterizer - turns a source image into a knot grid.
//!
//! Every source channel goes through the contrast curve first, then the
//! image is box-filtered down (or up) to exactly `cols x rows` cells. Each
//! cell is the area-weighted average of the source pixels it covers.

mod mapper;
mod source;

pub use mapper::{map_grid, nearest};
pub use source::SourceImage;

use crate::error::{KnotError, Result};
use crate::types::{Colour, Grid};

/// Apply the contrast curve to one channel value.
///
/// Values pivot around 128 and are clamped to the channel range.
pub fn contrast_channel(value: u8, contrast: f32) -> f32 {
    ((value as f32 - 128.0) * contrast + 128.0).clamp(0.0, 255.0)
}

/// Source pixels overlapping one output cell along a single axis, with the
/// covered fraction of each.
fn spans(source_len: u32, cells: usize) -> Vec<Vec<(u32, f64)>> {
    let scale = source_len as f64 / cells as f64;

    (0..cells)
        .map(|cell| {
            let start = cell as f64 * scale;
            let end = (cell + 1) as f64 * scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(source_len);

            (first..last)
                .filter_map(|px| {
                    let overlap = end.min(px as f64 + 1.0) - start.max(px as f64);
                    (overlap > 0.0).then_some((px, overlap))
                })
                .collect()
        })
        .collect()
}

/// Sample `source` into a `rows x cols` grid under `contrast`.
///
/// This is the raw sampled grid; palette mapping happens separately.
pub fn rasterize(source: &SourceImage, rows: usize, cols: usize, contrast: f32) -> Result<Grid> {
    if rows == 0 || cols == 0 {
        return Err(KnotError::InvalidDimensions { rows, cols });
    }

    let curve: Vec<f32> = (0..=255u8).map(|v| contrast_channel(v, contrast)).collect();
    let x_spans = spans(source.width(), cols);
    let y_spans = spans(source.height(), rows);

    Ok(Grid::from_fn(rows, cols, |row, col| {
        let mut sum = [0.0f64; 3];
        let mut weight = 0.0f64;

        for &(y, wy) in &y_spans[row] {
            for &(x, wx) in &x_spans[col] {
                let w = wx * wy;
                let c = source.pixel(x, y);
                sum[0] += curve[c.r as usize] as f64 * w;
                sum[1] += curve[c.g as usize] as f64 * w;
                sum[2] += curve[c.b as usize] as f64 * w;
                weight += w;
            }
        }

        if weight <= 0.0 {
            return Colour::BLACK;
        }

        let avg = |s: f64| (s / weight).round().clamp(0.0, 255.0) as u8;
        Colour::rgb(avg(sum[0]), avg(sum[1]), avg(sum[2]))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contrast_identity_and_extremes() {
        assert_eq!(contrast_channel(200, 1.0), 200.0);
        assert_eq!(contrast_channel(128, 2.0), 128.0);
        assert_eq!(contrast_channel(200, 2.0), 255.0);
        assert_eq!(contrast_channel(10, 2.0), 0.0);
        assert_eq!(contrast_channel(0, 0.5), 64.0);
    }

    #[test]
    fn test_solid_red_4x4() {
        let source = SourceImage::solid(37, 23, Colour::rgb(255, 0, 0)).unwrap();
        let grid = rasterize(&source, 4, 4, 1.0).unwrap();

        assert_eq!(grid.size(), (4, 4));
        for row in grid.iter_rows() {
            for c in row {
                assert_eq!(c.hex(), "#ff0000");
            }
        }
    }

    #[test]
    fn test_checker_averages() {
        let source = SourceImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Colour::BLACK
            } else {
                Colour::WHITE
            }
        })
        .unwrap();

        let grid = rasterize(&source, 1, 1, 1.0).unwrap();
        assert_eq!(grid.get(0, 0), Some(Colour::rgb(128, 128, 128)));
    }

    #[test]
    fn test_contrast_applies_before_averaging() {
        // Under contrast 2, 0 and 200 become 0 and 255 before averaging.
        let source = SourceImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Colour::rgb(0, 0, 0)
            } else {
                Colour::rgb(200, 200, 200)
            }
        })
        .unwrap();

        let grid = rasterize(&source, 1, 1, 2.0).unwrap();
        assert_eq!(grid.get(0, 0), Some(Colour::rgb(128, 128, 128)));

        let plain = rasterize(&source, 1, 1, 1.0).unwrap();
        assert_eq!(plain.get(0, 0), Some(Colour::rgb(100, 100, 100)));
    }

    #[test]
    fn test_partial_pixel_weights() {
        // 3 source columns into 2 cells: each cell covers 1.5 pixels.
        let source = SourceImage::from_fn(3, 1, |x, _| match x {
            0 => Colour::rgb(0, 0, 0),
            1 => Colour::rgb(90, 90, 90),
            _ => Colour::rgb(180, 180, 180),
        })
        .unwrap();

        let grid = rasterize(&source, 1, 2, 1.0).unwrap();
        // (0 * 1 + 90 * 0.5) / 1.5 = 30
        assert_eq!(grid.get(0, 0), Some(Colour::rgb(30, 30, 30)));
        // (90 * 0.5 + 180 * 1) / 1.5 = 150
        assert_eq!(grid.get(0, 1), Some(Colour::rgb(150, 150, 150)));
    }

    #[test]
    fn test_upscale_repeats_pixels() {
        let source = SourceImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Colour::BLACK
            } else {
                Colour::WHITE
            }
        })
        .unwrap();

        let grid = rasterize(&source, 1, 4, 1.0).unwrap();
        assert_eq!(
            grid.row(0).unwrap(),
            &[Colour::BLACK, Colour::BLACK, Colour::WHITE, Colour::WHITE]
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let source = SourceImage::solid(4, 4, Colour::WHITE).unwrap();
        assert!(matches!(
            rasterize(&source, 0, 4, 1.0),
            Err(KnotError::InvalidDimensions { .. })
        ));
    }
}
