//! Decoded source images.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;

use crate::error::{KnotError, Result};
use crate::types::Colour;

/// A fully decoded RGB raster.
///
/// Only complete rasters can be constructed, so nothing downstream ever sees
/// a half-decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// Wrap an already decoded image.
    ///
    /// Zero-sized images are rejected.
    pub fn from_rgb(pixels: RgbImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(KnotError::Decode {
                message: format!("image is {}x{}", pixels.width(), pixels.height()),
                help: Some("The source image must contain at least one pixel".to_string()),
            });
        }
        Ok(Self { pixels })
    }

    /// Build an image by calling `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Colour) -> Result<Self> {
        Self::from_rgb(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb(f(x, y).to_rgb())
        }))
    }

    /// A single-colour image.
    pub fn solid(width: u32, height: u32, colour: Colour) -> Result<Self> {
        Self::from_fn(width, height, |_, _| colour)
    }

    /// Decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| KnotError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?;
        Self::from_rgb(img.to_rgb8())
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| KnotError::Decode {
            message: e.to_string(),
            help: Some("Supported formats are those of the image crate".to_string()),
        })?;
        Self::from_rgb(img.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Colour at (x, y). Panics outside the image, like `image` itself.
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        Colour::from(self.pixels.get_pixel(x, y).0)
    }

    /// Iterate over all pixels, row by row.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.pixels.pixels().map(|p| Colour::from(p.0))
    }

    /// Shrink so the longest side is at most `max_side`, keeping aspect.
    ///
    /// Images already within bounds are returned as-is.
    pub fn thumbnail(&self, max_side: u32) -> SourceImage {
        let (w, h) = (self.width(), self.height());
        let longest = w.max(h);
        if max_side == 0 || longest <= max_side {
            return self.clone();
        }

        let scale = max_side as f64 / longest as f64;
        let nw = ((w as f64 * scale).round() as u32).clamp(1, max_side);
        let nh = ((h as f64 * scale).round() as u32).clamp(1, max_side);

        Self {
            pixels: image::imageops::resize(&self.pixels, nw, nh, FilterType::Triangle),
        }
    }
}
