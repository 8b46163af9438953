//! Automatic palette extraction.
//!
//! The source is shrunk to a bounded sample, run through median-cut, and the
//! resulting box colours are deduplicated into a palette.

mod median_cut;

pub use median_cut::median_cut;

use crate::error::Result;
use crate::raster::SourceImage;
use crate::types::{Colour, Palette};

/// Default median-cut depth (up to 16 colours).
pub const DEFAULT_DEPTH: u32 = 4;

/// Default longest side of the sampled thumbnail.
pub const SAMPLE_MAX_SIDE: u32 = 200;

/// Collect the pixels of `image` after shrinking it to `max_side`.
pub fn sample_pixels(image: &SourceImage, max_side: u32) -> Vec<Colour> {
    image.thumbnail(max_side).colours().collect()
}

/// Median-cut a sample and deduplicate by hex, keeping first occurrences.
pub fn extract_palette(sample: &[Colour], depth: u32) -> Result<Palette> {
    Ok(median_cut(sample, depth)?.into_iter().collect::<Palette>().dedup())
}

/// Palette extraction settings.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    depth: u32,
    sample_max_side: u32,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            sample_max_side: SAMPLE_MAX_SIDE,
        }
    }
}

impl Quantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the split depth.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the sample cap.
    pub fn sample_max_side(mut self, max_side: u32) -> Self {
        self.sample_max_side = max_side;
        self
    }

    /// Extract a palette from `image`.
    pub fn extract(&self, image: &SourceImage) -> Result<Palette> {
        let sample = sample_pixels(image, self.sample_max_side);
        extract_palette(&sample, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_uniform_is_single_colour() {
        let c = Colour::rgb(12, 34, 56);
        let palette = extract_palette(&vec![c; 30], DEFAULT_DEPTH).unwrap();
        assert_eq!(palette.colours(), &[c]);
    }

    #[test]
    fn test_extract_dedups_in_order() {
        let mut sample = vec![Colour::WHITE; 10];
        sample.extend(vec![Colour::BLACK; 10]);
        let palette = extract_palette(&sample, 3).unwrap();
        // Sorting on red puts black boxes first.
        assert_eq!(palette.colours(), &[Colour::BLACK, Colour::WHITE]);
    }

    #[test]
    fn test_quantizer_on_split_image() {
        let img = SourceImage::from_fn(300, 40, |x, _| {
            if x < 150 {
                Colour::rgb(200, 0, 0)
            } else {
                Colour::rgb(0, 0, 200)
            }
        })
        .unwrap();

        let palette = Quantizer::new().depth(1).extract(&img).unwrap();
        assert_eq!(palette.len(), 2);
        assert!(palette.colours().iter().any(|c| c.r > 150 && c.b < 50));
        assert!(palette.colours().iter().any(|c| c.b > 150 && c.r < 50));
    }
}
