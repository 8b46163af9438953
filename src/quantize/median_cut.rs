//! Median-cut colour reduction.
//!
//! The sample is split in half along whichever channel spans the widest
//! range, recursively, and each leaf box is replaced by its mean colour.

use crate::error::{KnotError, Result};
use crate::types::Colour;

/// Colour channel a box is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn of(self, colour: &Colour) -> u8 {
        match self {
            Channel::Red => colour.r,
            Channel::Green => colour.g,
            Channel::Blue => colour.b,
        }
    }
}

/// Run median-cut to `depth` levels.
///
/// Returns up to `2^depth` colours in box order, not deduplicated. An empty
/// sample has no mean colour and is reported as [`KnotError::EmptySample`].
pub fn median_cut(sample: &[Colour], depth: u32) -> Result<Vec<Colour>> {
    if sample.is_empty() {
        return Err(KnotError::EmptySample);
    }

    let mut pixels = sample.to_vec();
    let mut out = Vec::with_capacity(1 << depth.min(16));
    split(&mut pixels, depth, &mut out);
    Ok(out)
}

fn split(pixels: &mut [Colour], depth: u32, out: &mut Vec<Colour>) {
    let Some(mean) = mean_colour(pixels) else {
        return;
    };

    // A single pixel cannot be split further, so recursion depth is bounded
    // by log2(n) whatever `depth` asks for.
    if depth == 0 || pixels.len() == 1 {
        out.push(mean);
        return;
    }

    let channel = widest_channel(pixels);
    pixels.sort_by_key(|c| channel.of(c));

    let mid = pixels.len() / 2;
    let (low, high) = pixels.split_at_mut(mid);
    split(low, depth - 1, out);
    split(high, depth - 1, out);
}

/// Channel with the largest max - min spread. Ties go red, then green.
fn widest_channel(pixels: &[Colour]) -> Channel {
    let range = |channel: Channel| {
        let (lo, hi) = pixels.iter().fold((u8::MAX, u8::MIN), |(lo, hi), c| {
            let v = channel.of(c);
            (lo.min(v), hi.max(v))
        });
        hi.saturating_sub(lo)
    };

    let (r, g, b) = (range(Channel::Red), range(Channel::Green), range(Channel::Blue));
    if r >= g && r >= b {
        Channel::Red
    } else if g >= b {
        Channel::Green
    } else {
        Channel::Blue
    }
}

/// Rounded per-channel mean, or `None` for an empty slice.
fn mean_colour(pixels: &[Colour]) -> Option<Colour> {
    if pixels.is_empty() {
        return None;
    }

    let (r, g, b) = pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
        (r + c.r as u64, g + c.g as u64, b + c.b as u64)
    });
    let n = pixels.len() as f64;
    let avg = |sum: u64| (sum as f64 / n).round().clamp(0.0, 255.0) as u8;

    Some(Colour::rgb(avg(r), avg(g), avg(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_sample_is_error() {
        assert!(matches!(median_cut(&[], 0), Err(KnotError::EmptySample)));
        assert!(matches!(median_cut(&[], 4), Err(KnotError::EmptySample)));
    }

    #[test]
    fn test_depth_zero_is_mean() {
        let sample = [Colour::rgb(0, 0, 0), Colour::rgb(255, 100, 3)];
        // 127.5 -> 128, 50, 1.5 -> 2
        assert_eq!(median_cut(&sample, 0).unwrap(), vec![Colour::rgb(128, 50, 2)]);
    }

    #[test]
    fn test_uniform_sample_any_depth() {
        let c = Colour::rgb(10, 200, 30);
        for n in [1, 2, 7, 64] {
            for depth in 0..6 {
                let sample = vec![c; n];
                let result = median_cut(&sample, depth).unwrap();
                assert!(result.iter().all(|&x| x == c), "n={} depth={}", n, depth);
            }
        }
    }

    #[test]
    fn test_huge_depth_stops_at_single_pixels() {
        let c = Colour::rgb(1, 2, 3);
        assert_eq!(median_cut(&[c], 1_000_000).unwrap(), vec![c]);

        let sample: Vec<Colour> = (0..8u8).map(|v| Colour::rgb(v * 30, 0, 0)).collect();
        let result = median_cut(&sample, u32::MAX).unwrap();
        assert_eq!(result, sample);
    }

    #[test]
    fn test_two_clusters_stay_separate() {
        let mut sample = vec![Colour::BLACK; 50];
        sample.extend(vec![Colour::WHITE; 50]);

        let result = median_cut(&sample, 1).unwrap();
        assert_eq!(result, vec![Colour::BLACK, Colour::WHITE]);

        let deeper = median_cut(&sample, 3).unwrap();
        assert!(deeper.contains(&Colour::BLACK));
        assert!(deeper.contains(&Colour::WHITE));
        assert!(!deeper.iter().any(|c| *c != Colour::BLACK && *c != Colour::WHITE));
    }

    #[test]
    fn test_output_count_bounded() {
        let sample: Vec<Colour> = (0..=255u8).map(|v| Colour::rgb(v, 255 - v, v / 2)).collect();
        assert_eq!(median_cut(&sample, 4).unwrap().len(), 16);
        assert_eq!(median_cut(&sample, 2).unwrap().len(), 4);
    }

    #[test]
    fn test_widest_channel_ties_prefer_red_then_green() {
        let all_equal = [Colour::rgb(0, 0, 0), Colour::rgb(10, 10, 10)];
        assert_eq!(widest_channel(&all_equal), Channel::Red);

        let green_blue = [Colour::rgb(5, 0, 0), Colour::rgb(5, 10, 10)];
        assert_eq!(widest_channel(&green_blue), Channel::Green);

        let blue = [Colour::rgb(0, 0, 0), Colour::rgb(1, 2, 3)];
        assert_eq!(widest_channel(&blue), Channel::Blue);
    }

    #[test]
    fn test_splits_along_widest_channel() {
        // Blue spans furthest, so the halves separate on blue.
        let sample = [
            Colour::rgb(0, 0, 250),
            Colour::rgb(10, 0, 0),
            Colour::rgb(0, 10, 240),
            Colour::rgb(10, 10, 10),
        ];
        let result = median_cut(&sample, 1).unwrap();
        assert_eq!(result, vec![Colour::rgb(10, 5, 5), Colour::rgb(0, 5, 245)]);
    }
}
