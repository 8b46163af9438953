//! Colour type, parsing, and the channel maths used across the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{KnotError, Result};

/// An opaque RGB colour value.
///
/// The hex form is always derived from the channels; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White. Also the eraser colour.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a `#rrggbb` string.
    ///
    /// Accepts exactly six hex digits after an optional `#`, in either case.
    /// Returns `None` for anything else.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Canonical lowercase `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Convert to an RGB array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl FromStr for Colour {
    type Err = KnotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s).ok_or_else(|| KnotError::InvalidColour(s.to_string()))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Colour::parse_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour: {}", s)))
    }
}

/// Redmean colour distance.
///
/// A weighted Euclidean metric in RGB space where the red and blue weights
/// follow the mean red level of the pair. See
/// https://www.compuphase.com/cmetric.htm
pub fn distance(a: Colour, b: Colour) -> f64 {
    let rmean = (a.r as f64 + b.r as f64) / 2.0;
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;

    let r_weight = (512.0 + rmean) / 256.0;
    let g_weight = 4.0;
    let b_weight = (767.0 - rmean) / 256.0;

    (r_weight * dr * dr + g_weight * dg * dg + b_weight * db * db).sqrt()
}

/// Alpha-blend `foreground` over `background`.
///
/// `alpha >= 1` returns the foreground untouched.
pub fn blend(background: Colour, foreground: Colour, alpha: f32) -> Colour {
    if alpha >= 1.0 {
        return foreground;
    }
    let alpha = alpha.max(0.0);

    let mix = |bg: u8, fg: u8| -> u8 {
        (bg as f32 * (1.0 - alpha) + fg as f32 * alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Colour::rgb(
        mix(background.r, foreground.r),
        mix(background.g, foreground.g),
        mix(background.b, foreground.b),
    )
}
