//! Grid configuration.

use serde::{Deserialize, Serialize};

use super::Palette;

pub const DEFAULT_CONTRAST: f32 = 1.0;
pub const MIN_CONTRAST: f32 = 0.5;
pub const MAX_CONTRAST: f32 = 2.0;

const DEFAULT_ROWS: usize = 40;
const DEFAULT_COLS: usize = 40;

/// Everything that decides how a source image becomes a grid, plus the
/// display toggles that ride along with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub contrast: f32,
    pub palette_mode: bool,
    pub palette: Palette,
    pub show_gridlines: bool,
    pub show_numbers: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            contrast: DEFAULT_CONTRAST,
            palette_mode: false,
            palette: Palette::default_palette(),
            show_gridlines: true,
            show_numbers: true,
        }
    }
}

impl GridConfig {
    /// Clamp a contrast factor into the supported range.
    pub fn clamp_contrast(contrast: f32) -> f32 {
        if contrast.is_nan() {
            return DEFAULT_CONTRAST;
        }
        contrast.clamp(MIN_CONTRAST, MAX_CONTRAST)
    }

    /// The palette the mapper should use, if palette mode is on.
    pub fn active_palette(&self) -> Option<&Palette> {
        self.palette_mode.then_some(&self.palette)
    }

    /// True when moving from `self` to `next` invalidates the current grid.
    ///
    /// Display toggles never do.
    pub fn needs_resample(&self, next: &GridConfig) -> bool {
        self.rows != next.rows
            || self.cols != next.cols
            || self.contrast != next.contrast
            || self.palette_mode != next.palette_mode
            || self.palette != next.palette
    }
}
