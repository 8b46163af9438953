//! Grid raster projection.

use image::{Rgba, RgbaImage};

use crate::types::{blend, Colour, Grid, GridConfig};

use super::digits::{lit_pixels, text_width, GLYPH_HEIGHT};

/// Height of the column-number strip above the grid.
pub const LABEL_MARGIN: u32 = 14;

/// Font pixel size of label digits.
const LABEL_SCALE: u32 = 2;

/// Every n-th boundary gets a heavy line and a label.
const MAJOR_EVERY: usize = 10;

const THIN_LINE: (Colour, f32) = (Colour::BLACK, 0.2);
const HEAVY_LINE: (Colour, f32) = (Colour::BLACK, 0.6);
const CROSSHAIR: Colour = Colour::rgb(230, 30, 30);
const DASH: u32 = 4;

/// Display settings for a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Edge length of one knot in output pixels.
    pub cell_size: u32,
    pub show_gridlines: bool,
    pub show_numbers: bool,
    /// Fill behind the label strip.
    pub background: Colour,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 20,
            show_gridlines: true,
            show_numbers: true,
            background: Colour::WHITE,
        }
    }
}

impl RenderOptions {
    /// Options matching a grid configuration's display toggles.
    pub fn from_config(config: &GridConfig, cell_size: u32) -> Self {
        Self {
            cell_size,
            show_gridlines: config.show_gridlines,
            show_numbers: config.show_numbers,
            ..Self::default()
        }
    }

    fn cell(&self) -> u32 {
        self.cell_size.max(1)
    }

    fn margin(&self) -> u32 {
        if self.show_numbers {
            LABEL_MARGIN
        } else {
            0
        }
    }
}

/// Render `grid` to an RGBA image.
///
/// Returns `None` for an empty grid, or when the image size would not fit
/// in `u32` pixels.
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> Option<RgbaImage> {
    if grid.is_empty() {
        return None;
    }

    let cell = options.cell();
    let margin = options.margin();
    let width = u32::try_from(grid.cols()).ok()?.checked_mul(cell)?;
    let height = u32::try_from(grid.rows())
        .ok()?
        .checked_mul(cell)?
        .checked_add(margin)?;

    let mut img = RgbaImage::from_pixel(width, height, Rgba(options.background.to_rgba()));

    for (r, row) in grid.iter_rows().enumerate() {
        for (c, colour) in row.iter().enumerate() {
            let rgba = Rgba(colour.to_rgba());
            let (x0, y0) = (c as u32 * cell, margin + r as u32 * cell);
            for y in y0..y0 + cell {
                for x in x0..x0 + cell {
                    img.put_pixel(x, y, rgba);
                }
            }
        }
    }

    if options.show_gridlines {
        draw_gridlines(&mut img, grid, cell, margin);
    }

    if options.show_numbers {
        draw_labels(&mut img, grid.cols(), cell, label_ink(options.background));
    }

    Some(img)
}

/// Map an output pixel back to the (row, col) it shows.
///
/// Returns `None` over the label strip or outside the grid.
pub fn cell_at(x: u32, y: u32, grid: &Grid, options: &RenderOptions) -> Option<(usize, usize)> {
    let cell = options.cell();
    let y = y.checked_sub(options.margin())?;
    let (row, col) = ((y / cell) as usize, (x / cell) as usize);
    (row < grid.rows() && col < grid.cols()).then_some((row, col))
}

/// Pick black or white ink, whichever reads better on `background`.
pub fn label_ink(background: Colour) -> Colour {
    use palette::{Hsl, IntoColor, Srgb};

    let rgb: Srgb<f32> = Srgb::new(
        background.r as f32 / 255.0,
        background.g as f32 / 255.0,
        background.b as f32 / 255.0,
    );
    let hsl: Hsl = rgb.into_color();

    if hsl.lightness > 0.5 {
        Colour::BLACK
    } else {
        Colour::WHITE
    }
}

/// Blend `colour` onto one pixel, ignoring out-of-range positions.
fn shade(img: &mut RgbaImage, x: u32, y: u32, colour: Colour, alpha: f32) {
    if x >= img.width() || y >= img.height() {
        return;
    }
    let p = img.get_pixel_mut(x, y);
    let under = Colour::rgb(p[0], p[1], p[2]);
    *p = Rgba(blend(under, colour, alpha).to_rgba());
}

/// Pixel position of boundary `i` out of `n` cells. The far edge is pulled
/// onto the last pixel so it stays visible.
fn boundary(i: usize, n: usize, cell: u32) -> u32 {
    (i as u32).saturating_mul(cell).min((n as u32).saturating_mul(cell) - 1)
}

fn draw_gridlines(img: &mut RgbaImage, grid: &Grid, cell: u32, margin: u32) {
    let (rows, cols) = grid.size();
    let (width, height) = (img.width(), img.height());

    for i in 0..=cols {
        let x = boundary(i, cols, cell);
        let (span, (colour, alpha)) = line_style(i, x);
        for px in span {
            for y in margin..height {
                shade(img, px, y, colour, alpha);
            }
        }
    }

    for i in 0..=rows {
        let y = margin + boundary(i, rows, cell);
        let (span, (colour, alpha)) = line_style(i, y);
        for py in span {
            for x in 0..width {
                shade(img, x, py, colour, alpha);
            }
        }
    }

    // Dashed crosshair through the middle boundaries.
    let mid_x = boundary(cols / 2, cols, cell);
    for y in margin..height {
        if ((y - margin) / DASH) % 2 == 0 {
            shade(img, mid_x, y, CROSSHAIR, 1.0);
        }
    }
    let mid_y = margin + boundary(rows / 2, rows, cell);
    for x in 0..width {
        if (x / DASH) % 2 == 0 {
            shade(img, x, mid_y, CROSSHAIR, 1.0);
        }
    }
}

/// Pixels covered by boundary `i` at position `pos`, and its paint.
fn line_style(i: usize, pos: u32) -> (std::ops::Range<u32>, (Colour, f32)) {
    if i % MAJOR_EVERY == 0 {
        let start = pos.saturating_sub(1);
        (start..start + 2, HEAVY_LINE)
    } else {
        (pos..pos + 1, THIN_LINE)
    }
}

fn draw_labels(img: &mut RgbaImage, cols: usize, cell: u32, ink: Colour) {
    let width = img.width();
    let top = (LABEL_MARGIN - GLYPH_HEIGHT * LABEL_SCALE) / 2;

    for i in (MAJOR_EVERY..=cols).step_by(MAJOR_EVERY) {
        let text = i.to_string();
        let text_px = text_width(&text) * LABEL_SCALE;
        let left = (i as u32 * cell)
            .saturating_sub(text_px / 2)
            .min(width.saturating_sub(text_px));

        for (gx, gy) in lit_pixels(&text) {
            for sy in 0..LABEL_SCALE {
                for sx in 0..LABEL_SCALE {
                    shade(
                        img,
                        left + gx * LABEL_SCALE + sx,
                        top + gy * LABEL_SCALE + sy,
                        ink,
                        1.0,
                    );
                }
            }
        }
    }
}
