//! Rendering module for knots.
//!
//! Projects a grid onto an RGBA raster: one solid square per knot, with
//! optional gridlines, a centre crosshair and column numbers.

mod digits;
mod grid;
mod png;

pub use grid::{cell_at, label_ink, render_grid, RenderOptions, LABEL_MARGIN};
pub use png::{encode_png, write_png};
