//! knots - Image to rug knot grid converter
//!
//! A library for sampling images into editable grids of knot colours,
//! snapping them to a palette, painting over them and rendering the
//! result as a numbered pattern chart.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod paint;
pub mod project;
pub mod quantize;
pub mod raster;
pub mod render;
pub mod session;
pub mod store;
pub mod types;

pub use config::Manifest;
pub use error::{KnotError, Result};
pub use paint::{PaintEngine, PaintOutcome, Tool, ToolState};
pub use project::Project;
pub use quantize::{extract_palette, median_cut, Quantizer};
pub use raster::{map_grid, nearest, rasterize, SourceImage};
pub use render::{render_grid, write_png, RenderOptions};
pub use session::{build_grid, Session};
pub use store::GridStore;
pub use types::{blend, distance, Colour, Grid, GridConfig, Palette};
