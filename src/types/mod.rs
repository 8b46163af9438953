//! Core domain types for knots.
//!
//! - `Colour` - RGB colour values plus distance and blend maths
//! - `Palette` - Ordered colour lists used to constrain the grid
//! - `Grid` - The rows x cols knot buffer
//! - `GridConfig` - Settings that decide how a source becomes a grid

mod colour;
mod config;
mod grid;
mod palette;

pub use colour::{blend, distance, Colour};
pub use config::{GridConfig, DEFAULT_CONTRAST, MAX_CONTRAST, MIN_CONTRAST};
pub use grid::Grid;
pub use palette::{Palette, MIN_PALETTE_LEN};
