pub mod completions;
pub mod convert;
pub mod init;
pub mod paint;
pub mod palette;
pub mod render;

use clap::{Parser, Subcommand};

use image::RgbaImage;

use crate::config::{resolve_preset, Manifest};
use crate::error::{KnotError, Result};
use crate::render::{render_grid, RenderOptions};
use crate::types::{Grid, Palette};

/// knots - turn images into editable rug knot grids
#[derive(Parser, Debug)]
#[command(name = "knots")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample an image into a knot grid
    Convert(convert::ConvertArgs),

    /// Extract a palette from an image with median-cut
    Palette(palette::PaletteArgs),

    /// Paint a stroke onto a saved project
    Paint(paint::PaintArgs),

    /// Render a saved project to PNG
    Render(render::RenderArgs),

    /// Initialize a knots.yaml manifest
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load knots.yaml from the working directory, or defaults.
pub(crate) fn load_manifest() -> Result<Manifest> {
    let cwd = std::env::current_dir()?;
    Ok(Manifest::find(&cwd)?.unwrap_or_default())
}

/// Parse a comma-separated hex list, rejecting it if nothing parses.
pub(crate) fn parse_palette_arg(s: &str) -> Result<Palette> {
    let entries: Vec<&str> = s.split(',').map(str::trim).collect();
    let palette = Palette::from_hex_list(&entries);
    if palette.is_empty() {
        return Err(KnotError::Parse {
            message: format!("No valid colours in palette '{}'", s),
            help: Some("Use comma-separated hex colours, e.g. #ffffff,#000000".to_string()),
        });
    }
    Ok(palette)
}

/// Resolve `--palette` / `--preset` flags, falling back to the manifest.
pub(crate) fn resolve_palette(
    palette: Option<&str>,
    preset: Option<&str>,
    manifest: &Manifest,
) -> Result<Option<Palette>> {
    if let Some(list) = palette {
        return parse_palette_arg(list).map(Some);
    }
    if let Some(name) = preset {
        return resolve_preset(name).map(Some);
    }
    manifest.palette()
}

/// Render for output, turning "nothing to draw" into an error.
pub(crate) fn render_checked(grid: &Grid, options: &RenderOptions) -> Result<RgbaImage> {
    render_grid(grid, options).ok_or_else(|| {
        if grid.is_empty() {
            KnotError::InvalidDimensions {
                rows: grid.rows(),
                cols: grid.cols(),
            }
        } else {
            KnotError::ImageTooLarge {
                rows: grid.rows(),
                cols: grid.cols(),
                cell_size: options.cell_size,
            }
        }
    })
}

/// Parse a "ROW,COL" cell position.
pub(crate) fn parse_cell(s: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = s.splitn(2, ',').collect();
    if parts.len() != 2 {
        return Err(KnotError::Parse {
            message: format!("Invalid cell '{}': expected ROW,COL (e.g. 4,12)", s),
            help: Some("Rows and columns count from zero".to_string()),
        });
    }

    let row: usize = parts[0].trim().parse().map_err(|_| KnotError::Parse {
        message: format!("Invalid row '{}' in cell '{}'", parts[0], s),
        help: Some("Row must be a non-negative integer".to_string()),
    })?;

    let col: usize = parts[1].trim().parse().map_err(|_| KnotError::Parse {
        message: format!("Invalid column '{}' in cell '{}'", parts[1], s),
        help: Some("Column must be a non-negative integer".to_string()),
    })?;

    Ok((row, col))
}
