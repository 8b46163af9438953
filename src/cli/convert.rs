//! Convert command implementation.
//!
//! Samples an image into a knot grid and writes a PNG and/or a project.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::quantize::{Quantizer, DEFAULT_DEPTH};
use crate::render::{write_png, RenderOptions};
use crate::session::Session;

use super::{load_manifest, render_checked, resolve_palette};

/// Sample an image into a knot grid
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source image
    #[arg(required = true)]
    pub image: PathBuf,

    /// Number of knot rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of knot columns
    #[arg(long)]
    pub cols: Option<usize>,

    /// Contrast factor (0.5 - 2.0)
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Snap every knot to the palette
    #[arg(long)]
    pub palette_mode: bool,

    /// Palette as comma-separated hex colours
    #[arg(long, conflicts_with_all = ["preset", "auto_palette"])]
    pub palette: Option<String>,

    /// Builtin palette name
    #[arg(long, conflicts_with = "auto_palette")]
    pub preset: Option<String>,

    /// Extract the palette from the image (implies --palette-mode)
    #[arg(long)]
    pub auto_palette: bool,

    /// Median-cut depth for --auto-palette
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Output PNG (default: <image>.knots.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also save an editable project file
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Pixel size of one knot in the PNG
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Hide gridlines
    #[arg(long)]
    pub no_gridlines: bool,

    /// Hide column numbers
    #[arg(long)]
    pub no_numbers: bool,
}

/// Default PNG path next to the source image.
fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid");
    image.with_file_name(format!("{}.knots.png", stem))
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let manifest = load_manifest()?;
    let mut config = manifest.grid_config()?;

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(contrast) = args.contrast {
        config.contrast = contrast;
    }
    if let Some(palette) = resolve_palette(args.palette.as_deref(), args.preset.as_deref(), &manifest)? {
        config.palette = palette;
    }
    config.palette_mode |= args.palette_mode || args.auto_palette;
    config.show_gridlines &= !args.no_gridlines;
    config.show_numbers &= !args.no_numbers;

    let mut session = Session::new(config)?.with_quantizer(Quantizer::new().depth(args.depth));

    printer.status(
        "Sampling",
        &format!(
            "{} ({}x{} knots)",
            display_path(&args.image),
            session.config().cols,
            session.config().rows
        ),
    );
    session.load_source(&args.image)?;

    if args.auto_palette {
        let palette = session.auto_palette()?;
        printer.info("Extracted", &plural(palette.len(), "colour", "colours"));
    }

    if session.config().palette_mode {
        printer.info(
            "Mapped",
            &format!(
                "to {}",
                plural(session.config().palette.len(), "colour", "colours")
            ),
        );
    }

    let cell_size = args.cell_size.unwrap_or_else(|| manifest.cell_size());
    let options = RenderOptions::from_config(session.config(), cell_size);
    let img = render_checked(session.grid(), &options)?;

    let output = args.output.unwrap_or_else(|| default_output(&args.image));
    write_png(&img, &output)?;
    printer.status(
        "Wrote",
        &format!(
            "{} {}",
            display_path(&output),
            printer.dim(&format!("({}x{} px)", img.width(), img.height()))
        ),
    );

    if let Some(project_path) = &args.project {
        session.to_project().save(project_path)?;
        printer.status("Saved", &display_path(project_path));
    }

    Ok(())
}
