use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::project::Project;
use crate::render::{write_png, RenderOptions};

use super::{load_manifest, render_checked};

/// Render a saved project to PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Project file
    #[arg(required = true)]
    pub project: PathBuf,

    /// Output PNG
    #[arg(long, short, required = true)]
    pub output: PathBuf,

    /// Pixel size of one knot
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Hide gridlines
    #[arg(long)]
    pub no_gridlines: bool,

    /// Hide column numbers
    #[arg(long)]
    pub no_numbers: bool,
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let project = Project::load(&args.project)?;
    let cell_size = match args.cell_size {
        Some(size) => size,
        None => load_manifest()?.cell_size(),
    };

    let mut options = RenderOptions::from_config(&project.config, cell_size);
    options.show_gridlines &= !args.no_gridlines;
    options.show_numbers &= !args.no_numbers;

    let img = render_checked(&project.grid, &options)?;

    write_png(&img, &args.output)?;
    printer.status(
        "Rendered",
        &format!(
            "{} {}",
            display_path(&args.output),
            printer.dim(&format!("({}x{} px)", img.width(), img.height()))
        ),
    );

    Ok(())
}
