use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::quantize::{Quantizer, DEFAULT_DEPTH, SAMPLE_MAX_SIDE};
use crate::raster::SourceImage;

/// Extract a colour palette from an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to extract colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Median-cut depth (up to 2^depth colours)
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Longest side of the sampled thumbnail
    #[arg(long, default_value_t = SAMPLE_MAX_SIDE)]
    pub sample_size: u32,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let source = SourceImage::open(&args.file)?;
    let palette = Quantizer::new()
        .depth(args.depth)
        .sample_max_side(args.sample_size)
        .extract(&source)?;

    printer.status(
        "Sampled",
        &format!(
            "{} from {}",
            plural(palette.len(), "colour", "colours"),
            display_path(&args.file)
        ),
    );

    // YAML list lines, ready to paste under `palette:` in knots.yaml
    println!("palette:");
    for hex in palette.to_hex_list() {
        println!("  - '{}'", hex);
    }

    Ok(())
}
