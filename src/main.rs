use clap::Parser;
use knots::cli::{Cli, Commands};
use knots::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => knots::cli::convert::run(args, &printer)?,
        Commands::Palette(args) => knots::cli::palette::run(args, &printer)?,
        Commands::Paint(args) => knots::cli::paint::run(args, &printer)?,
        Commands::Render(args) => knots::cli::render::run(args, &printer)?,
        Commands::Init(args) => knots::cli::init::run(args, &printer)?,
        Commands::Completions(args) => knots::cli::completions::run(args)?,
    }

    Ok(())
}
