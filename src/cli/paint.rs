//! Paint command implementation.
//!
//! Replays one pointer stroke against a saved project: the first `--at`
//! cell is the pointer-down, the rest are moves, then the pointer is
//! released and the project saved.

use std::path::PathBuf;

use clap::Args;

use crate::error::{KnotError, Result};
use crate::output::{display_path, plural, Printer};
use crate::paint::{PaintOutcome, Tool};
use crate::project::Project;
use crate::session::Session;
use crate::types::Colour;

use super::parse_cell;

/// Paint a stroke onto a saved project
#[derive(Args, Debug)]
pub struct PaintArgs {
    /// Project file to edit
    #[arg(required = true)]
    pub project: PathBuf,

    /// Tool: brush, eraser or dropper
    #[arg(long, default_value = "brush")]
    pub tool: String,

    /// Brush colour as hex
    #[arg(long)]
    pub colour: Option<Colour>,

    /// Brush size in knots
    #[arg(long, default_value_t = 1)]
    pub size: usize,

    /// Opacity (0 < opacity <= 1)
    #[arg(long, default_value_t = 1.0)]
    pub opacity: f32,

    /// Cells as ROW,COL; the stroke visits them in order
    #[arg(long = "at", required = true)]
    pub cells: Vec<String>,

    /// Write the result here instead of overwriting the project
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Result of replaying a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSummary {
    pub changed: usize,
    pub picked: Option<Colour>,
}

/// Replay a stroke on a session.
pub fn stroke(
    session: &mut Session,
    tool: Tool,
    cells: &[(usize, usize)],
) -> StrokeSummary {
    let mut summary = StrokeSummary {
        changed: 0,
        picked: None,
    };

    if tool != Tool::None && session.engine().tool() != tool {
        session.select_tool(tool);
    }

    let tally = |outcome: PaintOutcome, summary: &mut StrokeSummary| match outcome {
        PaintOutcome::Painted(n) => summary.changed += n,
        PaintOutcome::Picked(c) => summary.picked = Some(c),
        PaintOutcome::Ignored => {}
    };

    if let Some((&first, rest)) = cells.split_first() {
        tally(session.pointer_down(Some(first)), &mut summary);
        for &cell in rest {
            tally(session.pointer_move(Some(cell)), &mut summary);
        }
        session.pointer_up();
    }

    summary
}

pub fn run(args: PaintArgs, printer: &Printer) -> Result<()> {
    let tool = Tool::from_name(&args.tool).ok_or_else(|| KnotError::Parse {
        message: format!("Unknown tool: {}", args.tool),
        help: Some("Use brush, eraser or dropper".to_string()),
    })?;
    let cells = args
        .cells
        .iter()
        .map(|s| parse_cell(s))
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::from_project(Project::load(&args.project)?)?;
    {
        let engine = session.engine_mut();
        if let Some(colour) = args.colour {
            engine.set_brush_colour(colour);
        }
        engine.set_brush_size(args.size);
        engine.set_opacity(args.opacity)?;
    }

    let summary = stroke(&mut session, tool, &cells);

    if let Some(colour) = summary.picked {
        printer.info("Picked", &colour.hex());
    }
    if summary.changed == 0 && summary.picked.is_none() {
        printer.warning("Unchanged", "stroke made no visible change");
    } else if summary.changed > 0 {
        printer.status("Painted", &plural(summary.changed, "knot", "knots"));
    }

    let output = args.output.unwrap_or(args.project);
    session.to_project().save(&output)?;
    printer.status("Saved", &display_path(&output));

    Ok(())
}
