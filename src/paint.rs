//! Paint engine - brush, eraser and dropper tools.
//!
//! Tools form a small state machine:
//! - selecting the active tool again switches back to [`Tool::None`]
//! - the dropper reads one cell into the brush colour, then becomes the brush
//! - brush and eraser paint on pointer-down and on every move while held
//!
//! The eraser is the brush with white paint; both share the same opacity.

use crate::error::{KnotError, Result};
use crate::store::GridStore;
use crate::types::Colour;

/// The active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    None,
    Brush,
    Eraser,
    Dropper,
}

impl Tool {
    /// Parse a tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(Tool::None),
            "brush" => Some(Tool::Brush),
            "eraser" => Some(Tool::Eraser),
            "dropper" | "pick" => Some(Tool::Dropper),
            _ => None,
        }
    }
}

/// Session-scoped tool settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub brush_colour: Colour,
    pub brush_size: usize,
    pub opacity: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::None,
            brush_colour: Colour::BLACK,
            brush_size: 1,
            opacity: 1.0,
        }
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOutcome {
    /// Nothing happened.
    Ignored,
    /// Paint was applied; the count is cells that actually changed.
    Painted(usize),
    /// The dropper picked a colour and switched to the brush.
    Picked(Colour),
}

/// Drives tool state from pointer events.
#[derive(Debug, Clone, Default)]
pub struct PaintEngine {
    state: ToolState,
    button_down: bool,
}

impl PaintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn tool(&self) -> Tool {
        self.state.tool
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down
    }

    /// Select a tool. Selecting the active tool deselects it.
    pub fn select(&mut self, tool: Tool) {
        self.state.tool = if self.state.tool == tool {
            Tool::None
        } else {
            tool
        };
        self.button_down = false;
    }

    pub fn set_brush_colour(&mut self, colour: Colour) {
        self.state.brush_colour = colour;
    }

    /// Set the brush size; anything below 1 becomes 1.
    pub fn set_brush_size(&mut self, size: usize) {
        self.state.brush_size = size.max(1);
    }

    /// Set the opacity. Values above 1 clamp to 1; zero or less is rejected.
    pub fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        if opacity.is_nan() || opacity <= 0.0 {
            return Err(KnotError::InvalidOpacity(opacity));
        }
        self.state.opacity = opacity.min(1.0);
        Ok(())
    }

    /// Pointer pressed over `cell` (`None` when outside the grid).
    pub fn pointer_down(&mut self, store: &mut GridStore, cell: Option<(usize, usize)>) -> PaintOutcome {
        match self.state.tool {
            Tool::None => PaintOutcome::Ignored,
            Tool::Dropper => {
                let picked = cell.and_then(|(row, col)| store.get(row, col));
                match picked {
                    Some(colour) => {
                        self.state.brush_colour = colour;
                        self.state.tool = Tool::Brush;
                        PaintOutcome::Picked(colour)
                    }
                    None => PaintOutcome::Ignored,
                }
            }
            Tool::Brush | Tool::Eraser => {
                self.button_down = true;
                self.apply(store, cell)
            }
        }
    }

    /// Pointer moved over `cell`. Paints only while a brush or eraser is held.
    pub fn pointer_move(&mut self, store: &mut GridStore, cell: Option<(usize, usize)>) -> PaintOutcome {
        match self.state.tool {
            Tool::Brush | Tool::Eraser if self.button_down => self.apply(store, cell),
            _ => PaintOutcome::Ignored,
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.button_down = false;
    }

    fn paint_colour(&self) -> Colour {
        match self.state.tool {
            Tool::Eraser => Colour::WHITE,
            _ => self.state.brush_colour,
        }
    }

    fn apply(&self, store: &mut GridStore, cell: Option<(usize, usize)>) -> PaintOutcome {
        let Some((row, col)) = cell else {
            return PaintOutcome::Ignored;
        };
        if row >= store.rows() || col >= store.cols() {
            return PaintOutcome::Ignored;
        }

        PaintOutcome::Painted(store.paint_region(
            row,
            col,
            self.state.brush_size,
            self.paint_colour(),
            self.state.opacity,
        ))
    }
}
