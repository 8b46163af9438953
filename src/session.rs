//! Editing session - ties configuration, source, grid and tools together.
//!
//! The session is the single owner of the grid. Every change that affects
//! sampling rebuilds a complete new grid first and only then swaps it in,
//! so a failed rebuild leaves the previous grid in place.

use std::path::Path;

use crate::error::{KnotError, Result};
use crate::paint::{PaintEngine, PaintOutcome, Tool};
use crate::project::Project;
use crate::quantize::Quantizer;
use crate::raster::{map_grid, rasterize, SourceImage};
use crate::store::GridStore;
use crate::types::{Colour, Grid, GridConfig, Palette};

/// Run the full sampling pipeline for `config`.
pub fn build_grid(source: &SourceImage, config: &GridConfig) -> Result<Grid> {
    let raw = rasterize(source, config.rows, config.cols, config.contrast)?;
    Ok(map_grid(&raw, config.active_palette()))
}

/// A knot grid being edited.
#[derive(Debug, Clone)]
pub struct Session {
    config: GridConfig,
    source: Option<SourceImage>,
    source_ref: Option<String>,
    store: GridStore,
    engine: PaintEngine,
    quantizer: Quantizer,
}

impl Session {
    /// An empty session with a blank grid.
    pub fn new(mut config: GridConfig) -> Result<Self> {
        if config.rows == 0 || config.cols == 0 {
            return Err(KnotError::InvalidDimensions {
                rows: config.rows,
                cols: config.cols,
            });
        }
        config.contrast = GridConfig::clamp_contrast(config.contrast);

        Ok(Self {
            store: GridStore::new(config.rows, config.cols),
            config,
            source: None,
            source_ref: None,
            engine: PaintEngine::new(),
            quantizer: Quantizer::new(),
        })
    }

    /// Rebuild a session from a snapshot without resampling.
    ///
    /// The stored grid is adopted verbatim. No source is attached; call
    /// [`Session::attach_source`] to allow later resampling.
    pub fn from_project(project: Project) -> Result<Self> {
        let mut session = Self::new(project.config)?;
        session.store.replace(project.grid)?;
        session.source_ref = project.source;
        Ok(session)
    }

    /// Snapshot the session.
    pub fn to_project(&self) -> Project {
        Project::new(
            self.config.clone(),
            self.store.grid().clone(),
            self.source_ref.clone(),
        )
    }

    /// Use a custom quantizer for [`Session::auto_palette`].
    pub fn with_quantizer(mut self, quantizer: Quantizer) -> Self {
        self.quantizer = quantizer;
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        self.store.grid()
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn source_ref(&self) -> Option<&str> {
        self.source_ref.as_deref()
    }

    pub fn engine(&self) -> &PaintEngine {
        &self.engine
    }

    /// Mutable access to tool settings (colour, size, opacity).
    pub fn engine_mut(&mut self) -> &mut PaintEngine {
        &mut self.engine
    }

    /// Set a new source and resample from it.
    ///
    /// On failure the previous source and grid are kept.
    pub fn set_source(&mut self, source: SourceImage, reference: Option<String>) -> Result<()> {
        let grid = build_grid(&source, &self.config)?;
        self.store.reset(grid);
        self.source = Some(source);
        self.source_ref = reference;
        Ok(())
    }

    /// Decode an image file and resample from it.
    pub fn load_source(&mut self, path: &Path) -> Result<()> {
        let source = SourceImage::open(path)?;
        self.set_source(source, Some(path.display().to_string()))
    }

    /// Attach a source without touching the grid.
    ///
    /// For sessions restored from a project whose grid must survive until
    /// the next configuration change.
    pub fn attach_source(&mut self, source: SourceImage) {
        self.source = Some(source);
    }

    /// Discard the grid and rebuild it from the source.
    pub fn resample(&mut self) -> Result<()> {
        let source = self.source.as_ref().ok_or(KnotError::NoSource)?;
        let grid = build_grid(source, &self.config)?;
        self.store.reset(grid);
        Ok(())
    }

    /// Apply a new configuration.
    ///
    /// Changes that affect sampling rebuild the grid (dropping hand edits);
    /// display-only changes do not. Returns true if the grid was rebuilt.
    pub fn set_config(&mut self, mut next: GridConfig) -> Result<bool> {
        if next.rows == 0 || next.cols == 0 {
            return Err(KnotError::InvalidDimensions {
                rows: next.rows,
                cols: next.cols,
            });
        }
        next.contrast = GridConfig::clamp_contrast(next.contrast);

        if !self.config.needs_resample(&next) {
            self.config = next;
            return Ok(false);
        }

        let grid = match &self.source {
            Some(source) => build_grid(source, &next)?,
            None if (next.rows, next.cols) != (self.config.rows, self.config.cols) => {
                Grid::filled(next.rows, next.cols, Colour::WHITE)
            }
            None => {
                self.config = next;
                return Ok(false);
            }
        };

        self.store.reset(grid);
        self.config = next;
        Ok(true)
    }

    fn update(&mut self, f: impl FnOnce(&mut GridConfig)) -> Result<bool> {
        let mut next = self.config.clone();
        f(&mut next);
        self.set_config(next)
    }

    pub fn set_dimensions(&mut self, rows: usize, cols: usize) -> Result<bool> {
        self.update(|c| {
            c.rows = rows;
            c.cols = cols;
        })
    }

    pub fn set_contrast(&mut self, contrast: f32) -> Result<bool> {
        self.update(|c| c.contrast = contrast)
    }

    pub fn set_palette_mode(&mut self, enabled: bool) -> Result<bool> {
        self.update(|c| c.palette_mode = enabled)
    }

    pub fn set_palette(&mut self, palette: Palette) -> Result<bool> {
        self.update(|c| c.palette = palette)
    }

    pub fn add_palette_colour(&mut self, colour: Colour) -> Result<bool> {
        self.update(|c| c.palette.push(colour))
    }

    /// Replace one palette entry. Out-of-range indices change nothing.
    pub fn set_palette_colour(&mut self, index: usize, colour: Colour) -> Result<bool> {
        if index >= self.config.palette.len() {
            return Ok(false);
        }
        self.update(|c| {
            c.palette.set(index, colour);
        })
    }

    /// Remove one palette entry.
    ///
    /// Returns `Ok(false)` without changing anything when the palette would
    /// drop below two colours or the index is out of range.
    pub fn remove_palette_colour(&mut self, index: usize) -> Result<bool> {
        let mut palette = self.config.palette.clone();
        if palette.remove(index).is_none() {
            return Ok(false);
        }
        self.set_palette(palette)?;
        Ok(true)
    }

    /// Replace the palette with one extracted from the source.
    pub fn auto_palette(&mut self) -> Result<&Palette> {
        let source = self.source.as_ref().ok_or(KnotError::NoSource)?;
        let palette = self.quantizer.extract(source)?;
        self.set_palette(palette)?;
        Ok(&self.config.palette)
    }

    pub fn set_show_gridlines(&mut self, show: bool) {
        self.config.show_gridlines = show;
    }

    pub fn set_show_numbers(&mut self, show: bool) {
        self.config.show_numbers = show;
    }

    /// Select (or deselect) a tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.engine.select(tool);
    }

    pub fn pointer_down(&mut self, cell: Option<(usize, usize)>) -> PaintOutcome {
        self.engine.pointer_down(&mut self.store, cell)
    }

    pub fn pointer_move(&mut self, cell: Option<(usize, usize)>) -> PaintOutcome {
        self.engine.pointer_move(&mut self.store, cell)
    }

    pub fn pointer_up(&mut self) {
        self.engine.pointer_up();
    }
}
