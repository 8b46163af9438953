//! Project manifest (knots.yaml) parsing.
//!
//! The manifest holds default grid settings for a directory. Every field is
//! optional; command-line flags override it and built-in defaults fill the
//! gaps.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KnotError, Result};
use crate::types::{GridConfig, Palette};

/// Manifest filename looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "knots.yaml";

/// Default knot size in rendered output.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Default settings loaded from knots.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub contrast: Option<f32>,

    /// Builtin palette name.
    pub preset: Option<String>,

    /// Explicit palette as hex strings; wins over `preset`.
    pub palette: Option<Vec<String>>,

    pub palette_mode: Option<bool>,
    pub cell_size: Option<u32>,
    pub show_gridlines: Option<bool>,
    pub show_numbers: Option<bool>,
}

impl Manifest {
    /// Load manifest from a knots.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KnotError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| KnotError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `dir/knots.yaml` if it exists.
    pub fn find(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILENAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Resolve the configured palette, if any.
    ///
    /// Unparseable hex entries are skipped; an unknown preset is an error.
    pub fn palette(&self) -> Result<Option<Palette>> {
        if let Some(hexes) = &self.palette {
            return Ok(Some(Palette::from_hex_list(hexes)));
        }

        match &self.preset {
            Some(name) => resolve_preset(name).map(Some),
            None => Ok(None),
        }
    }

    /// Apply the manifest on top of the built-in defaults.
    pub fn grid_config(&self) -> Result<GridConfig> {
        let defaults = GridConfig::default();

        Ok(GridConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            contrast: GridConfig::clamp_contrast(self.contrast.unwrap_or(defaults.contrast)),
            palette_mode: self.palette_mode.unwrap_or(defaults.palette_mode),
            palette: self.palette()?.unwrap_or(defaults.palette),
            show_gridlines: self.show_gridlines.unwrap_or(defaults.show_gridlines),
            show_numbers: self.show_numbers.unwrap_or(defaults.show_numbers),
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
    }
}

/// Look up a builtin palette, with a helpful error listing the choices.
pub fn resolve_preset(name: &str) -> Result<Palette> {
    Palette::preset(name).ok_or_else(|| KnotError::Parse {
        message: format!("Unknown palette preset: {}", name),
        help: Some(format!(
            "Available presets: {}",
            Palette::preset_names().collect::<Vec<_>>().join(", ")
        )),
    })
}
