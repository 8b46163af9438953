//! Project snapshots.
//!
//! A project stores the grid exactly as edited, so reopening it never runs
//! the rasterizer and hand edits survive.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KnotError, Result};
use crate::types::{Grid, GridConfig};

/// Current snapshot format version.
pub const PROJECT_VERSION: u32 = 1;

/// A saved session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub version: u32,
    pub config: GridConfig,
    pub grid: Grid,
    /// Where the source image came from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Project {
    pub fn new(config: GridConfig, grid: Grid, source: Option<String>) -> Self {
        Self {
            version: PROJECT_VERSION,
            config,
            grid,
            source,
        }
    }

    /// Parse a project from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(content).map_err(|e| KnotError::Parse {
            message: format!("Invalid project: {}", e),
            help: Some("Project files are written by `knots convert --project`".to_string()),
        })?;

        if project.version > PROJECT_VERSION {
            return Err(KnotError::Parse {
                message: format!("Unsupported project version {}", project.version),
                help: Some(format!("This build reads versions up to {}", PROJECT_VERSION)),
            });
        }

        Ok(project)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| KnotError::Encode {
            message: format!("Failed to serialize project: {}", e),
        })
    }

    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KnotError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read project: {}", e),
        })?;
        Self::from_json(&content)
    }

    /// Write a project file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?).map_err(|e| KnotError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write project: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> Project {
        let config = GridConfig {
            rows: 2,
            cols: 3,
            ..GridConfig::default()
        };
        let grid = Grid::from_fn(2, 3, |r, c| Colour::rgb(r as u8, c as u8, 200));
        Project::new(config, grid, Some("photo.png".to_string()))
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rug.json");

        let project = sample();
        project.save(&path).unwrap();

        assert_eq!(Project::load(&path).unwrap(), project);
    }

    #[test]
    fn test_source_optional() {
        let mut project = sample();
        project.source = None;
        let json = project.to_json().unwrap();
        assert!(!json.contains("\"source\""));
        assert_eq!(Project::from_json(&json).unwrap().source, None);
    }

    #[test]
    fn test_future_version_rejected() {
        let mut project = sample();
        project.version = PROJECT_VERSION + 1;
        let json = project.to_json().unwrap();
        assert!(Project::from_json(&json).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            Project::from_json("{\"version\": 1}"),
            Err(KnotError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Project::load(&dir.path().join("nope.json")),
            Err(KnotError::Io { .. })
        ));
    }
}
