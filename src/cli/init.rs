//! Init command implementation.
//!
//! Writes a commented `knots.yaml` with the built-in defaults.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{DEFAULT_CELL_SIZE, MANIFEST_FILENAME};
use crate::error::{KnotError, Result};
use crate::output::{display_path, Printer};
use crate::types::{GridConfig, Palette};

/// Initialize a knots project by writing knots.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing knots.yaml
    #[arg(long)]
    pub force: bool,
}

/// Manifest text with every setting spelled out.
pub fn manifest_template() -> String {
    let defaults = GridConfig::default();
    let presets: Vec<&str> = Palette::preset_names().collect();

    // Build YAML manually to keep the comments
    let mut yaml = String::new();
    yaml.push_str("# Grid size in knots\n");
    yaml.push_str(&format!("rows: {}\n", defaults.rows));
    yaml.push_str(&format!("cols: {}\n", defaults.cols));
    yaml.push_str("\n# Contrast applied before sampling (0.5 - 2.0)\n");
    yaml.push_str(&format!("contrast: {:.1}\n", defaults.contrast));
    yaml.push_str("\n# Snap knots to the palette\n");
    yaml.push_str(&format!("palette_mode: {}\n", defaults.palette_mode));
    yaml.push_str(&format!("\n# Builtin palette: {}\n", presets.join(", ")));
    yaml.push_str("preset: earth\n");
    yaml.push_str("# Or list colours explicitly (wins over preset):\n");
    yaml.push_str("# palette:\n#   - '#ffffff'\n#   - '#000000'\n");
    yaml.push_str("\n# Rendering\n");
    yaml.push_str(&format!("cell_size: {}\n", DEFAULT_CELL_SIZE));
    yaml.push_str(&format!("show_gridlines: {}\n", defaults.show_gridlines));
    yaml.push_str(&format!("show_numbers: {}\n", defaults.show_numbers));
    yaml
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(KnotError::Parse {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&manifest_path, manifest_template()).map_err(|e| KnotError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.status("Created", &display_path(&manifest_path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Manifest;
    use tempfile::tempdir;

    #[test]
    fn test_template_parses_to_defaults() {
        let manifest = Manifest::parse(&manifest_template()).unwrap();
        assert_eq!(manifest.grid_config().unwrap(), GridConfig::default());
        assert_eq!(manifest.cell_size(), DEFAULT_CELL_SIZE);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let args = || InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        run(args(), &Printer::plain()).unwrap();
        assert!(dir.path().join(MANIFEST_FILENAME).exists());
        assert!(run(args(), &Printer::plain()).is_err());

        run(
            InitArgs {
                path: dir.path().to_path_buf(),
                force: true,
            },
            &Printer::plain(),
        )
        .unwrap();
    }
}
