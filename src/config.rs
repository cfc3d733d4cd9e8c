//! Settings file handling.
//!
//! Settings come from an optional JSON file; every field has a default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where rendered grids go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Standalone HTML page
    #[default]
    Html,
    /// Standard output
    Console,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Outline font used to measure glyph brightness.
    pub font: PathBuf,
    /// CSS font family written into HTML output.
    pub font_name: String,
    pub html_file: PathBuf,
    pub output: OutputTarget,
    /// Starting characters per row, clamped to what the image allows.
    pub initial_columns: u32,
    /// Smallest tile side; bounds the highest resolution.
    pub min_pixels_per_char: u32,
    /// Side of the bitmap glyphs are rasterized into.
    pub glyph_size: usize,
    pub initial_chars: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: PathBuf::from("assets/DejaVuSansMono.ttf"),
            font_name: "Courier New".to_string(),
            html_file: PathBuf::from("out.html"),
            output: OutputTarget::Html,
            initial_columns: 64,
            min_pixels_per_char: 2,
            glyph_size: 16,
            initial_chars: "0123456789".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let settings: Settings = serde_json::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_columns == 0 {
            return Err(ConfigError::Invalid {
                field: "initial_columns",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_pixels_per_char == 0 {
            return Err(ConfigError::Invalid {
                field: "min_pixels_per_char",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=256).contains(&self.glyph_size) {
            return Err(ConfigError::Invalid {
                field: "glyph_size",
                reason: format!("must be between 1 and 256, got {}", self.glyph_size),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
