//! Editor configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::layout::Layout;

/// Errors raised while reading editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid editor config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a dialogue editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory save records are written to and read from.
    pub save_dir: PathBuf,

    /// Treat any dangling reference found while loading as a hard error.
    pub strict_load: bool,

    /// Default node placements.
    pub layout: Layout,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("Assets/Resources"),
            strict_load: false,
            layout: Layout::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from TOML text. Missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
