//! Configuration loaded from `~/.config/sheet/config.yaml`
//!
//! ```yaml
//! delimiters: ":,"
//! max_row_size: 10240
//! max_cell_size: 100
//! log_to_file: false
//! ```
//!
//! Every key is optional. The `-d` command-line flag overrides `delimiters`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::row::{DelimiterSet, Limits, DEFAULT_MAX_CELL_SIZE, DEFAULT_MAX_ROW_SIZE};

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Delimiter characters; the first one is written to the output
    #[serde(default = "default_delimiters")]
    pub delimiters: String,

    /// Row capacity in bytes, newline included
    #[serde(default = "default_max_row_size")]
    pub max_row_size: usize,

    /// Maximum cell length in bytes
    #[serde(default = "default_max_cell_size")]
    pub max_cell_size: usize,

    /// Also write debug logs to `~/.config/sheet/logs/`
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_delimiters() -> String {
    " ".to_string()
}

fn default_max_row_size() -> usize {
    DEFAULT_MAX_ROW_SIZE
}

fn default_max_cell_size() -> usize {
    DEFAULT_MAX_CELL_SIZE
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            delimiters: default_delimiters(),
            max_row_size: default_max_row_size(),
            max_cell_size: default_max_cell_size(),
            log_to_file: false,
        }
    }
}

impl SheetConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    /// Load config from `path`
    ///
    /// A missing file gives defaults. A file that exists but cannot be read
    /// or parsed is an `InvalidConfig` error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let invalid = |message: String| SheetError::InvalidConfig {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config = Self::from_yaml(&content).map_err(|e| invalid(e.to_string()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from YAML text
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Size limits, validated
    pub fn limits(&self) -> Result<Limits> {
        Limits::new(self.max_row_size, self.max_cell_size)
    }

    /// Delimiter set, preferring `override_chars` (from `-d`) when given
    pub fn delimiter_set(&self, override_chars: Option<&str>) -> Result<DelimiterSet> {
        DelimiterSet::new(override_chars.unwrap_or(&self.delimiters))
    }
}
