//! CLI configuration file.
//!
//! ```toml
//! catalog_path = "/data/catalog.json"
//! history_path = "/home/me/.local/share/reelsearch/history.json"
//!
//! [search]
//! max_results = 25
//! popularity_limit = 10
//! ```
//!
//! Resolution order for the file: `--config` / `REELSEARCH_CONFIG`, then
//! `<config dir>/reelsearch/config.toml`. A missing default file means
//! built-in defaults; a missing explicit file is an error.

use std::path::{Path, PathBuf};

use reelsearch_core::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_DIR: &str = "reelsearch";
const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.json";

/// Top-level CLI configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// JSON catalog to search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Where recent searches are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,

    /// Search tuning.
    #[serde(default)]
    pub search: SearchConfig,
}

impl CliConfig {
    /// Platform default location of the config file.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Fails if an explicit file is missing, or any file found cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// I/O failure or invalid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Invalid TOML or mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    ///
    /// # Errors
    ///
    /// Serialization failure.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Catalog to search: the command-line override, else the configured path.
    ///
    /// # Errors
    ///
    /// Neither is set.
    pub fn catalog_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.catalog_path.clone())
            .ok_or_else(|| {
                Error::config("No catalog configured; pass --catalog or set catalog_path")
            })
    }

    /// History file: the configured path, else `<data dir>/reelsearch/history.json`.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(HISTORY_FILE)))
    }
}

// ============================================================================
// Tests
// ============================================================================
