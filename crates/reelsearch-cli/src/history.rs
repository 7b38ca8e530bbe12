//! Persisted search history.
//!
//! Keeps the most recent distinct queries, newest first, in a small JSON
//! file. Re-running a query moves it to the front instead of duplicating it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of remembered queries.
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    queries: Vec<String>,
}

/// Recent searches backed by a JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    path: PathBuf,
    entries: Vec<String>,
}

impl SearchHistory {
    /// Load history from `path`. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// The file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let mut file: HistoryFile = serde_json::from_str(&content)?;
                file.queries.truncate(MAX_ENTRIES);
                file.queries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(Error::io(e, path)),
        };
        Ok(Self { path, entries })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `query` to the front, dropping the oldest beyond [`MAX_ENTRIES`].
    ///
    /// Blank queries are ignored. Deduplication is by exact text, so queries
    /// differing only in case or surrounding whitespace are kept apart.
    pub fn record(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }
        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the history to its file, creating parent directories.
    ///
    /// # Errors
    ///
    /// I/O or encoding failure.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(e, parent))?;
        }

        let file = HistoryFile {
            queries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json).map_err(|e| Error::io(e, &self.path))?;
        log::debug!("Saved {} history entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
