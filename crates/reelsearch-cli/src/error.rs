//! Error types for reelsearch-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for reelsearch-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in reelsearch-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the search core
    #[error(transparent)]
    Core(#[from] reelsearch_core::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the file it concerns.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
