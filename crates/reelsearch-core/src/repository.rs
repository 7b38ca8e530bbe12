//! Content repository trait and bundled implementations.
//!
//! The query engine never talks to a data source directly. It is handed a
//! `ContentRepository` and awaits [`ContentRepository::get_all`] once per
//! search.
//!
//! # Implementations
//!
//! - [`InMemoryRepository`]: a fixed, already-normalized collection
//! - [`JsonFileRepository`]: a JSON catalog file, normalized on every load
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reelsearch_core::{ContentRepository, JsonFileRepository};
//!
//! let repo: Arc<dyn ContentRepository> = Arc::new(JsonFileRepository::new("catalog.json"));
//! let items = repo.get_all().await?;
//! println!("{} items from {}", items.len(), repo.name());
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::content::{Content, ContentId};
use crate::error::{Error, Result};
use crate::normalize::{LoadReport, normalize_records};

/// Source of truth for the catalog.
///
/// Implementations own retry, caching and transport concerns; callers treat
/// a returned error as final.
///
/// # Async
///
/// `get_all` is async because real sources are remote or file-backed.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Return the full, normalized content collection.
    async fn get_all(&self) -> Result<Vec<Content>>;

    /// Repository name for diagnostics.
    fn name(&self) -> &str;

    /// Look up a single item by id.
    ///
    /// The default implementation scans [`get_all`](Self::get_all).
    async fn get_by_id(&self, id: &ContentId) -> Result<Option<Content>> {
        Ok(self.get_all().await?.into_iter().find(|c| &c.id == id))
    }
}

// ============================================================================
// InMemoryRepository
// ============================================================================

/// Repository over a fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: Vec<Content>,
}

impl InMemoryRepository {
    /// Create a repository over already-normalized items.
    pub fn new(items: Vec<Content>) -> Self {
        Self { items }
    }

    /// Create a repository from raw JSON records, skipping malformed ones.
    pub fn from_records(records: Vec<Value>) -> (Self, LoadReport) {
        let (items, report) = normalize_records(records);
        (Self { items }, report)
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the repository holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn get_all(&self) -> Result<Vec<Content>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// JsonFileRepository
// ============================================================================

/// Accepted catalog file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    /// `[ {...}, {...} ]`
    Records(Vec<Value>),
    /// `{ "data": [ ... ] }`, the envelope used by record APIs.
    Envelope { data: Vec<Value> },
}

impl CatalogDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Records(records) => records,
            Self::Envelope { data } => data,
        }
    }
}

/// Repository backed by a JSON catalog file.
///
/// The file is re-read on every call so edits are picked up without a
/// restart. Records are normalized on load; malformed ones are skipped and
/// counted.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository for the catalog at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize the catalog, returning the load report alongside.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Repository`] if the file cannot be read or is not a
    /// JSON array (or `{"data": [...]}` envelope).
    pub async fn load(&self) -> Result<(Vec<Content>, LoadReport)> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::repository_with_source(
                format!("Failed to read catalog {}", self.path.display()),
                e,
            )
        })?;

        let document: CatalogDocument = serde_json::from_str(&text).map_err(|e| {
            Error::repository_with_source(
                format!("Malformed catalog {}", self.path.display()),
                e,
            )
        })?;

        let (items, report) = normalize_records(document.into_records());
        if report.skipped > 0 {
            log::warn!(
                "Catalog {}: skipped {} of {} records",
                self.path.display(),
                report.skipped,
                report.total()
            );
        }
        Ok((items, report))
    }
}

#[async_trait]
impl ContentRepository for JsonFileRepository {
    async fn get_all(&self) -> Result<Vec<Content>> {
        let (items, _report) = self.load().await?;
        Ok(items)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

// ============================================================================
// Tests
// ============================================================================
