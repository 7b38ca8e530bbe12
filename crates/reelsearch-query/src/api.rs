//! Request and response shapes for search services.
//!
//! These are plain serde types; any transport (HTTP, IPC, CLI `--json`)
//! can carry them.

use reelsearch_core::{Content, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::{CriteriaSet, Criterion};
use crate::filter::FilterSpec;
use crate::orchestrator::SearchOrchestrator;

/// Free-text search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Natural-language query.
    pub query: String,
}

impl SearchRequest {
    /// Create a request.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Advanced search request: optional text plus criteria.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvancedSearchRequest {
    /// Optional title filter.
    #[serde(default)]
    pub query: String,

    /// Criteria in the order they were added.
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl AdvancedSearchRequest {
    /// Build a request from a live set.
    pub fn from_set(query: impl Into<String>, set: &CriteriaSet) -> Self {
        Self {
            query: query.into(),
            criteria: set.iter().cloned().collect(),
        }
    }

    /// Rebuild the criteria set carried by this request.
    pub fn criteria_set(&self) -> CriteriaSet {
        CriteriaSet::from_criteria(self.criteria.iter().cloned())
    }
}

/// Ranked search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked items, capped at the configured maximum.
    pub results: Vec<Content>,

    /// Number of matches before the cap was applied.
    pub total: usize,

    /// Preview text of the criteria (advanced searches only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    /// Strategy chosen for a free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<FilterSpec>,
}

impl SearchResponse {
    /// Returns `true` if the cap dropped matches.
    pub fn is_truncated(&self) -> bool {
        self.total > self.results.len()
    }
}

/// Serve a free-text search request.
///
/// # Errors
///
/// See [`SearchOrchestrator::search`].
pub async fn handle_search(
    orchestrator: &SearchOrchestrator,
    request: SearchRequest,
) -> Result<SearchResponse> {
    orchestrator.search_response(&request.query).await
}

/// Serve an advanced search request.
///
/// # Errors
///
/// See [`SearchOrchestrator::search_advanced`].
pub async fn handle_advanced_search(
    orchestrator: &SearchOrchestrator,
    request: AdvancedSearchRequest,
) -> Result<SearchResponse> {
    let set = request.criteria_set();
    orchestrator.advanced_response(&request.query, &set).await
}
