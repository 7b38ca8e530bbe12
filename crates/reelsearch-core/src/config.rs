//! Search configuration.
//!
//! Applications embed [`SearchConfig`] in their own configuration file
//! (the CLI reads it from the `[search]` table of its TOML config).

use serde::{Deserialize, Serialize};

/// Tuning knobs for classification, ranking and result size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of ranked results returned by a search (`0` = no cap).
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// `n` used when a query asks for popular/trending/best content.
    #[serde(default = "default_popularity_limit")]
    pub popularity_limit: usize,

    /// Default number of items returned by the trending listing.
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    /// Break popularity ties by rating when a rating threshold was applied.
    #[serde(default = "default_true")]
    pub rating_tiebreak: bool,
}

fn default_max_results() -> usize {
    50
}

fn default_popularity_limit() -> usize {
    10
}

fn default_trending_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl SearchConfig {
    /// The result cap as an `Option` (`None` when uncapped).
    pub fn result_cap(&self) -> Option<usize> {
        (self.max_results > 0).then_some(self.max_results)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            popularity_limit: default_popularity_limit(),
            trending_limit: default_trending_limit(),
            rating_tiebreak: default_true(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
