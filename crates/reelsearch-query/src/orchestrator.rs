//! Search orchestration.
//!
//! [`SearchOrchestrator`] ties a repository, the classifier and the engine
//! together. It owns no session state: criteria are passed in per call.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reelsearch_core::JsonFileRepository;
//! use reelsearch_query::SearchOrchestrator;
//!
//! let orchestrator = SearchOrchestrator::new(Arc::new(JsonFileRepository::new("catalog.json")));
//! let results = orchestrator.search("comedy movies with the rock").await?;
//! ```

use std::fmt;
use std::sync::Arc;

use reelsearch_core::{Content, ContentId, ContentRepository, Error, Result, SearchConfig};

use crate::api::SearchResponse;
use crate::classifier::QueryClassifier;
use crate::criteria::CriteriaSet;
use crate::engine::{Predicate, PredicateEngine};
use crate::filter::FilterSpec;
use crate::options;

/// Runs free-text and advanced searches against an injected repository.
#[derive(Clone)]
pub struct SearchOrchestrator {
    repository: Arc<dyn ContentRepository>,
    classifier: Arc<QueryClassifier>,
    engine: PredicateEngine,
    config: SearchConfig,
}

impl SearchOrchestrator {
    /// Create an orchestrator with default configuration.
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self::with_config(repository, SearchConfig::default())
    }

    /// Create an orchestrator with explicit configuration.
    pub fn with_config(repository: Arc<dyn ContentRepository>, config: SearchConfig) -> Self {
        Self {
            repository,
            classifier: Arc::new(QueryClassifier::with_popularity_limit(
                config.popularity_limit,
            )),
            engine: PredicateEngine::from_config(&config),
            config,
        }
    }

    /// Replace the classifier (e.g. with a reordered rule table).
    pub fn with_classifier(mut self, classifier: QueryClassifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Free-text search.
    ///
    /// The ranked list is cut to [`SearchConfig::max_results`] (50 by
    /// default, `0` disables the cap). Use
    /// [`search_response`](Self::search_response) to see the uncapped total.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidQuery`] for empty or blank input (the repository is
    ///   not contacted)
    /// - [`Error::Repository`] if the repository fails
    pub async fn search(&self, query: &str) -> Result<Vec<Content>> {
        Ok(self.search_response(query).await?.results)
    }

    /// Free-text search returning the full response.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub async fn search_response(&self, query: &str) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(Error::invalid_query("Search query is empty"));
        }

        let classification = self.classifier.explain(query);
        let items = self.fetch().await?;
        let ranked = self.engine.apply(&classification.spec, items);
        Ok(self.respond(ranked, None, Some(classification.spec)))
    }

    /// Advanced search: criteria ANDed, plus an optional title filter.
    ///
    /// Like [`search`](Self::search), the ranked list is cut to
    /// [`SearchConfig::max_results`]; [`advanced_response`](Self::advanced_response)
    /// reports the uncapped total.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidQuery`] if both `query` and `criteria` are empty
    ///   (the repository is not contacted)
    /// - [`Error::Repository`] if the repository fails
    pub async fn search_advanced(
        &self,
        query: &str,
        criteria: &CriteriaSet,
    ) -> Result<Vec<Content>> {
        Ok(self.advanced_response(query, criteria).await?.results)
    }

    /// Advanced search returning the full response, including preview text.
    ///
    /// # Errors
    ///
    /// See [`search_advanced`](Self::search_advanced).
    pub async fn advanced_response(
        &self,
        query: &str,
        criteria: &CriteriaSet,
    ) -> Result<SearchResponse> {
        let text = query.trim();
        if text.is_empty() && criteria.is_empty() {
            return Err(Error::invalid_query(
                "Advanced search needs a query or at least one criterion",
            ));
        }

        if criteria.has_repeated_kinds() {
            log::debug!(
                "Criteria repeat a kind; '{}' is evaluated as AND",
                criteria.preview_text()
            );
        }

        let mut predicates = criteria.predicates();
        if !text.is_empty() {
            predicates.push(Predicate::title_contains(text));
        }

        let items = self.fetch().await?;
        let ranked = self.engine.apply_predicates(&predicates, items);
        Ok(self.respond(ranked, Some(criteria.preview_text()), None))
    }

    /// The `limit` most popular items (configured default when `None`).
    ///
    /// # Errors
    ///
    /// [`Error::Repository`] if the repository fails.
    pub async fn trending(&self, limit: Option<usize>) -> Result<Vec<Content>> {
        let n = limit.unwrap_or(self.config.trending_limit);
        let items = self.fetch().await?;
        Ok(self.engine.apply(&FilterSpec::ByPopularityTopN { n }, items))
    }

    /// Items rated at least `min`, highest rated first.
    ///
    /// # Errors
    ///
    /// [`Error::Repository`] if the repository fails.
    pub async fn by_min_rating(&self, min: f64) -> Result<Vec<Content>> {
        let mut items: Vec<Content> = self
            .fetch()
            .await?
            .into_iter()
            .filter(|c| c.rating >= min)
            .collect();
        items.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(self.cap(items))
    }

    /// Look up one item.
    ///
    /// # Errors
    ///
    /// [`Error::Repository`] if the repository fails.
    pub async fn get_by_id(&self, id: &ContentId) -> Result<Option<Content>> {
        self.repository.get_by_id(id).await
    }

    /// Example queries containing `prefix`.
    pub fn suggestions(&self, prefix: &str) -> Vec<&'static str> {
        options::suggestions(prefix)
    }

    async fn fetch(&self) -> Result<Vec<Content>> {
        self.repository.get_all().await.inspect_err(|e| {
            log::warn!("Repository '{}' failed: {e}", self.repository.name());
        })
    }

    fn respond(
        &self,
        ranked: Vec<Content>,
        preview: Option<String>,
        strategy: Option<FilterSpec>,
    ) -> SearchResponse {
        let total = ranked.len();
        SearchResponse {
            results: self.cap(ranked),
            total,
            preview,
            strategy,
        }
    }

    fn cap(&self, mut items: Vec<Content>) -> Vec<Content> {
        if let Some(max) = self.config.result_cap() {
            items.truncate(max);
        }
        items
    }
}

impl fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("repository", &self.repository.name())
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
