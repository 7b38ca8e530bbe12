//! Common test utilities and fake repositories for query integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reelsearch_core::{
    Content, ContentRepository, ContentType, Error, InMemoryRepository, Result, normalize_records,
};
use reelsearch_query::SearchOrchestrator;
use serde_json::json;

/// Repository that counts `get_all` calls.
pub struct CountingRepository {
    inner: InMemoryRepository,
    calls: AtomicUsize,
}

impl CountingRepository {
    /// Wrap a fixed collection.
    pub fn new(items: Vec<Content>) -> Self {
        Self {
            inner: InMemoryRepository::new(items),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `get_all` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentRepository for CountingRepository {
    async fn get_all(&self) -> Result<Vec<Content>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all().await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Repository whose data source is always unavailable.
pub struct FailingRepository;

#[async_trait]
impl ContentRepository for FailingRepository {
    async fn get_all(&self) -> Result<Vec<Content>> {
        Err(Error::repository("catalog service unavailable"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Test harness: an orchestrator over a counting repository.
pub struct TestHarness {
    /// Repository handle, for call assertions.
    pub repository: Arc<CountingRepository>,
    /// Orchestrator under test.
    pub orchestrator: SearchOrchestrator,
}

impl TestHarness {
    /// Harness over the standard catalog.
    pub fn new() -> Self {
        Self::with_items(catalog())
    }

    /// Harness over a custom collection.
    pub fn with_items(items: Vec<Content>) -> Self {
        let repository = Arc::new(CountingRepository::new(items));
        let orchestrator = SearchOrchestrator::new(repository.clone());
        Self {
            repository,
            orchestrator,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator over a repository that always fails.
pub fn failing_orchestrator() -> SearchOrchestrator {
    SearchOrchestrator::new(Arc::new(FailingRepository))
}

/// A small mixed catalog, loaded through the raw-record adapter.
pub fn catalog() -> Vec<Content> {
    let records = vec![
        json!({
            "Id": 1, "title": "Jumanji: Welcome to the Jungle", "type": "movie", "year": 2017,
            "genres": "Action, Adventure, Comedy", "rating": 6.9, "popularity": 88.0,
            "cast": [{"name": "Dwayne Johnson", "character": "Dr. Smolder Bravestone"}],
            "platforms": [{"name": "Netflix"}]
        }),
        json!({
            "Id": 2, "title": "The Big Bang Theory", "type": "series", "year": 2007,
            "genres": "Comedy, Romance", "rating": 8.2, "popularity": 92.0,
            "cast": "Jim Parsons, Johnny Galecki",
            "platforms": [{"name": "HBO Max"}]
        }),
        json!({
            "Id": 3, "title": "Stranger Things", "type": "series", "year": 2016,
            "genres": ["Sci-Fi", "Horror", "Drama"], "rating": 8.7, "popularity": 97.0,
            "platforms": [{"name": "Netflix"}]
        }),
        json!({
            "Id": 4, "title": "Oppenheimer", "type": "movie", "year": 2023,
            "genres": "Drama, Thriller", "rating": 8.4, "popularity": 90.0,
            "synopsis": "The story of the atomic bomb.",
            "platforms": [{"name": "Peacock"}]
        }),
        json!({
            "Id": 5, "title": "Barbie", "type": "movie", "year": 2023,
            "genres": "Comedy, Adventure, Fantasy", "rating": 6.9, "popularity": 90.0,
            "platforms": [{"name": "HBO Max"}]
        }),
        json!({
            "Id": 6, "title": "Talk to Me", "type": "movie", "year": 2023,
            "genres": "Horror, Thriller", "rating": 7.1, "popularity": 60.0,
            "platforms": [{"name": "Netflix"}]
        }),
        json!({
            "Id": 7, "title": "Killers of the Flower Moon", "type": "movie", "year": 2023,
            "genres": "Crime, Drama", "rating": 7.6, "popularity": 70.0,
            "cast": [{"name": "Leonardo DiCaprio", "character": "Ernest Burkhart"}],
            "platforms": [{"name": "Apple TV+"}]
        }),
        json!({"title": "Missing everything"}),
    ];

    let (items, report) = normalize_records(records);
    assert_eq!(report.skipped, 1);
    items
}

/// Convenience: titles of a result list.
pub fn titles(items: &[Content]) -> Vec<&str> {
    items.iter().map(|c| c.title.as_str()).collect()
}

/// Convenience: a bare movie.
pub fn movie(id: u64, title: &str, popularity: f64) -> Content {
    Content::new(id, title, ContentType::Movie, 2020).with_popularity(popularity)
}
