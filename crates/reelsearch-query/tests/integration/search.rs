//! Free-text search through the orchestrator.

use reelsearch_core::Error;
use reelsearch_query::FilterSpec;

use crate::common::{TestHarness, failing_orchestrator, movie, titles};

#[tokio::test]
async fn test_cast_alias_query() {
    let harness = TestHarness::new();
    let results = harness
        .orchestrator
        .search("Comedy movies with The Rock")
        .await
        .expect("search should succeed");

    assert_eq!(titles(&results), vec!["Jumanji: Welcome to the Jungle"]);
}

#[tokio::test]
async fn test_similarity_query() {
    let harness = TestHarness::new();

    let response = harness
        .orchestrator
        .search_response("Shows like Big Bang Theory")
        .await
        .unwrap();
    assert_eq!(titles(&response.results), vec!["The Big Bang Theory"]);
    assert!(matches!(
        response.strategy,
        Some(FilterSpec::BySimilarity { .. })
    ));

    let results = harness.orchestrator.search("like stranger things").await.unwrap();
    assert_eq!(titles(&results), vec!["Stranger Things"]);
}

#[tokio::test]
async fn test_popularity_query_ranks_everything() {
    let harness = TestHarness::new();
    let results = harness
        .orchestrator
        .search("Most popular movies of 2023")
        .await
        .unwrap();

    assert_eq!(
        titles(&results),
        vec![
            "Stranger Things",
            "The Big Bang Theory",
            "Oppenheimer",
            "Barbie",
            "Jumanji: Welcome to the Jungle",
            "Killers of the Flower Moon",
            "Talk to Me",
        ]
    );
}

#[tokio::test]
async fn test_genre_wins_over_year() {
    let harness = TestHarness::new();
    let results = harness.orchestrator.search("comedy 2023").await.unwrap();
    assert_eq!(
        titles(&results),
        vec![
            "The Big Bang Theory",
            "Barbie",
            "Jumanji: Welcome to the Jungle"
        ]
    );
}

#[tokio::test]
async fn test_year_and_type_queries() {
    let harness = TestHarness::new();

    let by_year = harness.orchestrator.search("released in 2023").await.unwrap();
    assert_eq!(
        titles(&by_year),
        vec![
            "Oppenheimer",
            "Barbie",
            "Killers of the Flower Moon",
            "Talk to Me"
        ]
    );

    let by_type = harness.orchestrator.search("tv").await.unwrap();
    assert_eq!(titles(&by_type), vec!["Stranger Things", "The Big Bang Theory"]);
}

#[tokio::test]
async fn test_fallback_full_text() {
    let harness = TestHarness::new();

    let synopsis = harness.orchestrator.search("atomic").await.unwrap();
    assert_eq!(titles(&synopsis), vec!["Oppenheimer"]);

    let character = harness.orchestrator.search("Burkhart").await.unwrap();
    assert_eq!(titles(&character), vec!["Killers of the Flower Moon"]);

    let nothing = harness.orchestrator.search("zzz no match").await.unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_blank_query_never_reaches_repository() {
    let harness = TestHarness::new();

    for query in ["", "   ", "\n\t"] {
        let err = harness.orchestrator.search(query).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
        assert!(err.is_user_error());
    }
    assert_eq!(harness.repository.calls(), 0);
}

#[tokio::test]
async fn test_repository_fetched_once_per_search() {
    let harness = TestHarness::new();
    harness.orchestrator.search("horror").await.unwrap();
    harness.orchestrator.search("dicaprio").await.unwrap();
    assert_eq!(harness.repository.calls(), 2);
}

#[tokio::test]
async fn test_repository_failure_is_surfaced() {
    let err = failing_orchestrator().search("comedy").await.unwrap_err();
    assert!(err.is_repository_error());
    assert!(err.to_string().contains("catalog service unavailable"));
}

#[tokio::test]
async fn test_top_n_over_fifteen_items() {
    let items = (1..=15)
        .map(|i| movie(i, &format!("Film {i}"), (i % 5) as f64))
        .collect();
    let harness = TestHarness::with_items(items);

    let results = harness.orchestrator.search("trending").await.unwrap();
    assert_eq!(results.len(), 10);
    assert!(results.windows(2).all(|w| w[0].popularity >= w[1].popularity));
    // Popularity 4 ties keep catalog order.
    assert_eq!(
        titles(&results[..3]),
        vec!["Film 4", "Film 9", "Film 14"]
    );
}
