//! Advanced (criteria-based) search through the orchestrator.

use reelsearch_core::Error;
use reelsearch_query::{
    AdvancedSearchRequest, CriteriaSession, CriteriaSet, CriterionKind, FilterOptions,
    handle_advanced_search,
};

use crate::common::{TestHarness, failing_orchestrator, titles};

#[tokio::test]
async fn test_empty_request_is_rejected_without_fetch() {
    let harness = TestHarness::new();
    let err = harness
        .orchestrator
        .search_advanced("", &CriteriaSet::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidQuery { .. }));
    assert_eq!(harness.repository.calls(), 0);
}

#[tokio::test]
async fn test_genre_and_rating() {
    let harness = TestHarness::new();
    let options = FilterOptions::default();

    let mut set = CriteriaSet::new();
    set.add(CriterionKind::Genre, "Drama", None).unwrap();
    options.add_rating(&mut set, "8").unwrap();

    let response = harness.orchestrator.advanced_response("", &set).await.unwrap();
    assert_eq!(titles(&response.results), vec!["Stranger Things", "Oppenheimer"]);
    assert_eq!(
        response.preview.as_deref(),
        Some("Drama movies and shows rated 8+ Great")
    );
}

#[tokio::test]
async fn test_repeated_genres_are_anded() {
    let harness = TestHarness::new();

    let mut set = CriteriaSet::new();
    set.add(CriterionKind::Genre, "Horror", None).unwrap();
    set.add(CriterionKind::Genre, "Thriller", None).unwrap();
    assert!(set.has_repeated_kinds());

    let response = harness.orchestrator.advanced_response("", &set).await.unwrap();
    assert_eq!(
        response.preview.as_deref(),
        Some("Horror or Thriller movies and shows")
    );
    assert_eq!(titles(&response.results), vec!["Talk to Me"]);
}

#[tokio::test]
async fn test_query_adds_title_filter() {
    let harness = TestHarness::new();

    let mut set = CriteriaSet::new();
    set.add(CriterionKind::Year, "2023", None).unwrap();
    set.add(CriterionKind::Platform, "Netflix", None).unwrap();

    let all = harness.orchestrator.search_advanced("", &set).await.unwrap();
    assert_eq!(titles(&all), vec!["Talk to Me"]);

    let titled = harness.orchestrator.search_advanced("TALK", &set).await.unwrap();
    assert_eq!(titles(&titled), vec!["Talk to Me"]);

    let none = harness.orchestrator.search_advanced("barbie", &set).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_title_only_search() {
    let harness = TestHarness::new();
    let results = harness
        .orchestrator
        .search_advanced("the", &CriteriaSet::new())
        .await
        .unwrap();
    assert_eq!(
        titles(&results),
        vec![
            "The Big Bang Theory",
            "Jumanji: Welcome to the Jungle",
            "Killers of the Flower Moon"
        ]
    );
}

#[tokio::test]
async fn test_session_drives_search() {
    let harness = TestHarness::new();
    let session = CriteriaSession::new("builder");

    session.add(CriterionKind::Genre, "Comedy", None).unwrap();
    session.add(CriterionKind::Platform, "HBO Max", None).unwrap();
    assert_eq!(session.preview_text(), "Comedy movies and shows on HBO Max");

    let results = harness
        .orchestrator
        .search_advanced("", &session.snapshot())
        .await
        .unwrap();
    assert_eq!(titles(&results), vec!["The Big Bang Theory", "Barbie"]);
}

#[tokio::test]
async fn test_handle_advanced_request_json() {
    let harness = TestHarness::new();
    let request: AdvancedSearchRequest = serde_json::from_str(
        r#"{"criteria": [{"id": 1, "type": "genre", "value": "Crime"}]}"#,
    )
    .unwrap();

    let response = handle_advanced_search(&harness.orchestrator, request)
        .await
        .unwrap();
    assert_eq!(response.total, 1);
    assert_eq!(titles(&response.results), vec!["Killers of the Flower Moon"]);
}

#[tokio::test]
async fn test_advanced_repository_failure() {
    let mut set = CriteriaSet::new();
    set.add(CriterionKind::Genre, "Drama", None).unwrap();
    let err = failing_orchestrator()
        .search_advanced("", &set)
        .await
        .unwrap_err();
    assert!(err.is_repository_error());
}
