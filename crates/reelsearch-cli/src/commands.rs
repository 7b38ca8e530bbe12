//! Command execution.
//!
//! Every command renders its output to a `String`; `main` only prints it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reelsearch_core::JsonFileRepository;
use reelsearch_query::{FilterOptions, QueryClassifier, SearchOrchestrator, suggestions};
use serde_json::json;

use crate::cli::{AdvancedArgs, Cli, Command, join_words};
use crate::config::CliConfig;
use crate::error::Result;
use crate::history::SearchHistory;
use crate::output;

/// Resolved settings shared by all commands.
#[derive(Debug, Clone)]
pub struct App {
    config: CliConfig,
    catalog: Option<PathBuf>,
    json: bool,
}

impl App {
    /// Build from parsed arguments, loading the config file.
    ///
    /// # Errors
    ///
    /// The config file cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = CliConfig::load(cli.config.as_deref())?;
        Ok(Self::new(config, cli.catalog.clone(), cli.json))
    }

    /// Build from an already-loaded config.
    pub fn new(config: CliConfig, catalog: Option<PathBuf>, json: bool) -> Self {
        Self {
            config,
            catalog,
            json,
        }
    }

    /// Run one command and return its rendered output.
    ///
    /// # Errors
    ///
    /// Invalid input, catalog failures, or history file errors.
    pub async fn execute(&self, command: &Command) -> Result<String> {
        match command {
            Command::Search { query } => self.search(&join_words(query)).await,
            Command::Advanced(args) => self.advanced(args).await,
            Command::Explain { query } => self.explain(&join_words(query)),
            Command::Suggest { prefix } => self.suggest(prefix.as_deref().unwrap_or("")),
            Command::Trending { limit } => self.trending(*limit).await,
            Command::History { clear } => self.history(*clear),
        }
    }

    fn orchestrator(&self) -> Result<SearchOrchestrator> {
        let catalog = self.config.catalog_path(self.catalog.as_deref())?;
        tracing::debug!(catalog = %catalog.display(), "Using catalog");
        Ok(SearchOrchestrator::with_config(
            Arc::new(JsonFileRepository::new(catalog)),
            self.config.search.clone(),
        ))
    }

    async fn search(&self, query: &str) -> Result<String> {
        let response = self.orchestrator()?.search_response(query).await?;
        tracing::info!(query, results = response.results.len(), "Search complete");
        self.remember(query);

        if self.json {
            output::format_json(&response)
        } else {
            Ok(output::format_response(query, &response))
        }
    }

    async fn advanced(&self, args: &AdvancedArgs) -> Result<String> {
        let criteria = args.criteria(&FilterOptions::default())?;
        let query = args.query_text();

        let response = self
            .orchestrator()?
            .advanced_response(&query, &criteria)
            .await?;
        let preview = criteria.preview_text();
        tracing::info!(
            preview = %preview,
            results = response.results.len(),
            "Advanced search complete"
        );

        let heading = if query.trim().is_empty() {
            preview
        } else {
            query
        };
        self.remember(&heading);

        if self.json {
            output::format_json(&response)
        } else {
            Ok(output::format_response(&heading, &response))
        }
    }

    fn explain(&self, query: &str) -> Result<String> {
        let classifier =
            QueryClassifier::with_popularity_limit(self.config.search.popularity_limit);
        let classification = classifier.explain(query);

        if self.json {
            output::format_json(&json!({
                "query": query,
                "rule": classification.rule,
                "spec": classification.spec,
            }))
        } else {
            output::format_explanation(query, &classification)
        }
    }

    fn suggest(&self, prefix: &str) -> Result<String> {
        let matches = suggestions(prefix);
        if self.json {
            output::format_json(&matches)
        } else {
            Ok(output::format_list(&matches, "No suggestions"))
        }
    }

    async fn trending(&self, limit: Option<usize>) -> Result<String> {
        let results = self.orchestrator()?.trending(limit).await?;
        if self.json {
            output::format_json(&results)
        } else {
            Ok(output::format_results("trending", &results))
        }
    }

    fn history(&self, clear: bool) -> Result<String> {
        let Some(path) = self.config.history_path() else {
            return Ok("Search history is unavailable on this platform\n".to_string());
        };
        let mut history = SearchHistory::load(path)?;

        if clear {
            history.clear();
            history.save()?;
            return Ok("Search history cleared\n".to_string());
        }

        if self.json {
            output::format_json(&history.entries())
        } else {
            Ok(output::format_list(history.entries(), "No recent searches"))
        }
    }

    /// Record a successful query. Failures are logged, never fatal.
    fn remember(&self, query: &str) {
        let Some(path) = self.config.history_path() else {
            return;
        };
        if let Err(e) = record_query(&path, query) {
            tracing::warn!(path = %path.display(), error = %e, "Could not update search history");
        }
    }
}

fn record_query(path: &Path, query: &str) -> Result<()> {
    let mut history = SearchHistory::load(path)?;
    history.record(query);
    history.save()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::Value;
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {"Id": 1, "title": "Jumanji", "type": "movie", "year": 2017,
         "genres": "Action, Comedy", "rating": 6.9, "popularity": 88,
         "cast": [{"name": "Dwayne Johnson", "character": "Bravestone"}],
         "platforms": [{"name": "Netflix"}]},
        {"Id": 2, "title": "The Office", "type": "series", "year": 2005,
         "genres": "Comedy", "rating": 8.9, "popularity": 95,
         "platforms": [{"name": "Peacock"}]},
        {"Id": 3, "title": "Dune: Part Two", "type": "movie", "year": 2024,
         "genres": ["Sci-Fi", "Adventure"], "rating": 8.6, "popularity": 93,
         "platforms": [{"name": "HBO Max"}]}
    ]"#;

    struct Fixture {
        dir: TempDir,
        app: App,
    }

    fn fixture(json: bool) -> Fixture {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(&catalog, CATALOG).unwrap();

        let config = CliConfig {
            catalog_path: Some(catalog),
            history_path: Some(dir.path().join("history.json")),
            ..Default::default()
        };
        Fixture {
            app: App::new(config, None, json),
            dir,
        }
    }

    fn history_entries(f: &Fixture) -> Vec<String> {
        SearchHistory::load(f.dir.path().join("history.json"))
            .unwrap()
            .entries()
            .to_vec()
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[tokio::test]
    async fn test_search_prints_and_records_history() {
        let f = fixture(false);
        let out = f
            .app
            .execute(&Command::Search {
                query: words("movies with the rock"),
            })
            .await
            .unwrap();

        assert!(out.contains("1. Jumanji (2017, movie)"));
        assert_eq!(history_entries(&f), vec!["movies with the rock"]);
    }

    #[tokio::test]
    async fn test_search_json_output() {
        let f = fixture(true);
        let out = f
            .app
            .execute(&Command::Search {
                query: words("comedy"),
            })
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["results"][0]["title"], "The Office");
        assert_eq!(value["strategy"]["strategy"], "by_genre");
    }

    #[tokio::test]
    async fn test_advanced_records_preview_when_no_query() {
        let f = fixture(false);
        let args = AdvancedArgs {
            genres: vec!["Comedy".into()],
            ratings: vec!["8".into()],
            ..Default::default()
        };

        let out = f.app.execute(&Command::Advanced(args)).await.unwrap();
        assert!(out.starts_with("Searching Comedy movies and shows rated 8+ Great"));
        assert!(out.contains("The Office"));
        assert!(!out.contains("Jumanji"));
        assert_eq!(
            history_entries(&f),
            vec!["Comedy movies and shows rated 8+ Great"]
        );
    }

    #[tokio::test]
    async fn test_advanced_without_input_fails() {
        let f = fixture(false);
        let err = f
            .app
            .execute(&Command::Advanced(AdvancedArgs::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
        assert!(history_entries(&f).is_empty());
    }

    #[tokio::test]
    async fn test_explain_needs_no_catalog() {
        let app = App::new(CliConfig::default(), None, false);
        let out = app
            .execute(&Command::Explain {
                query: words("shows like the office"),
            })
            .await
            .unwrap();
        assert!(out.contains("Rule:  similarity"));
    }

    #[tokio::test]
    async fn test_explain_json() {
        let app = App::new(CliConfig::default(), None, true);
        let out = app
            .execute(&Command::Explain {
                query: words("something obscure"),
            })
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rule"], "full_text");
        assert_eq!(value["spec"]["text"], "something obscure");
    }

    #[tokio::test]
    async fn test_suggest() {
        let app = App::new(CliConfig::default(), None, false);
        let out = app
            .execute(&Command::Suggest {
                prefix: Some("dicaprio".into()),
            })
            .await
            .unwrap();
        assert_eq!(out, "1. Movies with Leonardo DiCaprio\n");
    }

    #[tokio::test]
    async fn test_trending_limit() {
        let f = fixture(true);
        let out = f
            .app
            .execute(&Command::Trending { limit: Some(2) })
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let titles: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["The Office", "Dune: Part Two"]);
    }

    #[tokio::test]
    async fn test_history_show_and_clear() {
        let f = fixture(false);
        f.app
            .execute(&Command::Search {
                query: words("comedy"),
            })
            .await
            .unwrap();

        let shown = f
            .app
            .execute(&Command::History { clear: false })
            .await
            .unwrap();
        assert_eq!(shown, "1. comedy\n");

        f.app
            .execute(&Command::History { clear: true })
            .await
            .unwrap();
        assert!(history_entries(&f).is_empty());
    }

    #[tokio::test]
    async fn test_missing_catalog_is_config_error() {
        let app = App::new(CliConfig::default(), None, false);
        let err = app
            .execute(&Command::Trending { limit: None })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_unreadable_catalog_is_repository_error() {
        let dir = TempDir::new().unwrap();
        let app = App::new(
            CliConfig::default(),
            Some(dir.path().join("missing.json")),
            false,
        );
        let err = app
            .execute(&Command::Search {
                query: words("comedy"),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(&err, Error::Core(core) if core.is_repository_error()),
            "unexpected error: {err}"
        );
    }
}
