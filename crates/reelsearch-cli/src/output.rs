//! Output formatting for search results.
//!
//! Human-readable terminal output and JSON for scripting.

use reelsearch_core::Content;
use reelsearch_query::{Classification, SearchResponse};
use serde::Serialize;

use crate::error::Result;

/// Maximum characters of synopsis shown per result.
const SYNOPSIS_MAX_LEN: usize = 120;

/// Formats any serializable value as pretty JSON.
///
/// # Errors
///
/// Serialization failure.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Formats a search response for the terminal.
pub fn format_response(heading: &str, response: &SearchResponse) -> String {
    let mut output = String::new();
    if let Some(preview) = &response.preview {
        output.push_str(&format!("Searching {preview}\n\n"));
    }
    output.push_str(&format_results(heading, &response.results));
    if response.is_truncated() {
        output.push_str(&format!(
            "\n(showing {} of {} matches)\n",
            response.results.len(),
            response.total
        ));
    }
    output
}

/// Formats a ranked list for the terminal.
pub fn format_results(heading: &str, results: &[Content]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{heading}\"\n");
    }

    let mut output = format!(
        "Found {} title{} for \"{heading}\":\n\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
    );

    for (i, item) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({}, {}) rating {:.1}\n",
            i + 1,
            item.title,
            item.year,
            item.content_type,
            item.rating
        ));

        if !item.genres.is_empty() {
            let genres: Vec<&str> = item.genres.iter().map(String::as_str).collect();
            output.push_str(&format!("   {}\n", genres.join(", ")));
        }
        if !item.platforms.is_empty() {
            let platforms: Vec<&str> = item.platforms.iter().map(|p| p.name.as_str()).collect();
            output.push_str(&format!("   on {}\n", platforms.join(", ")));
        }
        if !item.synopsis.is_empty() {
            output.push_str(&format!("   {}\n", truncate_text(&item.synopsis, SYNOPSIS_MAX_LEN)));
        }
    }
    output
}

/// Formats a classifier explanation.
///
/// # Errors
///
/// Serialization failure.
pub fn format_explanation(query: &str, classification: &Classification) -> Result<String> {
    Ok(format!(
        "Query: {query}\nRule:  {}\nFilter: {}\n{}\n",
        classification.rule,
        classification.spec,
        serde_json::to_string_pretty(&classification.spec)?
    ))
}

/// Formats a numbered list (suggestions, history).
pub fn format_list<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        return format!("{empty}\n");
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}\n", i + 1, item.as_ref()))
        .collect()
}

/// Truncates text to `max_len` characters, adding "..." when cut.
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reelsearch_core::ContentType;
    use reelsearch_query::QueryClassifier;

    fn sample() -> Content {
        Content::new(1u64, "Oppenheimer", ContentType::Movie, 2023)
            .with_genres(["Drama", "Thriller"])
            .with_rating(8.4)
            .with_platform("Peacock")
            .with_synopsis("The story of the atomic bomb.")
    }

    #[test]
    fn test_format_results_empty() {
        assert_eq!(format_results("xyz", &[]), "No results found for \"xyz\"\n");
    }

    #[test]
    fn test_format_results_lines() {
        let text = format_results("drama", &[sample()]);
        assert!(text.starts_with("Found 1 title for \"drama\""));
        assert!(text.contains("1. Oppenheimer (2023, movie) rating 8.4"));
        assert!(text.contains("Drama, Thriller"));
        assert!(text.contains("on Peacock"));
    }

    #[test]
    fn test_format_response_with_preview_and_truncation() {
        let response = SearchResponse {
            results: vec![sample()],
            total: 3,
            preview: Some("Drama movies and shows".into()),
            strategy: None,
        };
        let text = format_response("Drama movies and shows", &response);
        assert!(text.starts_with("Searching Drama movies and shows"));
        assert!(text.contains("(showing 1 of 3 matches)"));
    }

    #[test]
    fn test_format_explanation() {
        let classification = QueryClassifier::new().explain("comedy 2023");
        let text = format_explanation("comedy 2023", &classification).unwrap();
        assert!(text.contains("Rule:  genre"));
        assert!(text.contains("\"strategy\": \"by_genre\""));
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&["a", "b"], "none"), "1. a\n2. b\n");
        assert_eq!(format_list::<&str>(&[], "none"), "none\n");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghijkl", 5), "abcde...");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&vec![sample()]).unwrap();
        assert!(json.contains("\"title\": \"Oppenheimer\""));
        assert!(json.contains("\"type\": \"movie\""));
    }
}
