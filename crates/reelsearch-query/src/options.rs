//! Selectable filter options and query suggestions.

use serde::{Deserialize, Serialize};

use crate::criteria::{CriteriaSet, Criterion, CriterionKind};
use reelsearch_core::Result;

const GENRES: [&str; 12] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Thriller",
    "Adventure",
    "Fantasy",
    "Crime",
    "Documentary",
    "Animation",
];

const NEWEST_YEAR: i32 = 2024;
const OLDEST_YEAR: i32 = 2015;

const RATINGS: [(&str, f64); 4] = [
    ("9+ Excellent", 9.0),
    ("8+ Great", 8.0),
    ("7+ Good", 7.0),
    ("6+ Fair", 6.0),
];

const PLATFORMS: [&str; 8] = [
    "Netflix",
    "Prime Video",
    "Disney+",
    "HBO Max",
    "Hulu",
    "Apple TV+",
    "Paramount+",
    "Peacock",
];

const SUGGESTIONS: [&str; 8] = [
    "Comedy movies with The Rock",
    "Shows like Big Bang Theory",
    "Most popular movies of 2023",
    "Horror movies from the 80s",
    "Sci-fi series on Netflix",
    "Movies with Leonardo DiCaprio",
    "Best action movies of 2024",
    "Binge-worthy crime series",
];

/// A labelled rating threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingOption {
    /// Display label, e.g. `"8+ Great"`.
    pub label: String,
    /// Minimum rating.
    pub value: f64,
}

/// The values a user can pick from when building criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Genre tags.
    pub genres: Vec<String>,
    /// Release years, newest first.
    pub years: Vec<i32>,
    /// Rating thresholds, highest first.
    pub ratings: Vec<RatingOption>,
    /// Streaming platforms.
    pub platforms: Vec<String>,
}

impl FilterOptions {
    /// Label for a rating threshold, if it is one of the offered options.
    pub fn rating_label(&self, value: f64) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.value == value)
            .map(|r| r.label.as_str())
    }

    /// Add a rating criterion to `set`, labelled when the threshold is a known option.
    ///
    /// # Errors
    ///
    /// Fails if `value` is not a valid rating.
    pub fn add_rating(&self, set: &mut CriteriaSet, value: &str) -> Result<Criterion> {
        let label = value
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|v| self.rating_label(v));
        set.add(CriterionKind::Rating, value, label)
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            genres: GENRES.iter().map(|g| g.to_string()).collect(),
            years: (OLDEST_YEAR..=NEWEST_YEAR).rev().collect(),
            ratings: RATINGS
                .iter()
                .map(|(label, value)| RatingOption {
                    label: label.to_string(),
                    value: *value,
                })
                .collect(),
            platforms: PLATFORMS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Example queries containing `prefix` (case-insensitive).
///
/// An empty or blank prefix returns every suggestion.
pub fn suggestions(prefix: &str) -> Vec<&'static str> {
    let needle = prefix.trim().to_lowercase();
    SUGGESTIONS
        .iter()
        .copied()
        .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FilterOptions::default();
        assert_eq!(options.genres.len(), 12);
        assert_eq!(options.years.first(), Some(&2024));
        assert_eq!(options.years.last(), Some(&2015));
        assert_eq!(options.years.len(), 10);
        assert_eq!(options.ratings[0].label, "9+ Excellent");
        assert_eq!(options.platforms.len(), 8);
        assert!(options.platforms.iter().any(|p| p == "Apple TV+"));
    }

    #[test]
    fn test_rating_label_lookup() {
        let options = FilterOptions::default();
        assert_eq!(options.rating_label(8.0), Some("8+ Great"));
        assert_eq!(options.rating_label(7.5), None);
    }

    #[test]
    fn test_add_rating_uses_option_label() {
        let options = FilterOptions::default();
        let mut set = CriteriaSet::new();

        let known = options.add_rating(&mut set, "9").unwrap();
        assert_eq!(known.label(), "9+ Excellent");
        let custom = options.add_rating(&mut set, "7.5").unwrap();
        assert_eq!(custom.label(), "7.5");
        assert!(options.add_rating(&mut set, "high").is_err());
    }

    #[test]
    fn test_suggestions_empty_prefix_returns_all() {
        assert_eq!(suggestions("").len(), 8);
        assert_eq!(suggestions("  ").len(), 8);
    }

    #[test]
    fn test_suggestions_filter_case_insensitive() {
        assert_eq!(
            suggestions("MOVIES WITH"),
            vec!["Comedy movies with The Rock", "Movies with Leonardo DiCaprio"]
        );
        assert_eq!(suggestions("crime"), vec!["Binge-worthy crime series"]);
        assert!(suggestions("anime").is_empty());
    }
}
