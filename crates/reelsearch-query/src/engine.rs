//! Predicate evaluation and ranking.
//!
//! The engine is pure: it consumes a content collection and returns the
//! filtered, ranked subset. Fetching is the orchestrator's job.

use std::cmp::Ordering;

use reelsearch_core::{Content, SearchConfig};

use crate::criteria::{CriteriaSet, CriterionValue};
use crate::filter::FilterSpec;

/// Boolean test over one content item.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Genre set contains the tag exactly.
    Genre(String),
    /// Release year equals.
    Year(i32),
    /// Rating is at least the threshold.
    MinRating(f64),
    /// Available on the named platform.
    Platform(String),
    /// Title contains the (lower-cased) text.
    TitleContains(String),
}

impl Predicate {
    /// Case-insensitive title substring predicate.
    pub fn title_contains(text: &str) -> Self {
        Self::TitleContains(text.trim().to_lowercase())
    }

    /// Returns `true` if `item` satisfies the predicate.
    pub fn matches(&self, item: &Content) -> bool {
        match self {
            Self::Genre(tag) => item.has_genre(tag),
            Self::Year(year) => item.year == *year,
            Self::MinRating(min) => item.rating >= *min,
            Self::Platform(name) => item.is_on_platform(name),
            Self::TitleContains(needle) => item.title.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Returns `true` for a rating threshold.
    pub fn is_rating_threshold(&self) -> bool {
        matches!(self, Self::MinRating(_))
    }
}

impl From<&CriterionValue> for Predicate {
    fn from(value: &CriterionValue) -> Self {
        match value {
            CriterionValue::Genre(tag) => Self::Genre(tag.clone()),
            CriterionValue::Year(year) => Self::Year(*year),
            CriterionValue::Rating(min) => Self::MinRating(*min),
            CriterionValue::Platform(name) => Self::Platform(name.clone()),
        }
    }
}

/// Applies filter specs and criteria, then ranks by popularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateEngine {
    rating_tiebreak: bool,
}

impl PredicateEngine {
    /// Create an engine. With `rating_tiebreak`, equal popularity is
    /// broken by rating whenever a rating threshold took part.
    pub fn new(rating_tiebreak: bool) -> Self {
        Self { rating_tiebreak }
    }

    /// Create an engine from search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.rating_tiebreak)
    }

    /// Apply a single classifier spec and rank the survivors.
    pub fn apply(&self, spec: &FilterSpec, items: Vec<Content>) -> Vec<Content> {
        match spec {
            FilterSpec::ByPopularityTopN { n } => {
                let mut ranked = items;
                rank(&mut ranked, false);
                ranked.truncate(*n);
                ranked
            }
            FilterSpec::ByCast { name } => {
                let needle = name.to_lowercase();
                self.filter_rank(items, |c| c.cast_contains(&needle), false)
            }
            FilterSpec::BySimilarity {
                genres,
                content_type,
            } => {
                let matches_type =
                    |c: &Content| content_type.as_ref().is_none_or(|t| c.content_type == *t);
                self.filter_rank(
                    items,
                    |c| c.has_all_genres(genres) && matches_type(c),
                    false,
                )
            }
            FilterSpec::ByGenre { tag } => self.filter_rank(items, |c| c.has_genre(tag), false),
            FilterSpec::ByYear { year } => self.filter_rank(items, |c| c.year == *year, false),
            FilterSpec::ByType { content_type } => {
                self.filter_rank(items, |c| c.content_type == *content_type, false)
            }
            FilterSpec::ByFullText { text } => {
                let needle = text.to_lowercase();
                self.filter_rank(items, |c| c.text_contains(&needle), false)
            }
        }
    }

    /// AND every criterion of `criteria` over `items` and rank the survivors.
    pub fn apply_all(&self, criteria: &CriteriaSet, items: Vec<Content>) -> Vec<Content> {
        self.apply_predicates(&criteria.predicates(), items)
    }

    /// AND `predicates` over `items` and rank the survivors.
    ///
    /// An empty predicate list keeps every item.
    pub fn apply_predicates(&self, predicates: &[Predicate], items: Vec<Content>) -> Vec<Content> {
        let by_rating = predicates.iter().any(Predicate::is_rating_threshold);
        self.filter_rank(items, |c| predicates.iter().all(|p| p.matches(c)), by_rating)
    }

    fn filter_rank<F>(&self, items: Vec<Content>, keep: F, rating_threshold: bool) -> Vec<Content>
    where
        F: Fn(&Content) -> bool,
    {
        let mut kept: Vec<Content> = items.into_iter().filter(|c| keep(c)).collect();
        rank(&mut kept, self.rating_tiebreak && rating_threshold);
        kept
    }
}

impl Default for PredicateEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Stable sort by popularity descending, optionally breaking ties by rating.
fn rank(items: &mut [Content], by_rating: bool) {
    items.sort_by(|a, b| {
        let order = b.popularity.total_cmp(&a.popularity);
        if by_rating && order == Ordering::Equal {
            b.rating.total_cmp(&a.rating)
        } else {
            order
        }
    });
}

// ============================================================================
// Tests
// ============================================================================
