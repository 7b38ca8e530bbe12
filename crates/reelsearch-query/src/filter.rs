//! Classifier output.
//!
//! A [`FilterSpec`] names exactly one filtering strategy for a free-text
//! query. It is produced by [`crate::QueryClassifier`] and consumed by
//! [`crate::PredicateEngine`].

use std::collections::BTreeSet;
use std::fmt;

use reelsearch_core::ContentType;
use serde::{Deserialize, Serialize};

/// Which predicate to apply for a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Cast member name or character contains the substring.
    ByCast {
        /// Canonical actor name.
        name: String,
    },
    /// Genre set is a superset of `genres` (and type matches, if given).
    BySimilarity {
        /// Genres that must all be present.
        genres: BTreeSet<String>,
        /// Required content type.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_type: Option<ContentType>,
    },
    /// The `n` most popular items.
    ByPopularityTopN {
        /// Number of items to keep.
        n: usize,
    },
    /// Genre set contains the exact tag.
    ByGenre {
        /// Genre tag, case-sensitive.
        tag: String,
    },
    /// Released in the given year.
    ByYear {
        /// Release year.
        year: i32,
    },
    /// Of the given content type.
    ByType {
        /// Movie or series.
        content_type: ContentType,
    },
    /// Substring anywhere in title, synopsis, genres or cast.
    ByFullText {
        /// The original query text.
        text: String,
    },
}

impl FilterSpec {
    /// Builds a similarity spec from genre names.
    pub fn similarity<I, S>(genres: I, content_type: Option<ContentType>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BySimilarity {
            genres: genres.into_iter().map(Into::into).collect(),
            content_type,
        }
    }

    /// Builds a genre spec.
    pub fn genre(tag: impl Into<String>) -> Self {
        Self::ByGenre { tag: tag.into() }
    }

    /// Builds a full-text spec.
    pub fn full_text(text: impl Into<String>) -> Self {
        Self::ByFullText { text: text.into() }
    }

    /// Returns `true` if applying this spec already yields a ranked list.
    pub fn is_pre_ranked(&self) -> bool {
        matches!(self, Self::ByPopularityTopN { .. })
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByCast { name } => write!(f, "cast includes '{name}'"),
            Self::BySimilarity {
                genres,
                content_type,
            } => {
                let joined = genres.iter().map(String::as_str).collect::<Vec<_>>().join(" + ");
                match content_type {
                    Some(t) => write!(f, "similar: {joined} ({t})"),
                    None => write!(f, "similar: {joined}"),
                }
            }
            Self::ByPopularityTopN { n } => write!(f, "top {n} by popularity"),
            Self::ByGenre { tag } => write!(f, "genre {tag}"),
            Self::ByYear { year } => write!(f, "year {year}"),
            Self::ByType { content_type } => write!(f, "type {content_type}"),
            Self::ByFullText { text } => write!(f, "text contains '{text}'"),
        }
    }
}
