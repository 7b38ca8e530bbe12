//! Free-text query classification.
//!
//! [`QueryClassifier`] turns a query like `"comedy movies with the rock"` into
//! one [`FilterSpec`]. Classification is deterministic keyword/pattern
//! matching over the lower-cased query, driven by an ordered rule table:
//!
//! | # | Rule | Fires on | Produces |
//! |---|------|----------|----------|
//! | 1 | `cast` | actor alias (`"the rock"`, `"dicaprio"`, ...) | `ByCast` |
//! | 2 | `similarity` | `"like <known title>"` | `BySimilarity` |
//! | 3 | `popularity` | `"popular"`, `"trending"`, `"best"` | `ByPopularityTopN` |
//! | 4 | `genre` | comedy, action, horror, sci-fi, drama (in that order) | `ByGenre` |
//! | 5 | `year` | `"2023"`, `"2024"` | `ByYear` |
//! | 6 | `type` | `"movie(s)"` / `"series"`, `"shows"`, `"tv"` | `ByType` |
//! | - | `full_text` | nothing above matched | `ByFullText` |
//!
//! The first rule that matches wins; later rules are never consulted. The
//! order is part of the observable behavior: `"comedy 2023"` is a genre query.

use std::fmt;

use reelsearch_core::ContentType;

use crate::filter::FilterSpec;

/// Name reported when no rule matched.
pub const FALLBACK_RULE: &str = "full_text";

/// Default `n` for popularity queries.
pub const DEFAULT_POPULARITY_LIMIT: usize = 10;

struct CastAlias {
    alias: &'static str,
    canonical: &'static str,
}

const CAST_ALIASES: &[CastAlias] = &[
    CastAlias {
        alias: "the rock",
        canonical: "Dwayne Johnson",
    },
    CastAlias {
        alias: "dwayne johnson",
        canonical: "Dwayne Johnson",
    },
    CastAlias {
        alias: "leonardo dicaprio",
        canonical: "Leonardo DiCaprio",
    },
    CastAlias {
        alias: "dicaprio",
        canonical: "Leonardo DiCaprio",
    },
];

struct SimilarTitle {
    keys: &'static [&'static str],
    genres: &'static [&'static str],
    content_type: Option<ContentType>,
}

const SIMILAR_TITLES: &[SimilarTitle] = &[
    SimilarTitle {
        keys: &["big bang", "office"],
        genres: &["Comedy"],
        content_type: Some(ContentType::Series),
    },
    SimilarTitle {
        keys: &["stranger things"],
        genres: &["Sci-Fi", "Horror"],
        content_type: None,
    },
    SimilarTitle {
        keys: &["breaking bad"],
        genres: &["Crime", "Drama"],
        content_type: None,
    },
];

const POPULARITY_KEYWORDS: &[&str] = &["popular", "trending", "best"];

struct GenreKeyword {
    keywords: &'static [&'static str],
    genre: &'static str,
}

const GENRE_KEYWORDS: &[GenreKeyword] = &[
    GenreKeyword {
        keywords: &["comedy"],
        genre: "Comedy",
    },
    GenreKeyword {
        keywords: &["action"],
        genre: "Action",
    },
    GenreKeyword {
        keywords: &["horror"],
        genre: "Horror",
    },
    GenreKeyword {
        keywords: &["sci-fi", "science fiction"],
        genre: "Sci-Fi",
    },
    GenreKeyword {
        keywords: &["drama"],
        genre: "Drama",
    },
];

const YEAR_TOKENS: &[(&str, i32)] = &[("2023", 2023), ("2024", 2024)];

struct TypeKeyword {
    keywords: &'static [&'static str],
    content_type: ContentType,
}

const TYPE_KEYWORDS: &[TypeKeyword] = &[
    TypeKeyword {
        keywords: &["movies", "movie"],
        content_type: ContentType::Movie,
    },
    TypeKeyword {
        keywords: &["series", "shows", "tv"],
        content_type: ContentType::Series,
    },
];

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}

// ============================================================================
// Rules
// ============================================================================

type Matcher = Box<dyn Fn(&str) -> Option<FilterSpec> + Send + Sync>;

/// One entry of the classification table.
///
/// A rule inspects the lower-cased query and, if it applies, builds the
/// [`FilterSpec`] for it.
pub struct Rule {
    name: &'static str,
    matcher: Matcher,
}

impl Rule {
    /// Create a rule from a name and a matcher.
    pub fn new<F>(name: &'static str, matcher: F) -> Self
    where
        F: Fn(&str) -> Option<FilterSpec> + Send + Sync + 'static,
    {
        Self {
            name,
            matcher: Box::new(matcher),
        }
    }

    /// Rule name, reported by [`QueryClassifier::explain`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate against an already lower-cased query.
    pub fn evaluate(&self, lowered: &str) -> Option<FilterSpec> {
        (self.matcher)(lowered)
    }

    /// Actor alias mentions.
    pub fn cast() -> Self {
        Self::new("cast", |q| {
            CAST_ALIASES
                .iter()
                .find(|a| q.contains(a.alias))
                .map(|a| FilterSpec::ByCast {
                    name: a.canonical.to_string(),
                })
        })
    }

    /// `"like <title>"` for reference titles in the similarity table.
    ///
    /// Unknown reference titles do not match.
    pub fn similarity() -> Self {
        Self::new("similarity", |q| {
            let (_, reference) = q.split_once("like ")?;
            SIMILAR_TITLES
                .iter()
                .find(|t| contains_any(reference, t.keys))
                .map(|t| FilterSpec::similarity(t.genres.iter().copied(), t.content_type))
        })
    }

    /// Superlatives, mapped to the top `n` by popularity.
    pub fn popularity(n: usize) -> Self {
        Self::new("popularity", move |q| {
            contains_any(q, POPULARITY_KEYWORDS).then_some(FilterSpec::ByPopularityTopN { n })
        })
    }

    /// Single genre keyword, first in priority order.
    pub fn genre() -> Self {
        Self::new("genre", |q| {
            GENRE_KEYWORDS
                .iter()
                .find(|g| contains_any(q, g.keywords))
                .map(|g| FilterSpec::genre(g.genre))
        })
    }

    /// Literal year tokens.
    pub fn year() -> Self {
        Self::new("year", |q| {
            YEAR_TOKENS
                .iter()
                .find(|(token, _)| q.contains(token))
                .map(|(_, year)| FilterSpec::ByYear { year: *year })
        })
    }

    /// Content type keywords.
    pub fn content_type() -> Self {
        Self::new("type", |q| {
            TYPE_KEYWORDS
                .iter()
                .find(|t| contains_any(q, t.keywords))
                .map(|t| FilterSpec::ByType {
                    content_type: t.content_type,
                })
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The standard rule table, in evaluation order.
pub fn default_rules(popularity_limit: usize) -> Vec<Rule> {
    vec![
        Rule::cast(),
        Rule::similarity(),
        Rule::popularity(popularity_limit),
        Rule::genre(),
        Rule::year(),
        Rule::content_type(),
    ]
}

// ============================================================================
// QueryClassifier
// ============================================================================

/// Result of classifying a query, with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Name of the rule that fired, or [`FALLBACK_RULE`].
    pub rule: &'static str,
    /// The resulting filter.
    pub spec: FilterSpec,
}

/// First-match, rule-table query classifier.
///
/// # Example
///
/// ```
/// use reelsearch_query::{FilterSpec, QueryClassifier};
///
/// let classifier = QueryClassifier::new();
/// assert_eq!(classifier.classify("Comedy 2023"), FilterSpec::genre("Comedy"));
/// assert_eq!(classifier.explain("comedy 2023").rule, "genre");
/// ```
pub struct QueryClassifier {
    rules: Vec<Rule>,
}

impl QueryClassifier {
    /// Classifier with the standard rule table.
    pub fn new() -> Self {
        Self::with_popularity_limit(DEFAULT_POPULARITY_LIMIT)
    }

    /// Standard rule table with a custom `n` for popularity queries.
    pub fn with_popularity_limit(n: usize) -> Self {
        Self::from_rules(default_rules(n))
    }

    /// Classifier over an explicit, ordered rule table.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Classify a query into a [`FilterSpec`].
    pub fn classify(&self, query: &str) -> FilterSpec {
        self.explain(query).spec
    }

    /// Classify a query, also reporting which rule fired.
    pub fn explain(&self, query: &str) -> Classification {
        let trimmed = query.trim();
        let lowered = trimmed.to_lowercase();

        for rule in &self.rules {
            if let Some(spec) = rule.evaluate(&lowered) {
                log::debug!("Query '{trimmed}' matched rule '{}': {spec}", rule.name());
                return Classification {
                    rule: rule.name(),
                    spec,
                };
            }
        }

        log::debug!("Query '{trimmed}' matched no rule, using full-text search");
        Classification {
            rule: FALLBACK_RULE,
            spec: FilterSpec::full_text(trimmed),
        }
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
