//! Raw record adapter.
//!
//! Data sources disagree on record shape: `genres` arrives either as a
//! comma-joined string or as a list, `cast` as a list of members or a joined
//! string of names, numbers sometimes as strings. Everything is folded into
//! one canonical [`Content`] here, before any query code sees it.
//!
//! Records that cannot be normalized are skipped, logged, and counted in a
//! [`LoadReport`]; they never fail a whole load.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{CastMember, Content, ContentId, ContentType, Platform};

/// Normalize a comma-joined genre string into a set of tokens.
///
/// Tokens are trimmed; empty tokens (from doubled or trailing commas) are
/// dropped. Case is preserved.
///
/// # Examples
///
/// ```
/// use reelsearch_core::normalize_genres;
///
/// let genres = normalize_genres(" Action,  Drama ,,");
/// assert_eq!(genres.len(), 2);
/// assert!(genres.contains("Action"));
/// assert!(genres.contains("Drama"));
/// ```
pub fn normalize_genres(joined: &str) -> BTreeSet<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Why a raw record was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedRecord {
    /// The record is not an object of the expected shape.
    #[error("unreadable record: {0}")]
    Shape(String),

    /// A required field is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but holds an unusable value.
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Offending value, rendered as text
        value: String,
    },

    /// Another record with the same id was already loaded.
    #[error("duplicate id `{0}`")]
    DuplicateId(String),
}

/// Outcome counts of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Records that became [`Content`].
    pub loaded: usize,
    /// Records skipped as malformed.
    pub skipped: usize,
}

impl LoadReport {
    /// Total number of records seen.
    pub fn total(&self) -> usize {
        self.loaded + self.skipped
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        n.is_finite().then_some(n)
    }

    fn render(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Genre field as delivered by a source.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    /// `"Action, Drama"`
    Joined(String),
    /// `["Action", "Drama"]`
    List(Vec<String>),
}

impl GenreField {
    /// Fold into the canonical token set.
    pub fn into_set(self) -> BTreeSet<String> {
        match self {
            Self::Joined(s) => normalize_genres(&s),
            Self::List(items) => items.iter().flat_map(|g| normalize_genres(g)).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CastField {
    Members(Vec<CastMember>),
    Names(Vec<String>),
    Joined(String),
}

impl CastField {
    fn into_members(self) -> Vec<CastMember> {
        let names = match self {
            Self::Members(members) => return members,
            Self::Names(names) => names,
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(|n| CastMember::new(n, ""))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PlatformField {
    List(Vec<Platform>),
    Encoded(String),
}

impl PlatformField {
    fn into_platforms(self) -> Vec<Platform> {
        match self {
            Self::List(list) => list,
            Self::Encoded(s) if s.trim().is_empty() => Vec::new(),
            Self::Encoded(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::debug!("Ignoring undecodable platforms field: {e}");
                Vec::new()
            }),
        }
    }
}

/// A catalog record exactly as a source delivers it.
///
/// Every field is optional here; [`RawContent::normalize`] decides what is
/// required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    #[serde(default, alias = "Id")]
    id: Option<RawId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "Name")]
    name: Option<String>,
    #[serde(default, rename = "type")]
    content_type: Option<String>,
    #[serde(default)]
    year: Option<RawNumber>,
    #[serde(default)]
    genres: Option<GenreField>,
    #[serde(default)]
    rating: Option<RawNumber>,
    #[serde(default)]
    popularity: Option<RawNumber>,
    #[serde(default)]
    synopsis: Option<String>,
    #[serde(default, alias = "posterUrl")]
    poster_url: Option<String>,
    #[serde(default)]
    cast: Option<CastField>,
    #[serde(default)]
    platforms: Option<PlatformField>,
}

impl RawContent {
    /// Validate and convert into canonical [`Content`].
    ///
    /// Required: id, title (falls back to `Name`), type, year, rating,
    /// popularity. Rating must lie within 0–10.
    pub fn normalize(self) -> Result<Content, MalformedRecord> {
        let id = match self.id {
            Some(RawId::Number(n)) => ContentId::from(n),
            Some(RawId::Text(s)) if !s.trim().is_empty() => ContentId::new(s.trim()),
            _ => return Err(MalformedRecord::MissingField("id")),
        };

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .or(self.name.filter(|n| !n.trim().is_empty()))
            .ok_or(MalformedRecord::MissingField("title"))?;

        let raw_type = self
            .content_type
            .ok_or(MalformedRecord::MissingField("type"))?;
        let content_type =
            ContentType::parse(&raw_type).ok_or_else(|| MalformedRecord::InvalidValue {
                field: "type",
                value: raw_type.clone(),
            })?;

        let raw_year = self.year.ok_or(MalformedRecord::MissingField("year"))?;
        let year = raw_year
            .as_f64()
            .filter(|y| y.fract() == 0.0 && *y >= 0.0 && *y <= f64::from(i32::MAX))
            .map(|y| y as i32)
            .ok_or_else(|| MalformedRecord::InvalidValue {
                field: "year",
                value: raw_year.render(),
            })?;

        let raw_rating = self.rating.ok_or(MalformedRecord::MissingField("rating"))?;
        let rating = raw_rating
            .as_f64()
            .filter(|r| (0.0..=10.0).contains(r))
            .ok_or_else(|| MalformedRecord::InvalidValue {
                field: "rating",
                value: raw_rating.render(),
            })?;

        let raw_popularity = self
            .popularity
            .ok_or(MalformedRecord::MissingField("popularity"))?;
        let popularity = raw_popularity
            .as_f64()
            .ok_or_else(|| MalformedRecord::InvalidValue {
                field: "popularity",
                value: raw_popularity.render(),
            })?;

        Ok(Content {
            id,
            title: title.trim().to_string(),
            content_type,
            year,
            genres: self.genres.map(GenreField::into_set).unwrap_or_default(),
            rating,
            popularity,
            synopsis: self.synopsis.unwrap_or_default(),
            poster_url: self.poster_url.filter(|u| !u.trim().is_empty()),
            cast: self.cast.map(CastField::into_members).unwrap_or_default(),
            platforms: self
                .platforms
                .map(PlatformField::into_platforms)
                .unwrap_or_default(),
        })
    }
}

/// Normalize a batch of JSON records.
///
/// Malformed records and later duplicates of an already-seen id are skipped
/// with a warning; the returned [`LoadReport`] counts both outcomes.
pub fn normalize_records(records: Vec<Value>) -> (Vec<Content>, LoadReport) {
    let mut items = Vec::with_capacity(records.len());
    let mut seen = HashSet::new();
    let mut report = LoadReport::default();

    for (index, value) in records.into_iter().enumerate() {
        let outcome = serde_json::from_value::<RawContent>(value)
            .map_err(|e| MalformedRecord::Shape(e.to_string()))
            .and_then(RawContent::normalize)
            .and_then(|content| {
                if seen.insert(content.id.clone()) {
                    Ok(content)
                } else {
                    Err(MalformedRecord::DuplicateId(content.id.to_string()))
                }
            });

        match outcome {
            Ok(content) => {
                items.push(content);
                report.loaded += 1;
            }
            Err(reason) => {
                log::warn!("Skipping catalog record #{index}: {reason}");
                report.skipped += 1;
            }
        }
    }

    log::debug!(
        "Normalized {} records ({} loaded, {} skipped)",
        report.total(),
        report.loaded,
        report.skipped
    );

    (items, report)
}

// ============================================================================
// Tests
// ============================================================================
