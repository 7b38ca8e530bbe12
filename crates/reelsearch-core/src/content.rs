//! The normalized catalog item model.
//!
//! A [`Content`] is what the query engine sees: every required field is
//! present and `genres` is already a set of trimmed tokens. Records coming
//! from a data source go through [`crate::normalize`] first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a catalog item.
///
/// Sources hand out numeric or string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Creates a new content ID.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ContentId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A feature film.
    Movie,
    /// A TV series or show.
    Series,
}

impl ContentType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Parses a type name, case-insensitively. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One credited cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Performer name.
    pub name: String,
    /// Character played (may be empty).
    #[serde(default)]
    pub character: String,
}

impl CastMember {
    /// Creates a cast member.
    pub fn new(name: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character: character.into(),
        }
    }
}

/// A streaming platform the item is available on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Platform name (e.g., "Netflix").
    pub name: String,
    /// Deep link to the title on the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Rental/purchase price, if not included in a subscription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Platform {
    /// Creates a platform entry with no link or price.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: None,
            price: None,
        }
    }
}

/// A normalized catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Unique, stable identifier.
    pub id: ContentId,
    /// Display title.
    pub title: String,
    /// Movie or series.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Release year.
    pub year: i32,
    /// Genre tags (case-sensitive exact tokens).
    pub genres: BTreeSet<String>,
    /// Average rating, 0–10.
    pub rating: f64,
    /// Popularity score, used only for ranking.
    pub popularity: f64,
    /// Plot summary.
    #[serde(default)]
    pub synopsis: String,
    /// Poster image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Credited cast, billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Availability.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl Content {
    /// Creates an item with the required identity fields.
    ///
    /// Rating and popularity start at zero; use the `with_*` methods to fill
    /// in the rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsearch_core::{Content, ContentType};
    ///
    /// let item = Content::new("42", "Dune", ContentType::Movie, 2021)
    ///     .with_genres(["Sci-Fi", "Adventure"])
    ///     .with_rating(8.0)
    ///     .with_popularity(91.5);
    ///
    /// assert!(item.has_genre("Sci-Fi"));
    /// assert!(!item.has_genre("sci-fi"));
    /// ```
    pub fn new(
        id: impl Into<ContentId>,
        title: impl Into<String>,
        content_type: ContentType,
        year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content_type,
            year,
            genres: BTreeSet::new(),
            rating: 0.0,
            popularity: 0.0,
            synopsis: String::new(),
            poster_url: None,
            cast: Vec::new(),
            platforms: Vec::new(),
        }
    }

    /// Sets the genre tags.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the popularity score.
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    /// Sets the synopsis.
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = synopsis.into();
        self
    }

    /// Appends a cast member.
    pub fn with_cast_member(
        mut self,
        name: impl Into<String>,
        character: impl Into<String>,
    ) -> Self {
        self.cast.push(CastMember::new(name, character));
        self
    }

    /// Appends a platform by name.
    pub fn with_platform(mut self, name: impl Into<String>) -> Self {
        self.platforms.push(Platform::named(name));
        self
    }

    /// Exact, case-sensitive genre membership.
    pub fn has_genre(&self, tag: &str) -> bool {
        self.genres.contains(tag)
    }

    /// Returns `true` if every tag in `tags` is one of this item's genres.
    pub fn has_all_genres(&self, tags: &BTreeSet<String>) -> bool {
        tags.is_subset(&self.genres)
    }

    /// Returns `true` if one of the platforms is named exactly `name`.
    pub fn is_on_platform(&self, name: &str) -> bool {
        self.platforms.iter().any(|p| p.name == name)
    }

    /// Case-insensitive substring match over cast names and characters.
    ///
    /// `needle_lower` must already be lower-cased.
    pub fn cast_contains(&self, needle_lower: &str) -> bool {
        self.cast.iter().any(|m| {
            m.name.to_lowercase().contains(needle_lower)
                || m.character.to_lowercase().contains(needle_lower)
        })
    }

    /// Case-insensitive substring match over title, synopsis, genres and cast.
    ///
    /// `needle_lower` must already be lower-cased.
    pub fn text_contains(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.synopsis.to_lowercase().contains(needle_lower)
            || self
                .genres
                .iter()
                .any(|g| g.to_lowercase().contains(needle_lower))
            || self.cast_contains(needle_lower)
    }
}

// ============================================================================
// Tests
// ============================================================================
