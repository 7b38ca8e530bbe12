//! Advanced-search criteria.
//!
//! A [`CriteriaSet`] is the ordered collection of user-selected constraints
//! for one advanced-search session. Criteria are created by [`CriteriaSet::add`],
//! never mutated, and removed by id.
//!
//! Internally the set is an arena keyed by monotonically increasing
//! [`CriterionId`]s, so iteration order is insertion order.
//!
//! # Preview text
//!
//! [`CriteriaSet::preview_text`] renders the set as a sentence, grouping by
//! kind in the fixed order genre, year, rating, platform:
//!
//! ```
//! use reelsearch_query::{CriteriaSet, CriterionKind};
//!
//! let mut set = CriteriaSet::new();
//! set.add(CriterionKind::Genre, "Comedy", None).unwrap();
//! set.add(CriterionKind::Genre, "Horror", None).unwrap();
//! set.add(CriterionKind::Year, "2023", None).unwrap();
//!
//! assert_eq!(set.preview_text(), "Comedy or Horror movies and shows from 2023");
//! ```
//!
//! Same-kind criteria read as "or" in the preview but are ANDed when
//! evaluated; see [`CriteriaSet::has_repeated_kinds`].

use std::collections::BTreeMap;
use std::fmt;

use reelsearch_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::engine::Predicate;

/// Text of the preview when no criteria are set.
pub const EMPTY_PREVIEW: &str = "all content";

/// Connector between same-kind values in the preview.
const PREVIEW_CONNECTOR: &str = " or ";

/// Kind of constraint a criterion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    /// Genre set contains the value.
    Genre,
    /// Release year equals the value.
    Year,
    /// Rating is at least the value.
    Rating,
    /// Available on the named platform.
    Platform,
}

impl CriterionKind {
    /// All kinds, in preview order.
    pub const ALL: [CriterionKind; 4] = [Self::Genre, Self::Year, Self::Rating, Self::Platform];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Year => "year",
            Self::Rating => "rating",
            Self::Platform => "platform",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque criterion identifier, unique within one [`CriteriaSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(u64);

impl CriterionId {
    /// Raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CriterionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, typed criterion value.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    /// Genre tag.
    Genre(String),
    /// Release year.
    Year(i32),
    /// Minimum rating.
    Rating(f64),
    /// Platform name.
    Platform(String),
}

impl CriterionValue {
    /// Parse `text` as a value of `kind`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCriterion`] for blank text, non-integer years, and
    /// ratings that are not numbers within 0–10.
    pub fn parse(kind: CriterionKind, text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = || Error::invalid_criterion(kind.as_str(), text);
        if text.is_empty() {
            return Err(invalid());
        }

        match kind {
            CriterionKind::Genre => Ok(Self::Genre(text.to_string())),
            CriterionKind::Platform => Ok(Self::Platform(text.to_string())),
            CriterionKind::Year => text.parse().map(Self::Year).map_err(|_| invalid()),
            CriterionKind::Rating => text
                .parse::<f64>()
                .ok()
                .filter(|r| (0.0..=10.0).contains(r))
                .map(Self::Rating)
                .ok_or_else(invalid),
        }
    }

    /// Kind of this value.
    pub fn kind(&self) -> CriterionKind {
        match self {
            Self::Genre(_) => CriterionKind::Genre,
            Self::Year(_) => CriterionKind::Year,
            Self::Rating(_) => CriterionKind::Rating,
            Self::Platform(_) => CriterionKind::Platform,
        }
    }
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genre(s) | Self::Platform(s) => f.write_str(s),
            Self::Year(y) => write!(f, "{y}"),
            Self::Rating(r) => write!(f, "{r}"),
        }
    }
}

/// Wire form of a criterion: `{id, type, value, label}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CriterionRecord {
    #[serde(default)]
    id: u64,
    #[serde(rename = "type")]
    kind: CriterionKind,
    value: RecordValue,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RecordValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One user-selected constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CriterionRecord", into = "CriterionRecord")]
pub struct Criterion {
    id: CriterionId,
    value: CriterionValue,
    label: String,
}

impl Criterion {
    /// Identifier within the owning set.
    pub fn id(&self) -> CriterionId {
        self.id
    }

    /// Constraint kind.
    pub fn kind(&self) -> CriterionKind {
        self.value.kind()
    }

    /// Typed value.
    pub fn value(&self) -> &CriterionValue {
        &self.value
    }

    /// Display label (defaults to the value text).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The predicate this criterion contributes to an advanced search.
    pub fn predicate(&self) -> Predicate {
        Predicate::from(&self.value)
    }
}

impl TryFrom<CriterionRecord> for Criterion {
    type Error = Error;

    fn try_from(record: CriterionRecord) -> Result<Self> {
        let value = CriterionValue::parse(record.kind, &record.value.to_string())?;
        let label = record.label.unwrap_or_else(|| value.to_string());
        Ok(Self {
            id: CriterionId(record.id),
            value,
            label,
        })
    }
}

impl From<Criterion> for CriterionRecord {
    fn from(criterion: Criterion) -> Self {
        Self {
            id: criterion.id.0,
            kind: criterion.kind(),
            value: match &criterion.value {
                CriterionValue::Rating(r) => RecordValue::Number(*r),
                other => RecordValue::Text(other.to_string()),
            },
            label: Some(criterion.label),
        }
    }
}

/// Outcome of [`CriteriaSet::toggle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Toggled {
    /// The criterion was absent and has been added.
    Added(Criterion),
    /// A matching criterion was present and has been removed.
    Removed(Criterion),
}

// ============================================================================
// CriteriaSet
// ============================================================================

/// Ordered, mutable collection of criteria for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaSet {
    entries: BTreeMap<CriterionId, Criterion>,
    next_id: u64,
}

impl CriteriaSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a set from transported criteria, keeping their order.
    ///
    /// Incoming ids are not trusted; every criterion gets a fresh id.
    pub fn from_criteria<I>(criteria: I) -> Self
    where
        I: IntoIterator<Item = Criterion>,
    {
        let mut set = Self::new();
        set.replace_all(criteria);
        set
    }

    /// Swap the contents for `criteria`, keeping their order.
    ///
    /// Incoming criteria are re-keyed from this set's counter, so ids handed
    /// out before the swap never name one of the new entries.
    pub fn replace_all<I>(&mut self, criteria: I)
    where
        I: IntoIterator<Item = Criterion>,
    {
        self.entries.clear();
        for criterion in criteria {
            self.push(criterion.value, Some(criterion.label));
        }
    }

    /// Add a criterion at the end of the set.
    ///
    /// `label` defaults to the value text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCriterion`] if `value` cannot be read as `kind`.
    pub fn add(
        &mut self,
        kind: CriterionKind,
        value: &str,
        label: Option<&str>,
    ) -> Result<Criterion> {
        let value = CriterionValue::parse(kind, value)?;
        Ok(self.push(value, label.map(str::to_string)))
    }

    /// Append an already-validated value.
    pub fn push(&mut self, value: CriterionValue, label: Option<String>) -> Criterion {
        let id = CriterionId(self.next_id);
        self.next_id += 1;

        let label = label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| value.to_string());
        let criterion = Criterion { id, value, label };
        self.entries.insert(id, criterion.clone());
        criterion
    }

    /// Remove a criterion by id. Absent ids are a no-op.
    pub fn remove(&mut self, id: CriterionId) -> Option<Criterion> {
        self.entries.remove(&id)
    }

    /// Remove every criterion. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Criteria in insertion order.
    pub fn list(&self) -> Vec<&Criterion> {
        self.entries.values().collect()
    }

    /// Iterate criteria in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.entries.values()
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a criterion by id.
    pub fn get(&self, id: CriterionId) -> Option<&Criterion> {
        self.entries.get(&id)
    }

    /// First criterion of `kind` whose value equals `value`.
    ///
    /// Unparseable `value` text never matches.
    pub fn find(&self, kind: CriterionKind, value: &str) -> Option<&Criterion> {
        let wanted = CriterionValue::parse(kind, value).ok()?;
        self.iter().find(|c| c.value == wanted)
    }

    /// Returns `true` if a criterion of `kind` with `value` is present.
    pub fn contains(&self, kind: CriterionKind, value: &str) -> bool {
        self.find(kind, value).is_some()
    }

    /// Add the criterion if absent, otherwise remove the matching one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCriterion`] if `value` cannot be read as `kind`.
    pub fn toggle(
        &mut self,
        kind: CriterionKind,
        value: &str,
        label: Option<&str>,
    ) -> Result<Toggled> {
        if let Some(id) = self.find(kind, value).map(Criterion::id)
            && let Some(removed) = self.remove(id)
        {
            return Ok(Toggled::Removed(removed));
        }
        self.add(kind, value, label).map(Toggled::Added)
    }

    /// Criteria of one kind, in insertion order.
    pub fn of_kind(&self, kind: CriterionKind) -> impl Iterator<Item = &Criterion> {
        self.iter().filter(move |c| c.kind() == kind)
    }

    /// Returns `true` if any kind appears more than once.
    ///
    /// Such sets preview as "A or B" but only match items satisfying both.
    pub fn has_repeated_kinds(&self) -> bool {
        CriterionKind::ALL
            .iter()
            .any(|kind| self.of_kind(*kind).nth(1).is_some())
    }

    /// Returns `true` if a rating threshold is part of the set.
    pub fn has_rating_threshold(&self) -> bool {
        self.of_kind(CriterionKind::Rating).next().is_some()
    }

    /// Predicates of every criterion, in insertion order.
    pub fn predicates(&self) -> Vec<Predicate> {
        self.iter().map(Criterion::predicate).collect()
    }

    /// Human-readable description of the set.
    ///
    /// Advisory only; never parsed back into criteria.
    pub fn preview_text(&self) -> String {
        let mut parts = Vec::new();

        for kind in CriterionKind::ALL {
            let texts: Vec<String> = self
                .of_kind(kind)
                .map(|c| match c.value() {
                    CriterionValue::Rating(_) => c.label().to_string(),
                    value => value.to_string(),
                })
                .collect();
            if texts.is_empty() {
                continue;
            }

            let joined = texts.join(PREVIEW_CONNECTOR);
            parts.push(match kind {
                CriterionKind::Genre => format!("{joined} movies and shows"),
                CriterionKind::Year => format!("from {joined}"),
                CriterionKind::Rating => format!("rated {joined}"),
                CriterionKind::Platform => format!("on {joined}"),
            });
        }

        if parts.is_empty() {
            EMPTY_PREVIEW.to_string()
        } else {
            parts.join(" ")
        }
    }
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a CriteriaSet {
    type Item = &'a Criterion;
    type IntoIter = std::collections::btree_map::Values<'a, CriterionId, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

// ============================================================================
// Tests
// ============================================================================
