//! Shared criteria state for one advanced-search session.
//!
//! [`CriteriaSession`] wraps a [`CriteriaSet`] in a watch channel: each
//! mutation is applied in one step and the whole new set is published to
//! subscribers, who typically recompute the live preview.
//!
//! ```rust
//! use reelsearch_query::{CriteriaSession, CriterionKind};
//!
//! let session = CriteriaSession::new("builder");
//! session.add(CriterionKind::Genre, "Drama", None).unwrap();
//! assert_eq!(session.preview_text(), "Drama movies and shows");
//! ```

use std::fmt;
use std::sync::Arc;

use reelsearch_core::{Error, Result};
use tokio::sync::watch;

use crate::criteria::{CriteriaSet, Criterion, CriterionId, CriterionKind, Toggled};

/// Cloneable handle to a shared, observable [`CriteriaSet`].
#[derive(Clone)]
pub struct CriteriaSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    name: String,
    tx: watch::Sender<CriteriaSet>,
}

impl CriteriaSession {
    /// Create a session with an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_criteria(name, CriteriaSet::new())
    }

    /// Create a session starting from `set`.
    pub fn with_criteria(name: impl Into<String>, set: CriteriaSet) -> Self {
        let (tx, _rx) = watch::channel(set);
        Self {
            inner: Arc::new(SessionInner {
                name: name.into(),
                tx,
            }),
        }
    }

    /// Session name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Copy of the current set.
    pub fn snapshot(&self) -> CriteriaSet {
        self.inner.tx.borrow().clone()
    }

    /// Preview text of the current set.
    pub fn preview_text(&self) -> String {
        self.inner.tx.borrow().preview_text()
    }

    /// Number of criteria in the current set.
    pub fn len(&self) -> usize {
        self.inner.tx.borrow().len()
    }

    /// Returns `true` if the current set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.tx.borrow().is_empty()
    }

    /// Add a criterion and notify subscribers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCriterion`] if `value` cannot be read as `kind`;
    /// subscribers are not notified.
    pub fn add(&self, kind: CriterionKind, value: &str, label: Option<&str>) -> Result<Criterion> {
        let mut result = Err(Error::invalid_criterion(kind.as_str(), value));
        self.inner.tx.send_if_modified(|set| {
            result = set.add(kind, value, label);
            result.is_ok()
        });

        if let Ok(criterion) = &result {
            log::debug!(
                "Session '{}': added {} criterion {}",
                self.inner.name,
                criterion.kind(),
                criterion.id()
            );
        }
        result
    }

    /// Add or remove a criterion, notifying subscribers on success.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCriterion`] if `value` cannot be read as `kind`.
    pub fn toggle(&self, kind: CriterionKind, value: &str, label: Option<&str>) -> Result<Toggled> {
        let mut result = Err(Error::invalid_criterion(kind.as_str(), value));
        self.inner.tx.send_if_modified(|set| {
            result = set.toggle(kind, value, label);
            result.is_ok()
        });
        result
    }

    /// Remove a criterion by id. Subscribers are only notified if it existed.
    pub fn remove(&self, id: CriterionId) -> Option<Criterion> {
        let mut removed = None;
        self.inner.tx.send_if_modified(|set| {
            removed = set.remove(id);
            removed.is_some()
        });
        removed
    }

    /// Remove every criterion. Subscribers are only notified if the set was non-empty.
    pub fn clear(&self) {
        let changed = self.inner.tx.send_if_modified(|set| {
            let had_criteria = !set.is_empty();
            set.clear();
            had_criteria
        });
        if changed {
            log::debug!("Session '{}': cleared", self.inner.name);
        }
    }

    /// Replace the whole set, returning the previous one.
    ///
    /// The incoming criteria are re-keyed with fresh ids from this session,
    /// so ids issued earlier stay dead.
    pub fn replace(&self, set: CriteriaSet) -> CriteriaSet {
        let mut previous = CriteriaSet::new();
        self.inner.tx.send_modify(|current| {
            previous = current.clone();
            current.replace_all(set.iter().cloned());
        });
        previous
    }

    /// Subscribe to set changes.
    pub fn subscribe(&self) -> watch::Receiver<CriteriaSet> {
        self.inner.tx.subscribe()
    }
}

impl Default for CriteriaSession {
    fn default() -> Self {
        Self::new("default")
    }
}

impl fmt::Debug for CriteriaSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaSession")
            .field("name", &self.inner.name)
            .field("criteria", &self.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
