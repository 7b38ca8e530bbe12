//! Query interpretation and filtering for Reelsearch.
//!
//! Two ways in, one way out:
//!
//! ```text
//! free text ──► QueryClassifier ──► FilterSpec ──┐
//!                                                ├──► PredicateEngine ──► ranked results
//! CriteriaSet (genre/year/rating/platform) ──────┘
//! ```
//!
//! [`SearchOrchestrator`] wires both paths to a
//! [`ContentRepository`](reelsearch_core::ContentRepository).
//!
//! # Modules
//!
//! - [`filter`]: the `FilterSpec` strategy union
//! - [`classifier`]: ordered rule table for free text
//! - [`criteria`]: criterion model, `CriteriaSet` and preview text
//! - [`session`]: shared, observable criteria state
//! - [`engine`]: predicates and ranking
//! - [`orchestrator`]: search entry points
//! - [`api`]: request/response types
//! - [`options`]: selectable filter values and suggestions

#![forbid(unsafe_code)]

pub mod api;
pub mod classifier;
pub mod criteria;
pub mod engine;
pub mod filter;
pub mod options;
pub mod orchestrator;
pub mod session;

mod proptests;

pub use api::{
    AdvancedSearchRequest, SearchRequest, SearchResponse, handle_advanced_search, handle_search,
};
pub use classifier::{Classification, QueryClassifier, Rule, default_rules};
pub use criteria::{CriteriaSet, Criterion, CriterionId, CriterionKind, CriterionValue, Toggled};
pub use engine::{Predicate, PredicateEngine};
pub use filter::FilterSpec;
pub use options::{FilterOptions, RatingOption, suggestions};
pub use orchestrator::SearchOrchestrator;
pub use session::CriteriaSession;
