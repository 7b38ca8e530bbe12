//! Reelsearch catalog search: umbrella crate.
//!
//! This crate re-exports all Reelsearch components for convenience.
//! Use feature flags to enable the CLI library.

#![doc = include_str!("../README.md")]

pub use reelsearch_core as core;
pub use reelsearch_query as query;

#[cfg(feature = "cli")]
pub use reelsearch_cli as cli;

/// The most commonly used types.
pub mod prelude {
    pub use reelsearch_core::{
        Content, ContentId, ContentRepository, ContentType, Error, InMemoryRepository,
        JsonFileRepository, Result, SearchConfig,
    };
    pub use reelsearch_query::{
        CriteriaSession, CriteriaSet, CriterionKind, FilterSpec, QueryClassifier,
        SearchOrchestrator,
    };
}
