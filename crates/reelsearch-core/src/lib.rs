//! Reelsearch Core: shared types, repositories, errors, and configuration.
//!
//! This crate provides the foundational types used across all Reelsearch
//! crates. It has no internal Reelsearch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`content`]: The normalized catalog item model
//! - [`normalize`]: Raw record adapter (genre/cast shape normalization)
//! - [`repository`]: The `ContentRepository` trait and bundled implementations
//! - [`config`]: Search tuning knobs
//!
//! # Data flow
//!
//! ```text
//! JSON / remote records ──► RawContent ──normalize()──► Content ──► query engine
//!                              │
//!                              └── malformed → skipped + counted (LoadReport)
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod content;
pub mod error;
pub mod normalize;
pub mod repository;

mod proptests;

// Re-export key types at crate root for convenience
pub use config::SearchConfig;
pub use content::{CastMember, Content, ContentId, ContentType, Platform};
pub use error::{Error, Result};
pub use normalize::{LoadReport, MalformedRecord, RawContent, normalize_genres, normalize_records};
pub use repository::{ContentRepository, InMemoryRepository, JsonFileRepository};
