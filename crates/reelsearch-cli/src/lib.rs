//! # reelsearch-cli
//!
//! Command-line front end for Reelsearch:
//! - Free-text and advanced (criteria) search over a JSON catalog
//! - Classifier explanations and query suggestions
//! - Trending listing
//! - Persisted search history

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod output;

pub use cli::{Cli, Command};
pub use config::CliConfig;
pub use error::{Error, Result};
pub use history::SearchHistory;
