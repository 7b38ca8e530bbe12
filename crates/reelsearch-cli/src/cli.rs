//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use reelsearch_core::Result;
use reelsearch_query::{CriteriaSet, CriterionKind, FilterOptions};

/// Reelsearch - find movies and series with plain-language queries
#[derive(Parser, Debug)]
#[command(name = "reelsearch", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "REELSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides `catalog_path` from the config)
    #[arg(long, global = true, env = "REELSEARCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Free-text search, e.g. `search comedy movies with the rock`
    Search {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Search by genre, year, rating and platform criteria
    Advanced(AdvancedArgs),

    /// Show which classifier rule a query triggers
    Explain {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List example queries
    Suggest {
        /// Only suggestions containing this text
        prefix: Option<String>,
    },

    /// Most popular titles
    Trending {
        /// Number of titles (defaults to the configured trending limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show or clear recent searches
    History {
        /// Forget all recorded searches
        #[arg(long)]
        clear: bool,
    },
}

/// Criteria for the `advanced` subcommand. Repeated flags are ANDed.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct AdvancedArgs {
    /// Required genre (repeatable)
    #[arg(long = "genre", value_name = "GENRE")]
    pub genres: Vec<String>,

    /// Required release year (repeatable)
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<String>,

    /// Minimum rating (repeatable)
    #[arg(long = "min-rating", value_name = "RATING")]
    pub ratings: Vec<String>,

    /// Required platform (repeatable)
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<String>,

    /// Optional title text
    pub query: Vec<String>,
}

impl AdvancedArgs {
    /// The title text, words joined by spaces.
    pub fn query_text(&self) -> String {
        join_words(&self.query)
    }

    /// Build the criteria set, in flag-group order.
    ///
    /// Ratings matching a standard threshold get its label.
    ///
    /// # Errors
    ///
    /// Fails on a non-integer year or an invalid rating.
    pub fn criteria(&self, options: &FilterOptions) -> Result<CriteriaSet> {
        let mut set = CriteriaSet::new();
        for genre in &self.genres {
            set.add(CriterionKind::Genre, genre, None)?;
        }
        for year in &self.years {
            set.add(CriterionKind::Year, year, None)?;
        }
        for rating in &self.ratings {
            options.add_rating(&mut set, rating)?;
        }
        for platform in &self.platforms {
            set.add(CriterionKind::Platform, platform, None)?;
        }
        Ok(set)
    }
}

/// Join positional query words.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

// ============================================================================
// Tests
// ============================================================================
