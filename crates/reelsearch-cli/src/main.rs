//! Reelsearch CLI
//!
//! ```bash
//! reelsearch --catalog catalog.json search comedy movies with the rock
//! reelsearch advanced --genre Horror --year 2023 --min-rating 7
//! reelsearch explain shows like the office
//! reelsearch trending -n 5 --json
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use reelsearch_cli::Cli;
use reelsearch_cli::commands::App;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let app = App::from_cli(&cli)?;
    let output = app.execute(&cli.command).await?;
    print!("{output}");

    Ok(())
}
