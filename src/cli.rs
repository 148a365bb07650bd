//! CLI definitions for the PokerNow watcher.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pokernow_table::Action;

/// PokerNow table watcher.
#[derive(Debug, Parser)]
#[command(name = "pokernow")]
#[command(about = "Watch a PokerNow table and act on it through Chrome")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "~/.pokernow/config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the table state on every poll (default)
    Watch {
        /// Game URL; prompted for when omitted
        url: Option<String>,

        /// Total run time in seconds (overrides poll.budget_seconds)
        #[arg(long)]
        budget: Option<u64>,

        /// Seconds between polls (overrides poll.interval_seconds)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Perform one action for your seat
    Act {
        /// call, raise, check or fold
        action: Action,

        /// Raise amount
        #[arg(long)]
        amount: Option<u64>,

        /// Game URL; prompted for when omitted
        url: Option<String>,
    },
}

impl Commands {
    pub(crate) fn watch_default() -> Self {
        Commands::Watch {
            url: None,
            budget: None,
            interval: None,
        }
    }
}

/// Use `url` or ask for one on stdin.
pub(crate) fn resolve_url(url: Option<String>) -> anyhow::Result<String> {
    match url {
        Some(url) => normalize_url(&url),
        None => {
            let stdin = std::io::stdin();
            prompt_url(&mut stdin.lock(), &mut std::io::stdout())
        }
    }
}

pub(crate) fn prompt_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<String> {
    write!(output, "Enter the PokerNow game URL: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read game URL")?;
    normalize_url(&line)
}

fn normalize_url(raw: &str) -> anyhow::Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        bail!("No game URL given");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("Game URL must start with http:// or https://: {}", url);
    }
    Ok(url.to_string())
}
