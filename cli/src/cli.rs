use std::time::Duration;

use clap::{Parser, Subcommand};
use common::config::AppConfig;

#[derive(Debug, Parser)]
#[clap(name = "signals", version, about = "Heuristic crypto signals with live price tracking")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Number of assets to list (top by market cap)
    #[clap(long, global = true)]
    pub limit: Option<usize>,

    /// Seconds between two tracking polls
    #[clap(long, global = true)]
    pub interval_secs: Option<u64>,

    /// Print signals and reports as JSON lines
    #[clap(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the numbered asset list and exit
    List,

    /// Derive the signal for one asset id (e.g. `bitcoin`)
    Signal {
        id: String,

        /// Keep polling the asset until Ctrl-C
        #[clap(long)]
        track: bool,
    },
}

impl Cli {
    /// CLI flags win over environment configuration.
    pub(crate) fn apply(&self, mut cfg: AppConfig) -> AppConfig {
        if let Some(limit) = self.limit {
            cfg.list_limit = limit.max(1);
        }
        if let Some(secs) = self.interval_secs {
            cfg.poll_interval = Duration::from_secs(secs.max(1));
        }
        cfg
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ChoiceError {
    NotANumber,
    OutOfRange,
}

/// Parse a 1-based menu choice into a 0-based index.
pub(crate) fn parse_choice(input: &str, len: usize) -> Result<usize, ChoiceError> {
    let n: usize = input.trim().parse().map_err(|_| ChoiceError::NotANumber)?;

    if n < 1 || n > len {
        return Err(ChoiceError::OutOfRange);
    }

    Ok(n - 1)
}

pub(crate) fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}
