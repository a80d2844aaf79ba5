//! Command-line interface for reviewrank's batch scoring tooling.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod error;
mod rank;
mod rate;
mod report;
mod score;

pub use error::CliError;

const ARG_DATASET: &str = "dataset";
const ENV_RATE_DATASET: &str = "REVIEWRANK_CMDS_RATE_DATASET";
const ENV_RANK_DATASET: &str = "REVIEWRANK_CMDS_RANK_DATASET";
const ENV_SCORE_DATASET: &str = "REVIEWRANK_CMDS_SCORE_DATASET";

/// Run the reviewrank CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// dataset loading, or scoring fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let report = match cli.command {
        Command::Rate(args) => rate::run(args)?,
        Command::Rank(args) => rank::run(args)?,
        Command::Score(args) => score::run(args)?,
    };
    println!("{}", report.trim_end());
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "reviewrank",
    about = "Batch scoring and ranking for product review datasets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare rating estimates for each product in a dataset.
    Rate(rate::RateArgs),
    /// Rank reviews and products by the derived scores.
    Rank(rank::RankArgs),
    /// Write the enriched dataset with every derived column.
    Score(score::ScoreArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests;
