//! Score command implementation for the reviewrank CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reviewrank_core::JsonReviewSource;
use reviewrank_scorer::{ScoreOptions, SortWeights, score_reviews};
use serde::{Deserialize, Serialize};

use crate::{ARG_DATASET, CliError, ENV_SCORE_DATASET, require_existing};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Derive every scoring column for a dataset and emit the \
                 enriched table as JSON, either to stdout or to a file \
                 for the downstream reporting sink. Every original \
                 column, including the passthrough ones, is preserved.",
    about = "Write the enriched dataset with every derived column"
)]
#[ortho_config(prefix = "REVIEWRANK")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing the review rows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Write the enriched table to this file instead of stdout.
    #[arg(long = "output", value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Confidence level of the Wilson interval.
    #[arg(long = "confidence", value_name = "level")]
    #[serde(default)]
    pub(crate) confidence: Option<f64>,
    /// Weight of the scaled helpful-vote count, as a percentage.
    #[arg(long = "helpful-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) helpful_weight: Option<f64>,
    /// Weight of the scaled total-vote count, as a percentage.
    #[arg(long = "total-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) total_weight: Option<f64>,
    /// Weight of the star rating, as a percentage.
    #[arg(long = "rating-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) options: ScoreOptions,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_SCORE_DATASET,
        })?;
        let options = ScoreOptions {
            confidence: args
                .confidence
                .unwrap_or(ScoreOptions::default().confidence),
            weights: sort_weights_from(
                args.helpful_weight,
                args.total_weight,
                args.rating_weight,
            )?,
        };
        Ok(Self {
            dataset,
            output: args.output,
            options,
        })
    }
}

/// Build the composite weights from optional per-component overrides.
pub(crate) fn sort_weights_from(
    helpful: Option<f64>,
    total: Option<f64>,
    rating: Option<f64>,
) -> Result<SortWeights, CliError> {
    let defaults = SortWeights::default();
    let weights = SortWeights {
        helpful_votes: helpful.unwrap_or(defaults.helpful_votes),
        total_votes: total.unwrap_or(defaults.total_votes),
        rating: rating.unwrap_or(defaults.rating),
    }
    .validate()?;
    Ok(weights)
}

pub(crate) fn run(args: ScoreArgs) -> Result<String, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let source = JsonReviewSource::open(&config.dataset)?;

    let scored = score_reviews(source.into_reviews(), config.options)?;
    let body =
        serde_json::to_string_pretty(&scored).map_err(|source| CliError::Render { source })?;
    match &config.output {
        Some(path) => {
            std::fs::write(path.as_std_path(), body).map_err(|source| CliError::WriteOutput {
                path: path.clone(),
                source,
            })?;
            Ok(format!("wrote {} scored reviews to {path}", scored.len()))
        }
        None => Ok(body),
    }
}
