//! Rate command implementation for the reviewrank CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reviewrank_core::{JsonReviewSource, Review, ReviewSource};
use reviewrank_scorer::{RecencyWeights, rate_product};
use serde::{Deserialize, Serialize};

use crate::report::{RatingRow, ReportOptions, render_ratings, report_options};
use crate::{ARG_DATASET, CliError, ENV_RATE_DATASET, require_existing};

/// CLI arguments for the `rate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compare the rating estimates for every product in a \
                 dataset: the naive mean, the mean over the last 30 days, \
                 and the recency-weighted average. Bucket weights are \
                 percentages and must sum to 100.",
    about = "Compare rating estimates for each product"
)]
#[ortho_config(prefix = "REVIEWRANK")]
pub(crate) struct RateArgs {
    /// Path to a JSON file containing the review rows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Weight of the `<= 30` days bucket, as a percentage.
    #[arg(long = "recent-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) recent_weight: Option<f64>,
    /// Weight of the `(30, 90]` days bucket, as a percentage.
    #[arg(long = "quarter-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) quarter_weight: Option<f64>,
    /// Weight of the `(90, 180]` days bucket, as a percentage.
    #[arg(long = "half-year-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) half_year_weight: Option<f64>,
    /// Weight of the `> 180` days bucket, as a percentage.
    #[arg(long = "older-weight", value_name = "percent")]
    #[serde(default)]
    pub(crate) older_weight: Option<f64>,
    /// Output format, `table` or `json`.
    #[arg(long = "format", value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
    /// Fraction digits in table output.
    #[arg(long = "precision", value_name = "digits")]
    #[serde(default)]
    pub(crate) precision: Option<usize>,
}

impl RateArgs {
    pub(crate) fn into_config(self) -> Result<RateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateConfig::try_from(merged)
    }
}

/// Resolved `rate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RateConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) weights: RecencyWeights,
    pub(crate) report: ReportOptions,
}

impl RateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }
}

impl TryFrom<RateArgs> for RateConfig {
    type Error = CliError;

    fn try_from(args: RateArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RATE_DATASET,
        })?;
        let defaults = RecencyWeights::default();
        let weights = RecencyWeights {
            recent: args.recent_weight.unwrap_or(defaults.recent),
            quarter: args.quarter_weight.unwrap_or(defaults.quarter),
            half_year: args.half_year_weight.unwrap_or(defaults.half_year),
            older: args.older_weight.unwrap_or(defaults.older),
        }
        .validate()?;
        let report = report_options(args.format.as_deref(), args.precision)?;
        Ok(Self {
            dataset,
            weights,
            report,
        })
    }
}

pub(crate) fn run(args: RateArgs) -> Result<String, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let source = JsonReviewSource::open(&config.dataset)?;

    let mut rows = Vec::new();
    for product_id in source.product_ids() {
        let reviews: Vec<Review> = source.reviews_for_product(&product_id).collect();
        let rating = rate_product(&reviews, config.weights)?;
        rows.push(RatingRow {
            product_id,
            review_count: reviews.len(),
            rating,
        });
    }
    render_ratings(&rows, config.report)
}
