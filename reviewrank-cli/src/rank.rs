//! Rank command implementation for the reviewrank CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reviewrank_core::JsonReviewSource;
use reviewrank_scorer::{
    DEFAULT_REVIEW_PAGE_SIZE, RankingKey, ScoreOptions, score_reviews, top_products, top_reviews,
};
use serde::{Deserialize, Serialize};

use crate::report::{ReportOptions, render_ranked, report_options};
use crate::score::sort_weights_from;
use crate::{ARG_DATASET, CliError, ENV_RANK_DATASET, require_existing};

/// Products shown in the composite ranking by default.
const DEFAULT_PRODUCT_LIMIT: usize = 10;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a dataset and print its ranked views: the top \
                 reviews under a selectable ranking key (the Wilson lower \
                 bound by default) and the top products by composite \
                 score. Component weights are percentages and must sum \
                 to 100.",
    about = "Rank reviews and products by the derived scores"
)]
#[ortho_config(prefix = "REVIEWRANK")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing the review rows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Ranking key ordering the review page.
    #[arg(long = "by", value_name = "key")]
    #[serde(default)]
    pub(crate) by: Option<String>,
    /// Number of reviews on the page.
    #[arg(long = "limit", value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Number of products in the composite ranking.
    #[arg(long = "product-limit", value_name = "count")]
    #[serde(default)]
    pub(crate) product_limit: Option<usize>,
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
    /// Output format, `table` or `json`.
    #[arg(long = "format", value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
    /// Fraction digits in table output.
    #[arg(long = "precision", value_name = "digits")]
    #[serde(default)]
    pub(crate) precision: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) key: RankingKey,
    pub(crate) limit: usize,
    pub(crate) product_limit: usize,
    pub(crate) options: ScoreOptions,
    pub(crate) report: ReportOptions,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RANK_DATASET,
        })?;
        let key = args
            .by
            .as_deref()
            .map(str::parse::<RankingKey>)
            .transpose()?
            .unwrap_or(RankingKey::WilsonLowerBound);
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
        let report = report_options(args.format.as_deref(), args.precision)?;
        Ok(Self {
            dataset,
            key,
            limit: args.limit.unwrap_or(DEFAULT_REVIEW_PAGE_SIZE),
            product_limit: args.product_limit.unwrap_or(DEFAULT_PRODUCT_LIMIT),
            options,
            report,
        })
    }
}

pub(crate) fn run(args: RankArgs) -> Result<String, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let source = JsonReviewSource::open(&config.dataset)?;

    let scored = score_reviews(source.into_reviews(), config.options)?;
    let page = top_reviews(&scored, config.key, config.limit);
    let products = top_products(&scored, config.product_limit);
    render_ranked(&page, config.key, &products, config.report)
}
