//! Rendering of ranked views for the terminal or a JSON sink.
//!
//! Float formatting is an explicit option of the output routine rather
//! than process-global state, so callers pick the precision per report.

use std::str::FromStr;

use reviewrank_scorer::{ProductRating, ProductScore, RankingKey, ScoredReview};
use serde::Serialize;

use crate::CliError;

/// Default number of fraction digits in table output.
pub(crate) const DEFAULT_PRECISION: usize = 5;

/// How a report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    /// Aligned plain-text columns.
    #[default]
    Table,
    /// Pretty-printed JSON for a downstream sink.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(CliError::UnknownFormat {
                value: value.to_owned(),
            }),
        }
    }
}

/// Formatting options shared by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportOptions {
    pub(crate) format: OutputFormat,
    pub(crate) precision: usize,
}

/// Resolve the formatting options from optional overrides.
pub(crate) fn report_options(
    format: Option<&str>,
    precision: Option<usize>,
) -> Result<ReportOptions, CliError> {
    let format = format
        .map(str::parse::<OutputFormat>)
        .transpose()?
        .unwrap_or_default();
    Ok(ReportOptions {
        format,
        precision: precision.unwrap_or(DEFAULT_PRECISION),
    })
}

/// One product's rating report row.
#[derive(Debug, Serialize)]
pub(crate) struct RatingRow {
    pub(crate) product_id: String,
    pub(crate) review_count: usize,
    #[serde(flatten)]
    pub(crate) rating: ProductRating,
}

pub(crate) fn render_ratings(
    rows: &[RatingRow],
    options: ReportOptions,
) -> Result<String, CliError> {
    match options.format {
        OutputFormat::Json => to_pretty_json(rows),
        OutputFormat::Table => {
            let precision = options.precision;
            let mut out = String::new();
            for row in rows {
                out.push_str(&format!(
                    "product {} ({} reviews)\n",
                    row.product_id, row.review_count
                ));
                out.push_str(&format!(
                    "  mean rating            {}\n",
                    optional(row.rating.mean, precision)
                ));
                out.push_str(&format!(
                    "  recent mean (<= 30d)   {}\n",
                    optional(row.rating.recent_mean, precision)
                ));
                out.push_str(&format!(
                    "  time-weighted rating   {:.precision$}\n",
                    row.rating.time_weighted
                ));
            }
            Ok(out)
        }
    }
}

pub(crate) fn render_reviews(
    page: &[&ScoredReview],
    key: RankingKey,
    options: ReportOptions,
) -> Result<String, CliError> {
    match options.format {
        OutputFormat::Json => to_pretty_json(&page),
        OutputFormat::Table => {
            let precision = options.precision;
            let mut out = format!("top {} reviews by {key}\n", page.len());
            out.push_str(&format!(
                "{:<16} {:>7} {:>5} {:>5} {:>10} {:>10} {:>10} {:>10}\n",
                "reviewer", "rating", "yes", "no", "diff", "ratio", "wilson", "weighted"
            ));
            for scored in page {
                out.push_str(&format!(
                    "{:<16} {:>7.1} {:>5} {:>5} {:>10.precision$} {:>10.precision$} {:>10.precision$} {:>10.precision$}\n",
                    scored.review.reviewer_id,
                    scored.review.overall,
                    scored.review.helpful_yes,
                    scored.helpful_no,
                    scored.score_pos_neg_diff,
                    scored.score_average_rating,
                    scored.wilson_lower_bound,
                    scored.weighted_sorting_score,
                ));
            }
            Ok(out)
        }
    }
}

pub(crate) fn render_products(
    products: &[ProductScore],
    options: ReportOptions,
) -> Result<String, CliError> {
    match options.format {
        OutputFormat::Json => to_pretty_json(products),
        OutputFormat::Table => {
            let precision = options.precision;
            let mut out = format!("top {} products by weighted score\n", products.len());
            out.push_str(&format!(
                "{:<16} {:>10} {:>8}\n",
                "product", "score", "reviews"
            ));
            for product in products {
                out.push_str(&format!(
                    "{:<16} {:>10.precision$} {:>8}\n",
                    product.product_id, product.score, product.review_count,
                ));
            }
            Ok(out)
        }
    }
}

/// Render the review page and the product ranking as one report.
pub(crate) fn render_ranked(
    page: &[&ScoredReview],
    key: RankingKey,
    products: &[ProductScore],
    options: ReportOptions,
) -> Result<String, CliError> {
    match options.format {
        OutputFormat::Json => to_pretty_json(&serde_json::json!({
            "reviews": page,
            "products": products,
        })),
        OutputFormat::Table => {
            let mut out = render_reviews(page, key, options)?;
            out.push('\n');
            out.push_str(&render_products(products, options)?);
            Ok(out)
        }
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|source| CliError::Render { source })
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.precision$}"))
}
