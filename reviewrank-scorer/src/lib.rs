//! Scoring utilities for reviewrank datasets.
//!
//! The crate provides two complementary capabilities:
//! - **Product rating estimation** combines per-age-bucket mean ratings
//!   with fixed percentage weights so stale reviews are discounted
//!   relative to the naive mean ([`time_weighted_average`] and the
//!   [`rate_product`] comparison report).
//! - **Review enrichment and ranking** derives every scoring column for a
//!   batch of reviews in one pass — the vote columns min-max scaled into
//!   the rating band, the three helpfulness scores, and the composite
//!   product-ranking score — then serves deterministic ranked views over
//!   the result.
//!
//! # Examples
//!
//! ```
//! use reviewrank_core::Review;
//! use reviewrank_scorer::{RankingKey, ScoreOptions, score_reviews, top_reviews};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reviews = vec![
//!     Review::new("A1", "B007WTAJTO", 5.0, 120, 130, 400)?,
//!     Review::new("A2", "B007WTAJTO", 1.0, 2, 2, 12)?,
//! ];
//! let scored = score_reviews(reviews, ScoreOptions::default())?;
//! let page = top_reviews(&scored, RankingKey::WilsonLowerBound, 20);
//! assert_eq!(page[0].review.reviewer_id, "A1");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use reviewrank_core::Review;

mod error;
mod helpfulness;
mod rank;
mod recency;
mod scale;

pub use error::ScoreError;
pub use helpfulness::{DEFAULT_CONFIDENCE, PosNegDifference, PositiveRatio, WilsonLowerBound};
pub use rank::{
    DEFAULT_REVIEW_PAGE_SIZE, ProductScore, RankingKey, ScoredReview, SortWeights, rank_products,
    rank_reviews, top_products, top_reviews,
};
pub use recency::{
    AgeBucket, ProductRating, RECENT_WINDOW_DAYS, RecencyWeights, mean_rating, rate_product,
    recent_mean_rating, time_weighted_average,
};
pub use scale::{RATING_RANGE, ScaleRange, min_max_scale};

/// Options for the enrichment pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOptions {
    /// Confidence level of the Wilson interval.
    pub confidence: f64,
    /// Percentage weights of the composite score.
    pub weights: SortWeights,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            weights: SortWeights::default(),
        }
    }
}

/// Derive every scoring column for a batch of reviews.
///
/// The single enrichment pass of the pipeline: the two vote columns are
/// min-max scaled into the rating band over the whole dataset, each row
/// gains the three helpfulness scores, and the composite score blends the
/// scaled columns with the rating. Beyond the dataset-wide scaling
/// bounds, no row's derived values depend on any other row.
///
/// # Errors
/// Returns [`ScoreError`] when the confidence level or the composite
/// weights are unusable. Vote-less datasets are not an error; their
/// scores fall out as the documented sentinels.
pub fn score_reviews(
    reviews: Vec<Review>,
    options: ScoreOptions,
) -> Result<Vec<ScoredReview>, ScoreError> {
    let weights = options.weights.validate()?;
    let wilson = WilsonLowerBound::new(options.confidence)?;

    let helpful_column: Vec<f64> = reviews.iter().map(|r| f64::from(r.helpful_yes)).collect();
    let total_column: Vec<f64> = reviews.iter().map(|r| f64::from(r.total_vote)).collect();
    let helpful_scaled = min_max_scale(&helpful_column, RATING_RANGE);
    let total_scaled = min_max_scale(&total_column, RATING_RANGE);

    let scored: Vec<ScoredReview> = reviews
        .into_iter()
        .zip(helpful_scaled.into_iter().zip(total_scaled))
        .map(|(review, (helpful, total))| {
            ScoredReview::derive(review, helpful, total, &wilson, weights)
        })
        .collect();
    log::debug!(
        "scored {} reviews at {} confidence",
        scored.len(),
        wilson.confidence()
    );
    Ok(scored)
}
