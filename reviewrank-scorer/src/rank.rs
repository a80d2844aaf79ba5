//! Composite product-ranking score and deterministic ranked views.
#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reviewrank_core::{Review, ReviewScorer};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::helpfulness::{PosNegDifference, PositiveRatio, WilsonLowerBound};
use crate::recency::validate_percentages;

/// Number of reviews shown on a product detail page.
pub const DEFAULT_REVIEW_PAGE_SIZE: usize = 20;

/// Percentage weights blending the three composite-score components.
///
/// The defaults are `32/26/42` for the scaled helpful-vote count, the
/// scaled total-vote count, and the star rating. Both vote columns are
/// rescaled into the rating band first; otherwise the rating term would
/// be numerically negligible for popular products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortWeights {
    /// Weight of the scaled helpful-vote count.
    pub helpful_votes: f64,
    /// Weight of the scaled total-vote count.
    pub total_votes: f64,
    /// Weight of the star rating.
    pub rating: f64,
}

impl Default for SortWeights {
    fn default() -> Self {
        Self {
            helpful_votes: 32.0,
            total_votes: 26.0,
            rating: 42.0,
        }
    }
}

impl SortWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidWeights`] when a weight is negative or
    /// non-finite, or the weights do not sum to 100.
    pub fn validate(self) -> Result<Self, ScoreError> {
        validate_percentages(&[self.helpful_votes, self.total_votes, self.rating])?;
        Ok(self)
    }

    /// Blend the scaled vote columns and the rating into one score.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the composite score is a weighted sum of its components"
    )]
    pub fn apply(self, helpful_yes_scaled: f64, total_vote_scaled: f64, overall: f64) -> f64 {
        helpful_yes_scaled * self.helpful_votes / 100.0
            + total_vote_scaled * self.total_votes / 100.0
            + overall * self.rating / 100.0
    }
}

/// A review enriched with every derived scoring column.
///
/// Derived fields are pure functions of the base row and the dataset-wide
/// vote-column minima and maxima used for scaling; the base row itself is
/// never mutated. Serialising a scored review emits the original columns
/// (including the passthrough ones) alongside the derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    /// The unmodified source row.
    #[serde(flatten)]
    pub review: Review,
    /// Votes that did not find the review helpful.
    pub helpful_no: u32,
    /// Helpful-vote count rescaled into the rating band.
    pub helpful_yes_scaled: f64,
    /// Total-vote count rescaled into the rating band.
    pub total_vote_scaled: f64,
    /// Net helpful votes.
    pub score_pos_neg_diff: f64,
    /// Fraction of votes that found the review helpful.
    pub score_average_rating: f64,
    /// Lower bound of the Wilson confidence interval.
    pub wilson_lower_bound: f64,
    /// Composite product-ranking score.
    pub weighted_sorting_score: f64,
}

impl ScoredReview {
    pub(crate) fn derive(
        review: Review,
        helpful_yes_scaled: f64,
        total_vote_scaled: f64,
        wilson: &WilsonLowerBound,
        weights: SortWeights,
    ) -> Self {
        let votes = review.votes();
        Self {
            helpful_no: votes.down,
            helpful_yes_scaled,
            total_vote_scaled,
            score_pos_neg_diff: PosNegDifference.score(votes),
            score_average_rating: PositiveRatio.score(votes),
            wilson_lower_bound: wilson.score(votes),
            weighted_sorting_score: weights.apply(
                helpful_yes_scaled,
                total_vote_scaled,
                review.overall,
            ),
            review,
        }
    }
}

/// The column a ranked view orders by.
///
/// The Wilson lower bound is the preferred review ordering; the raw
/// column keys exist for side-by-side comparison of the orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingKey {
    /// Order by the Wilson confidence lower bound.
    WilsonLowerBound,
    /// Order by the raw positive-vote ratio.
    AverageRating,
    /// Order by the net helpful votes.
    PosNegDifference,
    /// Order by the composite product-ranking score.
    WeightedScore,
    /// Order by the star rating column.
    Rating,
    /// Order by the raw helpful-vote count.
    HelpfulVotes,
    /// Order by the raw total-vote count.
    TotalVotes,
}

impl RankingKey {
    fn value(self, scored: &ScoredReview) -> f64 {
        match self {
            Self::WilsonLowerBound => scored.wilson_lower_bound,
            Self::AverageRating => scored.score_average_rating,
            Self::PosNegDifference => scored.score_pos_neg_diff,
            Self::WeightedScore => scored.weighted_sorting_score,
            Self::Rating => scored.review.overall,
            Self::HelpfulVotes => f64::from(scored.review.helpful_yes),
            Self::TotalVotes => f64::from(scored.review.total_vote),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::WilsonLowerBound => "wilson-lower-bound",
            Self::AverageRating => "average-rating",
            Self::PosNegDifference => "pos-neg-diff",
            Self::WeightedScore => "weighted-score",
            Self::Rating => "rating",
            Self::HelpfulVotes => "helpful-votes",
            Self::TotalVotes => "total-votes",
        }
    }
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingKey {
    type Err = ScoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wilson-lower-bound" => Ok(Self::WilsonLowerBound),
            "average-rating" => Ok(Self::AverageRating),
            "pos-neg-diff" => Ok(Self::PosNegDifference),
            "weighted-score" => Ok(Self::WeightedScore),
            "rating" => Ok(Self::Rating),
            "helpful-votes" => Ok(Self::HelpfulVotes),
            "total-votes" => Ok(Self::TotalVotes),
            _ => Err(ScoreError::UnknownRankingKey {
                value: value.to_owned(),
            }),
        }
    }
}

/// Order scored reviews descending by the chosen key.
///
/// Scores are finite by construction, so ties fall through to the
/// ascending reviewer id, keeping the output reproducible across runs.
#[must_use]
pub fn rank_reviews(scored: &[ScoredReview], key: RankingKey) -> Vec<&ScoredReview> {
    let mut ranked: Vec<&ScoredReview> = scored.iter().collect();
    ranked.sort_by(|a, b| {
        key.value(b)
            .partial_cmp(&key.value(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.review.reviewer_id.cmp(&b.review.reviewer_id))
    });
    ranked
}

/// The reviews shown on a product detail page: the top `limit` under `key`.
#[must_use]
pub fn top_reviews(scored: &[ScoredReview], key: RankingKey, limit: usize) -> Vec<&ScoredReview> {
    let mut ranked = rank_reviews(scored, key);
    ranked.truncate(limit);
    ranked
}

/// A product's aggregate standing in the composite ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductScore {
    /// Identifier of the product.
    pub product_id: String,
    /// Mean composite score over the product's reviews.
    pub score: f64,
    /// Number of reviews backing the score.
    pub review_count: usize,
}

/// Aggregate scored reviews per product and order products descending.
///
/// Each product is scored by the mean composite score of its reviews;
/// ties break on the ascending product id.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "product scores average the bounded composite scores"
)]
pub fn rank_products(scored: &[ScoredReview]) -> Vec<ProductScore> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for review in scored {
        let entry = totals.entry(review.review.product_id.as_str()).or_default();
        entry.0 += review.weighted_sorting_score;
        entry.1 += 1;
    }
    let mut products: Vec<ProductScore> = totals
        .into_iter()
        .map(|(product_id, (sum, review_count))| ProductScore {
            product_id: product_id.to_owned(),
            score: sum / review_count as f64,
            review_count,
        })
        .collect();
    products.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    products
}

/// The top `limit` products by composite score.
#[must_use]
pub fn top_products(scored: &[ScoredReview], limit: usize) -> Vec<ProductScore> {
    let mut products = rank_products(scored);
    products.truncate(limit);
    products
}
