//! Time-weighted rating estimation.
//!
//! Reviews are partitioned into four age buckets and the per-bucket mean
//! ratings are combined with fixed percentage weights, discounting stale
//! opinions relative to a naive arithmetic mean.
#![forbid(unsafe_code)]

use reviewrank_core::Review;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Upper bound, in days, of the most recent age bucket.
pub const RECENT_WINDOW_DAYS: u32 = 30;

/// Tolerance when checking that percentage weights sum to 100.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Age bucket of a review, derived from its `day_diff`.
///
/// The four buckets are disjoint and collectively exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    /// Posted within the last 30 days.
    Recent,
    /// Posted 31 to 90 days ago.
    Quarter,
    /// Posted 91 to 180 days ago.
    HalfYear,
    /// Posted more than 180 days ago.
    Older,
}

impl AgeBucket {
    /// Every bucket, ordered most recent first.
    pub const ALL: [Self; 4] = [Self::Recent, Self::Quarter, Self::HalfYear, Self::Older];

    /// Classify a review age in days.
    #[must_use]
    pub const fn for_day_diff(day_diff: u32) -> Self {
        match day_diff {
            0..=30 => Self::Recent,
            31..=90 => Self::Quarter,
            91..=180 => Self::HalfYear,
            _ => Self::Older,
        }
    }
}

/// Percentage weights applied to the age bucket means.
///
/// The defaults weight recent opinion heaviest, `30/28/22/22`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyWeights {
    /// Weight of the `<= 30` days bucket.
    pub recent: f64,
    /// Weight of the `(30, 90]` days bucket.
    pub quarter: f64,
    /// Weight of the `(90, 180]` days bucket.
    pub half_year: f64,
    /// Weight of the `> 180` days bucket.
    pub older: f64,
}

impl Default for RecencyWeights {
    fn default() -> Self {
        Self {
            recent: 30.0,
            quarter: 28.0,
            half_year: 22.0,
            older: 22.0,
        }
    }
}

impl RecencyWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidWeights`] when a weight is negative or
    /// non-finite, or the weights do not sum to 100.
    pub fn validate(self) -> Result<Self, ScoreError> {
        validate_percentages(&[self.recent, self.quarter, self.half_year, self.older])?;
        Ok(self)
    }

    const fn for_bucket(self, bucket: AgeBucket) -> f64 {
        match bucket {
            AgeBucket::Recent => self.recent,
            AgeBucket::Quarter => self.quarter,
            AgeBucket::HalfYear => self.half_year,
            AgeBucket::Older => self.older,
        }
    }
}

/// Check that a set of percentage weights is usable.
#[expect(
    clippy::float_arithmetic,
    reason = "validation sums the weights to compare against 100"
)]
pub(crate) fn validate_percentages(weights: &[f64]) -> Result<(), ScoreError> {
    let total: f64 = weights.iter().sum();
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0)
        || (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE
    {
        return Err(ScoreError::InvalidWeights { total });
    }
    Ok(())
}

/// Recency-weighted mean rating over a batch of reviews.
///
/// Each populated bucket contributes its mean `overall` scaled by its
/// weight. Empty buckets are skipped and the remaining weights are
/// renormalised so the result stays a convex combination of observed
/// bucket means; a dataset confined to one bucket degenerates to that
/// bucket's plain mean.
///
/// # Errors
/// Returns [`ScoreError::InvalidWeights`] for unusable weights and
/// [`ScoreError::EmptyDataset`] when no review carries positive weight.
#[expect(
    clippy::float_arithmetic,
    reason = "the estimator averages ratings and blends bucket means"
)]
pub fn time_weighted_average(
    reviews: &[Review],
    weights: RecencyWeights,
) -> Result<f64, ScoreError> {
    let validated_weights = weights.validate()?;
    let mut weighted = 0.0_f64;
    let mut active_weight = 0.0_f64;
    for bucket in AgeBucket::ALL {
        let (sum, count) = reviews
            .iter()
            .filter(|review| AgeBucket::for_day_diff(review.day_diff) == bucket)
            .fold((0.0_f64, 0_u32), |(sum, count), review| {
                (sum + review.overall, count + 1)
            });
        if count == 0 {
            continue;
        }
        let mean = sum / f64::from(count);
        weighted += mean * validated_weights.for_bucket(bucket);
        active_weight += validated_weights.for_bucket(bucket);
    }
    if active_weight == 0.0 {
        return Err(ScoreError::EmptyDataset);
    }
    Ok(weighted / active_weight)
}

/// Plain arithmetic mean of `overall`, the naive baseline.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging divides a bounded sum by the dataset size"
)]
pub fn mean_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: f64 = reviews.iter().map(|review| review.overall).sum();
    Some(sum / reviews.len() as f64)
}

/// Mean rating restricted to reviews at most `max_day_diff` days old.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging divides a bounded sum by the window size"
)]
pub fn recent_mean_rating(reviews: &[Review], max_day_diff: u32) -> Option<f64> {
    let mut sum = 0.0_f64;
    let mut count = 0_usize;
    for review in reviews {
        if review.day_diff <= max_day_diff {
            sum += review.overall;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Rating report comparing the time-weighted estimate with its baselines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
    /// Naive mean over every review.
    pub mean: Option<f64>,
    /// Mean over reviews at most [`RECENT_WINDOW_DAYS`] days old.
    pub recent_mean: Option<f64>,
    /// Recency-weighted mean.
    pub time_weighted: f64,
}

/// Compute the rating report for a batch of reviews.
///
/// # Errors
/// Propagates the errors of [`time_weighted_average`].
pub fn rate_product(
    reviews: &[Review],
    weights: RecencyWeights,
) -> Result<ProductRating, ScoreError> {
    Ok(ProductRating {
        mean: mean_rating(reviews),
        recent_mean: recent_mean_rating(reviews, RECENT_WINDOW_DAYS),
        time_weighted: time_weighted_average(reviews, weights)?,
    })
}
