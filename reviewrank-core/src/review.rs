use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Lowest rating a reviewer can award.
pub const MIN_RATING: f64 = 1.0;

/// Highest rating a reviewer can award.
pub const MAX_RATING: f64 = 5.0;

/// One row of review data for a product.
///
/// Columns the engine does not interpret (reviewer name, review body,
/// summary, raw timestamps) travel in `extra` and round-trip untouched.
/// Vote counts are unsigned so the non-negativity constraints hold by
/// construction; [`Review::new`] enforces the rest.
///
/// # Examples
///
/// ```
/// use reviewrank_core::Review;
///
/// # fn main() -> Result<(), reviewrank_core::ReviewError> {
/// let review = Review::new("A1", "B007WTAJTO", 5.0, 3, 4, 120)?;
/// assert_eq!(review.votes().down, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Identifier of the reviewer who wrote the row.
    pub reviewer_id: String,
    /// Identifier of the reviewed product.
    pub product_id: String,
    /// Star rating awarded, in `[1.0, 5.0]`.
    pub overall: f64,
    /// Number of "helpful" votes the review received.
    pub helpful_yes: u32,
    /// Total number of votes cast on the review.
    pub total_vote: u32,
    /// Days elapsed since the review was posted.
    pub day_diff: u32,
    /// Columns passed through to the output untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Errors returned by [`Review::new`] and [`Review::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    /// The reviewer identifier was empty.
    #[error("review must carry a non-empty reviewer id")]
    EmptyReviewerId,
    /// The product identifier was empty.
    #[error("review must carry a non-empty product id")]
    EmptyProductId,
    /// The rating fell outside the supported scale.
    #[error("rating {overall} must lie between {MIN_RATING} and {MAX_RATING}")]
    RatingOutOfRange {
        /// Rating found on the row.
        overall: f64,
    },
    /// More helpful votes than votes in total.
    #[error("helpful vote count {helpful_yes} exceeds total vote count {total_vote}")]
    InconsistentVotes {
        /// Helpful votes found on the row.
        helpful_yes: u32,
        /// Total votes found on the row.
        total_vote: u32,
    },
}

impl Review {
    /// Validates and constructs a [`Review`] with no passthrough columns.
    ///
    /// # Errors
    /// Returns [`ReviewError`] when an identifier is empty, the rating is
    /// outside `[1.0, 5.0]`, or `helpful_yes` exceeds `total_vote`.
    pub fn new(
        reviewer_id: impl Into<String>,
        product_id: impl Into<String>,
        overall: f64,
        helpful_yes: u32,
        total_vote: u32,
        day_diff: u32,
    ) -> Result<Self, ReviewError> {
        let review = Self {
            reviewer_id: reviewer_id.into(),
            product_id: product_id.into(),
            overall,
            helpful_yes,
            total_vote,
            day_diff,
            extra: BTreeMap::new(),
        };
        review.validate()?;
        Ok(review)
    }

    /// Attach passthrough columns while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Check the row invariants without constructing anything.
    ///
    /// Deserialized rows bypass [`Review::new`], so sources call this
    /// before handing rows to the scoring pipeline.
    ///
    /// # Errors
    /// Returns the first violated [`ReviewError`] invariant.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.reviewer_id.is_empty() {
            return Err(ReviewError::EmptyReviewerId);
        }
        if self.product_id.is_empty() {
            return Err(ReviewError::EmptyProductId);
        }
        if !self.overall.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&self.overall) {
            return Err(ReviewError::RatingOutOfRange {
                overall: self.overall,
            });
        }
        if self.helpful_yes > self.total_vote {
            return Err(ReviewError::InconsistentVotes {
                helpful_yes: self.helpful_yes,
                total_vote: self.total_vote,
            });
        }
        Ok(())
    }

    /// Split the vote counts into an up/down pair.
    ///
    /// `down` is the derived `helpful_no` column: the votes that did not
    /// find the review helpful. Safe by the `helpful_yes <= total_vote`
    /// invariant.
    #[must_use]
    pub fn votes(&self) -> Votes {
        Votes {
            up: self.helpful_yes,
            down: self.total_vote - self.helpful_yes,
        }
    }
}

/// A review's helpfulness votes split into successes and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Votes {
    /// Votes that found the review helpful.
    pub up: u32,
    /// Votes that did not.
    pub down: u32,
}

impl Votes {
    /// Total number of votes cast.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.up + self.down
    }

    /// Report whether the review received any votes at all.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.total() == 0
    }
}
