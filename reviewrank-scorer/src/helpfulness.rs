//! Helpfulness scorers over a review's vote pair.
//!
//! Three independent signals, each a pure function of the up/down votes:
//! the net difference, the raw positive ratio, and the Wilson score
//! interval's lower bound. The Wilson bound is the preferred ranking
//! signal because it resists being gamed by a single early positive vote.
#![forbid(unsafe_code)]

use reviewrank_core::{ReviewScorer, Votes};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ScoreError;

/// Confidence level of the default Wilson interval.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Net helpful votes: `up - down`.
///
/// Unbounded in both directions; a review with many votes dominates
/// regardless of how contested it is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PosNegDifference;

impl ReviewScorer for PosNegDifference {
    #[expect(
        clippy::float_arithmetic,
        reason = "the net vote count is a simple difference"
    )]
    fn score(&self, votes: Votes) -> f64 {
        f64::from(votes.up) - f64::from(votes.down)
    }
}

/// Fraction of votes that found the review helpful: `up / (up + down)`.
///
/// Ranges over `[0, 1]`. A review without votes carries no information
/// and scores `0.0` rather than dividing by zero. The ratio treats one
/// vote and a thousand votes alike, which is why ranking prefers
/// [`WilsonLowerBound`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PositiveRatio;

impl ReviewScorer for PositiveRatio {
    #[expect(
        clippy::float_arithmetic,
        reason = "the ratio divides vote counts after the zero guard"
    )]
    fn score(&self, votes: Votes) -> f64 {
        if votes.is_empty() {
            return 0.0;
        }
        f64::from(votes.up) / f64::from(votes.total())
    }
}

/// Lower bound of the Wilson score confidence interval for a Bernoulli
/// proportion, treating each "up" vote as a success out of
/// `n = up + down` trials.
///
/// Deliberately more conservative than [`PositiveRatio`] for low vote
/// counts: the interval is wide when evidence is thin, so a review with
/// two unanimous votes ranks below one with hundreds of mostly-positive
/// votes. See
/// <https://www.evanmiller.org/how-not-to-sort-by-average-rating.html>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilsonLowerBound {
    confidence: f64,
    z: f64,
}

impl WilsonLowerBound {
    /// Construct the scorer for a two-sided confidence level.
    ///
    /// The z-score is derived from the inverse normal CDF so arbitrary
    /// confidence levels work, not just the tabulated ones.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidConfidence`] unless
    /// `0 < confidence < 1`, and [`ScoreError::Distribution`] if the
    /// standard normal cannot be constructed.
    #[expect(
        clippy::float_arithmetic,
        reason = "the two-sided tail probability is derived from the confidence"
    )]
    pub fn new(confidence: f64) -> Result<Self, ScoreError> {
        if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
            return Err(ScoreError::InvalidConfidence { confidence });
        }
        let standard = Normal::new(0.0, 1.0).map_err(|source| ScoreError::Distribution {
            message: source.to_string(),
        })?;
        let z = standard.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
        Ok(Self { confidence, z })
    }

    /// The confidence level the interval was built for.
    #[must_use]
    pub const fn confidence(self) -> f64 {
        self.confidence
    }

    /// The two-sided normal quantile backing the interval.
    #[must_use]
    pub const fn z_score(self) -> f64 {
        self.z
    }
}

impl ReviewScorer for WilsonLowerBound {
    #[expect(
        clippy::float_arithmetic,
        reason = "the Wilson bound is a closed-form floating-point expression"
    )]
    fn score(&self, votes: Votes) -> f64 {
        if votes.is_empty() {
            return 0.0;
        }
        let n = f64::from(votes.total());
        let z = self.z;
        let z2 = z * z;
        let phat = f64::from(votes.up) / n;
        // phat * (1 - phat) vanishes at both extremes, so the operand under
        // the square root stays non-negative.
        let bound = (phat + z2 / (2.0 * n)
            - z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt())
            / (1.0 + z2 / n);
        // A lower bound on a proportion; rounding at phat = 0 must not
        // leak a negative score.
        <Self as ReviewScorer>::sanitise(bound.max(0.0))
    }
}
