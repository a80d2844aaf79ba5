//! Error types raised while scoring review datasets.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while configuring or running the scoring pipeline.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The target scale range was inverted, collapsed, or non-finite.
    #[error("scale range [{min}, {max}] must be finite with min < max")]
    InvalidScaleRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// Weight percentages were negative, non-finite, or did not sum to 100.
    #[error("weights must be finite, non-negative, and sum to 100 (got {total})")]
    InvalidWeights {
        /// Sum of the supplied weights.
        total: f64,
    },
    /// A confidence level fell outside the open unit interval.
    #[error("confidence {confidence} must lie strictly between 0 and 1")]
    InvalidConfidence {
        /// Requested confidence level.
        confidence: f64,
    },
    /// The standard normal distribution could not be constructed.
    #[error("failed to construct the standard normal distribution: {message}")]
    Distribution {
        /// Description reported by `statrs`.
        message: String,
    },
    /// No review contributes weight to the requested average.
    #[error("no reviews contribute to the weighted average")]
    EmptyDataset,
    /// A ranking key string was not recognised.
    #[error("unknown ranking key `{value}`")]
    UnknownRankingKey {
        /// The unrecognised input.
        value: String,
    },
}
