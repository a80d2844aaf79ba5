//! Min-max rescaling of dataset columns.
//!
//! Vote counts are unbounded, unlike the `[1, 5]` star rating; rescaling
//! them into the rating band keeps the composite weights comparable.
#![forbid(unsafe_code)]

use reviewrank_core::{MAX_RATING, MIN_RATING};

use crate::error::ScoreError;

/// Target band for a rescaled column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    min: f64,
    max: f64,
}

/// The rating band, `[1.0, 5.0]`, used when scaling vote columns.
pub const RATING_RANGE: ScaleRange = ScaleRange {
    min: MIN_RATING,
    max: MAX_RATING,
};

impl ScaleRange {
    /// Validate and construct a target range.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidScaleRange`] when either bound is not
    /// finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ScoreError> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(ScoreError::InvalidScaleRange { min, max })
        }
    }

    /// Lower bound of the target band.
    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    /// Upper bound of the target band.
    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the span of the band is a simple difference"
    )]
    const fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Rescale a column into the target band.
///
/// Each value maps to
/// `min + (v - source_min) * (max - min) / (source_max - source_min)`
/// over the whole input column. A degenerate column, where every value is
/// identical (including a single-element column), maps every element to
/// `range.min()` rather than dividing by zero.
///
/// # Examples
///
/// ```
/// use reviewrank_scorer::{RATING_RANGE, min_max_scale};
///
/// assert_eq!(min_max_scale(&[0.0, 10.0], RATING_RANGE), vec![1.0, 5.0]);
/// assert_eq!(min_max_scale(&[5.0], RATING_RANGE), vec![1.0]);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rescaling interpolates between floating-point bounds"
)]
pub fn min_max_scale(values: &[f64], range: ScaleRange) -> Vec<f64> {
    let Some(source_min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let source_max = values.iter().copied().fold(source_min, f64::max);
    if source_max == source_min {
        return vec![range.min(); values.len()];
    }
    let scale = range.span() / (source_max - source_min);
    values
        .iter()
        .map(|value| range.min() + (value - source_min) * scale)
        .collect()
}
