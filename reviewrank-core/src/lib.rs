//! Core domain types for the reviewrank engine.
//!
//! These models provide basic validation to keep downstream
//! components honest. Constructors return `Result` to surface
//! invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod review;
mod scorer;
mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use review::{MAX_RATING, MIN_RATING, Review, ReviewError, Votes};
pub use scorer::ReviewScorer;
pub use source::ReviewSource;

#[cfg(feature = "source-json")]
pub use source::{JsonReviewSource, SourceError};
