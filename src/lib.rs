//! Facade crate for the reviewrank review-scoring engine.
//!
//! This crate re-exports the core domain types and the statistical scoring
//! API, with the file-backed dataset source behind a feature flag.

#![forbid(unsafe_code)]

pub use reviewrank_core::{
    MAX_RATING, MIN_RATING, Review, ReviewError, ReviewScorer, ReviewSource, Votes,
};

#[cfg(feature = "source-json")]
pub use reviewrank_core::{JsonReviewSource, SourceError};

pub use reviewrank_scorer::{
    AgeBucket, DEFAULT_CONFIDENCE, DEFAULT_REVIEW_PAGE_SIZE, PosNegDifference, PositiveRatio,
    ProductRating, ProductScore, RATING_RANGE, RECENT_WINDOW_DAYS, RankingKey, RecencyWeights,
    ScaleRange, ScoreError, ScoreOptions, ScoredReview, SortWeights, WilsonLowerBound, mean_rating,
    min_max_scale, rank_products, rank_reviews, rate_product, recent_mean_rating, score_reviews,
    time_weighted_average, top_products, top_reviews,
};
