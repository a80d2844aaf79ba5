//! Test-only, in-memory `ReviewSource` implementation and row fixtures
//! used by unit and behaviour tests.

use crate::{Review, ReviewSource};

/// Product identifier shared by the default fixtures.
pub const FIXTURE_PRODUCT: &str = "B007WTAJTO";

/// In-memory `ReviewSource` implementation used in tests.
///
/// The source keeps rows in insertion order and is intended only for
/// small datasets.
#[derive(Default, Debug)]
pub struct MemorySource {
    reviews: Vec<Review>,
}

impl MemorySource {
    /// Create a source containing a single review.
    pub fn with_review(review: Review) -> Self {
        Self::with_reviews(std::iter::once(review))
    }

    /// Create a source from a collection of reviews.
    pub fn with_reviews<I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = Review>,
    {
        Self {
            reviews: reviews.into_iter().collect(),
        }
    }
}

impl ReviewSource for MemorySource {
    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
        Box::new(self.reviews.iter().cloned())
    }
}

/// Build a valid review for [`FIXTURE_PRODUCT`].
///
/// # Panics
/// Panics when the arguments violate a review invariant; fixtures are
/// expected to be well-formed.
pub fn review(
    reviewer_id: &str,
    overall: f64,
    helpful_yes: u32,
    total_vote: u32,
    day_diff: u32,
) -> Review {
    Review::new(
        reviewer_id,
        FIXTURE_PRODUCT,
        overall,
        helpful_yes,
        total_vote,
        day_diff,
    )
    .expect("fixture review should satisfy the row invariants")
}
