//! Score a review's helpfulness from its vote counts.
//!
//! The `ReviewScorer` trait assigns a rankable scalar to a review's
//! [`Votes`] pair. Implementations stay independent of each other so the
//! caller decides which signal orders the final output.

use crate::Votes;

/// Calculate a helpfulness score from an up/down vote pair.
///
/// Higher scores indicate a more trustworthy review. Implementations must
/// be thread-safe (`Send` + `Sync`) so scoring can run across threads.
/// The method is infallible; implementers must return `0.0` when no votes
/// carry any information.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Be deterministic in the vote pair alone.
///
/// Use [`ReviewScorer::sanitise`] to apply the finiteness guard.
///
/// # Examples
///
/// ```rust
/// use reviewrank_core::{ReviewScorer, Votes};
///
/// struct NetVotes;
///
/// impl ReviewScorer for NetVotes {
///     fn score(&self, votes: Votes) -> f64 {
///         f64::from(votes.up) - f64::from(votes.down)
///     }
/// }
///
/// assert_eq!(NetVotes.score(Votes { up: 4, down: 1 }), 3.0);
/// ```
pub trait ReviewScorer: Send + Sync {
    /// Return a score for the given vote pair.
    fn score(&self, votes: Votes) -> f64;

    /// Replace non-finite values with `0.0`.
    fn sanitise(score: f64) -> f64 {
        if score.is_finite() { score } else { 0.0 }
    }
}
