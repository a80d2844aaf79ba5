//! Data access traits for review datasets.
//!
//! The `ReviewSource` trait defines a read-only interface for retrieving
//! [`Review`] rows from the external tabular collaborator. Iteration order
//! is deterministic so repeated runs rank identically.

#[cfg(feature = "source-json")]
use camino::{Utf8Path, Utf8PathBuf};
#[cfg(feature = "source-json")]
use thiserror::Error;

use crate::Review;
#[cfg(feature = "source-json")]
use crate::ReviewError;

/// Read-only access to a batch of reviews.
///
/// Implementers must hand out rows in a stable order; downstream ranking
/// breaks ties by field comparison and expects reproducible input.
///
/// # Examples
///
/// ```rust
/// use reviewrank_core::{Review, ReviewSource};
///
/// struct SliceSource {
///     reviews: Vec<Review>,
/// }
///
/// impl ReviewSource for SliceSource {
///     fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
///         Box::new(self.reviews.iter().cloned())
///     }
/// }
///
/// # fn main() -> Result<(), reviewrank_core::ReviewError> {
/// let review = Review::new("A1", "B007WTAJTO", 5.0, 0, 0, 3)?;
/// let source = SliceSource { reviews: vec![review.clone()] };
///
/// let rows: Vec<_> = source.reviews().collect();
/// assert_eq!(rows, vec![review]);
/// # Ok(())
/// # }
/// ```
pub trait ReviewSource {
    /// Return every review in the dataset, in a stable order.
    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_>;

    /// Return the reviews for one product, in the same stable order.
    fn reviews_for_product(
        &self,
        product_id: &str,
    ) -> Box<dyn Iterator<Item = Review> + Send + '_> {
        let product_id = product_id.to_owned();
        Box::new(self.reviews().filter(move |r| r.product_id == product_id))
    }

    /// Return the distinct product identifiers, sorted ascending.
    fn product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.reviews().map(|r| r.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Error raised when reading or validating a JSON dataset file.
#[cfg(feature = "source-json")]
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the dataset file failed.
    #[error("failed to read dataset file at {path}")]
    ReadFile {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file did not contain a JSON array of review rows.
    #[error("failed to decode dataset file at {path}")]
    Decode {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A row violated a review invariant; the batch is rejected.
    #[error("row {row} is invalid")]
    InvalidRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// The violated invariant.
        #[source]
        source: ReviewError,
    },
}

/// Review source backed by a JSON array of row objects.
///
/// The known columns map onto [`Review`] fields; every other column lands
/// in [`Review::extra`] and survives re-serialisation untouched. A single
/// malformed row rejects the whole batch rather than scoring nonsense.
#[cfg(feature = "source-json")]
#[derive(Debug, Clone, PartialEq)]
pub struct JsonReviewSource {
    reviews: Vec<Review>,
}

#[cfg(feature = "source-json")]
impl JsonReviewSource {
    /// Load and validate a dataset from a JSON file.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the file cannot be read, is not a JSON
    /// array of rows, or contains a row violating a review invariant.
    pub fn open(path: &Utf8Path) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path.as_std_path()).map_err(|source| SourceError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let reviews: Vec<Review> =
            serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        let source = Self::from_reviews(reviews)?;
        log::debug!("loaded {} reviews from {path}", source.reviews.len());
        Ok(source)
    }

    /// Validate an in-memory batch of rows.
    ///
    /// Rows are sorted by `(product_id, reviewer_id)` so iteration order
    /// does not depend on the order the collaborator wrote them in.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRow`] for the first row violating a
    /// review invariant.
    pub fn from_reviews(mut reviews: Vec<Review>) -> Result<Self, SourceError> {
        for (row, review) in reviews.iter().enumerate() {
            review
                .validate()
                .map_err(|source| SourceError::InvalidRow { row, source })?;
        }
        reviews.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then_with(|| a.reviewer_id.cmp(&b.reviewer_id))
        });
        Ok(Self { reviews })
    }

    /// Number of rows in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Report whether the dataset holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Consume the source and return the validated rows.
    #[must_use]
    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }
}

#[cfg(feature = "source-json")]
impl ReviewSource for JsonReviewSource {
    fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
        Box::new(self.reviews.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::review;
    use rstest::rstest;

    #[rstest]
    fn default_product_lookup_filters_by_id() {
        struct TwoProducts;

        impl ReviewSource for TwoProducts {
            fn reviews(&self) -> Box<dyn Iterator<Item = Review> + Send + '_> {
                let mut first = review("A1", 5.0, 0, 0, 1);
                first.product_id = "P1".to_owned();
                let mut second = review("A2", 3.0, 0, 0, 1);
                second.product_id = "P2".to_owned();
                Box::new([first, second].into_iter())
            }
        }

        let source = TwoProducts;
        assert_eq!(source.product_ids(), vec!["P1".to_owned(), "P2".to_owned()]);
        assert_eq!(source.reviews_for_product("P2").count(), 1);
    }

    #[cfg(feature = "source-json")]
    mod json {
        use super::*;
        use camino::Utf8PathBuf;
        use tempfile::TempDir;

        fn write_dataset(dir: &TempDir, body: &str) -> Utf8PathBuf {
            let path =
                Utf8PathBuf::from_path_buf(dir.path().join("reviews.json")).expect("utf8 path");
            std::fs::write(path.as_std_path(), body).expect("write dataset fixture");
            path
        }

        #[rstest]
        fn loads_rows_and_keeps_extra_columns() {
            let temp = TempDir::new().expect("tempdir");
            let path = write_dataset(
                &temp,
                r#"[{"reviewer_id":"A2","product_id":"B007WTAJTO","overall":4.0,
                     "helpful_yes":1,"total_vote":2,"day_diff":10,
                     "reviewer_name":"J. Doe","unix_review_time":1406073600},
                    {"reviewer_id":"A1","product_id":"B007WTAJTO","overall":5.0,
                     "helpful_yes":0,"total_vote":0,"day_diff":3}]"#,
            );

            let source = JsonReviewSource::open(&path).expect("open dataset");

            let rows: Vec<Review> = source.reviews().collect();
            assert_eq!(rows.len(), 2);
            // Deterministic order: sorted by reviewer id within the product.
            assert_eq!(rows[0].reviewer_id, "A1");
            assert_eq!(
                rows[1].extra.get("reviewer_name"),
                Some(&serde_json::Value::from("J. Doe"))
            );
        }

        #[rstest]
        fn rejects_batch_with_invalid_row() {
            let temp = TempDir::new().expect("tempdir");
            let path = write_dataset(
                &temp,
                r#"[{"reviewer_id":"A1","product_id":"B007WTAJTO","overall":4.0,
                     "helpful_yes":3,"total_vote":2,"day_diff":10}]"#,
            );

            let error = JsonReviewSource::open(&path).expect_err("inverted votes should fail");
            assert!(matches!(error, SourceError::InvalidRow { row: 0, .. }));
        }

        #[rstest]
        fn surfaces_decode_failure_with_path() {
            let temp = TempDir::new().expect("tempdir");
            let path = write_dataset(&temp, "not-json");

            let error = JsonReviewSource::open(&path).expect_err("invalid JSON should fail");
            assert!(matches!(error, SourceError::Decode { .. }));
        }

        #[rstest]
        fn missing_file_reports_read_error() {
            let temp = TempDir::new().expect("tempdir");
            let path =
                Utf8PathBuf::from_path_buf(temp.path().join("absent.json")).expect("utf8 path");

            let error = JsonReviewSource::open(&path).expect_err("missing file should fail");
            assert!(matches!(error, SourceError::ReadFile { .. }));
        }
    }
}
