//! Error types emitted by the reviewrank CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use reviewrank_core::SourceError;
use reviewrank_scorer::ScoreError;
use thiserror::Error;

/// Errors emitted by the reviewrank CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// Loading or validating the dataset failed.
    #[error(transparent)]
    Dataset(#[from] SourceError),
    /// The scoring configuration or computation was rejected.
    #[error(transparent)]
    Score(#[from] ScoreError),
    /// An output format string was not recognised.
    #[error("unknown output format `{value}` (expected `table` or `json`)")]
    UnknownFormat {
        /// The unrecognised input.
        value: String,
    },
    /// Encoding a report as JSON failed.
    #[error("failed to encode output as JSON")]
    Render {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the enriched dataset failed.
    #[error("failed to write output file at {path}")]
    WriteOutput {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}
