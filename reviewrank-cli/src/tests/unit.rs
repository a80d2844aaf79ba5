//! Unit coverage for configuration merging and validation.

use camino::Utf8PathBuf;
use rstest::rstest;

use crate::rank::{RankArgs, RankConfig};
use crate::rate::{RateArgs, RateConfig};
use crate::report::{DEFAULT_PRECISION, OutputFormat, report_options};
use crate::score::{ScoreArgs, ScoreConfig};
use crate::{CliError, require_existing};
use reviewrank_scorer::{DEFAULT_CONFIDENCE, DEFAULT_REVIEW_PAGE_SIZE, RankingKey, ScoreError};

fn dataset_path() -> Utf8PathBuf {
    Utf8PathBuf::from("reviews.json")
}

#[rstest]
fn rate_config_requires_a_dataset() {
    let error = RateConfig::try_from(RateArgs::default()).expect_err("dataset is required");

    assert!(matches!(
        error,
        CliError::MissingArgument {
            field: "dataset",
            env: "REVIEWRANK_CMDS_RATE_DATASET",
        }
    ));
}

#[rstest]
fn rate_config_fills_in_the_default_weights() {
    let args = RateArgs {
        dataset: Some(dataset_path()),
        ..RateArgs::default()
    };

    let config = RateConfig::try_from(args).expect("valid arguments");

    assert!((config.weights.recent - 30.0).abs() < f64::EPSILON);
    assert!((config.weights.older - 22.0).abs() < f64::EPSILON);
    assert_eq!(config.report.format, OutputFormat::Table);
    assert_eq!(config.report.precision, DEFAULT_PRECISION);
}

#[rstest]
fn rate_config_rejects_weights_not_summing_to_one_hundred() {
    let args = RateArgs {
        dataset: Some(dataset_path()),
        recent_weight: Some(90.0),
        ..RateArgs::default()
    };

    let error = RateConfig::try_from(args).expect_err("162 percent should be rejected");
    assert!(matches!(
        error,
        CliError::Score(ScoreError::InvalidWeights { .. })
    ));
}

#[rstest]
fn rank_config_defaults_to_the_wilson_page() {
    let args = RankArgs {
        dataset: Some(dataset_path()),
        ..RankArgs::default()
    };

    let config = RankConfig::try_from(args).expect("valid arguments");

    assert_eq!(config.key, RankingKey::WilsonLowerBound);
    assert_eq!(config.limit, DEFAULT_REVIEW_PAGE_SIZE);
    assert!((config.options.confidence - DEFAULT_CONFIDENCE).abs() < f64::EPSILON);
}

#[rstest]
fn rank_config_rejects_an_unknown_key() {
    let args = RankArgs {
        dataset: Some(dataset_path()),
        by: Some("bayesian".to_owned()),
        ..RankArgs::default()
    };

    let error = RankConfig::try_from(args).expect_err("unknown key should be rejected");
    assert!(matches!(
        error,
        CliError::Score(ScoreError::UnknownRankingKey { .. })
    ));
}

#[rstest]
fn score_config_keeps_the_optional_output_path() {
    let args = ScoreArgs {
        dataset: Some(dataset_path()),
        output: Some(Utf8PathBuf::from("scored.json")),
        ..ScoreArgs::default()
    };

    let config = ScoreConfig::try_from(args).expect("valid arguments");

    assert_eq!(config.output, Some(Utf8PathBuf::from("scored.json")));
}

#[rstest]
fn unknown_output_format_is_rejected() {
    let error = report_options(Some("yaml"), None).expect_err("yaml is not supported");

    assert!(matches!(error, CliError::UnknownFormat { value } if value == "yaml"));
}

#[rstest]
fn missing_dataset_file_is_reported_with_its_path() {
    let error =
        require_existing(&dataset_path(), "dataset").expect_err("file does not exist");

    assert!(matches!(
        error,
        CliError::MissingSourceFile { field: "dataset", .. }
    ));
}
