//! Command runs through parsed arguments, as the binaries do them.

use std::fs;

use clap::Parser;
use tabstat_cli::clean::{self, CleanArgs};
use tabstat_cli::common::error_code;
use tabstat_cli::detect::{self, DetectArgs};
use tabstat_cli::draw::{self, DrawArgs};
use tempfile::TempDir;

fn write_csv(dir: &TempDir) -> String {
    let path = dir.path().join("data.csv");
    fs::write(&path, "1,10\n2,11\n3,12\n4,13\n5,14\n100,15\n").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn clean_headerless_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir);
    let args = CleanArgs::try_parse_from([
        "clean-outliers",
        input.as_str(),
        "iqr",
        "out.csv",
        "--delimiter",
        ",",
        "--no-header",
    ])
    .unwrap();

    let message = clean::run(args).unwrap();
    assert!(message.starts_with("Cleaned dataset saved to"));
    assert_eq!(
        fs::read_to_string(dir.path().join("out.csv")).unwrap(),
        "Feature 1,Feature 2\n1,10\n2,11\n3,12\n4,13\n5,14\n"
    );
}

#[test]
fn detect_writes_listing() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir);
    let out = dir.path().join("detect");
    let out_arg = out.to_string_lossy().into_owned();
    let args = DetectArgs::try_parse_from([
        "detect-outliers",
        input.as_str(),
        "IQR",
        out_arg.as_str(),
        "--delimiter",
        ",",
        "--no-header",
    ])
    .unwrap();

    detect::run(args).unwrap();
    assert_eq!(
        fs::read_to_string(out.join("Feature 1_outliers_iqr.txt")).unwrap(),
        "Position: 5, Value: 100\n"
    );
}

#[test]
fn draw_rejects_unknown_bin_rule() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir);
    let out_arg = dir.path().join("dist").to_string_lossy().into_owned();
    let args = DrawArgs::try_parse_from([
        "draw-dist",
        input.as_str(),
        out_arg.as_str(),
        "--delimiter",
        ",",
        "--no-header",
        "--bins",
        "scott",
    ])
    .unwrap();

    let err = draw::run(args).unwrap_err();
    assert_eq!(error_code(&err), "CONFIG_ERROR");
    assert!(format!("{err:#}").contains("scott"));
}

#[test]
fn missing_input_reports_file_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.tsv").to_string_lossy().into_owned();
    let out_arg = dir.path().join("dist").to_string_lossy().into_owned();
    let args = DrawArgs::try_parse_from(["draw-dist", missing.as_str(), out_arg.as_str()]).unwrap();

    let err = draw::run(args).unwrap_err();
    assert_eq!(error_code(&err), "FILE_NOT_FOUND");
}

/// With n = 7 the spike's z-score is ~2.27 under the sample deviation and
/// ~2.45 under the population deviation.
fn write_small_spike(dir: &TempDir) -> String {
    let path = dir.path().join("spike.tsv");
    fs::write(&path, "v\n1\n2\n3\n4\n5\n6\n1000\n").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn detect_defaults_to_population_deviation() {
    let dir = TempDir::new().unwrap();
    let input = write_small_spike(&dir);
    let out = dir.path().join("detect");
    let out_arg = out.to_string_lossy().into_owned();

    let args = DetectArgs::try_parse_from([
        "detect-outliers",
        input.as_str(),
        "z-score",
        out_arg.as_str(),
        "--z-threshold",
        "2.4",
    ])
    .unwrap();
    let message = detect::run(args).unwrap();
    assert!(message.contains("(1 outliers)"), "{message}");
    assert_eq!(
        fs::read_to_string(out.join("v_outliers_zscore.txt")).unwrap(),
        "Position: 6, Value: 1000\n"
    );

    let args = DetectArgs::try_parse_from([
        "detect-outliers",
        input.as_str(),
        "z-score",
        out_arg.as_str(),
        "--z-threshold",
        "2.4",
        "--sample-std",
    ])
    .unwrap();
    let message = detect::run(args).unwrap();
    assert!(message.contains("(0 outliers)"), "{message}");
}

#[test]
fn clean_defaults_to_sample_deviation() {
    let dir = TempDir::new().unwrap();
    let input = write_small_spike(&dir);
    let args = CleanArgs::try_parse_from([
        "clean-outliers",
        input.as_str(),
        "z-score",
        "kept.tsv",
        "--z-threshold",
        "2.4",
    ])
    .unwrap();

    let message = clean::run(args).unwrap();
    assert!(message.contains("(0 of 7 rows removed)"), "{message}");
}
