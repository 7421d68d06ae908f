//! Tests for the tabstat error types.

use std::path::PathBuf;

use tabstat_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::UnknownMethod("median".into());
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let load = LoadError::DuplicateColumn("a".into());
    assert_eq!(load.error_code(), "LOAD_ERROR");

    let missing = LoadError::FileNotFound {
        path: PathBuf::from("nope.tsv"),
    };
    assert_eq!(missing.error_code(), "FILE_NOT_FOUND");

    let write = WriteError::Csv {
        path: PathBuf::from("out.tsv"),
        message: "boom".into(),
    };
    assert_eq!(write.error_code(), "WRITE_ERROR");

    let compute = ComputeError::EmptyHistogram("a".into());
    assert_eq!(compute.error_code(), "COMPUTE_ERROR");
}

#[test]
fn test_pipeline_error_keeps_inner_code() {
    let err: PipelineError = LoadError::FileNotFound {
        path: PathBuf::from("data.tsv"),
    }
    .into();
    assert!(matches!(err, PipelineError::Load(LoadError::FileNotFound { .. })));
    assert_eq!(err.error_code(), "FILE_NOT_FOUND");

    let err: PipelineError = ConfigError::UnknownScaling("robust".into()).into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_tagged_message_format() {
    let err = ConfigError::UnknownMethod("median".into());
    let msg = err.tagged_message();
    assert!(msg.starts_with("[CONFIG_ERROR] "));
    assert!(msg.contains("median"));
}

#[test]
fn test_load_error_messages_name_location() {
    let err = LoadError::InvalidNumber {
        line: 4,
        column: "price".into(),
        value: "abc".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("Line 4"));
    assert!(msg.contains("price"));
    assert!(msg.contains("abc"));
}
