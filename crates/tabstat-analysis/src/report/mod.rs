//! Report writers: per-column scatter data, outlier listings, the
//! statistics table and the combined JSON report.

pub mod listing;
pub mod scatter;
pub mod statistics;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tabstat_core::errors::WriteError;

pub use listing::{format_listing, write_listing};
pub use scatter::{ScatterPlot, ScatterPoint};
pub use statistics::{write_statistics_csv, StatisticsRow};

/// Replace path separators and control characters so a column name can
/// be used as a file name. An empty result becomes `column`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "column".to_string(),
        _ => cleaned,
    }
}

/// `{column}_outliers_{method}.{extension}` inside `folder`.
pub fn outlier_file_path(folder: &Path, column: &str, method: &str, extension: &str) -> PathBuf {
    folder.join(format!("{}_outliers_{method}.{extension}", sanitize_file_name(column)))
}

/// Create `folder` and its parents if needed.
pub fn ensure_dir(folder: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(folder).map_err(|e| WriteError::Io {
        path: folder.to_path_buf(),
        source: e,
    })
}

/// Serialize `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|e| WriteError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| WriteError::Serialization {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "json written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("petal width"), "petal width");
        assert_eq!(sanitize_file_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_file_name("x\ty"), "x_y");
        assert_eq!(sanitize_file_name(".."), "column");
        assert_eq!(sanitize_file_name(""), "column");
    }

    #[test]
    fn test_outlier_file_path() {
        let p = outlier_file_path(Path::new("out"), "Feature 1", "zscore", "txt");
        assert_eq!(p, Path::new("out").join("Feature 1_outliers_zscore.txt"));
    }

    #[test]
    fn test_write_json_and_nan_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.json");
        write_json(&path, &vec![1.0, f64::NAN]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::json!([1.0, null]));
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
