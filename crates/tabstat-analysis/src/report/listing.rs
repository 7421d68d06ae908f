//! Plain-text outlier listing, one line per flagged value.

use std::fs;
use std::path::Path;

use tabstat_core::errors::WriteError;

use crate::dataset::writer::format_value;
use crate::outliers::ColumnReport;

pub fn format_listing(report: &ColumnReport) -> String {
    report
        .outliers
        .iter()
        .map(|o| format!("Position: {}, Value: {}\n", o.row, format_value(o.value)))
        .collect()
}

pub fn write_listing(path: &Path, report: &ColumnReport) -> Result<(), WriteError> {
    fs::write(path, format_listing(report)).map_err(|e| WriteError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
