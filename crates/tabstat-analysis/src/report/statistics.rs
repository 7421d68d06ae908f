//! Per-column statistics table.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tabstat_core::errors::WriteError;

use crate::dataset::writer::format_value;
use crate::stats::Statistics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsRow {
    pub column: String,
    pub statistics: Statistics,
}

/// Comma-separated table with header `,Min,Max,Mean,Std Dev` and one row
/// per column. NaN cells are written empty.
pub fn write_statistics_csv(path: &Path, rows: &[StatisticsRow]) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|e| WriteError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_statistics_to(file, rows).map_err(|e| WriteError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_statistics_to<W: io::Write>(writer: W, rows: &[StatisticsRow]) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["", "Min", "Max", "Mean", "Std Dev"])?;
    for row in rows {
        let s = &row.statistics;
        wtr.write_record([
            row.column.clone(),
            cell(s.min),
            cell(s.max),
            cell(s.mean),
            cell(s.std_dev),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn cell(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format_value(v)
    }
}
