//! Delimited-file loader.
//!
//! Reads a header row (or synthesizes `Feature 1..n` names), then parses
//! every cell as `f64`. Empty cells, the markers in `MISSING_MARKERS`
//! (any case) and NaN spellings load as missing. Infinities and any other
//! non-numeric cell are fatal.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tabstat_core::constants::{DEFAULT_DELIMITER, MISSING_MARKERS};
use tabstat_core::errors::LoadError;

use super::types::{Column, Dataset};

/// How to read the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            has_header: true,
        }
    }
}

/// Load a delimited file into a dataset.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let dataset = read(file, options).map_err(|e| match e {
        ReadError::Load(e) => e,
        ReadError::Csv(message) => LoadError::Malformed {
            path: path.to_path_buf(),
            message,
        },
        ReadError::Empty => LoadError::Empty {
            path: path.to_path_buf(),
        },
    })?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Load from any reader. Used by `load` and by tests.
pub fn load_from_reader<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Dataset, LoadError> {
    read(reader, options).map_err(|e| match e {
        ReadError::Load(e) => e,
        ReadError::Csv(message) => LoadError::Malformed {
            path: "<reader>".into(),
            message,
        },
        ReadError::Empty => LoadError::Empty {
            path: "<reader>".into(),
        },
    })
}

enum ReadError {
    Load(LoadError),
    Csv(String),
    Empty,
}

impl From<LoadError> for ReadError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

fn read<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Dataset, ReadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();
    let first = match records.next() {
        Some(record) => record?,
        None => return Err(ReadError::Empty),
    };

    let (names, mut columns): (Vec<String>, Vec<Vec<Option<f64>>>) = if options.has_header {
        let names: Vec<String> = first.iter().map(str::to_string).collect();
        let columns = vec![Vec::new(); names.len()];
        (names, columns)
    } else {
        let names: Vec<String> = (1..=first.len()).map(|i| format!("Feature {i}")).collect();
        let mut columns = vec![Vec::new(); names.len()];
        push_record(&first, &names, &mut columns)?;
        (names, columns)
    };

    for record in records {
        push_record(&record?, &names, &mut columns)?;
    }

    let columns = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Ok(Dataset::new(columns)?)
}

fn push_record(
    record: &StringRecord,
    names: &[String],
    columns: &mut [Vec<Option<f64>>],
) -> Result<(), LoadError> {
    let line = record.position().map_or(0, |p| p.line());
    if record.len() != names.len() {
        return Err(LoadError::RaggedRow {
            line,
            expected: names.len(),
            found: record.len(),
        });
    }
    for ((cell, name), column) in record.iter().zip(names).zip(columns.iter_mut()) {
        column.push(parse_cell(cell).ok_or_else(|| LoadError::InvalidNumber {
            line,
            column: name.clone(),
            value: cell.to_string(),
        })?);
    }
    Ok(())
}

/// `Some(None)` for a missing cell, `Some(Some(x))` for a finite number,
/// `None` when the cell is not a usable number.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() || MISSING_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(cell)) {
        return Some(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_nan() => Some(None),
        Ok(v) if v.is_finite() => Some(Some(v)),
        _ => None,
    }
}
