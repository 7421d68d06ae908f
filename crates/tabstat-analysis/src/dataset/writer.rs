//! Delimited-file writer.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use tabstat_core::errors::WriteError;

use super::types::Dataset;

/// Write `dataset` as a header row followed by one line per row.
///
/// Column order is preserved, missing cells are written empty and the row
/// index is not written.
pub fn save(dataset: &Dataset, path: &Path, delimiter: u8) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|e| WriteError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_to(dataset, file, delimiter).map_err(|e| WriteError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), rows = dataset.n_rows(), "dataset saved");
    Ok(())
}

/// Write to any writer.
pub fn write_to<W: io::Write>(dataset: &Dataset, writer: W, delimiter: u8) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(dataset.column_names())?;
    for row in 0..dataset.n_rows() {
        let cells = dataset
            .columns()
            .iter()
            .map(|c| c.values()[row].map(format_value).unwrap_or_default());
        wtr.write_record(cells)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn format_value(v: f64) -> String {
    v.to_string()
}
