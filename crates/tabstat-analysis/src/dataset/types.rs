//! Column and dataset types.

use std::collections::HashSet;

use serde::Serialize;
use tabstat_core::errors::LoadError;

/// One named column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column with no missing cells.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-missing finite values in row order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v).filter(|v| v.is_finite())
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Replace the values, keeping the name.
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        Self::new(self.name.clone(), values)
    }
}

/// Ordered named columns over a shared row index.
///
/// The row index records each row's position in the originally loaded
/// file. Filtering drops entries from it but never renumbers, so row
/// positions reported after a filter still point into the source data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    row_index: Vec<usize>,
}

impl Dataset {
    /// Build a dataset with the contiguous row index `0..n`.
    pub fn new(columns: Vec<Column>) -> Result<Self, LoadError> {
        let n = columns.first().map_or(0, Column::len);
        Self::with_row_index(columns, (0..n).collect())
    }

    /// Build a dataset with an explicit row index.
    ///
    /// Every column must have exactly `row_index.len()` values and column
    /// names must be unique.
    pub fn with_row_index(columns: Vec<Column>, row_index: Vec<usize>) -> Result<Self, LoadError> {
        if let Some(dup) = first_duplicate(columns.iter().map(Column::name)) {
            return Err(LoadError::DuplicateColumn(dup.to_string()));
        }
        for column in &columns {
            if column.len() != row_index.len() {
                return Err(LoadError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: row_index.len(),
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns, row_index })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.row_index.len()
    }

    /// Original row positions, in row order.
    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    /// Keep the rows whose `keep` flag is set, preserving order and
    /// original row positions.
    ///
    /// `keep` must have one flag per row.
    pub fn retain_rows(&self, keep: &[bool]) -> Dataset {
        debug_assert_eq!(keep.len(), self.n_rows());
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = c
                    .values()
                    .iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| *v)
                    .collect();
                c.with_values(values)
            })
            .collect();
        let row_index = self
            .row_index
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(i, _)| *i)
            .collect();
        Dataset { columns, row_index }
    }

    /// Replace every column through `f`, which must keep column lengths.
    pub fn try_map_columns<E, F>(&self, mut f: F) -> Result<Dataset, E>
    where
        F: FnMut(&Column) -> Result<Column, E>,
    {
        let columns = self.columns.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
        debug_assert!(columns.iter().all(|c| c.len() == self.n_rows()));
        Ok(Dataset {
            columns,
            row_index: self.row_index.clone(),
        })
    }

    /// Fill each column's missing cells with that column's mean.
    /// Columns with no values at all stay missing.
    pub fn fill_missing_with_mean(&mut self) {
        for column in &mut self.columns {
            let (sum, count) = column
                .present()
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if count == 0 || count == column.len() {
                continue;
            }
            let mean = sum / count as f64;
            for v in &mut column.values {
                if v.is_none() {
                    *v = Some(mean);
                }
            }
        }
    }
}

/// First name that appears twice, if any.
fn first_duplicate<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.find(|n| !seen.insert(*n))
}
