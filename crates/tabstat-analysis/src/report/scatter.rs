//! Scatter-plot data: every value against its row, outliers highlighted.

use serde::Serialize;

use crate::dataset::Column;
use crate::outliers::{ColumnReport, DetectionMethod};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub row: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub column: String,
    pub method: DetectionMethod,
    /// Non-missing values, in row order.
    pub points: Vec<ScatterPoint>,
    pub outliers: Vec<ScatterPoint>,
}

impl ScatterPlot {
    /// `row_index` maps dataset positions to original row positions.
    pub fn from_report(column: &Column, row_index: &[usize], report: &ColumnReport, method: DetectionMethod) -> Self {
        let points = column
            .values()
            .iter()
            .zip(row_index)
            .filter_map(|(v, row)| v.map(|value| ScatterPoint { row: *row, value }))
            .collect();
        let outliers = report
            .outliers
            .iter()
            .map(|o| ScatterPoint {
                row: o.row,
                value: o.value,
            })
            .collect();
        Self {
            column: column.name().to_string(),
            method,
            points,
            outliers,
        }
    }
}
