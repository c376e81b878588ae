//! CSV and JSON export of normalized tables, series and peer comparisons.
//!
//! Tables and series go through their polars `DataFrame` form for CSV so the
//! column layout matches what the data layer hands to any other consumer.

use crate::frame::dataframe_to_csv;
use intrinsic_data::{DataError, DatedSeries, Period, StatementTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame conversion error.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Data layer error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Writer produced invalid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty" | "pretty-json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Serialize any value as JSON. CSV is rejected.
pub fn export_json<T: Serialize + ?Sized>(
    value: &T,
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string(value)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(value)?),
        ExportFormat::Csv => Err(ExportError::InvalidFormat(
            "structured reports export as JSON only".to_string(),
        )),
    }
}

pub(crate) fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Serializable view of a statement table: periods newest first and one value
/// per period for each position.
#[derive(Debug, Serialize)]
pub struct TableView<'a> {
    periods: Vec<Period>,
    rows: Vec<RowView<'a>>,
}

#[derive(Debug, Serialize)]
struct RowView<'a> {
    position: &'a str,
    row_order: u32,
    values: Vec<Option<f64>>,
}

impl<'a> TableView<'a> {
    /// Borrow a table for serialization.
    pub fn new(table: &'a StatementTable) -> Self {
        let periods = table.periods();
        let rows = table
            .rows()
            .map(|row| RowView {
                position: row.name(),
                row_order: row.row_order(),
                values: periods.iter().map(|p| row.value(*p)).collect(),
            })
            .collect();
        Self { periods, rows }
    }
}

impl Exporter for StatementTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => dataframe_to_csv(&self.to_dataframe()?),
            ExportFormat::Json | ExportFormat::PrettyJson => {
                export_json(&TableView::new(self), format)
            }
        }
    }
}

impl Exporter for DatedSeries {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => dataframe_to_csv(&self.to_dataframe()?),
            ExportFormat::Json | ExportFormat::PrettyJson => export_json(self, format),
        }
    }
}

/// Flattened peer comparison entry for CSV export.
#[derive(Debug, Serialize)]
struct PeerValueFlat<'a> {
    symbol: &'a str,
    value: f64,
}

impl Exporter for BTreeMap<String, f64> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for (symbol, value) in self {
                    wtr.serialize(PeerValueFlat {
                        symbol,
                        value: *value,
                    })?;
                }
                finish(wtr)
            }
            ExportFormat::Json | ExportFormat::PrettyJson => export_json(self, format),
        }
    }
}
