//! Timestamped analysis reports.

use crate::export::{ExportError, ExportFormat, Exporter, export_json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required field was not set.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),
}

/// One analysis result wrapped with what it describes and when it was produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Symbol being analyzed.
    pub symbol: String,

    /// Analysis kind (`valuation`, `fundamentals`, `multiples`, `peers`).
    pub kind: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Report contents.
    pub contents: serde_json::Value,
}

impl Report {
    /// Create a new report stamped with the current time.
    pub fn new(
        symbol: impl Into<String>,
        kind: impl Into<String>,
        contents: serde_json::Value,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: kind.into(),
            timestamp: Utc::now(),
            contents,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Exporter for Report {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_json(self, format)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    symbol: Option<String>,
    kind: Option<String>,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the analysis kind.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the report contents from any serializable value.
    pub fn contents<T: Serialize + ?Sized>(mut self, contents: &T) -> Result<Self, ReportError> {
        self.contents = Some(serde_json::to_value(contents)?);
        Ok(self)
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        let symbol = self.symbol.ok_or(ReportError::MissingField("symbol"))?;
        Ok(Report::new(
            symbol,
            self.kind.unwrap_or_else(|| "analysis".to_string()),
            self.contents.unwrap_or(serde_json::Value::Null),
        ))
    }
}
