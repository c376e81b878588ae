#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frame;
pub mod report;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter, TableView, export_json};
pub use frame::dataframe_to_csv;
pub use report::{Report, ReportBuilder, ReportError};
pub use summary::{
    ScenarioLine, ValuationSummary, comparison_to_ascii, series_to_ascii, table_to_ascii,
};
