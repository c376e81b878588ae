#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod growth;
pub mod inputs;
pub mod line_items;
pub mod metric;
pub mod multiples;
pub mod profitability;
pub mod registry;

pub use growth::{growth_entries, growth_label, growth_yoy};
pub use inputs::ValuationInputs;
pub use line_items::LineItem;
pub use metric::Metric;
pub use multiples::{
    PriceToBook, PriceToEarnings, TrailingMultipleConfig, price_to_book, price_to_earnings,
};
pub use profitability::{efficiency_ratios, margins};

// Re-export registry types for convenience
pub use registry::{
    MetricCategory, MetricInfo, available_metrics, get_metric_info, metrics_by_category,
    series_metric,
};
