#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod peers;

// Re-export main types from sub-crates
pub use intrinsic_data as data;
pub use intrinsic_metrics as metrics;
pub use intrinsic_output as output;
pub use intrinsic_valuation as valuation;

pub use analysis::{
    AnalysisConfig, AnalysisError, Analyzer, Fundamentals, Multiples, ValuationReport,
};
pub use peers::{PeerSet, compare, compare_companies};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
