#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dcf;
pub mod reverse;
pub mod scenarios;

// Re-export main types
pub use dcf::{
    DcfBreakdown, DcfConfig, DcfModel, MAX_PROJECTION_YEARS, MIN_TERMINAL_SPREAD,
    intrinsic_value_per_share, project,
};
pub use reverse::{ImpliedGrowth, ReverseDcf, SolverConfig};
pub use scenarios::{ValuationResult, value_scenarios};
