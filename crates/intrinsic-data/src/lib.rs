#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod company;
pub mod error;
pub mod ordering;
pub mod prices;
pub mod scenario;
pub mod series;
pub mod source;
pub mod statement;
pub mod store;
pub mod table;

pub use calendar::Period;
pub use company::CompanyData;
pub use error::{DataError, Result};
pub use ordering::CanonicalOrdering;
pub use prices::{PriceBar, PriceSeries};
pub use scenario::{Scenario, ScenarioSet};
pub use series::DatedSeries;
pub use source::{
    DataSource, PeerSink, PeerSource, PriceSink, PriceSource, StatementSink, StatementSource,
};
pub use statement::{StatementKind, StatementRow};
pub use store::{MemoryStore, SqliteStore, StoreStats};
pub use table::{PositionRow, StatementTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
