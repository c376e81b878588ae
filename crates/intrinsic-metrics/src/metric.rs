//! Metric trait shared by every per-company time-series metric.

use intrinsic_data::{CompanyData, DatedSeries};
use std::fmt::Debug;

/// A metric computed from one company's normalized data.
///
/// Implementations are pure, so one instance can be shared across threads while
/// comparing a company with its peers.
pub trait Metric: Debug + Send + Sync {
    /// Short display name (e.g. `P/E`).
    fn name(&self) -> &str;

    /// Compute the metric series, most recent first.
    fn compute(&self, data: &CompanyData) -> DatedSeries;
}
