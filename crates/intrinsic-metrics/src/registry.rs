//! Metric Registry
//!
//! Central list of every ratio the engine computes, with the statement
//! positions each one reads. Also resolves peer-comparable metrics by name.

use crate::metric::Metric;
use crate::multiples::{PriceToBook, PriceToEarnings, TrailingMultipleConfig};
use std::collections::HashMap;
use std::fmt;

/// Metric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricCategory {
    /// Margins on revenue
    Margin,
    /// Returns on equity and assets
    Return,
    /// Period-over-period growth
    Growth,
    /// Price multiples
    Multiple,
    /// Discounted cash flow outputs
    Valuation,
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Margin => "margin",
            Self::Return => "return",
            Self::Growth => "growth",
            Self::Multiple => "multiple",
            Self::Valuation => "valuation",
        };
        f.write_str(label)
    }
}

/// Metric metadata
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Metric name (unique identifier)
    pub name: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Brief description of what the metric measures
    pub description: &'static str,
    /// Statement positions (or price fields) the metric reads
    pub inputs: &'static [&'static str],
}

/// Get all available metric info
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        MetricInfo {
            name: "gross_margin",
            category: MetricCategory::Margin,
            description: "Gross profit as a percentage of revenue",
            inputs: &["GrossProfit", "TotalRevenue"],
        },
        MetricInfo {
            name: "operating_margin",
            category: MetricCategory::Margin,
            description: "Operating income as a percentage of revenue",
            inputs: &["OperatingIncome", "EBIT", "PretaxIncome", "TotalRevenue"],
        },
        MetricInfo {
            name: "net_margin",
            category: MetricCategory::Margin,
            description: "Net income as a percentage of revenue",
            inputs: &["NetIncome", "NetIncomeCommonStockholders", "TotalRevenue"],
        },
        MetricInfo {
            name: "roe",
            category: MetricCategory::Return,
            description: "Return on equity - net income over stockholders' equity",
            inputs: &["NetIncome", "StockholdersEquity"],
        },
        MetricInfo {
            name: "roa",
            category: MetricCategory::Return,
            description: "Return on assets - net income over total assets",
            inputs: &["NetIncome", "TotalAssets"],
        },
        MetricInfo {
            name: "growth_yoy",
            category: MetricCategory::Growth,
            description: "Year-over-year change of every statement position",
            inputs: &["*"],
        },
        MetricInfo {
            name: "pe",
            category: MetricCategory::Multiple,
            description: "Trailing price-to-earnings on diluted EPS",
            inputs: &["close", "DilutedEPS"],
        },
        MetricInfo {
            name: "pb",
            category: MetricCategory::Multiple,
            description: "Trailing price-to-book on stockholders' equity",
            inputs: &["close", "ShareIssued", "StockholdersEquity"],
        },
        MetricInfo {
            name: "intrinsic_value",
            category: MetricCategory::Valuation,
            description: "DCF intrinsic value per share under bear/base/bull growth",
            inputs: &["FreeCashFlow", "OrdinarySharesNumber", "close"],
        },
        MetricInfo {
            name: "implied_growth",
            category: MetricCategory::Valuation,
            description: "Growth rate implied by the current price (reverse DCF)",
            inputs: &["FreeCashFlow", "OrdinarySharesNumber", "close"],
        },
    ]
}

/// Get metrics by category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

/// Get metric info by name
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.name == name)
}

/// Count metrics by category
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for metric in available_metrics() {
        *counts.entry(metric.category).or_insert(0) += 1;
    }
    counts
}

/// Instantiate a per-company series metric usable for peer comparison.
///
/// Accepts `pe`/`p/e` and `pb`/`p/b`, case-insensitively.
pub fn series_metric(name: &str, config: TrailingMultipleConfig) -> Option<Box<dyn Metric>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "pe" | "p/e" => Some(Box::new(PriceToEarnings::with_config(config))),
        "pb" | "p/b" => Some(Box::new(PriceToBook::with_config(config))),
        _ => None,
    }
}
