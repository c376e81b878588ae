//! Price-to-Book Multiple
//!
//! Trailing P/B: market capitalisation (close × shares issued) divided by
//! stockholders' equity of the lagged fiscal year.

use super::trailing::{TrailingMultipleConfig, annual_period, trailing_multiple};
use crate::line_items::{SHARES_ISSUED, STOCKHOLDERS_EQUITY};
use crate::metric::Metric;
use intrinsic_data::{CompanyData, DatedSeries, PriceSeries, StatementTable};

/// Series name of the P/B multiple.
pub const PB_NAME: &str = "P/B";

/// Trailing P/B from prices and a balance sheet.
///
/// Null when shares issued or equity is missing or zero.
pub fn price_to_book(
    prices: &PriceSeries,
    balance_sheet: &StatementTable,
    config: &TrailingMultipleConfig,
) -> DatedSeries {
    if balance_sheet.is_empty() {
        return DatedSeries::new(PB_NAME, Vec::new());
    }
    trailing_multiple(PB_NAME, prices, config, |year| {
        let period = annual_period(balance_sheet, year)?;
        let shares = SHARES_ISSUED
            .resolve(balance_sheet, period)
            .filter(|s| *s != 0.0)?;
        let equity = STOCKHOLDERS_EQUITY.resolve(balance_sheet, period)?;
        // book value per share
        Some(equity / shares)
    })
}

/// P/B metric
#[derive(Debug, Clone, Default)]
pub struct PriceToBook {
    config: TrailingMultipleConfig,
}

impl PriceToBook {
    /// Create with a custom configuration.
    pub const fn with_config(config: TrailingMultipleConfig) -> Self {
        Self { config }
    }
}

impl Metric for PriceToBook {
    fn name(&self) -> &str {
        PB_NAME
    }

    fn compute(&self, data: &CompanyData) -> DatedSeries {
        price_to_book(&data.prices, &data.balance_sheet, &self.config)
    }
}
