//! Price-to-Earnings Multiple
//!
//! Trailing P/E: close price divided by the diluted EPS of the lagged fiscal year.

use super::trailing::{TrailingMultipleConfig, annual_period, trailing_multiple};
use crate::line_items::DILUTED_EPS;
use crate::metric::Metric;
use intrinsic_data::{CompanyData, DatedSeries, PriceSeries, StatementTable};

/// Series name of the P/E multiple.
pub const PE_NAME: &str = "P/E";

/// Trailing P/E from prices and an income statement.
pub fn price_to_earnings(
    prices: &PriceSeries,
    income_statement: &StatementTable,
    config: &TrailingMultipleConfig,
) -> DatedSeries {
    if income_statement.is_empty() {
        return DatedSeries::new(PE_NAME, Vec::new());
    }
    trailing_multiple(PE_NAME, prices, config, |year| {
        annual_period(income_statement, year).and_then(|p| DILUTED_EPS.resolve(income_statement, p))
    })
}

/// P/E metric
#[derive(Debug, Clone, Default)]
pub struct PriceToEarnings {
    config: TrailingMultipleConfig,
}

impl PriceToEarnings {
    /// Create with a custom configuration.
    pub const fn with_config(config: TrailingMultipleConfig) -> Self {
        Self { config }
    }
}

impl Metric for PriceToEarnings {
    fn name(&self) -> &str {
        PE_NAME
    }

    fn compute(&self, data: &CompanyData) -> DatedSeries {
        price_to_earnings(&data.prices, &data.income_statement, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use intrinsic_data::{Period, PriceBar, StatementRow};

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pe_latest() {
        let mut data = CompanyData::empty("NESN.SW");
        data.prices = PriceSeries::new(vec![PriceBar::flat(date(2024, 5, 17), 90.0, 1)]);
        data.income_statement = StatementTable::from_rows(vec![
            StatementRow::new("DilutedEPS", date(2023, 12, 31), Some(4.5), 0),
            StatementRow::new("DilutedEPS", date(2022, 12, 31), Some(3.0), 0),
        ]);

        let pe = PriceToEarnings::default().compute(&data);
        assert_eq!(pe.name, "P/E");
        assert_eq!(pe.points[0], (date(2024, 5, 17), Some(20.0)));
    }

    #[test]
    fn test_pe_zero_eps_is_null() {
        let prices = PriceSeries::new(vec![PriceBar::flat(date(2024, 5, 17), 90.0, 1)]);
        let income = StatementTable::from_rows(vec![StatementRow::new(
            "DilutedEPS",
            date(2023, 12, 31),
            Some(0.0),
            0,
        )]);
        let pe = price_to_earnings(&prices, &income, &TrailingMultipleConfig::default());
        assert_eq!(pe.points[0].1, None);
    }

    #[test]
    fn test_pe_empty_statement() {
        let prices = PriceSeries::new(vec![PriceBar::flat(date(2024, 5, 17), 90.0, 1)]);
        let pe = price_to_earnings(&prices, &StatementTable::new(), &Default::default());
        assert!(pe.is_empty());
    }
}
