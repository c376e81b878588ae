//! Trailing Multiples
//!
//! A trailing multiple divides the as-of close on a sample date by a fundamental
//! reported for the fiscal year `reporting_lag_years` before it. Sample dates are
//! the latest price date followed by the preceding calendar month-ends.
//!
//! The lag is an approximation of reporting delay: annual figures are assumed to
//! become available in the following calendar year, and interim reports are not
//! considered.

use chrono::Datelike;
use intrinsic_data::calendar::month_end_before;
use intrinsic_data::{DatedSeries, Period, PriceSeries, StatementTable};
use serde::{Deserialize, Serialize};

/// Configuration for trailing multiples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailingMultipleConfig {
    /// Number of sample dates, including the latest price date (default: 12)
    pub lookback_months: u32,
    /// Years between a sample date and the fiscal year it reads (default: 1)
    pub reporting_lag_years: i32,
}

impl Default for TrailingMultipleConfig {
    fn default() -> Self {
        Self {
            lookback_months: 12,
            reporting_lag_years: 1,
        }
    }
}

/// Sample dates, most recent first: `anchor`, then the month-ends of the
/// `lookback_months - 1` preceding months.
pub fn sample_dates(anchor: Period, lookback_months: u32) -> Vec<Period> {
    if lookback_months == 0 {
        return Vec::new();
    }
    std::iter::once(anchor)
        .chain((1..lookback_months).filter_map(|i| month_end_before(anchor, i)))
        .collect()
}

/// Latest period of `table` falling in calendar year `year`.
pub fn annual_period(table: &StatementTable, year: i32) -> Option<Period> {
    table.periods().into_iter().find(|p| p.year() == year)
}

/// Compute a trailing multiple series.
///
/// `fundamental` maps a lagged fiscal year to the per-share denominator. A sample
/// is null when the price or fundamental is missing or the fundamental is zero.
/// An empty price series yields an empty result.
pub fn trailing_multiple<F>(
    name: &str,
    prices: &PriceSeries,
    config: &TrailingMultipleConfig,
    fundamental: F,
) -> DatedSeries
where
    F: Fn(i32) -> Option<f64>,
{
    let Some(latest) = prices.latest() else {
        return DatedSeries::new(name, Vec::new());
    };

    let points = sample_dates(latest.date, config.lookback_months)
        .into_iter()
        .map(|date| {
            let year = date.year() - config.reporting_lag_years;
            let value = prices
                .as_of(date)
                .zip(fundamental(year).filter(|f| *f != 0.0))
                .map(|(price, f)| price / f);
            (date, value)
        })
        .collect();

    DatedSeries::new(name, points)
}

/// Trailing multiple of price over one statement position.
pub fn position_multiple(
    prices: &PriceSeries,
    statement: &StatementTable,
    position: &str,
    config: &TrailingMultipleConfig,
) -> DatedSeries {
    if statement.is_empty() {
        return DatedSeries::new(position, Vec::new());
    }
    trailing_multiple(position, prices, config, |year| {
        annual_period(statement, year).and_then(|p| statement.value(position, p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use intrinsic_data::{PriceBar, StatementRow};

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_dates_month_ends() {
        let dates = sample_dates(date(2024, 3, 15), 4);
        assert_eq!(
            dates,
            vec![
                date(2024, 3, 15),
                date(2024, 2, 29),
                date(2024, 1, 31),
                date(2023, 12, 31)
            ]
        );
        assert_eq!(sample_dates(date(2024, 3, 15), 12).len(), 12);
        assert!(sample_dates(date(2024, 3, 15), 0).is_empty());
    }

    #[test]
    fn test_position_multiple() {
        let prices = PriceSeries::new(vec![
            PriceBar::flat(date(2023, 12, 29), 90.0, 1),
            PriceBar::flat(date(2024, 2, 15), 100.0, 1),
        ]);
        let income = StatementTable::from_rows(vec![
            StatementRow::new("DilutedEPS", date(2023, 12, 31), Some(5.0), 0),
            StatementRow::new("DilutedEPS", date(2022, 12, 31), Some(4.5), 0),
        ]);
        let config = TrailingMultipleConfig {
            lookback_months: 3,
            reporting_lag_years: 1,
        };

        let series = position_multiple(&prices, &income, "DilutedEPS", &config);
        assert_eq!(
            series.points,
            vec![
                (date(2024, 2, 15), Some(20.0)),
                (date(2024, 1, 31), Some(18.0)),
                (date(2023, 12, 31), Some(20.0)),
            ]
        );
    }

    #[test]
    fn test_missing_fiscal_year_is_null() {
        let prices = PriceSeries::new(vec![PriceBar::flat(date(2024, 2, 15), 100.0, 1)]);
        let income = StatementTable::from_rows(vec![StatementRow::new(
            "DilutedEPS",
            date(2021, 12, 31),
            Some(5.0),
            0,
        )]);
        let series = position_multiple(&prices, &income, "DilutedEPS", &Default::default());
        assert_eq!(series.len(), 12);
        assert_eq!(series.latest_value(), None);
    }

    #[test]
    fn test_price_before_history_is_null() {
        let prices = PriceSeries::new(vec![PriceBar::flat(date(2024, 1, 10), 100.0, 1)]);
        let series = trailing_multiple("x", &prices, &Default::default(), |_| Some(2.0));
        assert_eq!(series.points[0], (date(2024, 1, 10), Some(50.0)));
        assert_eq!(series.get(date(2023, 12, 31)), None);
    }

    #[test]
    fn test_empty_prices() {
        let series = trailing_multiple("x", &PriceSeries::default(), &Default::default(), |_| {
            Some(1.0)
        });
        assert!(series.is_empty());
    }
}
