//! Return Ratios
//!
//! Return on equity and return on assets. Only periods reported in both the
//! balance sheet and the income statement are kept; unmatched periods are dropped.

use crate::line_items::{NET_INCOME, STOCKHOLDERS_EQUITY, TOTAL_ASSETS};
use intrinsic_data::{Period, StatementTable};

/// Row label of return on equity.
pub const ROE: &str = "ROE (%)";
/// Row label of return on assets.
pub const ROA: &str = "ROA (%)";

fn ratio_percent(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d * 100.0),
        _ => None,
    }
}

/// Compute ROE and ROA for every period common to both statements.
pub fn efficiency_ratios(
    balance_sheet: &StatementTable,
    income_statement: &StatementTable,
) -> StatementTable {
    let mut out = StatementTable::new();

    let common: Vec<Period> = income_statement
        .periods()
        .into_iter()
        .filter(|p| balance_sheet.has_period(*p))
        .collect();

    for period in common {
        let net_income = NET_INCOME.resolve(income_statement, period);
        let equity = STOCKHOLDERS_EQUITY.resolve(balance_sheet, period);
        let assets = TOTAL_ASSETS.resolve(balance_sheet, period);

        out.insert(ROE, period, ratio_percent(net_income, equity));
        out.insert(ROA, period, ratio_percent(net_income, assets));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use intrinsic_data::StatementRow;

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_efficiency_intersection() {
        let p23 = date(2023, 12, 31);
        let p22 = date(2022, 12, 31);
        let p21 = date(2021, 12, 31);

        let balance = StatementTable::from_rows(vec![
            StatementRow::new("StockholdersEquity", p23, Some(100.0), 0),
            StatementRow::new("TotalAssets", p23, Some(400.0), 1),
            StatementRow::new("StockholdersEquity", p21, Some(90.0), 0),
        ]);
        let income = StatementTable::from_rows(vec![
            StatementRow::new("NetIncome", p23, Some(20.0), 0),
            StatementRow::new("NetIncome", p22, Some(18.0), 0),
        ]);

        let ratios = efficiency_ratios(&balance, &income);
        assert_eq!(ratios.periods(), vec![p23]);
        assert_relative_eq!(ratios.value(ROE, p23).unwrap(), 20.0, epsilon = 1e-10);
        assert_relative_eq!(ratios.value(ROA, p23).unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_efficiency_zero_denominator() {
        let p = date(2023, 12, 31);
        let balance = StatementTable::from_rows(vec![
            StatementRow::new("StockholdersEquity", p, Some(0.0), 0),
        ]);
        let income = StatementTable::from_rows(vec![StatementRow::new("NetIncome", p, Some(5.0), 0)]);

        let ratios = efficiency_ratios(&balance, &income);
        assert_eq!(ratios.value(ROE, p), None);
        assert_eq!(ratios.value(ROA, p), None);
        assert!(ratios.contains(ROA));
    }

    #[test]
    fn test_efficiency_disjoint_periods() {
        let balance = StatementTable::from_rows(vec![StatementRow::new(
            "TotalAssets",
            date(2023, 6, 30),
            Some(1.0),
            0,
        )]);
        let income = StatementTable::from_rows(vec![StatementRow::new(
            "NetIncome",
            date(2023, 12, 31),
            Some(1.0),
            0,
        )]);
        assert!(efficiency_ratios(&balance, &income).is_empty());
    }
}
