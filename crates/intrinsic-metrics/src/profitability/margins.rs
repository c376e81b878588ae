//! Profit Margins
//!
//! Gross, operating and net margin as a percentage of revenue, one column per
//! reporting period. Each input resolves through its [`LineItem`] fallback chain.
//!
//! [`LineItem`]: crate::line_items::LineItem

use crate::line_items::{GROSS_PROFIT, NET_INCOME, OPERATING_INCOME, REVENUE};
use intrinsic_data::StatementTable;

/// Row label of the gross margin.
pub const GROSS_MARGIN: &str = "Gross Margin (%)";
/// Row label of the operating margin.
pub const OPERATING_MARGIN: &str = "Operating Margin (%)";
/// Row label of the net margin.
pub const NET_MARGIN: &str = "Net Margin (%)";

fn percent_of(numerator: Option<f64>, revenue: f64) -> Option<f64> {
    numerator.map(|n| n / revenue * 100.0)
}

/// Compute margins from an income statement.
///
/// Periods whose revenue is missing or zero are omitted entirely. A margin is
/// null when its numerator does not resolve.
pub fn margins(income_statement: &StatementTable) -> StatementTable {
    let mut out = StatementTable::new();

    for period in income_statement.periods() {
        let Some(revenue) = REVENUE
            .resolve(income_statement, period)
            .filter(|r| *r != 0.0)
        else {
            continue;
        };

        let gross = GROSS_PROFIT.resolve(income_statement, period);
        let operating = OPERATING_INCOME.resolve(income_statement, period);
        let net = NET_INCOME.resolve(income_statement, period);

        out.insert(GROSS_MARGIN, period, percent_of(gross, revenue));
        out.insert(OPERATING_MARGIN, period, percent_of(operating, revenue));
        out.insert(NET_MARGIN, period, percent_of(net, revenue));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use intrinsic_data::{Period, StatementRow};

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_margins_basic() {
        let p = date(2023, 12, 31);
        let income = StatementTable::from_rows(vec![
            StatementRow::new("TotalRevenue", p, Some(200.0), 0),
            StatementRow::new("GrossProfit", p, Some(80.0), 1),
            StatementRow::new("OperatingIncome", p, Some(30.0), 2),
            StatementRow::new("NetIncome", p, Some(20.0), 3),
        ]);

        let m = margins(&income);
        let rows: Vec<&str> = m.positions().collect();
        assert_eq!(rows, vec![GROSS_MARGIN, OPERATING_MARGIN, NET_MARGIN]);
        assert_relative_eq!(m.value(GROSS_MARGIN, p).unwrap(), 40.0, epsilon = 1e-10);
        assert_relative_eq!(m.value(OPERATING_MARGIN, p).unwrap(), 15.0, epsilon = 1e-10);
        assert_relative_eq!(m.value(NET_MARGIN, p).unwrap(), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_margins_use_fallbacks() {
        let p = date(2023, 12, 31);
        let income = StatementTable::from_rows(vec![
            StatementRow::new("OperatingRevenue", p, Some(100.0), 0),
            StatementRow::new("EBIT", p, Some(25.0), 1),
            StatementRow::new("NetIncomeCommonStockholders", p, Some(5.0), 2),
        ]);

        let m = margins(&income);
        assert_eq!(m.value(GROSS_MARGIN, p), None);
        assert_relative_eq!(m.value(OPERATING_MARGIN, p).unwrap(), 25.0, epsilon = 1e-10);
        assert_relative_eq!(m.value(NET_MARGIN, p).unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_margins_skip_zero_or_missing_revenue() {
        let p23 = date(2023, 12, 31);
        let p22 = date(2022, 12, 31);
        let p21 = date(2021, 12, 31);
        let income = StatementTable::from_rows(vec![
            StatementRow::new("TotalRevenue", p23, Some(0.0), 0),
            StatementRow::new("TotalRevenue", p22, Some(50.0), 0),
            StatementRow::new("NetIncome", p21, Some(1.0), 1),
        ]);

        let m = margins(&income);
        assert_eq!(m.periods(), vec![p22]);
    }

    #[test]
    fn test_margins_empty() {
        assert!(margins(&StatementTable::new()).is_empty());
    }
}
