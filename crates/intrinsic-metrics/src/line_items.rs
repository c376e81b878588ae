//! Line Items
//!
//! Vendors report the same logical field under different position names. A
//! [`LineItem`] lists the candidate positions in priority order and resolves to
//! the first one carrying a non-null value.

use intrinsic_data::{Period, StatementTable};

/// A logical statement field with its candidate vendor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    /// Display name
    pub name: &'static str,
    /// Candidate positions, highest priority first
    pub candidates: &'static [&'static str],
}

impl LineItem {
    /// First non-null candidate value for `period`.
    pub fn resolve(&self, table: &StatementTable, period: Period) -> Option<f64> {
        table.first_available(self.candidates, period)
    }

    /// Most recent period for which the item resolves, with its value.
    pub fn latest(&self, table: &StatementTable) -> Option<(Period, f64)> {
        table
            .periods()
            .into_iter()
            .find_map(|p| self.resolve(table, p).map(|v| (p, v)))
    }

    /// Primary position name.
    pub fn primary(&self) -> &'static str {
        self.candidates.first().copied().unwrap_or(self.name)
    }
}

/// Total revenue.
pub const REVENUE: LineItem = LineItem {
    name: "Revenue",
    candidates: &["TotalRevenue", "OperatingRevenue", "TotalOperatingIncomeAsReported"],
};

/// Gross profit.
pub const GROSS_PROFIT: LineItem = LineItem {
    name: "Gross Profit",
    candidates: &["GrossProfit"],
};

/// Operating income.
pub const OPERATING_INCOME: LineItem = LineItem {
    name: "Operating Income",
    candidates: &["OperatingIncome", "EBIT", "PretaxIncome"],
};

/// Net income.
pub const NET_INCOME: LineItem = LineItem {
    name: "Net Income",
    candidates: &["NetIncome", "NetIncomeCommonStockholders"],
};

/// Diluted earnings per share.
pub const DILUTED_EPS: LineItem = LineItem {
    name: "Diluted EPS",
    candidates: &["DilutedEPS"],
};

/// Stockholders' equity.
pub const STOCKHOLDERS_EQUITY: LineItem = LineItem {
    name: "Stockholders Equity",
    candidates: &["StockholdersEquity"],
};

/// Total assets.
pub const TOTAL_ASSETS: LineItem = LineItem {
    name: "Total Assets",
    candidates: &["TotalAssets"],
};

/// Shares issued.
pub const SHARES_ISSUED: LineItem = LineItem {
    name: "Shares Issued",
    candidates: &["ShareIssued"],
};

/// Shares outstanding.
pub const SHARES_OUTSTANDING: LineItem = LineItem {
    name: "Shares Outstanding",
    candidates: &["OrdinarySharesNumber", "ShareIssued"],
};

/// Reported free cash flow.
pub const FREE_CASH_FLOW: LineItem = LineItem {
    name: "Free Cash Flow",
    candidates: &["FreeCashFlow", "Free Cash Flow"],
};

/// Operating cash flow.
pub const OPERATING_CASH_FLOW: LineItem = LineItem {
    name: "Operating Cash Flow",
    candidates: &["OperatingCashFlow", "Total Cash From Operating Activities"],
};

/// Capital expenditure, reported negative.
pub const CAPITAL_EXPENDITURE: LineItem = LineItem {
    name: "Capital Expenditure",
    candidates: &["CapitalExpenditure", "Capital Expenditures"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use intrinsic_data::StatementRow;

    #[test]
    fn test_operating_income_falls_back_to_ebit() {
        let p = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let table = StatementTable::from_rows(vec![StatementRow::new("EBIT", p, Some(50.0), 0)]);
        assert_eq!(OPERATING_INCOME.resolve(&table, p), Some(50.0));
        assert_eq!(GROSS_PROFIT.resolve(&table, p), None);
    }

    #[test]
    fn test_latest_skips_empty_periods() {
        let p23 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let p22 = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        let table = StatementTable::from_rows(vec![
            StatementRow::new("OrdinarySharesNumber", p23, None, 0),
            StatementRow::new("ShareIssued", p22, Some(1_000.0), 1),
        ]);
        assert_eq!(SHARES_OUTSTANDING.latest(&table), Some((p22, 1_000.0)));
        assert_eq!(SHARES_OUTSTANDING.primary(), "OrdinarySharesNumber");
    }
}
