//! Everything known about one company for a single analysis run.

use crate::error::Result;
use crate::prices::PriceSeries;
use crate::source::{PriceSource, StatementSource};
use crate::statement::StatementKind;
use crate::table::StatementTable;

/// Normalized statements and price history of one symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyData {
    /// Ticker symbol
    pub symbol: String,
    /// Daily price history
    pub prices: PriceSeries,
    /// Balance sheet
    pub balance_sheet: StatementTable,
    /// Income statement
    pub income_statement: StatementTable,
    /// Cash flow statement
    pub cash_flow: StatementTable,
}

impl CompanyData {
    /// Company with no data.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Load every statement and the full price history from a source.
    pub fn load<S>(source: &S, symbol: &str) -> Result<Self>
    where
        S: StatementSource + PriceSource + ?Sized,
    {
        Ok(Self {
            symbol: symbol.to_string(),
            prices: source.price_series(symbol)?,
            balance_sheet: source.statement_table(symbol, StatementKind::BalanceSheet)?,
            income_statement: source.statement_table(symbol, StatementKind::IncomeStatement)?,
            cash_flow: source.statement_table(symbol, StatementKind::CashFlow)?,
        })
    }

    /// Statement of the given kind.
    pub const fn statement(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    /// True when neither statements nor prices carry data.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
            && StatementKind::all()
                .into_iter()
                .all(|kind| self.statement(kind).is_empty())
    }
}
