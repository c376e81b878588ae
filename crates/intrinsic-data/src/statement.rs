//! Raw financial-statement records as supplied by a statement source.

use crate::calendar::Period;
use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of financial statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Balance sheet (point-in-time positions)
    BalanceSheet,
    /// Income statement (flows over the period)
    IncomeStatement,
    /// Cash flow statement
    CashFlow,
}

impl StatementKind {
    /// Returns all statement kinds.
    pub const fn all() -> [Self; 3] {
        [Self::BalanceSheet, Self::IncomeStatement, Self::CashFlow]
    }

    /// Stable string key used by stores and the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balance_sheet" | "balance-sheet" | "balance" => Ok(Self::BalanceSheet),
            "income_statement" | "income-statement" | "income_stmt" | "income" => {
                Ok(Self::IncomeStatement)
            }
            "cash_flow" | "cash-flow" | "cashflow" => Ok(Self::CashFlow),
            _ => Err(DataError::UnknownStatementKind(s.to_string())),
        }
    }
}

/// One raw statement cell: a position's value for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Vendor position name (e.g. `TotalRevenue`)
    pub position: String,
    /// Reporting period end
    pub period: Period,
    /// Reported value, `None` when the vendor left it blank
    pub value: Option<f64>,
    /// Position's place in the vendor's statement layout
    pub row_order: u32,
}

impl StatementRow {
    /// Create a new statement row.
    pub fn new(
        position: impl Into<String>,
        period: Period,
        value: Option<f64>,
        row_order: u32,
    ) -> Self {
        Self {
            position: position.into(),
            period,
            value,
            row_order,
        }
    }
}
