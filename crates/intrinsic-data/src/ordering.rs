//! Canonical position orderings per statement kind.
//!
//! Orderings are versioned configuration: the built-in default follows the
//! vendor's (Yahoo Finance) position keys, and a replacement can be loaded from
//! JSON without touching code.

use crate::error::{DataError, Result};
use crate::statement::StatementKind;
use crate::table::StatementTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Current version of the built-in ordering.
pub const DEFAULT_ORDERING_VERSION: u32 = 1;

const BALANCE_SHEET: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashCashEquivalentsAndShortTermInvestments",
    "CashAndCashEquivalents",
    "OtherShortTermInvestments",
    "Receivables",
    "AccountsReceivable",
    "Inventory",
    "OtherCurrentAssets",
    "TotalNonCurrentAssets",
    "NetPPE",
    "GrossPPE",
    "AccumulatedDepreciation",
    "GoodwillAndOtherIntangibleAssets",
    "Goodwill",
    "OtherIntangibleAssets",
    "InvestmentsAndAdvances",
    "LongTermEquityInvestment",
    "NonCurrentDeferredTaxesAssets",
    "OtherNonCurrentAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "PayablesAndAccruedExpenses",
    "AccountsPayable",
    "CurrentDebtAndCapitalLeaseObligation",
    "CurrentDebt",
    "CurrentProvisions",
    "OtherCurrentLiabilities",
    "TotalNonCurrentLiabilitiesNetMinorityInterest",
    "LongTermDebtAndCapitalLeaseObligation",
    "LongTermDebt",
    "LongTermProvisions",
    "NonCurrentDeferredTaxesLiabilities",
    "EmployeeBenefits",
    "OtherNonCurrentLiabilities",
    "TotalEquityGrossMinorityInterest",
    "StockholdersEquity",
    "CommonStockEquity",
    "CapitalStock",
    "CommonStock",
    "AdditionalPaidInCapital",
    "RetainedEarnings",
    "TreasuryStock",
    "GainsLossesNotAffectingRetainedEarnings",
    "MinorityInterest",
    "TotalCapitalization",
    "InvestedCapital",
    "TangibleBookValue",
    "WorkingCapital",
    "NetDebt",
    "TotalDebt",
    "ShareIssued",
    "OrdinarySharesNumber",
    "TreasurySharesNumber",
];

const INCOME_STATEMENT: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "SellingGeneralAndAdministration",
    "ResearchAndDevelopment",
    "DepreciationAndAmortizationInIncomeStatement",
    "OtherOperatingExpenses",
    "OperatingIncome",
    "TotalOperatingIncomeAsReported",
    "NetNonOperatingInterestIncomeExpense",
    "InterestIncome",
    "InterestExpense",
    "OtherIncomeExpense",
    "SpecialIncomeCharges",
    "PretaxIncome",
    "TaxProvision",
    "TaxRateForCalcs",
    "NetIncomeContinuousOperations",
    "MinorityInterests",
    "NetIncome",
    "NetIncomeCommonStockholders",
    "NetIncomeIncludingNoncontrollingInterests",
    "BasicEPS",
    "DilutedEPS",
    "BasicAverageShares",
    "DilutedAverageShares",
    "EBIT",
    "EBITDA",
    "NormalizedEBITDA",
    "NormalizedIncome",
    "ReconciledDepreciation",
];

const CASH_FLOW: &[&str] = &[
    "OperatingCashFlow",
    "NetIncomeFromContinuingOperations",
    "DepreciationAndAmortization",
    "DeferredTax",
    "StockBasedCompensation",
    "ChangeInWorkingCapital",
    "ChangeInReceivables",
    "ChangeInInventory",
    "ChangeInPayablesAndAccruedExpense",
    "OtherNonCashItems",
    "InvestingCashFlow",
    "CapitalExpenditure",
    "PurchaseOfPPE",
    "SaleOfPPE",
    "PurchaseOfBusiness",
    "SaleOfBusiness",
    "PurchaseOfInvestment",
    "SaleOfInvestment",
    "NetOtherInvestingChanges",
    "FinancingCashFlow",
    "IssuanceOfDebt",
    "RepaymentOfDebt",
    "RepurchaseOfCapitalStock",
    "CommonStockDividendPaid",
    "CashDividendsPaid",
    "NetOtherFinancingCharges",
    "EffectOfExchangeRateChanges",
    "ChangesInCash",
    "BeginningCashPosition",
    "EndCashPosition",
    "FreeCashFlow",
];

/// Ordered canonical position names for each statement kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOrdering {
    /// Ordering version, bumped whenever a list changes
    pub version: u32,
    /// Balance sheet positions
    pub balance_sheet: Vec<String>,
    /// Income statement positions
    pub income_statement: Vec<String>,
    /// Cash flow positions
    pub cash_flow: Vec<String>,
}

impl Default for CanonicalOrdering {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| (*s).to_string()).collect();
        Self {
            version: DEFAULT_ORDERING_VERSION,
            balance_sheet: owned(BALANCE_SHEET),
            income_statement: owned(INCOME_STATEMENT),
            cash_flow: owned(CASH_FLOW),
        }
    }
}

impl CanonicalOrdering {
    /// Canonical positions for one statement kind.
    pub fn for_kind(&self, kind: StatementKind) -> &[String] {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    /// Parse an ordering from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let ordering: Self = serde_json::from_str(json)?;
        ordering.validate()?;
        Ok(ordering)
    }

    /// Load an ordering from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject orderings that list a position twice within one statement.
    pub fn validate(&self) -> Result<()> {
        for kind in StatementKind::all() {
            let mut seen = HashSet::new();
            if let Some(dup) = self.for_kind(kind).iter().find(|p| !seen.insert(p.as_str())) {
                return Err(DataError::InvalidOrdering(format!(
                    "position {dup} listed twice for {kind}"
                )));
            }
        }
        Ok(())
    }

    /// Filter and order a table by the canonical list of its statement kind.
    pub fn apply(&self, table: &StatementTable, kind: StatementKind) -> StatementTable {
        table.filter_and_order(self.for_kind(kind))
    }
}
