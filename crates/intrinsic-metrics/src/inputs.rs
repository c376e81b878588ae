//! Valuation Inputs
//!
//! Resolves the three scalars a DCF needs (price, shares outstanding and free
//! cash flow) from a company's normalized data.

use crate::line_items::{
    CAPITAL_EXPENDITURE, FREE_CASH_FLOW, LineItem, OPERATING_CASH_FLOW, SHARES_OUTSTANDING,
};
use intrinsic_data::{CompanyData, Period, StatementTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scalars consumed by the DCF model.
///
/// A value that cannot be resolved is `0.0`; the valuation engines treat zero
/// shares, price or free cash flow as degenerate input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Latest close price
    pub price: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
    /// Latest annual free cash flow
    pub free_cash_flow: f64,
}

/// Free cash flow for one period: the reported figure, otherwise operating
/// cash flow plus (negative) capital expenditure.
pub fn free_cash_flow(cash_flow: &StatementTable, period: Period) -> Option<f64> {
    FREE_CASH_FLOW.resolve(cash_flow, period).or_else(|| {
        let ocf = OPERATING_CASH_FLOW.resolve(cash_flow, period)?;
        let capex = CAPITAL_EXPENDITURE.resolve(cash_flow, period)?;
        Some(ocf + capex)
    })
}

fn latest(item: &LineItem, table: &StatementTable, symbol: &str) -> f64 {
    item.latest(table).map_or_else(
        || {
            debug!(symbol, item = item.name, "line item not found");
            0.0
        },
        |(_, v)| v,
    )
}

impl ValuationInputs {
    /// Resolve inputs from normalized data.
    pub fn resolve(data: &CompanyData) -> Self {
        let price = data.prices.latest().map_or(0.0, |b| b.close);
        let shares_outstanding = latest(&SHARES_OUTSTANDING, &data.balance_sheet, &data.symbol);
        let free_cash_flow = data
            .cash_flow
            .periods()
            .into_iter()
            .find_map(|p| free_cash_flow(&data.cash_flow, p))
            .unwrap_or_else(|| {
                debug!(symbol = %data.symbol, "free cash flow not found");
                0.0
            });

        Self {
            price,
            shares_outstanding,
            free_cash_flow,
        }
    }

    /// True when every input is usable for a valuation.
    pub fn is_complete(&self) -> bool {
        self.price > 0.0 && self.shares_outstanding != 0.0 && self.free_cash_flow != 0.0
    }
}
