//! End-to-end analysis of one company.
//!
//! The [`Analyzer`] reads raw rows through a [`DataSource`], normalizes them
//! into a [`CompanyData`] and hands that to the pure engines. All I/O happens
//! before any computation; peer comparison loads every ticker first and only
//! then fans out over the rayon pool.

use crate::peers::{PeerSet, compare_companies};
use intrinsic_data::{
    CanonicalOrdering, CompanyData, DataError, DataSource, DatedSeries, ScenarioSet,
    StatementKind, StatementTable,
};
use intrinsic_metrics::{
    Metric, PriceToBook, PriceToEarnings, TrailingMultipleConfig, ValuationInputs,
    efficiency_ratios, growth_entries, growth_yoy, margins, series_metric,
};
use intrinsic_output::ValuationSummary;
use intrinsic_valuation::{
    DcfBreakdown, DcfConfig, DcfModel, ImpliedGrowth, MAX_PROJECTION_YEARS, ReverseDcf,
    SolverConfig, ValuationResult, value_scenarios,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Reading from the data source failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// The source holds neither statements nor prices for the symbol
    #[error("No data for {0}")]
    NoData(String),

    /// Metric name not in the registry of series metrics
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}

/// Result type for analysis runs.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Parameters of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Forward DCF parameters
    pub dcf: DcfConfig,
    /// Reverse-DCF bisection parameters
    pub solver: SolverConfig,
    /// Trailing multiple sampling
    pub multiples: TrailingMultipleConfig,
    /// Canonical line-item ordering for presented statements
    pub ordering: CanonicalOrdering,
    /// Growth assumptions used when a run does not supply its own
    pub scenarios: ScenarioSet,
}

impl AnalysisConfig {
    /// Reject parameters the engines cannot evaluate.
    pub fn validate(&self) -> intrinsic_data::Result<()> {
        self.ordering.validate()?;

        let DcfConfig {
            discount_rate,
            years,
            terminal_growth,
        } = self.dcf;
        if !discount_rate.is_finite() || discount_rate <= -1.0 {
            return Err(invalid(format!("discount rate {discount_rate}")));
        }
        if !terminal_growth.is_finite() {
            return Err(invalid(format!("terminal growth {terminal_growth}")));
        }
        if years > MAX_PROJECTION_YEARS {
            return Err(invalid(format!(
                "projection of {years} years exceeds {MAX_PROJECTION_YEARS}"
            )));
        }

        let SolverConfig {
            lower,
            upper,
            tolerance,
            ..
        } = self.solver;
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(invalid(format!("growth bracket [{lower}, {upper}]")));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(invalid(format!("solver tolerance {tolerance}")));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> DataError {
    DataError::InvalidConfig(msg)
}

/// Normalized statements and the ratios derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fundamentals {
    /// Ticker symbol
    pub symbol: String,
    /// Balance sheet in canonical order
    pub balance_sheet: StatementTable,
    /// Income statement in canonical order
    pub income_statement: StatementTable,
    /// Cash flow statement in canonical order
    pub cash_flow: StatementTable,
    /// Gross, operating and net margin per period
    pub margins: StatementTable,
    /// ROE and ROA per period
    pub efficiency: StatementTable,
    /// Year-over-year growth of the ordered income statement
    pub growth: StatementTable,
}

impl Fundamentals {
    /// Derive fundamentals from loaded data.
    pub fn from_company(data: &CompanyData, ordering: &CanonicalOrdering) -> Self {
        let income_statement =
            ordering.apply(&data.income_statement, StatementKind::IncomeStatement);
        let growth = growth_yoy(&income_statement);

        Self {
            symbol: data.symbol.clone(),
            balance_sheet: ordering.apply(&data.balance_sheet, StatementKind::BalanceSheet),
            cash_flow: ordering.apply(&data.cash_flow, StatementKind::CashFlow),
            margins: margins(&data.income_statement),
            efficiency: efficiency_ratios(&data.balance_sheet, &data.income_statement),
            growth,
            income_statement,
        }
    }

    /// Ordered statement of the given kind.
    pub const fn statement(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    /// Growth values labelled `"<position> (YoY <year>)"`.
    pub fn growth_entries(&self) -> Vec<(String, Option<f64>)> {
        growth_entries(&self.growth)
    }
}

/// Trailing valuation multiples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multiples {
    /// Ticker symbol
    pub symbol: String,
    /// Trailing P/E at month-end sample dates
    pub price_to_earnings: DatedSeries,
    /// Trailing P/B at month-end sample dates
    pub price_to_book: DatedSeries,
}

impl Multiples {
    /// Compute multiples from loaded data.
    pub fn from_company(data: &CompanyData, config: TrailingMultipleConfig) -> Self {
        Self {
            symbol: data.symbol.clone(),
            price_to_earnings: PriceToEarnings::with_config(config).compute(data),
            price_to_book: PriceToBook::with_config(config).compute(data),
        }
    }
}

/// Scenario valuation and the growth implied by the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// Ticker symbol
    pub symbol: String,
    /// Price, shares and free cash flow the valuation used
    pub inputs: ValuationInputs,
    /// Growth assumptions per scenario
    pub scenarios: ScenarioSet,
    /// Intrinsic value per share per scenario
    pub values: ValuationResult,
    /// Full breakdown of the base case
    pub base_case: DcfBreakdown,
    /// Reverse-DCF result at the current price
    pub implied_growth: ImpliedGrowth,
}

impl ValuationReport {
    /// Value a company under each scenario and solve for its implied growth.
    pub fn from_company(
        data: &CompanyData,
        scenarios: &ScenarioSet,
        dcf: DcfConfig,
        solver: SolverConfig,
    ) -> Self {
        let inputs = ValuationInputs::resolve(data);
        if !inputs.is_complete() {
            debug!(symbol = %data.symbol, ?inputs, "incomplete valuation inputs");
        }

        let model = DcfModel::new(dcf);
        let values = value_scenarios(
            &model,
            scenarios,
            inputs.free_cash_flow,
            inputs.shares_outstanding,
        );
        let base_case = model.breakdown(
            inputs.free_cash_flow,
            scenarios.base,
            inputs.shares_outstanding,
        );
        let implied_growth = ReverseDcf::new(model, solver).solve(
            inputs.price,
            inputs.free_cash_flow,
            inputs.shares_outstanding,
        );

        Self {
            symbol: data.symbol.clone(),
            inputs,
            scenarios: scenarios.clone(),
            values,
            base_case,
            implied_growth,
        }
    }

    /// Flattened view for display and export.
    pub fn summary(&self) -> ValuationSummary {
        ValuationSummary::new(
            &self.symbol,
            self.inputs.price,
            self.inputs.shares_outstanding,
            self.inputs.free_cash_flow,
            &self.scenarios,
            &self.values,
            &self.implied_growth,
        )
    }
}

/// Wires a data source to the engines.
#[derive(Debug)]
pub struct Analyzer<'a, S: ?Sized> {
    source: &'a S,
    config: AnalysisConfig,
}

impl<'a, S: DataSource + ?Sized> Analyzer<'a, S> {
    /// Analyzer with default parameters.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, AnalysisConfig::default())
    }

    /// Analyzer with explicit parameters.
    pub const fn with_config(source: &'a S, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    /// Parameters in use.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load and normalize one company.
    pub fn load(&self, symbol: &str) -> Result<CompanyData> {
        let data = CompanyData::load(self.source, symbol)?;
        if data.is_empty() {
            return Err(AnalysisError::NoData(symbol.to_string()));
        }
        Ok(data)
    }

    /// Ordered statements, margins, efficiency and growth.
    pub fn fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let data = self.load(symbol)?;
        Ok(Fundamentals::from_company(&data, &self.config.ordering))
    }

    /// Trailing P/E and P/B.
    pub fn multiples(&self, symbol: &str) -> Result<Multiples> {
        let data = self.load(symbol)?;
        Ok(Multiples::from_company(&data, self.config.multiples))
    }

    /// Valuation under the configured scenarios.
    pub fn valuation(&self, symbol: &str) -> Result<ValuationReport> {
        self.valuation_with(symbol, &self.config.scenarios)
    }

    /// Valuation under explicit scenarios.
    pub fn valuation_with(&self, symbol: &str, scenarios: &ScenarioSet) -> Result<ValuationReport> {
        let data = self.load(symbol)?;
        Ok(ValuationReport::from_company(
            &data,
            scenarios,
            self.config.dcf,
            self.config.solver,
        ))
    }

    /// Peers of `symbol` from the source, or from the reference table when the
    /// source has none.
    pub fn peers(&self, symbol: &str) -> Result<Vec<String>> {
        let stored = self.source.peers(symbol)?;
        if !stored.is_empty() {
            return Ok(stored);
        }
        Ok(PeerSet::swiss_blue_chips().peers_of(symbol).to_vec())
    }

    /// Latest value of a series metric (`pe` or `pb`) for `symbol` and its peers.
    ///
    /// A ticker whose data cannot be loaded is logged and left out.
    pub fn compare_peers(&self, symbol: &str, metric: &str) -> Result<BTreeMap<String, f64>> {
        let metric = series_metric(metric, self.config.multiples)
            .ok_or_else(|| AnalysisError::UnknownMetric(metric.to_string()))?;

        let companies: Vec<CompanyData> = std::iter::once(symbol.to_string())
            .chain(self.peers(symbol)?)
            .map(|ticker| self.load_or_empty(&ticker))
            .collect();

        Ok(compare_companies(&companies, metric.as_ref()))
    }

    fn load_or_empty(&self, symbol: &str) -> CompanyData {
        CompanyData::load(self.source, symbol).unwrap_or_else(|err| {
            warn!(symbol, %err, "failed to load data, treating as empty");
            CompanyData::empty(symbol)
        })
    }
}
