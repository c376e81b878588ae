//! Terminal and Markdown summaries.
//!
//! Plain-text views of valuation results, statement tables, metric series and
//! peer comparisons for the command line.

use crate::export::{ExportError, ExportFormat, Exporter, export_json, finish};
use intrinsic_data::{DatedSeries, Scenario, ScenarioSet, StatementTable};
use intrinsic_valuation::{ImpliedGrowth, ValuationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const RULE_WIDTH: usize = 72;

/// One scenario of a valuation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioLine {
    /// Scenario.
    pub scenario: Scenario,

    /// Assumed annual growth (fraction).
    pub growth: f64,

    /// Intrinsic value per share.
    pub value: f64,

    /// `(value - price) / value`, when the value is positive.
    pub margin_of_safety: Option<f64>,
}

impl fmt::Display for ScenarioLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} per share at {:.1}% growth",
            self.scenario,
            self.value,
            self.growth * 100.0
        )?;
        if let Some(mos) = self.margin_of_safety {
            write!(f, " (margin of safety {:.1}%)", mos * 100.0)?;
        }
        Ok(())
    }
}

/// Scenario values and implied growth of one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationSummary {
    /// Ticker symbol.
    pub symbol: String,

    /// Latest close.
    pub price: f64,

    /// Shares outstanding.
    pub shares_outstanding: f64,

    /// Free cash flow used as the projection seed.
    pub free_cash_flow: f64,

    /// Scenario lines, bear first.
    pub scenarios: Vec<ScenarioLine>,

    /// Reasoning attached to the scenario assumptions.
    pub reasoning: String,

    /// Growth rate implied by the price.
    pub implied_growth: f64,

    /// Whether the solver met its tolerance.
    pub converged: bool,
}

impl ValuationSummary {
    /// Assemble a summary from valuation results.
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        shares_outstanding: f64,
        free_cash_flow: f64,
        assumptions: &ScenarioSet,
        values: &ValuationResult,
        implied: &ImpliedGrowth,
    ) -> Self {
        let scenarios = values
            .iter()
            .map(|(scenario, value)| ScenarioLine {
                scenario,
                growth: assumptions.growth(scenario),
                value,
                margin_of_safety: values.margin_of_safety(scenario, price),
            })
            .collect();

        Self {
            symbol: symbol.into(),
            price,
            shares_outstanding,
            free_cash_flow,
            scenarios,
            reasoning: assumptions.reasoning.clone(),
            implied_growth: implied.rate,
            converged: implied.converged,
        }
    }

    fn to_flat_records(&self) -> Vec<SummaryFlat<'_>> {
        let record = |metric: String, value: f64| SummaryFlat {
            symbol: &self.symbol,
            metric,
            value,
        };

        let mut records = vec![
            record("price".to_string(), self.price),
            record("shares_outstanding".to_string(), self.shares_outstanding),
            record("free_cash_flow".to_string(), self.free_cash_flow),
        ];
        for line in &self.scenarios {
            records.push(record(format!("growth_{}", line.scenario), line.growth));
            records.push(record(format!("value_{}", line.scenario), line.value));
        }
        records.push(record("implied_growth".to_string(), self.implied_growth));
        records
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nValuation: {}\n", self.symbol));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!("  Price:                    {:.2}\n", self.price));
        output.push_str(&format!(
            "  Shares Outstanding:       {:.0}\n",
            self.shares_outstanding
        ));
        output.push_str(&format!(
            "  Free Cash Flow:           {:.0}\n",
            self.free_cash_flow
        ));

        output.push_str("\nScenarios:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>12} {:>16} {:>18}\n",
            "Scenario", "Growth", "Value/Share", "Margin of Safety"
        ));
        for line in &self.scenarios {
            let mos = line
                .margin_of_safety
                .map_or_else(|| "-".to_string(), |m| format!("{:.1}%", m * 100.0));
            output.push_str(&format!(
                "{:<12} {:>11.1}% {:>16.2} {:>18}\n",
                line.scenario.as_str(),
                line.growth * 100.0,
                line.value,
                mos
            ));
        }
        if !self.reasoning.is_empty() {
            output.push_str(&format!("\n  {}\n", self.reasoning));
        }

        output.push_str("\nImplied by Price:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "  Growth Rate:              {:.2}%{}\n",
            self.implied_growth * 100.0,
            if self.converged { "" } else { " (not converged)" }
        ));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        output
    }

    /// Format as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Valuation: {}\n\n", self.symbol));
        output.push_str(&format!("- **Price:** {:.2}\n", self.price));
        output.push_str(&format!(
            "- **Implied growth:** {:.2}%\n\n",
            self.implied_growth * 100.0
        ));
        output.push_str("| Scenario | Growth | Value/Share |\n");
        output.push_str("|----------|--------|-------------|\n");
        for line in &self.scenarios {
            output.push_str(&format!(
                "| {} | {:.1}% | {:.2} |\n",
                line.scenario,
                line.growth * 100.0,
                line.value
            ));
        }

        output
    }
}

impl fmt::Display for ValuationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Valuation of {} at {:.2}", self.symbol, self.price)?;
        for line in &self.scenarios {
            writeln!(f, "  {line}")?;
        }
        write!(f, "  implied growth: {:.2}%", self.implied_growth * 100.0)
    }
}

/// Flattened valuation summary for CSV export.
#[derive(Debug, Serialize)]
struct SummaryFlat<'a> {
    symbol: &'a str,
    metric: String,
    value: f64,
}

impl Exporter for ValuationSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self.to_flat_records() {
                    wtr.serialize(&record)?;
                }
                finish(wtr)
            }
            ExportFormat::Json | ExportFormat::PrettyJson => export_json(self, format),
        }
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Format a statement table with one column per period, newest first.
pub fn table_to_ascii(title: &str, table: &StatementTable) -> String {
    let periods = table.periods();
    let label_width = table
        .positions()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("Position".len());
    let width = label_width + 1 + periods.len() * 15;

    let mut output = String::new();
    output.push_str(&format!("\n{title}\n"));
    output.push_str(&"=".repeat(width));
    output.push('\n');

    output.push_str(&format!("{:<label_width$}", "Position"));
    for period in &periods {
        output.push_str(&format!(" {:>14}", period.to_string()));
    }
    output.push('\n');
    output.push_str(&"-".repeat(width));
    output.push('\n');

    for row in table.rows() {
        output.push_str(&format!("{:<label_width$}", row.name()));
        for period in &periods {
            output.push_str(&format!(" {:>14}", format_cell(row.value(*period))));
        }
        output.push('\n');
    }

    output
}

/// Format a metric series as date/value lines.
pub fn series_to_ascii(series: &DatedSeries) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", series.name));
    output.push_str(&"-".repeat(27));
    output.push('\n');
    for (date, value) in &series.points {
        output.push_str(&format!("{date} {:>16}\n", format_cell(*value)));
    }
    output
}

/// Format a peer comparison, marking the subject ticker.
pub fn comparison_to_ascii(metric: &str, ticker: &str, values: &BTreeMap<String, f64>) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{metric} vs peers\n"));
    output.push_str(&"-".repeat(32));
    output.push('\n');
    for (symbol, value) in values {
        let marker = if symbol == ticker { "*" } else { " " };
        output.push_str(&format!("{marker} {symbol:<14} {value:>14.2}\n"));
    }
    if !values.contains_key(ticker) {
        output.push_str(&format!("  ({ticker}: no value)\n"));
    }
    output
}
