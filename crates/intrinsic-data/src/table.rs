//! Ordered statement tables.
//!
//! A [`StatementTable`] pivots raw `(position, period, value, row_order)` records
//! into rows keyed by position and columns keyed by period. Row order follows the
//! source layout (`row_order`), never alphabetical or date order, so a table can
//! be rendered the way the vendor printed it.

use crate::calendar::Period;
use crate::error::Result;
use crate::statement::StatementRow;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// One position (row) of a statement table.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    name: String,
    row_order: u32,
    values: BTreeMap<Period, Option<f64>>,
}

impl PositionRow {
    /// Position name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display rank of this position.
    pub const fn row_order(&self) -> u32 {
        self.row_order
    }

    /// Value for a period, `None` when absent or null.
    pub fn value(&self, period: Period) -> Option<f64> {
        self.values.get(&period).copied().flatten()
    }

    /// Cells ordered most recent period first.
    pub fn cells(&self) -> impl Iterator<Item = (Period, Option<f64>)> + '_ {
        self.values.iter().rev().map(|(p, v)| (*p, *v))
    }

    /// True when no period carries a value.
    pub fn is_all_null(&self) -> bool {
        self.values.values().all(Option::is_none)
    }
}

/// Positions × periods table of optional values.
///
/// Invariant: each `(position, period)` pair appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementTable {
    rows: Vec<PositionRow>,
    index: HashMap<String, usize>,
    periods: BTreeSet<Period>,
}

impl StatementTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pivot raw statement rows into a table.
    ///
    /// A position keeps the smallest `row_order` seen across its periods; positions
    /// sharing a rank stay in first-seen order. A repeated `(position, period)` cell
    /// replaces the earlier one. All-null positions are kept.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = StatementRow>,
    {
        let mut table = Self::new();
        for row in rows {
            table.upsert(row.position, row.period, row.value, row.row_order);
        }
        table.sort_rows();
        table
    }

    /// Insert a cell, appending the position after existing rows when it is new.
    pub fn insert(&mut self, position: impl Into<String>, period: Period, value: Option<f64>) {
        let position = position.into();
        let row_order = match self.index.get(&position) {
            Some(&i) => self.rows[i].row_order,
            None => self.next_row_order(),
        };
        self.upsert(position, period, value, row_order);
    }

    fn next_row_order(&self) -> u32 {
        self.rows
            .iter()
            .map(|r| r.row_order)
            .max()
            .map_or(0, |m| m.saturating_add(1))
    }

    fn upsert(&mut self, position: String, period: Period, value: Option<f64>, row_order: u32) {
        self.periods.insert(period);
        if let Some(&i) = self.index.get(&position) {
            let row = &mut self.rows[i];
            row.row_order = row.row_order.min(row_order);
            if row.values.insert(period, value).is_some() {
                debug!(position = %row.name, %period, "duplicate statement cell replaced");
            }
            return;
        }

        self.index.insert(position.clone(), self.rows.len());
        self.rows.push(PositionRow {
            name: position,
            row_order,
            values: BTreeMap::from([(period, value)]),
        });
    }

    fn sort_rows(&mut self) {
        // stable: equal ranks keep first-seen order
        self.rows.sort_by_key(|r| r.row_order);
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
    }

    /// True when the table has no positions.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Periods, most recent first.
    pub fn periods(&self) -> Vec<Period> {
        self.periods.iter().rev().copied().collect()
    }

    /// True when some position has a cell for `period`.
    pub fn has_period(&self, period: Period) -> bool {
        self.periods.contains(&period)
    }

    /// Position names in row order.
    pub fn positions(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.name.as_str())
    }

    /// Rows in row order.
    pub fn rows(&self) -> impl Iterator<Item = &PositionRow> + '_ {
        self.rows.iter()
    }

    /// Row for a position.
    pub fn row(&self, position: &str) -> Option<&PositionRow> {
        self.index.get(position).map(|&i| &self.rows[i])
    }

    /// True when the table has the position.
    pub fn contains(&self, position: &str) -> bool {
        self.index.contains_key(position)
    }

    /// Row order of a position.
    pub fn row_order(&self, position: &str) -> Option<u32> {
        self.row(position).map(PositionRow::row_order)
    }

    /// Non-null value at `(position, period)`.
    pub fn value(&self, position: &str, period: Period) -> Option<f64> {
        self.row(position).and_then(|r| r.value(period))
    }

    /// Value at `(position, period)`, falling back to each of `fallbacks` in order.
    ///
    /// `None` means no candidate resolved; it is never conflated with `Some(0.0)`.
    pub fn lookup(&self, position: &str, period: Period, fallbacks: &[&str]) -> Option<f64> {
        std::iter::once(position)
            .chain(fallbacks.iter().copied())
            .find_map(|p| self.value(p, period))
    }

    /// First candidate position with a non-null value for `period`.
    pub fn first_available(&self, candidates: &[&str], period: Period) -> Option<f64> {
        candidates.iter().find_map(|p| self.value(p, period))
    }

    /// Keep the positions listed in `canonical`, in that order.
    ///
    /// Positions missing from `canonical` are dropped, as are positions whose values
    /// are all null. The canonical index becomes the new row order.
    pub fn filter_and_order<S: AsRef<str>>(&self, canonical: &[S]) -> Self {
        let mut out = Self::new();
        for (rank, name) in canonical.iter().enumerate() {
            let name = name.as_ref();
            if out.contains(name) {
                continue;
            }
            let Some(row) = self.row(name) else {
                continue;
            };
            if row.is_all_null() {
                continue;
            }
            out.periods.extend(row.values.keys().copied());
            out.index.insert(row.name.clone(), out.rows.len());
            out.rows.push(PositionRow {
                name: row.name.clone(),
                row_order: rank as u32,
                values: row.values.clone(),
            });
        }
        out
    }

    /// Convert to a polars `DataFrame`: a `position` column followed by one
    /// column per period, most recent first.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.positions().collect();
        let mut columns: Vec<Column> = vec![Series::new("position".into(), names).into()];

        for period in self.periods() {
            let values: Vec<Option<f64>> = self.rows.iter().map(|r| r.value(period)).collect();
            columns.push(Series::new(period.to_string().into(), values).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

impl FromIterator<StatementRow> for StatementTable {
    fn from_iter<T: IntoIterator<Item = StatementRow>>(iter: T) -> Self {
        Self::from_rows(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(position: &str, period: Period, value: Option<f64>, order: u32) -> StatementRow {
        StatementRow::new(position, period, value, order)
    }

    #[test]
    fn test_empty_table() {
        let table = StatementTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert!(table.periods().is_empty());
        assert_eq!(table.value("Revenue", date(2023, 12, 31)), None);
    }

    #[test]
    fn test_periods_most_recent_first() {
        let table = StatementTable::from_rows(vec![
            row("Revenue", date(2021, 12, 31), Some(300.0), 0),
            row("Revenue", date(2023, 12, 31), Some(500.0), 0),
            row("Revenue", date(2022, 12, 31), Some(400.0), 0),
        ]);
        assert_eq!(
            table.periods(),
            vec![date(2023, 12, 31), date(2022, 12, 31), date(2021, 12, 31)]
        );
    }

    #[test]
    fn test_row_order_uses_minimum_and_is_stable() {
        let p1 = date(2023, 12, 31);
        let p2 = date(2022, 12, 31);
        let table = StatementTable::from_rows(vec![
            row("NetIncome", p1, Some(10.0), 5),
            row("TotalRevenue", p1, Some(100.0), 3),
            row("GrossProfit", p1, Some(40.0), 3),
            row("NetIncome", p2, Some(8.0), 1),
        ]);

        assert_eq!(table.row_order("NetIncome"), Some(1));
        let order: Vec<&str> = table.positions().collect();
        assert_eq!(order, vec!["NetIncome", "TotalRevenue", "GrossProfit"]);
    }

    #[test]
    fn test_all_null_positions_retained() {
        let table = StatementTable::from_rows(vec![
            row("Goodwill", date(2023, 12, 31), None, 0),
            row("TotalAssets", date(2023, 12, 31), Some(1.0), 1),
        ]);
        assert!(table.contains("Goodwill"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_cell_replaced() {
        let p = date(2023, 12, 31);
        let table = StatementTable::from_rows(vec![
            row("Revenue", p, Some(1.0), 0),
            row("Revenue", p, Some(2.0), 0),
        ]);
        assert_eq!(table.value("Revenue", p), Some(2.0));
        assert_eq!(table.row("Revenue").unwrap().cells().count(), 1);
    }

    #[test]
    fn test_lookup_with_fallback() {
        let p = date(2023, 12, 31);
        let table = StatementTable::from_rows(vec![row("EBIT", p, Some(50.0), 0)]);

        assert_eq!(table.lookup("OperatingIncome", p, &["EBIT"]), Some(50.0));
        assert_eq!(table.lookup("OperatingIncome", p, &[]), None);
    }

    #[test]
    fn test_lookup_skips_null_and_keeps_zero() {
        let p = date(2023, 12, 31);
        let table = StatementTable::from_rows(vec![
            row("OperatingIncome", p, None, 0),
            row("EBIT", p, Some(0.0), 1),
            row("PretaxIncome", p, Some(7.0), 2),
        ]);

        assert_eq!(
            table.lookup("OperatingIncome", p, &["EBIT", "PretaxIncome"]),
            Some(0.0)
        );
        assert_eq!(table.first_available(&["Missing", "PretaxIncome"], p), Some(7.0));
    }

    #[test]
    fn test_filter_and_order() {
        let p = date(2023, 12, 31);
        let table = StatementTable::from_rows(vec![
            row("Foo", p, Some(1.0), 0),
            row("NetIncome", p, Some(10.0), 1),
            row("TotalRevenue", p, Some(100.0), 2),
            row("GrossProfit", p, None, 3),
        ]);

        let filtered =
            table.filter_and_order(&["TotalRevenue", "GrossProfit", "NetIncome", "Missing"]);

        let order: Vec<&str> = filtered.positions().collect();
        assert_eq!(order, vec!["TotalRevenue", "NetIncome"]);
        assert!(!filtered.contains("Foo"));
        assert_eq!(filtered.row_order("NetIncome"), Some(2));
    }

    #[test]
    fn test_insert_appends_rows() {
        let p = date(2023, 12, 31);
        let mut table = StatementTable::new();
        table.insert("Gross Margin (%)", p, Some(40.0));
        table.insert("Net Margin (%)", p, None);
        table.insert("Gross Margin (%)", date(2022, 12, 31), Some(38.0));

        let order: Vec<&str> = table.positions().collect();
        assert_eq!(order, vec!["Gross Margin (%)", "Net Margin (%)"]);
        assert_eq!(table.periods().len(), 2);
    }

    #[test]
    fn test_insert_after_sparse_ranks() {
        let p = date(2023, 12, 31);
        let mut table = StatementTable::from_rows(vec![
            row("TotalRevenue", p, Some(500.0), 10),
            row("NetIncome", p, Some(50.0), 20),
        ]);
        table.insert("EBIT", p, Some(80.0));

        let ranks: Vec<u32> = table.rows().map(PositionRow::row_order).collect();
        assert_eq!(ranks, vec![10, 20, 21]);
        assert_eq!(table.row_order("EBIT"), Some(21));

        let order: Vec<&str> = table.positions().collect();
        assert_eq!(order, vec!["TotalRevenue", "NetIncome", "EBIT"]);
    }

    #[test]
    fn test_to_dataframe() {
        let table = StatementTable::from_rows(vec![
            row("TotalRevenue", date(2022, 12, 31), Some(400.0), 0),
            row("TotalRevenue", date(2023, 12, 31), Some(500.0), 0),
            row("NetIncome", date(2023, 12, 31), None, 1),
        ]);

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["position", "2023-12-31", "2022-12-31"]);
    }
}
