//! In-memory store, mainly for tests and embedding.

use crate::calendar::Period;
use crate::error::Result;
use crate::prices::PriceBar;
use crate::source::{
    PeerSink, PeerSource, PriceSink, PriceSource, StatementSink, StatementSource, normalize_peers,
};
use crate::statement::{StatementKind, StatementRow};
use std::collections::{BTreeMap, HashMap};

/// Store keeping everything in hash maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    prices: HashMap<String, BTreeMap<Period, PriceBar>>,
    statements: HashMap<(String, StatementKind), Vec<StatementRow>>,
    peers: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`PriceSink::put_price_bars`].
    pub fn with_prices(mut self, symbol: &str, bars: &[PriceBar]) -> Self {
        let _ = self.put_price_bars(symbol, bars);
        self
    }

    /// Builder-style [`StatementSink::put_statement_rows`].
    pub fn with_statement(
        mut self,
        symbol: &str,
        kind: StatementKind,
        rows: &[StatementRow],
    ) -> Self {
        let _ = self.put_statement_rows(symbol, kind, rows);
        self
    }

    /// Builder-style [`PeerSink::put_peers`].
    pub fn with_peers(mut self, symbol: &str, peers: &[&str]) -> Self {
        let peers: Vec<String> = peers.iter().map(|p| (*p).to_string()).collect();
        let _ = self.put_peers(symbol, &peers);
        self
    }
}

impl PriceSource for MemoryStore {
    fn price_bars(&self, symbol: &str, since: Option<Period>) -> Result<Vec<PriceBar>> {
        let Some(bars) = self.prices.get(symbol) else {
            return Ok(Vec::new());
        };
        let bars: Vec<PriceBar> = match since {
            Some(start) => bars.range(start..).map(|(_, b)| *b).collect(),
            None => bars.values().copied().collect(),
        };
        Ok(bars)
    }
}

impl PriceSink for MemoryStore {
    fn put_price_bars(&mut self, symbol: &str, bars: &[PriceBar]) -> Result<usize> {
        let stored = self.prices.entry(symbol.to_string()).or_default();
        let mut inserted = 0;
        for bar in bars {
            if !stored.contains_key(&bar.date) {
                stored.insert(bar.date, *bar);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

impl StatementSource for MemoryStore {
    fn statement_rows(&self, symbol: &str, kind: StatementKind) -> Result<Vec<StatementRow>> {
        let mut rows = self
            .statements
            .get(&(symbol.to_string(), kind))
            .cloned()
            .unwrap_or_default();
        rows.sort_by_key(|r| r.row_order);
        Ok(rows)
    }
}

impl StatementSink for MemoryStore {
    fn put_statement_rows(
        &mut self,
        symbol: &str,
        kind: StatementKind,
        rows: &[StatementRow],
    ) -> Result<usize> {
        let stored = self.statements.entry((symbol.to_string(), kind)).or_default();
        for row in rows {
            match stored
                .iter_mut()
                .find(|r| r.position == row.position && r.period == row.period)
            {
                Some(existing) => *existing = row.clone(),
                None => stored.push(row.clone()),
            }
        }
        Ok(rows.len())
    }
}

impl PeerSource for MemoryStore {
    fn peers(&self, symbol: &str) -> Result<Vec<String>> {
        Ok(self.peers.get(symbol).cloned().unwrap_or_default())
    }
}

impl PeerSink for MemoryStore {
    fn put_peers(&mut self, symbol: &str, peers: &[String]) -> Result<usize> {
        let peers = normalize_peers(symbol, peers);
        let count = peers.len();
        self.peers.insert(symbol.to_string(), peers);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prices_ignore_existing_dates() {
        let mut store = MemoryStore::new();
        store
            .put_price_bars("ABC", &[PriceBar::flat(date(2024, 1, 2), 1.0, 1)])
            .unwrap();
        let inserted = store
            .put_price_bars(
                "ABC",
                &[
                    PriceBar::flat(date(2024, 1, 2), 5.0, 1),
                    PriceBar::flat(date(2024, 1, 3), 2.0, 1),
                ],
            )
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(store.price_series("ABC").unwrap().as_of(date(2024, 1, 2)), Some(1.0));
        assert_eq!(store.price_bars("ABC", Some(date(2024, 1, 3))).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_symbol_is_empty() {
        let store = MemoryStore::new();
        assert!(store.price_bars("XYZ", None).unwrap().is_empty());
        assert!(
            store
                .statement_table("XYZ", StatementKind::BalanceSheet)
                .unwrap()
                .is_empty()
        );
        assert!(store.peers("XYZ").unwrap().is_empty());
    }

    #[test]
    fn test_statement_rows_replace_cells() {
        let p = date(2023, 12, 31);
        let store = MemoryStore::new()
            .with_statement(
                "ABC",
                StatementKind::IncomeStatement,
                &[StatementRow::new("NetIncome", p, Some(1.0), 1)],
            )
            .with_statement(
                "ABC",
                StatementKind::IncomeStatement,
                &[
                    StatementRow::new("NetIncome", p, Some(3.0), 1),
                    StatementRow::new("TotalRevenue", p, Some(9.0), 0),
                ],
            );

        let rows = store
            .statement_rows("ABC", StatementKind::IncomeStatement)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, "TotalRevenue");
        assert_eq!(rows[1].value, Some(3.0));
    }

    #[test]
    fn test_peers_normalized() {
        let store = MemoryStore::new().with_peers("ABC", &["DEF", "ABC", "DEF", "GHI"]);
        assert_eq!(store.peers("ABC").unwrap(), vec!["DEF", "GHI"]);
    }
}
