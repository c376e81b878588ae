//! SQLite-backed store for raw price history, statement rows and peer lists.

use crate::calendar::{Period, parse_period};
use crate::error::{DataError, Result};
use crate::prices::{PriceBar, PriceSeries};
use crate::source::{
    PeerSink, PeerSource, PriceSink, PriceSource, StatementSink, StatementSource, normalize_peers,
};
use crate::statement::{StatementKind, StatementRow};
use polars::prelude::*;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use std::path::Path;
use tracing::info;

/// SQLite store implementing every source and sink trait.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

fn period_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Period> {
    let raw: String = row.get(idx)?;
    parse_period(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid date: {raw}").into(),
        )
    })
}

impl SqliteStore {
    /// Open (or create) a store at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS stock_history (
                symbol TEXT NOT NULL,
                date TEXT NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (symbol, date)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS statement_rows (
                symbol TEXT NOT NULL,
                kind TEXT NOT NULL,
                position TEXT NOT NULL,
                period TEXT NOT NULL,
                value REAL,
                row_order INTEGER NOT NULL,
                PRIMARY KEY (symbol, kind, position, period)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_statement_rows_symbol_kind
             ON statement_rows(symbol, kind)",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS peers (
                symbol TEXT NOT NULL,
                peer TEXT NOT NULL,
                rank INTEGER NOT NULL,
                PRIMARY KEY (symbol, peer)
            )",
            [],
        )?;

        Ok(())
    }

    /// Price history as a `DataFrame` (`date`, `open`, `high`, `low`, `close`,
    /// `volume`), ascending, optionally from `since`.
    pub fn get_quotes(&self, symbol: &str, since: Option<Period>) -> Result<DataFrame> {
        let bars = self.price_bars(symbol, since)?;
        if bars.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No price history stored".to_string(),
            });
        }
        PriceSeries::new(bars).to_dataframe()
    }

    /// Store price history from a `DataFrame` shaped like [`Self::get_quotes`] output.
    pub fn put_quotes(&mut self, symbol: &str, df: &DataFrame) -> Result<usize> {
        let series = PriceSeries::from_dataframe(df)?;
        self.put_price_bars(symbol, series.bars())
    }

    /// Symbols with any stored data.
    pub fn symbols(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol FROM stock_history
             UNION SELECT symbol FROM statement_rows
             UNION SELECT symbol FROM peers
             ORDER BY symbol",
        )?;

        let symbols = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(symbols)
    }

    /// Delete every record of a symbol.
    pub fn clear_symbol(&self, symbol: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM stock_history WHERE symbol = ?1",
            params![symbol],
        )?;
        self.conn.execute(
            "DELETE FROM statement_rows WHERE symbol = ?1",
            params![symbol],
        )?;
        self.conn
            .execute("DELETE FROM peers WHERE symbol = ?1", params![symbol])?;
        Ok(())
    }

    /// Record counts.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let price_bars: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM stock_history", [], |row| row.get(0))?;
        let statement_rows: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM statement_rows", [], |row| row.get(0))?;
        let peer_links: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM peers", [], |row| row.get(0))?;

        Ok(StoreStats {
            price_bars: price_bars as usize,
            statement_rows: statement_rows as usize,
            peer_links: peer_links as usize,
            symbols: self.symbols()?.len(),
        })
    }
}

impl PriceSource for SqliteStore {
    fn price_bars(&self, symbol: &str, since: Option<Period>) -> Result<Vec<PriceBar>> {
        let since = since.map(|d| d.to_string()).unwrap_or_default();
        let mut stmt = self.conn.prepare(
            "SELECT date, open, high, low, close, volume
             FROM stock_history
             WHERE symbol = ?1 AND date >= ?2
             ORDER BY date ASC",
        )?;

        let bars = stmt
            .query_map(params![symbol, since], |row| {
                Ok(PriceBar {
                    date: period_column(row, 0)?,
                    open: row.get(1)?,
                    high: row.get(2)?,
                    low: row.get(3)?,
                    close: row.get(4)?,
                    volume: row.get::<_, i64>(5)?.max(0) as u64,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bars)
    }
}

impl PriceSink for SqliteStore {
    fn put_price_bars(&mut self, symbol: &str, bars: &[PriceBar]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO stock_history
                 (symbol, date, open, high, low, close, volume)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for bar in bars {
                inserted += stmt.execute(params![
                    symbol,
                    bar.date.to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume as i64,
                ])?;
            }
        }
        tx.commit()?;

        info!(symbol, received = bars.len(), inserted, "stored price history");
        Ok(inserted)
    }
}

impl StatementSource for SqliteStore {
    fn statement_rows(&self, symbol: &str, kind: StatementKind) -> Result<Vec<StatementRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT position, period, value, row_order
             FROM statement_rows
             WHERE symbol = ?1 AND kind = ?2
             ORDER BY row_order ASC, period DESC",
        )?;

        let rows = stmt
            .query_map(params![symbol, kind.as_str()], |row| {
                Ok(StatementRow {
                    position: row.get(0)?,
                    period: period_column(row, 1)?,
                    value: row.get(2)?,
                    row_order: row.get::<_, i64>(3)?.max(0) as u32,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

impl StatementSink for SqliteStore {
    fn put_statement_rows(
        &mut self,
        symbol: &str,
        kind: StatementKind,
        rows: &[StatementRow],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO statement_rows
                 (symbol, kind, position, period, value, row_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(params![
                    symbol,
                    kind.as_str(),
                    row.position,
                    row.period.to_string(),
                    row.value,
                    row.row_order,
                ])?;
            }
        }
        tx.commit()?;

        info!(symbol, %kind, rows = rows.len(), "stored statement rows");
        Ok(rows.len())
    }
}

impl PeerSource for SqliteStore {
    fn peers(&self, symbol: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT peer FROM peers WHERE symbol = ?1 ORDER BY rank ASC")?;

        let peers = stmt
            .query_map(params![symbol], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(peers)
    }
}

impl PeerSink for SqliteStore {
    fn put_peers(&mut self, symbol: &str, peers: &[String]) -> Result<usize> {
        let peers = normalize_peers(symbol, peers);
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM peers WHERE symbol = ?1", params![symbol])?;
        for (rank, peer) in peers.iter().enumerate() {
            tx.execute(
                "INSERT INTO peers (symbol, peer, rank) VALUES (?1, ?2, ?3)",
                params![symbol, peer, rank as i64],
            )?;
        }
        tx.commit()?;

        info!(symbol, peers = peers.len(), "stored peer list");
        Ok(peers.len())
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of stored price bars
    pub price_bars: usize,
    /// Number of stored statement cells
    pub statement_rows: usize,
    /// Number of stored `(symbol, peer)` links
    pub peer_links: usize,
    /// Number of distinct symbols
    pub symbols: usize,
}
