//! Collaborator interfaces for reading and writing raw data.
//!
//! Engines never talk to storage directly; they receive tables and series built
//! from whatever implements these traits.

use crate::calendar::Period;
use crate::error::Result;
use crate::prices::{PriceBar, PriceSeries};
use crate::statement::{StatementKind, StatementRow};
use crate::table::StatementTable;

/// Supplies raw statement rows.
pub trait StatementSource {
    /// Raw rows of one statement for a symbol, in `row_order`.
    fn statement_rows(&self, symbol: &str, kind: StatementKind) -> Result<Vec<StatementRow>>;

    /// Rows pivoted into a [`StatementTable`].
    fn statement_table(&self, symbol: &str, kind: StatementKind) -> Result<StatementTable> {
        Ok(StatementTable::from_rows(self.statement_rows(symbol, kind)?))
    }
}

/// Supplies daily price history.
pub trait PriceSource {
    /// Bars for a symbol, ascending, optionally starting at `since`.
    fn price_bars(&self, symbol: &str, since: Option<Period>) -> Result<Vec<PriceBar>>;

    /// Full history as a [`PriceSeries`].
    fn price_series(&self, symbol: &str) -> Result<PriceSeries> {
        Ok(PriceSeries::new(self.price_bars(symbol, None)?))
    }
}

/// Supplies peer lists.
pub trait PeerSource {
    /// Peers of a symbol in rank order.
    fn peers(&self, symbol: &str) -> Result<Vec<String>>;
}

/// Accepts raw statement rows.
pub trait StatementSink {
    /// Store rows of one statement, replacing existing `(position, period)` cells.
    /// Returns the number of rows written.
    fn put_statement_rows(
        &mut self,
        symbol: &str,
        kind: StatementKind,
        rows: &[StatementRow],
    ) -> Result<usize>;
}

/// Accepts daily price history.
pub trait PriceSink {
    /// Store bars, keeping any bar already stored for the same date.
    /// Returns the number of new bars.
    fn put_price_bars(&mut self, symbol: &str, bars: &[PriceBar]) -> Result<usize>;
}

/// Accepts peer lists.
pub trait PeerSink {
    /// Replace the peer list of a symbol. Self-references and duplicates are dropped.
    /// Returns the number of peers stored.
    fn put_peers(&mut self, symbol: &str, peers: &[String]) -> Result<usize>;
}

/// Everything an analysis run reads.
pub trait DataSource: StatementSource + PriceSource + PeerSource {}

impl<T: StatementSource + PriceSource + PeerSource> DataSource for T {}

/// Drop self-references and repeated peers, keeping first occurrence order.
pub fn normalize_peers(symbol: &str, peers: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(peers.len());
    for peer in peers {
        let peer = peer.trim();
        if peer.is_empty() || peer == symbol || out.iter().any(|p| p == peer) {
            continue;
        }
        out.push(peer.to_string());
    }
    out
}
