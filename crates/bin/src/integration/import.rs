//! CSV readers for store imports.
//!
//! Prices use `date,open,high,low,close,volume`. Statements are accepted long
//! (`position,period,value[,row_order]`) or wide (`position,<period>,...`, as
//! written by the CSV exporter). Peers use `symbol,peer`, one row per link, in
//! rank order.

use intrinsic::data::calendar::parse_period;
use intrinsic::data::{DataError, Period, PriceBar, StatementRow};
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

/// Errors raised while reading import files.
#[derive(Debug, Error)]
pub(crate) enum ImportError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Store error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Header cell that should be a period is not a date.
    #[error("Invalid period column: {0}")]
    InvalidPeriod(String),

    /// Cell that should be a number is not one.
    #[error("Invalid value for {position}: {value}")]
    InvalidValue {
        /// Position of the cell
        position: String,
        /// Raw cell contents
        value: String,
    },
}

/// Read daily bars.
pub(crate) fn read_price_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let bars = rdr
        .deserialize::<PriceBar>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bars)
}

#[derive(Debug, Deserialize)]
struct LongRecord {
    position: String,
    period: Period,
    value: Option<f64>,
    #[serde(default)]
    row_order: Option<u32>,
}

/// Read statement rows in long or wide layout.
///
/// Without an explicit `row_order`, positions are ranked by first appearance.
pub(crate) fn read_statement_rows<R: Read>(reader: R) -> Result<Vec<StatementRow>, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    if headers.iter().any(|h| h == "period") {
        let mut order: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for record in rdr.deserialize::<LongRecord>() {
            let record = record?;
            let rank = rank_of(&mut order, &record.position);
            rows.push(StatementRow::new(
                record.position,
                record.period,
                record.value,
                record.row_order.unwrap_or(rank),
            ));
        }
        return Ok(rows);
    }

    let periods = headers
        .iter()
        .skip(1)
        .map(|h| parse_period(h).ok_or_else(|| ImportError::InvalidPeriod(h.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (rank, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(position) = record.get(0) else {
            continue;
        };
        for (period, cell) in periods.iter().zip(record.iter().skip(1)) {
            rows.push(StatementRow::new(
                position,
                *period,
                parse_cell(position, cell)?,
                rank as u32,
            ));
        }
    }
    Ok(rows)
}

fn rank_of(order: &mut Vec<String>, position: &str) -> u32 {
    let index = order.iter().position(|p| p == position).unwrap_or_else(|| {
        order.push(position.to_string());
        order.len() - 1
    });
    index as u32
}

fn parse_cell(position: &str, cell: &str) -> Result<Option<f64>, ImportError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse()
        .map(Some)
        .map_err(|_| ImportError::InvalidValue {
            position: position.to_string(),
            value: cell.to_string(),
        })
}

#[derive(Debug, Deserialize)]
struct PeerRecord {
    symbol: String,
    peer: String,
}

/// Read peer links grouped by symbol, keeping file order.
pub(crate) fn read_peers<R: Read>(reader: R) -> Result<Vec<(String, Vec<String>)>, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for record in rdr.deserialize::<PeerRecord>() {
        let PeerRecord { symbol, peer } = record?;
        match groups.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, peers)) => peers.push(peer),
            None => groups.push((symbol, vec![peer])),
        }
    }
    Ok(groups)
}
