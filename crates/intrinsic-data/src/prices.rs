//! Daily OHLCV history with as-of lookup.

use crate::calendar::{Period, parse_period};
use crate::error::{DataError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One trading day of price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: Period,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

impl PriceBar {
    /// Bar with the same open, high, low and close.
    pub const fn flat(date: Period, close: f64, volume: u64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }
}

/// Price history sorted by strictly increasing date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the last bar of any repeated date.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut unique: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match unique.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => unique.push(bar),
            }
        }
        Self { bars: unique }
    }

    /// Bars in ascending date order.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True when the series has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Oldest bar.
    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    /// Newest bar.
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Bar of the latest trading day on or before `date`.
    pub fn bar_as_of(&self, date: Period) -> Option<&PriceBar> {
        let idx = self.bars.partition_point(|b| b.date <= date);
        idx.checked_sub(1).map(|i| &self.bars[i])
    }

    /// Close of the latest trading day on or before `date`.
    ///
    /// `None` when the series is empty or `date` precedes the first bar.
    pub fn as_of(&self, date: Period) -> Option<f64> {
        self.bar_as_of(date).map(|b| b.close)
    }

    /// Bars dated on or after `start`.
    pub fn since(&self, start: Period) -> &[PriceBar] {
        let idx = self.bars.partition_point(|b| b.date < start);
        &self.bars[idx..]
    }

    /// Build from a `DataFrame` with `date`, `open`, `high`, `low`, `close` and
    /// `volume` columns. Rows with a null field are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let dates = df.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let opens = df.column("open")?.cast(&DataType::Float64)?;
        let opens = opens.f64()?;
        let highs = df.column("high")?.cast(&DataType::Float64)?;
        let highs = highs.f64()?;
        let lows = df.column("low")?.cast(&DataType::Float64)?;
        let lows = lows.f64()?;
        let closes = df.column("close")?.cast(&DataType::Float64)?;
        let closes = closes.f64()?;
        let volumes = df.column("volume")?.cast(&DataType::Int64)?;
        let volumes = volumes.i64()?;

        let mut bars = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(raw_date) = dates.get(i) else {
                continue;
            };
            let date = parse_period(raw_date)
                .ok_or_else(|| DataError::Parse(format!("Invalid date: {raw_date}")))?;
            let (Some(open), Some(high), Some(low), Some(close)) =
                (opens.get(i), highs.get(i), lows.get(i), closes.get(i))
            else {
                continue;
            };
            let volume = volumes.get(i).unwrap_or(0).max(0) as u64;
            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        Ok(Self::new(bars))
    }

    /// Convert to a `DataFrame` with a `Date` typed `date` column.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self.bars.iter().map(|b| b.date.to_string()).collect();
        let opens: Vec<f64> = self.bars.iter().map(|b| b.open).collect();
        let highs: Vec<f64> = self.bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = self.bars.iter().map(|b| b.low).collect();
        let closes: Vec<f64> = self.bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = self.bars.iter().map(|b| b.volume).collect();

        let df = DataFrame::new(vec![
            Series::new("date".into(), dates).into(),
            Series::new("open".into(), opens).into(),
            Series::new("high".into(), highs).into(),
            Series::new("low".into(), lows).into(),
            Series::new("close".into(), closes).into(),
            Series::new("volume".into(), volumes).into(),
        ])?;

        let df = df
            .lazy()
            .with_column(col("date").cast(DataType::Date))
            .collect()?;

        Ok(df)
    }
}

impl FromIterator<PriceBar> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = PriceBar>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
