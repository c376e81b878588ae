//! Named date-indexed value series.

use crate::calendar::Period;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A named sequence of optional values keyed by date, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedSeries {
    /// Series name (e.g. `P/E`)
    pub name: String,
    /// `(date, value)` points, most recent first
    pub points: Vec<(Period, Option<f64>)>,
}

impl DatedSeries {
    /// Create a series; points are sorted most recent first.
    pub fn new(name: impl Into<String>, mut points: Vec<(Period, Option<f64>)>) -> Self {
        points.sort_by(|a, b| b.0.cmp(&a.0));
        Self {
            name: name.into(),
            points,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent non-null value.
    pub fn latest_value(&self) -> Option<f64> {
        self.points.iter().find_map(|(_, v)| *v)
    }

    /// Value at an exact date.
    pub fn get(&self, date: Period) -> Option<f64> {
        self.points
            .iter()
            .find(|(d, _)| *d == date)
            .and_then(|(_, v)| *v)
    }

    /// Convert to a two-column `DataFrame` (`date`, `<name>`).
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self.points.iter().map(|(d, _)| d.to_string()).collect();
        let values: Vec<Option<f64>> = self.points.iter().map(|(_, v)| *v).collect();
        DataFrame::new(vec![
            Series::new("date".into(), dates).into(),
            Series::new(self.name.as_str().into(), values).into(),
        ])
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
    fn test_latest_value_skips_nulls() {
        let series = DatedSeries::new(
            "P/E",
            vec![
                (date(2023, 11, 30), Some(18.0)),
                (date(2023, 12, 31), None),
                (date(2023, 10, 31), Some(17.0)),
            ],
        );
        assert_eq!(series.points[0].0, date(2023, 12, 31));
        assert_eq!(series.latest_value(), Some(18.0));
    }

    #[test]
    fn test_all_null_has_no_latest() {
        let series = DatedSeries::new("P/B", vec![(date(2023, 12, 31), None)]);
        assert!(!series.is_empty());
        assert_eq!(series.latest_value(), None);
    }

    #[test]
    fn test_to_dataframe() {
        let series = DatedSeries::new("P/E", vec![(date(2023, 12, 31), Some(20.0))]);
        let df = series.to_dataframe().unwrap();
        assert_eq!(df.shape(), (1, 2));
        assert!(df.column("P/E").is_ok());
    }
}
