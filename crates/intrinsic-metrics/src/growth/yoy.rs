//! Year-over-Year Growth
//!
//! Percentage change between adjacent reporting periods, newest to oldest, for
//! every position of a statement.

use chrono::Datelike;
use intrinsic_data::{Period, StatementRow, StatementTable};

/// Growth of every position between adjacent periods.
///
/// The result keeps the statement's positions and row order; each column is the
/// newer period of an adjacent pair and holds `(newer - older) / older * 100`.
/// A missing value on either side, or a zero older value, gives null. Statements
/// with fewer than two periods yield an empty table.
pub fn growth_yoy(statement: &StatementTable) -> StatementTable {
    let periods = statement.periods();
    let mut cells = Vec::new();

    for row in statement.rows() {
        for pair in periods.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            let growth = match (row.value(newer), row.value(older)) {
                (Some(n), Some(o)) if o != 0.0 => Some((n - o) / o * 100.0),
                _ => None,
            };
            cells.push(StatementRow::new(row.name(), newer, growth, row.row_order()));
        }
    }

    StatementTable::from_rows(cells)
}

/// Label a growth cell as `"<position> (YoY <year>)"`.
pub fn growth_label(position: &str, period: Period) -> String {
    format!("{position} (YoY {})", period.year())
}

/// Flatten a growth table into labelled entries, in row order then newest first.
pub fn growth_entries(growth: &StatementTable) -> Vec<(String, Option<f64>)> {
    growth
        .rows()
        .flat_map(|row| {
            row.cells()
                .map(move |(period, value)| (growth_label(row.name(), period), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Period {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_revenue_growth() {
        let table = StatementTable::from_rows(vec![
            StatementRow::new("Revenue", date(2023, 12, 31), Some(500.0), 0),
            StatementRow::new("Revenue", date(2022, 12, 31), Some(400.0), 0),
        ]);

        let entries = growth_entries(&growth_yoy(&table));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "Revenue (YoY 2023)");
        assert_relative_eq!(entries[0].1.unwrap(), 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_growth_zero_and_missing_base() {
        let table = StatementTable::from_rows(vec![
            StatementRow::new("A", date(2023, 12, 31), Some(10.0), 0),
            StatementRow::new("A", date(2022, 12, 31), Some(0.0), 0),
            StatementRow::new("A", date(2021, 12, 31), Some(4.0), 0),
            StatementRow::new("B", date(2023, 12, 31), Some(3.0), 1),
        ]);

        let growth = growth_yoy(&table);
        assert_eq!(growth.periods(), vec![date(2023, 12, 31), date(2022, 12, 31)]);
        assert_eq!(growth.value("A", date(2023, 12, 31)), None);
        assert_relative_eq!(
            growth.value("A", date(2022, 12, 31)).unwrap(),
            -100.0,
            epsilon = 1e-10
        );
        assert_eq!(growth.value("B", date(2023, 12, 31)), None);

        let positions: Vec<&str> = growth.positions().collect();
        assert_eq!(positions, vec!["A", "B"]);
    }

    #[test]
    fn test_growth_needs_two_periods() {
        let table = StatementTable::from_rows(vec![StatementRow::new(
            "Revenue",
            date(2023, 12, 31),
            Some(1.0),
            0,
        )]);
        assert!(growth_yoy(&table).is_empty());
        assert!(growth_entries(&growth_yoy(&table)).is_empty());
    }
}
