//! CSV rendering of polars `DataFrame`s.

use crate::export::ExportError;
use polars::prelude::{AnyValue, DataFrame};

/// Render a `DataFrame` as CSV with a header row. Nulls become empty fields.
pub fn dataframe_to_csv(df: &DataFrame) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;

    let columns = df.get_columns();
    for i in 0..df.height() {
        let mut record = Vec::with_capacity(columns.len());
        for column in columns {
            record.push(cell(column.as_materialized_series().get(i)?));
        }
        wtr.write_record(&record)?;
    }

    crate::export::finish(wtr)
}

fn cell(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        other => other.to_string(),
    }
}
