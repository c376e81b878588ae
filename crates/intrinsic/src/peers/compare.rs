//! Cross-sectional comparison of one metric over a peer group.
//!
//! Each ticker is computed independently on the rayon pool; results are
//! gathered into a sorted map so completion order never matters.

use intrinsic_data::{CompanyData, DatedSeries};
use intrinsic_metrics::Metric;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Latest value of `metric` for `ticker` and each of its `peers`.
///
/// Tickers whose series is empty or carries no value are omitted. A peer
/// listed twice, or equal to `ticker`, is computed once.
pub fn compare<F>(ticker: &str, peers: &[String], metric: F) -> BTreeMap<String, f64>
where
    F: Fn(&str) -> DatedSeries + Sync,
{
    let mut tickers: Vec<&str> = Vec::with_capacity(peers.len() + 1);
    for symbol in std::iter::once(ticker).chain(peers.iter().map(String::as_str)) {
        if !tickers.contains(&symbol) {
            tickers.push(symbol);
        }
    }

    tickers
        .par_iter()
        .filter_map(|&symbol| latest(symbol, &metric(symbol)))
        .collect()
}

/// Latest value of `metric` for every preloaded company.
pub fn compare_companies(companies: &[CompanyData], metric: &dyn Metric) -> BTreeMap<String, f64> {
    companies
        .par_iter()
        .filter_map(|company| latest(&company.symbol, &metric.compute(company)))
        .collect()
}

fn latest(symbol: &str, series: &DatedSeries) -> Option<(String, f64)> {
    let value = series.latest_value();
    if value.is_none() {
        debug!(symbol, metric = %series.name, "no value, omitted from comparison");
    }
    value.map(|v| (symbol.to_string(), v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture(symbol: &str) -> DatedSeries {
        match symbol {
            "A" => DatedSeries::new("m", vec![(date(2024, 1, 31), Some(10.0))]),
            "B" => DatedSeries::new(
                "m",
                vec![(date(2024, 1, 31), None), (date(2023, 12, 31), Some(7.5))],
            ),
            "C" => DatedSeries::new("m", vec![(date(2024, 1, 31), None)]),
            _ => DatedSeries::new("m", Vec::new()),
        }
    }

    #[test]
    fn test_compare_omits_empty() {
        let peers = vec!["B".to_string(), "C".to_string(), "D".to_string()];
        let result = compare("A", &peers, fixture);

        assert_eq!(result.len(), 2);
        assert_eq!(result["A"], 10.0);
        assert_eq!(result["B"], 7.5);
        assert!(!result.contains_key("C"));
        assert!(!result.contains_key("D"));
    }

    #[test]
    fn test_compare_dedups_tickers() {
        let peers = vec!["A".to_string(), "B".to_string(), "B".to_string()];
        let result = compare("A", &peers, fixture);
        assert_eq!(result.keys().collect::<Vec<_>>(), ["A", "B"]);
    }
}
