//! Export of engine outputs to files and reports

use chrono::NaiveDate;
use intrinsic_data::{DatedSeries, Scenario, ScenarioSet, StatementRow, StatementTable};
use intrinsic_output::{ExportFormat, Exporter, ReportBuilder, ValuationSummary};
use intrinsic_valuation::{DcfModel, ReverseDcf, SolverConfig, value_scenarios};
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case(ExportFormat::Csv)]
#[case(ExportFormat::Json)]
#[case(ExportFormat::PrettyJson)]
fn test_table_file_round_trip(#[case] format: ExportFormat) {
    let table = StatementTable::from_rows(vec![
        StatementRow::new("TotalRevenue", date(2023, 12, 31), Some(93_000.0), 0),
        StatementRow::new("NetIncome", date(2023, 12, 31), Some(11_200.0), 1),
    ]);
    let path = std::env::temp_dir().join(format!(
        "intrinsic_table_{format:?}.{}",
        format.extension()
    ));

    table.export_to_file(&path, format).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(content, table.export_to_string(format).unwrap());
    assert!(content.contains("TotalRevenue"));
    assert!(content.contains("2023-12-31"));
}

#[test]
fn test_series_csv_reads_back() {
    let series = DatedSeries::new(
        "P/B",
        vec![(date(2024, 1, 31), Some(2.5)), (date(2023, 12, 31), Some(2.25))],
    );
    let csv = series.export_to_string(ExportFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let values: Vec<f64> = reader
        .records()
        .map(|r| r.unwrap()[1].parse().unwrap())
        .collect();
    assert_eq!(values, vec![2.5, 2.25]);
}

#[test]
fn test_valuation_summary_report() {
    let model = DcfModel::default();
    let assumptions = ScenarioSet::new(0.0, 0.05, 0.10, "test");
    let values = value_scenarios(&model, &assumptions, 10_500.0, 2_620.0);
    let implied = ReverseDcf::new(model, SolverConfig::default()).solve(94.6, 10_500.0, 2_620.0);

    let summary = ValuationSummary::new(
        "NESN.SW",
        94.6,
        2_620.0,
        10_500.0,
        &assumptions,
        &values,
        &implied,
    );
    assert_eq!(
        summary.scenarios.iter().map(|l| l.scenario).collect::<Vec<_>>(),
        Scenario::all()
    );

    let report = ReportBuilder::new()
        .symbol("NESN.SW")
        .kind("valuation")
        .contents(&summary)
        .unwrap()
        .build()
        .unwrap();
    let json = report.to_json().unwrap();
    assert!(json.contains("\"implied_growth\""));
    assert!(json.contains("\"kind\": \"valuation\""));
}
