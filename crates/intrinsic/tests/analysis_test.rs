//! End-to-end analysis runs against an in-memory store

use approx::assert_relative_eq;
use chrono::NaiveDate;
use intrinsic::data::{MemoryStore, PriceBar, Scenario, ScenarioSet, StatementKind, StatementRow};
use intrinsic::metrics::profitability;
use intrinsic::valuation::DcfModel;
use intrinsic::{AnalysisConfig, Analyzer};
use rstest::{fixture, rstest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[fixture]
fn store() -> MemoryStore {
    let p23 = date(2023, 12, 31);
    let p22 = date(2022, 12, 31);

    let income = vec![
        StatementRow::new("NetIncome", p23, Some(11_200.0), 0),
        StatementRow::new("NetIncome", p22, Some(9_300.0), 0),
        StatementRow::new("TotalRevenue", p23, Some(93_000.0), 1),
        StatementRow::new("TotalRevenue", p22, Some(94_400.0), 1),
        StatementRow::new("GrossProfit", p23, Some(43_700.0), 2),
        StatementRow::new("GrossProfit", p22, Some(43_000.0), 2),
        StatementRow::new("OperatingIncome", p23, Some(15_600.0), 3),
        StatementRow::new("OperatingIncome", p22, Some(14_000.0), 3),
        StatementRow::new("DilutedEPS", p23, Some(4.3), 4),
        StatementRow::new("DilutedEPS", p22, Some(3.4), 4),
        StatementRow::new("VendorSpecificNoise", p23, Some(1.0), 5),
    ];
    let balance = vec![
        StatementRow::new("TotalAssets", p23, Some(126_000.0), 0),
        StatementRow::new("StockholdersEquity", p23, Some(35_000.0), 1),
        StatementRow::new("OrdinarySharesNumber", p23, Some(2_620.0), 2),
        StatementRow::new("ShareIssued", p23, Some(2_700.0), 3),
    ];
    let cash_flow = vec![StatementRow::new("FreeCashFlow", p23, Some(10_500.0), 0)];
    let prices = vec![
        PriceBar::flat(date(2023, 12, 29), 96.0, 1_000),
        PriceBar::flat(date(2024, 2, 16), 94.6, 1_000),
    ];

    let peer_income = vec![StatementRow::new("DilutedEPS", p23, Some(6.0), 0)];
    let peer_prices = vec![PriceBar::flat(date(2024, 1, 31), 180.0, 5_000)];

    MemoryStore::new()
        .with_statement("NESN.SW", StatementKind::IncomeStatement, &income)
        .with_statement("NESN.SW", StatementKind::BalanceSheet, &balance)
        .with_statement("NESN.SW", StatementKind::CashFlow, &cash_flow)
        .with_prices("NESN.SW", &prices)
        .with_statement("PEP", StatementKind::IncomeStatement, &peer_income)
        .with_prices("PEP", &peer_prices)
        .with_peers("NESN.SW", &["PEP", "MDLZ", "NESN.SW"])
}

#[rstest]
fn test_fundamentals_are_ordered(store: MemoryStore) {
    let fundamentals = Analyzer::new(&store).fundamentals("NESN.SW").unwrap();

    let positions: Vec<&str> = fundamentals.income_statement.positions().collect();
    assert_eq!(positions[0], "TotalRevenue");
    assert!(!positions.contains(&"VendorSpecificNoise"));
    assert_relative_eq!(
        fundamentals
            .margins
            .value(profitability::NET_MARGIN, date(2023, 12, 31))
            .unwrap(),
        11_200.0 / 93_000.0 * 100.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        fundamentals
            .efficiency
            .value(profitability::ROA, date(2023, 12, 31))
            .unwrap(),
        11_200.0 / 126_000.0 * 100.0,
        epsilon = 1e-9
    );
    assert!(
        fundamentals
            .growth_entries()
            .iter()
            .any(|(label, _)| label == "NetIncome (YoY 2023)")
    );
}

#[rstest]
fn test_multiples(store: MemoryStore) {
    let multiples = Analyzer::new(&store).multiples("NESN.SW").unwrap();

    assert_relative_eq!(
        multiples.price_to_earnings.latest_value().unwrap(),
        94.6 / 4.3,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        multiples.price_to_book.latest_value().unwrap(),
        94.6 * 2_700.0 / 35_000.0,
        epsilon = 1e-9
    );
}

#[rstest]
fn test_valuation_round_trip(store: MemoryStore) {
    let scenarios = ScenarioSet::new(0.02, 0.06, 0.12, "test");
    let report = Analyzer::new(&store)
        .valuation_with("NESN.SW", &scenarios)
        .unwrap();

    assert!(report.inputs.is_complete());
    let bear = report.values.get(Scenario::Bear).unwrap();
    let base = report.values.get(Scenario::Base).unwrap();
    let bull = report.values.get(Scenario::Bull).unwrap();
    assert!(bear < base && base < bull);
    assert_relative_eq!(report.base_case.per_share, base, epsilon = 1e-9);

    let implied = report.implied_growth;
    assert!(implied.converged);
    let repriced = DcfModel::default().intrinsic_value_per_share(10_500.0, implied.rate, 2_620.0);
    assert_relative_eq!(repriced, 94.6, epsilon = 1e-3);
}

#[rstest]
fn test_configured_scenarios(store: MemoryStore) {
    let config = AnalysisConfig {
        scenarios: ScenarioSet::new(0.0, 0.0, 0.0, "flat"),
        ..AnalysisConfig::default()
    };
    let report = Analyzer::with_config(&store, config)
        .valuation("NESN.SW")
        .unwrap();

    assert_eq!(report.scenarios.reasoning, "flat");
    assert_eq!(
        report.values.get(Scenario::Bear),
        report.values.get(Scenario::Bull)
    );
}

#[rstest]
fn test_compare_peers_omits_missing(store: MemoryStore) {
    let result = Analyzer::new(&store).compare_peers("NESN.SW", "pe").unwrap();

    assert_eq!(result.len(), 2);
    assert_relative_eq!(result["NESN.SW"], 94.6 / 4.3, epsilon = 1e-9);
    assert_relative_eq!(result["PEP"], 30.0, epsilon = 1e-9);
    assert!(!result.contains_key("MDLZ"));
}

#[rstest]
fn test_valuation_summary(store: MemoryStore) {
    let report = Analyzer::new(&store).valuation("NESN.SW").unwrap();
    let summary = report.summary();

    assert_eq!(summary.symbol, "NESN.SW");
    assert_eq!(summary.price, 94.6);
    assert_eq!(summary.scenarios.len(), 3);
    assert_eq!(summary.implied_growth, report.implied_growth.rate);
}
