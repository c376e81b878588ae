//! Intrinsic CLI binary.
//!
//! Provides the command-line interface for the Intrinsic valuation engine.

mod integration;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use integration::config::load_config;
use integration::import::{read_peers, read_price_bars, read_statement_rows};
use integration::store::{db_path, open_store};
use intrinsic::data::calendar::window_start;
use intrinsic::data::{
    PeerSink, PriceSink, PriceSource, ScenarioSet, SqliteStore, StatementKind, StatementSink,
    StatementTable,
};
use intrinsic::metrics::{MetricCategory, metrics_by_category};
use intrinsic::output::{
    ExportFormat, Exporter, ReportBuilder, TableView, comparison_to_ascii, dataframe_to_csv,
    export_json, series_to_ascii, table_to_ascii,
};
use intrinsic::{AnalysisConfig, Analyzer, Fundamentals, PeerSet};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "intrinsic")]
#[command(about = "Intrinsic: DCF valuation and fundamental analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load CSV files into the store
    Import {
        #[command(subcommand)]
        source: ImportCommand,
    },

    /// Scenario valuation and the growth implied by the current price
    Value {
        /// Stock symbol
        symbol: String,

        /// Bear-case annual growth (fraction)
        #[arg(long, allow_hyphen_values = true)]
        bear: Option<f64>,

        /// Base-case annual growth (fraction)
        #[arg(long, allow_hyphen_values = true)]
        base: Option<f64>,

        /// Bull-case annual growth (fraction)
        #[arg(long, allow_hyphen_values = true)]
        bull: Option<f64>,

        /// Reasoning recorded with the scenarios
        #[arg(long)]
        reasoning: Option<String>,

        /// Discount rate (fraction)
        #[arg(long)]
        discount_rate: Option<f64>,

        /// Terminal growth rate (fraction)
        #[arg(long, allow_hyphen_values = true)]
        terminal_growth: Option<f64>,

        /// Projection horizon in years
        #[arg(long)]
        years: Option<u32>,
    },

    /// Ordered statements, margins, returns and growth
    Fundamentals {
        /// Stock symbol
        symbol: String,

        /// Show only one statement (balance, income, cashflow)
        #[arg(long)]
        statement: Option<String>,
    },

    /// Trailing P/E and P/B
    Multiples {
        /// Stock symbol
        symbol: String,
    },

    /// Compare a multiple across a company and its peers
    Peers {
        /// Stock symbol
        symbol: String,

        /// Metric to compare (pe or pb)
        #[arg(long, default_value = "pe")]
        metric: String,
    },

    /// List available metrics
    Metrics,

    /// Stored price history
    History {
        /// Stock symbol
        symbol: String,

        /// Trailing window in calendar days (negative for the full history)
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        days: i64,
    },

    /// Show store location and contents
    Info,
}

#[derive(Subcommand, Debug)]
enum ImportCommand {
    /// Daily history: date,open,high,low,close,volume
    Prices {
        /// Stock symbol
        symbol: String,

        /// CSV file
        file: PathBuf,
    },

    /// Statement rows, long (position,period,value) or wide (position,<period>...)
    Statements {
        /// Stock symbol
        symbol: String,

        /// Statement kind (balance, income, cashflow)
        #[arg(long)]
        kind: String,

        /// CSV file
        file: PathBuf,
    },

    /// Peer lists: symbol,peer
    Peers {
        /// CSV file
        #[arg(required_unless_present = "builtin")]
        file: Option<PathBuf>,

        /// Load the built-in Swiss blue-chip peer table
        #[arg(long, conflicts_with = "file")]
        builtin: bool,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult {
    let mut config = load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Import { source } => {
            let mut store = open_store(cli.db.as_deref())?;
            import(&mut store, source)?;
        }
        Commands::Value {
            symbol,
            bear,
            base,
            bull,
            reasoning,
            discount_rate,
            terminal_growth,
            years,
        } => {
            let defaults = &config.scenarios;
            let scenarios = ScenarioSet::new(
                bear.unwrap_or(defaults.bear),
                base.unwrap_or(defaults.base),
                bull.unwrap_or(defaults.bull),
                reasoning.unwrap_or_else(|| defaults.reasoning.clone()),
            );
            override_dcf(&mut config, discount_rate, terminal_growth, years)?;

            let store = open_store(cli.db.as_deref())?;
            value(&store, config, &symbol.to_uppercase(), &scenarios, format)?;
        }
        Commands::Fundamentals { symbol, statement } => {
            let statement = statement.map(|s| s.parse::<StatementKind>()).transpose()?;
            let store = open_store(cli.db.as_deref())?;
            fundamentals(&store, config, &symbol.to_uppercase(), statement, format)?;
        }
        Commands::Multiples { symbol } => {
            let store = open_store(cli.db.as_deref())?;
            multiples(&store, config, &symbol.to_uppercase(), format)?;
        }
        Commands::Peers { symbol, metric } => {
            let store = open_store(cli.db.as_deref())?;
            peers(&store, config, &symbol.to_uppercase(), &metric, format)?;
        }
        Commands::Metrics => list_metrics(format)?,
        Commands::History { symbol, days } => {
            let store = open_store(cli.db.as_deref())?;
            history(&store, &symbol.to_uppercase(), days, format)?;
        }
        Commands::Info => {
            let store = open_store(cli.db.as_deref())?;
            info(&store, &db_path(cli.db.as_deref()))?;
        }
    }

    Ok(())
}

/// Apply command-line DCF parameters over the loaded configuration.
fn override_dcf(
    config: &mut AnalysisConfig,
    discount_rate: Option<f64>,
    terminal_growth: Option<f64>,
    years: Option<u32>,
) -> intrinsic::data::Result<()> {
    if let Some(r) = discount_rate {
        config.dcf.discount_rate = r;
    }
    if let Some(g) = terminal_growth {
        config.dcf.terminal_growth = g;
    }
    if let Some(n) = years {
        config.dcf.years = n;
    }
    config.validate()
}

fn import(store: &mut SqliteStore, source: ImportCommand) -> CliResult {
    match source {
        ImportCommand::Prices { symbol, file } => {
            let symbol = symbol.to_uppercase();
            let bars = read_price_bars(File::open(&file)?)?;
            let added = store.put_price_bars(&symbol, &bars)?;
            println!(
                "{symbol}: {added} new bars ({} already stored)",
                bars.len() - added
            );
        }
        ImportCommand::Statements { symbol, kind, file } => {
            let symbol = symbol.to_uppercase();
            let kind: StatementKind = kind.parse()?;
            let rows = read_statement_rows(File::open(&file)?)?;
            let written = store.put_statement_rows(&symbol, kind, &rows)?;
            println!("{symbol}: {written} {kind} rows");
        }
        ImportCommand::Peers { file, .. } => {
            let groups: Vec<(String, Vec<String>)> = match file {
                Some(path) => read_peers(File::open(&path)?)?,
                None => {
                    let set = PeerSet::swiss_blue_chips();
                    set.tickers()
                        .map(|t| (t.to_string(), set.peers_of(t).to_vec()))
                        .collect()
                }
            };
            for (symbol, peers) in groups {
                let stored = store.put_peers(&symbol, &peers)?;
                println!("{symbol}: {stored} peers");
            }
        }
    }
    Ok(())
}

fn print_report<T: Serialize + ?Sized>(symbol: &str, kind: &str, contents: &T) -> CliResult {
    let report = ReportBuilder::new()
        .symbol(symbol)
        .kind(kind)
        .contents(contents)?
        .build()?;
    println!("{}", report.to_json()?);
    Ok(())
}

fn print_csv_section(title: &str, csv: &str) {
    println!("# {title}");
    print!("{csv}");
}

fn value(
    store: &SqliteStore,
    config: AnalysisConfig,
    symbol: &str,
    scenarios: &ScenarioSet,
    format: OutputFormat,
) -> CliResult {
    let report = Analyzer::with_config(store, config).valuation_with(symbol, scenarios)?;
    if !report.inputs.is_complete() {
        eprintln!(
            "Warning: incomplete inputs for {symbol} (price {:.2}, shares {:.0}, free cash flow {:.0})",
            report.inputs.price, report.inputs.shares_outstanding, report.inputs.free_cash_flow
        );
    }

    let summary = report.summary();
    match format {
        OutputFormat::Text => print!("{}", summary.to_ascii_table()),
        OutputFormat::Json => print_report(symbol, "valuation", &report)?,
        OutputFormat::Csv => print!("{}", summary.export_to_string(ExportFormat::Csv)?),
    }
    Ok(())
}

/// JSON shape of the fundamentals command.
#[derive(Debug, Serialize)]
struct FundamentalsView<'a> {
    balance_sheet: TableView<'a>,
    income_statement: TableView<'a>,
    cash_flow: TableView<'a>,
    margins: TableView<'a>,
    efficiency: TableView<'a>,
    growth: Vec<(String, Option<f64>)>,
}

impl<'a> FundamentalsView<'a> {
    fn new(f: &'a Fundamentals) -> Self {
        Self {
            balance_sheet: TableView::new(&f.balance_sheet),
            income_statement: TableView::new(&f.income_statement),
            cash_flow: TableView::new(&f.cash_flow),
            margins: TableView::new(&f.margins),
            efficiency: TableView::new(&f.efficiency),
            growth: f.growth_entries(),
        }
    }
}

fn fundamentals(
    store: &SqliteStore,
    config: AnalysisConfig,
    symbol: &str,
    statement: Option<StatementKind>,
    format: OutputFormat,
) -> CliResult {
    let fundamentals = Analyzer::with_config(store, config).fundamentals(symbol)?;

    let sections: Vec<(&str, &StatementTable)> = match statement {
        Some(kind) => vec![(kind.as_str(), fundamentals.statement(kind))],
        None => vec![
            ("balance_sheet", &fundamentals.balance_sheet),
            ("income_statement", &fundamentals.income_statement),
            ("cash_flow", &fundamentals.cash_flow),
            ("margins", &fundamentals.margins),
            ("efficiency", &fundamentals.efficiency),
            ("growth", &fundamentals.growth),
        ],
    };

    match format {
        OutputFormat::Text => {
            for (title, table) in sections {
                print!("{}", table_to_ascii(&format!("{symbol} {title}"), table));
            }
        }
        OutputFormat::Json => match statement {
            Some(kind) => {
                let view = TableView::new(fundamentals.statement(kind));
                print_report(symbol, kind.as_str(), &view)?;
            }
            None => print_report(symbol, "fundamentals", &FundamentalsView::new(&fundamentals))?,
        },
        OutputFormat::Csv => {
            for (title, table) in sections {
                print_csv_section(title, &table.export_to_string(ExportFormat::Csv)?);
            }
        }
    }
    Ok(())
}

fn multiples(
    store: &SqliteStore,
    config: AnalysisConfig,
    symbol: &str,
    format: OutputFormat,
) -> CliResult {
    let multiples = Analyzer::with_config(store, config).multiples(symbol)?;
    let series = [&multiples.price_to_earnings, &multiples.price_to_book];

    match format {
        OutputFormat::Text => {
            for s in series {
                print!("{}", series_to_ascii(s));
            }
        }
        OutputFormat::Json => print_report(symbol, "multiples", &multiples)?,
        OutputFormat::Csv => {
            for s in series {
                print_csv_section(&s.name, &s.export_to_string(ExportFormat::Csv)?);
            }
        }
    }
    Ok(())
}

fn peers(
    store: &SqliteStore,
    config: AnalysisConfig,
    symbol: &str,
    metric: &str,
    format: OutputFormat,
) -> CliResult {
    let values = Analyzer::with_config(store, config).compare_peers(symbol, metric)?;

    match format {
        OutputFormat::Text => print!(
            "{}",
            comparison_to_ascii(&metric.to_uppercase(), symbol, &values)
        ),
        OutputFormat::Json => print_report(symbol, "peers", &values)?,
        OutputFormat::Csv => print!("{}", values.export_to_string(ExportFormat::Csv)?),
    }
    Ok(())
}

/// Registry entry as printed by the metrics command.
#[derive(Debug, Serialize)]
struct MetricRow {
    name: &'static str,
    category: String,
    description: &'static str,
    inputs: String,
}

fn list_metrics(format: OutputFormat) -> CliResult {
    let categories = [
        MetricCategory::Margin,
        MetricCategory::Return,
        MetricCategory::Growth,
        MetricCategory::Multiple,
        MetricCategory::Valuation,
    ];
    let rows: Vec<MetricRow> = categories
        .into_iter()
        .flat_map(metrics_by_category)
        .map(|m| MetricRow {
            name: m.name,
            category: m.category.to_string(),
            description: m.description,
            inputs: m.inputs.join(" "),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{:<18} {:<10} {}", "Metric", "Category", "Description");
            println!("{}", "-".repeat(72));
            for row in &rows {
                println!("{:<18} {:<10} {}", row.name, row.category, row.description);
            }
        }
        OutputFormat::Json => println!("{}", export_json(&rows, ExportFormat::PrettyJson)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn history(store: &SqliteStore, symbol: &str, days: i64, format: OutputFormat) -> CliResult {
    let since = window_start(Utc::now().date_naive(), days);

    match format {
        OutputFormat::Json => {
            let bars = store.price_bars(symbol, since)?;
            println!("{}", export_json(&bars, ExportFormat::PrettyJson)?);
        }
        OutputFormat::Text | OutputFormat::Csv => {
            let quotes = store.get_quotes(symbol, since)?;
            print!("{}", dataframe_to_csv(&quotes)?);
        }
    }
    Ok(())
}

fn info(store: &SqliteStore, path: &std::path::Path) -> CliResult {
    let stats = store.get_stats()?;

    println!("Database: {}", path.display());
    println!("  Symbols:        {}", stats.symbols);
    println!("  Price bars:     {}", stats.price_bars);
    println!("  Statement rows: {}", stats.statement_rows);
    println!("  Peer links:     {}", stats.peer_links);

    let symbols = store.symbols()?;
    if !symbols.is_empty() {
        println!("\n{}", symbols.join(" "));
    }
    Ok(())
}
