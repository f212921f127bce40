//! dcfkit CLI binary.
//!
//! Collects statements and market data for one ticker, writes the DCF input
//! table and prints a preview.

use clap::Parser;
use dcfkit::pipeline::emit;
use dcfkit::{DcfPipeline, MetricMapping, SnapshotLabels, WorkingCapitalLabels};
use dcfkit_data::yahoo::DEFAULT_HISTORY_DAYS;
use dcfkit_data::{FetchConfig, collect_from_yahoo};
use dcfkit_output::{DEFAULT_PREVIEW_ROWS, ExportFormat};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "dcfkit=info";

#[derive(Parser)]
#[command(name = "dcfkit")]
#[command(about = "dcfkit: DCF inputs from Yahoo Finance statements", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticker symbol
    #[arg(long, default_value = "REPYY")]
    ticker: String,

    /// Output file
    #[arg(long, default_value = "repsol_financials.csv")]
    output: PathBuf,

    /// Output format (csv, json or pretty-json)
    #[arg(long, default_value = "csv")]
    format: ExportFormat,

    /// Trailing price history window in days
    #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
    history_days: i64,

    /// Rows shown in the console preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// JSON metric mapping to use instead of the built-in Yahoo labels
    #[arg(long)]
    mapping: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Nothing can log until the subscriber is installed
    if let Err(e) = init_tracing() {
        eprintln!("Error: failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!(error = %e, "Data collection failed");
        process::exit(1);
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_pipeline(mapping: Option<&Path>) -> dcfkit::Result<DcfPipeline> {
    match mapping {
        Some(path) => DcfPipeline::new(
            MetricMapping::from_path(path)?,
            WorkingCapitalLabels::default(),
            SnapshotLabels::default(),
        ),
        None => DcfPipeline::yahoo(),
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = build_pipeline(cli.mapping.as_deref())?;
    info!(
        symbol = %cli.ticker,
        mapping = %pipeline.mapping().version,
        "Starting data collection"
    );

    let config = FetchConfig {
        history_days: cli.history_days,
    };
    let inputs = collect_from_yahoo(&cli.ticker, &config).await;

    let dcf = pipeline.evaluate(&inputs)?;
    let table = dcf.to_table();
    let report = emit(
        &table,
        &cli.ticker,
        &cli.output,
        cli.format,
        cli.preview_rows,
    )?;

    println!("{report}");
    if let Some(price) = dcf.summary.snapshot.latest_price {
        println!("Latest close price: {price}");
    }

    Ok(())
}
