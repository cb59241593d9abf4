use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use mtd_core::{Clock, FixedClock, QuarterlyStatusEngine, SystemClock, TaxYear};
use mtd_data::report::{render_accessible, render_overview};
use mtd_data::{AppConfig, Ledger};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Show the quarterly update status of a self-employed business.
///
/// Reads income and expense entries from a ledger CSV, works out the four
/// quarters of the selected UK tax year and prints each quarter's status,
/// deadline and totals.
#[derive(Parser, Debug)]
#[command(name = "mtd-quarters")]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file; ignored if it does not exist
    #[arg(short, long, default_value = "mtd.toml")]
    config: PathBuf,

    /// Ledger CSV (overrides the settings file)
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    /// Business id (overrides the settings file)
    #[arg(short, long)]
    business: Option<String>,

    /// Tax year, e.g. 2025 or 2025/26 (defaults to the year containing today)
    #[arg(short, long)]
    year: Option<TaxYear>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(short, long)]
    today: Option<NaiveDate>,

    /// Print screen-reader sentences instead of the table
    #[arg(long, default_value_t = false)]
    accessible: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Otherwise uses `fallback` (from the settings file, or `info`).
/// * Writes to stderr so the table on stdout stays clean.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to read settings: {}", args.config.display()))?;
    init_tracing(config.log_level_or("info"));

    let Some(ledger_path) = args.ledger.or(config.ledger) else {
        bail!(
            "no ledger given; pass --ledger or set `ledger` in {}",
            args.config.display()
        );
    };
    let Some(business_id) = args.business.or(config.business_id) else {
        bail!(
            "no business given; pass --business or set `business_id` in {}",
            args.config.display()
        );
    };

    let clock: Arc<dyn Clock> = match args.today {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(SystemClock),
    };
    let tax_year = args.year.unwrap_or_else(|| TaxYear::current_at(clock.as_ref()));
    debug!(%tax_year, today = %clock.now(), "reference period selected");

    let ledger = Arc::new(
        Ledger::load_from_file(&ledger_path)
            .with_context(|| format!("Failed to load ledger: {}", ledger_path.display()))?,
    );
    info!(entries = ledger.len(), businesses = ledger.businesses().len(), "ledger loaded");

    let engine = QuarterlyStatusEngine::new(
        business_id,
        tax_year,
        clock,
        ledger.clone(),
        ledger,
    );
    let models = engine.quarter_view_models().await;

    if args.accessible {
        println!("{}", render_accessible(&models));
    } else {
        println!("{}", render_overview(tax_year, &models));
    }

    Ok(())
}
