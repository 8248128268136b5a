//! Ledgerly command-line interface.
//!
//! Loads a ledger snapshot and prints statements, reviews, and balances.
//!
//! ```bash
//! ledgerly --ledger books.json statement income-statement --start 2024-11-01 --end 2024-11-30
//! ledgerly --ledger books.json statement comprehensive --start 2024-01-01 --end 2024-12-31 --format csv
//! ledgerly --ledger books.json monthly --year 2024 --month 11
//! ledgerly --ledger books.json balance --account 1000-01 --as-of 2024-11-30
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerly_core::export::ExportFormat;
use ledgerly_core::reports::StatementKind;
use ledgerly_shared::AppConfig;
use ledgerly_shared::config::LoggingConfig;
use ledgerly_shared::types::TenantId;

/// Generate financial statements from a ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "ledgerly")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ledger snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    ledger: PathBuf,

    /// Tenant to report on; defaults to the snapshot's tenant
    #[arg(short, long, global = true)]
    tenant: Option<TenantId>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one statement for a date range
    Statement {
        /// balance-sheet, income-statement, cash-flow, equity-statement,
        /// comprehensive, or trial-balance
        kind: StatementKind,
        /// First day of the period
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the period
        #[arg(long)]
        end: NaiveDate,
        /// Output format
        #[arg(short, long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Trial balance as of a date
    TrialBalance {
        /// Balance date
        #[arg(long)]
        as_of: NaiveDate,
        /// Output format
        #[arg(short, long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Posted lines of one account with a running balance
    AccountLedger {
        /// Account number
        #[arg(short, long)]
        account: String,
        /// First day of the period
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the period
        #[arg(long)]
        end: NaiveDate,
    },
    /// Financial ratios for a date range
    Ratios {
        /// First day of the period
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the period
        #[arg(long)]
        end: NaiveDate,
    },
    /// Month review against the previous month
    Monthly {
        /// Calendar year
        #[arg(long)]
        year: i32,
        /// Month (1-12)
        #[arg(long)]
        month: u32,
    },
    /// Year review with quarters and ratios
    Annual {
        /// Calendar year
        #[arg(long)]
        year: i32,
    },
    /// Multi-year comparison with growth trends
    Compare {
        /// First year
        #[arg(long)]
        start_year: i32,
        /// Last year
        #[arg(long)]
        end_year: i32,
    },
    /// Balances of one or more accounts as of a date
    Balance {
        /// Account numbers
        #[arg(short, long, required = true)]
        account: Vec<String>,
        /// Balance date
        #[arg(long)]
        as_of: NaiveDate,
    },
}

fn init_tracing(config: &LoggingConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let json = json || config.json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match AppConfig::load().context("failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging, args.json_logs);

    match commands::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
