//! Sample ledger writer for Ledgerly development and testing.
//!
//! Writes a small trading company's chart of accounts, opening balances,
//! and one month of posted entries as a ledger snapshot.
//!
//! Usage: cargo run --bin seeder -- sample-ledger.json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerly_core::ledger::{InMemoryLedger, LedgerSnapshot};
use ledgerly_shared::types::TenantId;

/// Test tenant ID (consistent across seeds)
const TEST_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Write a sample ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "seeder")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Destination file
    #[arg(value_name = "FILE", default_value = "sample-ledger.json")]
    output: PathBuf,

    /// Tenant to own the sample ledger
    #[arg(short, long)]
    tenant: Option<TenantId>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgerly=info,seeder=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let tenant = match args.tenant {
        Some(tenant) => tenant,
        None => TEST_TENANT_ID.parse().context("invalid built-in tenant id")?,
    };

    let snapshot = LedgerSnapshot::sample(tenant);

    // Replaying the snapshot runs every entry through the posting gate.
    let ledger = InMemoryLedger::from_snapshot(snapshot.clone()).context("sample ledger failed validation")?;
    info!(
        tenant = %tenant,
        accounts = ledger.all_accounts().len(),
        entries = ledger.entries().len(),
        "Validated sample ledger"
    );

    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&args.output, json).with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "Seeding complete");
    Ok(())
}
