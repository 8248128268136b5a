//! Subcommand execution.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use ledgerly_core::analytics::FinancialRatios;
use ledgerly_core::cache::BalanceCache;
use ledgerly_core::export::{self, ExportFormat, Tabular};
use ledgerly_core::fiscal::DateRange;
use ledgerly_core::ledger::{BalanceCalculator, InMemoryLedger, LedgerError, LedgerSnapshot};
use ledgerly_core::reports::{StatementGenerator, StatementKind, StatementOptions};
use ledgerly_shared::AppConfig;

use crate::{Args, Command};

fn load_ledger(path: &Path) -> Result<InMemoryLedger> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot: LedgerSnapshot =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    InMemoryLedger::from_snapshot(snapshot).with_context(|| format!("failed to load {}", path.display()))
}

fn emit<T: Tabular>(document: &T, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            export::write_to_file(document, format, path)?;
            info!(path = %path.display(), %format, "Wrote statement");
        }
        None => {
            let mut stdout = io::stdout().lock();
            export::write(document, format, &mut stdout)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn emit_json<T: Serialize>(document: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    export::write_json(document, &mut stdout)?;
    writeln!(stdout)?;
    Ok(())
}

/// Runs the selected subcommand against the snapshot named in `args`.
pub fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let ledger = load_ledger(&args.ledger)?;
    let tenant = args.tenant.unwrap_or_else(|| ledger.tenant_id());
    let generator = StatementGenerator::new(&ledger, tenant, StatementOptions::from(&config.reporting));

    match &args.command {
        Command::Statement {
            kind,
            start,
            end,
            format,
            output,
        } => {
            let range = DateRange::new(*start, *end)?;
            let output = output.as_deref();
            match kind {
                StatementKind::BalanceSheet => emit(&generator.balance_sheet(&range)?, *format, output),
                StatementKind::IncomeStatement => emit(&generator.income_statement(&range)?, *format, output),
                StatementKind::CashFlow => emit(&generator.cash_flow_statement(&range)?, *format, output),
                StatementKind::EquityStatement => emit(&generator.equity_statement(&range)?, *format, output),
                StatementKind::Comprehensive => emit(&generator.comprehensive(&range)?, *format, output),
                StatementKind::TrialBalance => emit(&generator.trial_balance(range.end())?, *format, output),
            }
        }
        Command::TrialBalance { as_of, format } => emit(&generator.trial_balance(*as_of)?, *format, None),
        Command::AccountLedger { account, start, end } => {
            emit_json(&generator.account_ledger(account, &DateRange::new(*start, *end)?)?)
        }
        Command::Ratios { start, end } => {
            let package = generator.comprehensive(&DateRange::new(*start, *end)?)?;
            emit_json(&FinancialRatios::from_package(&package))
        }
        Command::Monthly { year, month } => emit_json(&generator.monthly_review(*year, *month)?),
        Command::Annual { year } => emit_json(&generator.annual_review(*year)?),
        Command::Compare { start_year, end_year } => {
            emit_json(&generator.comparative_analysis(*start_year, *end_year)?)
        }
        Command::Balance { account, as_of } => {
            let cache = BalanceCache::from_config(&config.cache);
            let calculator = BalanceCalculator::new(&ledger, tenant);
            let mut stdout = io::stdout().lock();
            for number in account {
                let found = ledger
                    .account_by_number(number)
                    .ok_or_else(|| LedgerError::AccountNotFound(number.clone()))?;
                let balance = cache.balance_as_of(&calculator, found, *as_of)?;
                writeln!(stdout, "{}\t{}\t{}", found.account_number, found.account_name, balance)?;
            }
            Ok(())
        }
    }
}
