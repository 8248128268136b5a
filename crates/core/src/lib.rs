//! Core business logic for Ledgerly.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Ledger data arrives through [`ledger::LedgerRepository`]; statements leave as
//! serializable documents.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping logic
//! - `fiscal` - Date ranges and reporting periods
//! - `reports` - Financial statement generation
//! - `analytics` - Ratios, period comparisons and trends
//! - `export` - JSON and CSV output
//! - `cache` - Read-through cache for display balances

pub mod analytics;
pub mod cache;
pub mod export;
pub mod fiscal;
pub mod ledger;
pub mod reports;
