//! Double-entry bookkeeping logic.
//!
//! This module implements the general ledger:
//! - Account types, classification and accounts
//! - Journal entries, their lines and lifecycle
//! - The validation gate run before posting
//! - Balance calculations from opening balances and posted lines
//! - The repository interface and an in-memory ledger
//! - Serializable ledger snapshots and a sample ledger

pub mod account;
pub mod balance;
pub mod classify;
pub mod entry;
pub mod error;
pub mod repository;
pub mod sample;
pub mod snapshot;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType};
pub use balance::{BalanceCalculator, RunningBalance, SideTotals};
pub use entry::{EntryStatus, JournalEntry, JournalEntryKind, JournalEntryLine, SourceReference};
pub use error::LedgerError;
pub use repository::{InMemoryLedger, LedgerRepository, PostedLine};
pub use snapshot::{AccountRecord, EntryRecord, LedgerSnapshot, LineRecord};
pub use types::{
    AccountCategory, AssetSubtype, Classification, EntryTotals, ExpenseBucket, LiabilitySubtype,
    NormalBalance,
};
pub use validation::validate_lines;
