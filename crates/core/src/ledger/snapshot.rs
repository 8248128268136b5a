//! Serializable ledger snapshot: the file format the CLI and seeder share.
//!
//! Accounts reference account types by code and journal lines reference
//! accounts by number, so a snapshot is readable and hand-editable.
//! Loading replays every entry through the same lifecycle as live
//! posting, so an unbalanced "posted" entry in a file is rejected.

use chrono::NaiveDate;
use ledgerly_shared::types::{JournalEntryLineId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::account::{Account, AccountType};
use super::entry::{EntryStatus, JournalEntry, JournalEntryKind, JournalEntryLine, SourceReference};
use super::error::LedgerError;
use super::repository::InMemoryLedger;

/// A complete single-tenant ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Chart-of-accounts types.
    #[serde(default)]
    pub account_types: Vec<AccountType>,
    /// Accounts.
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    /// Journal entries in recording order.
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

/// Snapshot form of an [`Account`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account number.
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Account type code.
    pub account_type: String,
    /// Opening balance.
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Opening balance date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_balance_date: Option<NaiveDate>,
    /// Active flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Snapshot form of a [`JournalEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry number.
    pub entry_number: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Entry type.
    #[serde(default)]
    pub entry_type: JournalEntryKind,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EntryStatus,
    /// Narrative.
    #[serde(default)]
    pub description: String,
    /// Originating business event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<SourceReference>,
    /// Lines.
    pub lines: Vec<LineRecord>,
}

/// Snapshot form of a [`JournalEntryLine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    /// Account number.
    pub account_number: String,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Line memo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InMemoryLedger {
    /// Builds a ledger from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccountType`, `MissingAccountType`,
    /// `DuplicateAccountNumber`, `AccountNotFound`, or the validation error
    /// of the first posted entry that fails the gate.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let tenant = snapshot.tenant_id;
        let mut ledger = Self::new(tenant);

        for account_type in snapshot.account_types {
            ledger.add_account_type(account_type)?;
        }

        for record in snapshot.accounts {
            let account_type = ledger
                .account_type(&record.account_type)
                .cloned()
                .ok_or_else(|| LedgerError::MissingAccountType {
                    account_number: record.account_number.clone(),
                    type_code: record.account_type.clone(),
                })?;
            let mut account = Account::new(tenant, record.account_number, record.account_name, account_type)
                .with_opening_balance(record.opening_balance, record.opening_balance_date);
            account.is_active = record.is_active;
            ledger.add_account(account)?;
        }

        let entry_count = snapshot.entries.len();
        for record in snapshot.entries {
            let mut entry = JournalEntry::new(tenant, record.entry_number, record.entry_date, record.description)
                .with_kind(record.entry_type);
            entry.reference = record.reference;
            for line in record.lines {
                let account = ledger
                    .account_by_number(&line.account_number)
                    .ok_or_else(|| LedgerError::AccountNotFound(line.account_number.clone()))?;
                entry.lines.push(JournalEntryLine {
                    id: JournalEntryLineId::new(),
                    account_id: account.id,
                    debit: line.debit,
                    credit: line.credit,
                    description: line.description,
                });
            }

            let id = ledger.record(entry)?;
            match record.status {
                EntryStatus::Draft => {}
                EntryStatus::Posted => {
                    ledger.post(id)?;
                }
                EntryStatus::Void => ledger.void(id)?,
            }
        }

        info!(
            tenant = %tenant,
            accounts = ledger.all_accounts().len(),
            entries = entry_count,
            "loaded ledger snapshot"
        );
        Ok(ledger)
    }

    /// Captures the ledger as a snapshot.
    #[must_use]
    pub fn to_snapshot(&self) -> LedgerSnapshot {
        let number_of = |id| {
            self.account(id)
                .map(|a| a.account_number.clone())
                .unwrap_or_default()
        };

        LedgerSnapshot {
            tenant_id: self.tenant_id(),
            account_types: self.account_types().cloned().collect(),
            accounts: self
                .all_accounts()
                .iter()
                .map(|a| AccountRecord {
                    account_number: a.account_number.clone(),
                    account_name: a.account_name.clone(),
                    account_type: a.account_type.code.clone(),
                    opening_balance: a.opening_balance,
                    opening_balance_date: a.opening_balance_date,
                    is_active: a.is_active,
                })
                .collect(),
            entries: self
                .entries()
                .iter()
                .map(|e| EntryRecord {
                    entry_number: e.entry_number.clone(),
                    entry_date: e.entry_date,
                    entry_type: e.kind,
                    status: e.status,
                    description: e.description.clone(),
                    reference: e.reference.clone(),
                    lines: e
                        .lines
                        .iter()
                        .map(|l| LineRecord {
                            account_number: number_of(l.account_id),
                            debit: l.debit,
                            credit: l.credit,
                            description: l.description.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
