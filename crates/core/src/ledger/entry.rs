//! Journal entries, their lines, and the entry lifecycle.
//!
//! Lifecycle: `draft -> posted` (through the validation gate) or
//! `draft -> void`. Posted and void entries are immutable; a posted entry is
//! corrected by posting its reversal.

use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, JournalEntryId, JournalEntryLineId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::LedgerError;
use super::types::EntryTotals;
use super::validation::validate_lines;

/// Journal entry status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Being prepared; excluded from every balance.
    #[default]
    Draft,
    /// Live; included in balances and statements.
    Posted,
    /// Abandoned draft; excluded from every balance.
    Void,
}

impl EntryStatus {
    /// Returns true if lines can still be added or changed.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Posted => write!(f, "posted"),
            Self::Void => write!(f, "void"),
        }
    }
}

/// Journal entry type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryKind {
    /// Ordinary business event.
    #[default]
    Standard,
    /// Period-end adjustment (accruals, depreciation).
    Adjusting,
    /// Year-end closing of temporary accounts.
    Closing,
    /// Reversal of an earlier entry.
    Reversing,
}

/// Link back to the business event an entry was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReference {
    /// Kind of source document (e.g. "invoice", "expense", "journal_entry").
    pub kind: String,
    /// Identifier of the source document.
    pub id: String,
}

/// One debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// Unique identifier.
    pub id: JournalEntryLineId,
    /// Account the line posts to.
    pub account_id: AccountId,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Optional line memo.
    pub description: Option<String>,
}

impl JournalEntryLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            id: JournalEntryLineId::new(),
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            id: JournalEntryLineId::new(),
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// Attaches a memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the line with debit and credit swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            id: JournalEntryLineId::new(),
            account_id: self.account_id,
            debit: self.credit,
            credit: self.debit,
            description: Some(format!(
                "Reversal: {}",
                self.description.clone().unwrap_or_default()
            )),
        }
    }
}

/// A dated, tenant-scoped set of journal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Human-facing entry number (e.g. "JE-2024-001").
    pub entry_number: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Entry type.
    pub kind: JournalEntryKind,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Narrative.
    pub description: String,
    /// Originating business event, if any.
    pub reference: Option<SourceReference>,
    /// Debit and credit lines.
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Creates an empty draft entry.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        entry_number: impl Into<String>,
        entry_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            tenant_id,
            entry_number: entry_number.into(),
            entry_date,
            kind: JournalEntryKind::Standard,
            status: EntryStatus::Draft,
            description: description.into(),
            reference: None,
            lines: Vec::new(),
        }
    }

    /// Sets the entry type.
    #[must_use]
    pub fn with_kind(mut self, kind: JournalEntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the source reference.
    #[must_use]
    pub fn with_reference(mut self, kind: impl Into<String>, id: impl Into<String>) -> Self {
        self.reference = Some(SourceReference {
            kind: kind.into(),
            id: id.into(),
        });
        self
    }

    /// Appends a line (builder form). Only valid on drafts; see [`Self::add_line`].
    #[must_use]
    pub fn with_line(mut self, line: JournalEntryLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Appends a line to a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `CannotModifyPosted` unless the entry is a draft.
    pub fn add_line(&mut self, line: JournalEntryLine) -> Result<(), LedgerError> {
        if !self.status.is_editable() {
            return Err(LedgerError::CannotModifyPosted);
        }
        self.lines.push(line);
        Ok(())
    }

    /// Returns the sums of debits and credits.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        let debit = self.lines.iter().map(|l| l.debit).sum();
        let credit = self.lines.iter().map(|l| l.credit).sum();
        EntryTotals::new(debit, credit)
    }

    /// Returns true once the entry contributes to balances.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }

    /// Distinct accounts touched by this entry, in line order.
    #[must_use]
    pub fn account_ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if !ids.contains(&line.account_id) {
                ids.push(line.account_id);
            }
        }
        ids
    }

    /// Moves a draft to posted after running the validation gate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the entry is a draft, or the
    /// first validation failure (e.g. `UnbalancedEntry`). A rejected entry is
    /// left unchanged as a draft.
    pub fn post(&mut self) -> Result<EntryTotals, LedgerError> {
        self.transition(EntryStatus::Posted)?;
        let totals = validate_lines(self.id, &self.lines)?;
        self.status = EntryStatus::Posted;
        debug!(
            entry = %self.entry_number,
            total = %totals.total_debit,
            lines = self.lines.len(),
            "journal entry posted"
        );
        Ok(totals)
    }

    /// Moves a draft to void.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the entry is a draft.
    pub fn void(&mut self) -> Result<(), LedgerError> {
        self.transition(EntryStatus::Void)?;
        self.status = EntryStatus::Void;
        debug!(entry = %self.entry_number, "journal entry voided");
        Ok(())
    }

    /// Builds a draft reversing entry for a posted entry: every debit becomes
    /// a credit and vice versa, referencing the original.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the entry is posted, or
    /// `EmptyReversal` if it has no lines.
    pub fn reverse(&self, entry_date: NaiveDate) -> Result<Self, LedgerError> {
        if self.status != EntryStatus::Posted {
            return Err(LedgerError::InvalidStatusTransition {
                from: self.status,
                to: EntryStatus::Posted,
            });
        }
        if self.lines.is_empty() {
            return Err(LedgerError::EmptyReversal);
        }

        Ok(Self {
            id: JournalEntryId::new(),
            tenant_id: self.tenant_id,
            entry_number: format!("{}-REV", self.entry_number),
            entry_date,
            kind: JournalEntryKind::Reversing,
            status: EntryStatus::Draft,
            description: format!("Reversal of {}: {}", self.entry_number, self.description),
            reference: Some(SourceReference {
                kind: "journal_entry".to_string(),
                id: self.id.to_string(),
            }),
            lines: self.lines.iter().map(JournalEntryLine::reversed).collect(),
        })
    }

    fn transition(&self, to: EntryStatus) -> Result<(), LedgerError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(LedgerError::InvalidStatusTransition {
                from: self.status,
                to,
            })
        }
    }
}
