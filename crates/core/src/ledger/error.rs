//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur while building a chart of
//! accounts, recording journal entries, and moving entries through their
//! lifecycle.

use ledgerly_shared::AppError;
use ledgerly_shared::types::{JournalEntryId, TenantId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::EntryStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry debits and credits do not match.
    #[error("Journal entry {entry} is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// The offending entry.
        entry: JournalEntryId,
        /// Sum of debit amounts.
        debit: Decimal,
        /// Sum of credit amounts.
        credit: Decimal,
    },

    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Line amount cannot be negative.
    #[error("Line {line} has a negative amount")]
    NegativeAmount {
        /// Zero-based line index.
        line: usize,
    },

    /// Line carries both a debit and a credit.
    #[error("Line {line} must specify either debit or credit, not both")]
    LineHasBothSides {
        /// Zero-based line index.
        line: usize,
    },

    /// Line carries neither a debit nor a credit.
    #[error("Line {line} has a zero amount")]
    ZeroAmountLine {
        /// Zero-based line index.
        line: usize,
    },

    /// Journal entry has only one side (all debits or all credits).
    #[error("Journal entry must have both debit and credit lines")]
    SingleSided,

    // ========== Chart of Accounts Errors ==========
    /// Account references an account type that does not exist.
    #[error("Account {account_number} references unknown account type '{type_code}'")]
    MissingAccountType {
        /// The account number.
        account_number: String,
        /// The unresolved account type code.
        type_code: String,
    },

    /// Account type category is not one of the five recognized categories.
    #[error("Unknown account category: {0}")]
    UnknownCategory(String),

    /// Expense account type is missing its required expense bucket.
    #[error("Expense account type '{0}' must declare an expense bucket")]
    MissingExpenseBucket(String),

    /// Account type code defined more than once.
    #[error("Duplicate account type code: {0}")]
    DuplicateAccountType(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account number already used within the tenant.
    #[error("Duplicate account number: {0}")]
    DuplicateAccountNumber(String),

    /// Entity belongs to a different tenant than the ledger.
    #[error("Tenant mismatch: expected {expected}, found {found}")]
    TenantMismatch {
        /// The ledger's tenant.
        expected: TenantId,
        /// The tenant of the rejected entity or query.
        found: TenantId,
    },

    // ========== Entry State Errors ==========
    /// Status transition not allowed by the entry lifecycle.
    #[error("Cannot move journal entry from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: EntryStatus,
        /// Requested status.
        to: EntryStatus,
    },

    /// Cannot modify a posted or void entry.
    #[error("Cannot modify a posted or void journal entry")]
    CannotModifyPosted,

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Entry has no lines to reverse.
    #[error("Journal entry has no lines to reverse")]
    EmptyReversal,

    // ========== Storage Errors ==========
    /// Backing store failed to answer a query.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::LineHasBothSides { .. } => "LINE_HAS_BOTH_SIDES",
            Self::ZeroAmountLine { .. } => "ZERO_AMOUNT_LINE",
            Self::SingleSided => "SINGLE_SIDED",
            Self::MissingAccountType { .. } => "MISSING_ACCOUNT_TYPE",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::MissingExpenseBucket(_) => "MISSING_EXPENSE_BUCKET",
            Self::DuplicateAccountType(_) => "DUPLICATE_ACCOUNT_TYPE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateAccountNumber(_) => "DUPLICATE_ACCOUNT_NUMBER",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::CannotModifyPosted => "CANNOT_MODIFY_POSTED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::EmptyReversal => "EMPTY_REVERSAL",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::UnbalancedEntry { .. }
            | Self::InsufficientLines
            | Self::NegativeAmount { .. }
            | Self::LineHasBothSides { .. }
            | Self::ZeroAmountLine { .. }
            | Self::SingleSided
            | Self::MissingAccountType { .. }
            | Self::UnknownCategory(_)
            | Self::MissingExpenseBucket(_)
            | Self::InvalidStatusTransition { .. }
            | Self::CannotModifyPosted
            | Self::EmptyReversal => 400,

            // 403 Forbidden - cross-tenant access
            Self::TenantMismatch { .. } => 403,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,

            // 409 Conflict
            Self::DuplicateAccountType(_) | Self::DuplicateAccountNumber(_) => 409,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::AccountNotFound(_) | LedgerError::EntryNotFound(_) => {
                Self::NotFound(message)
            }
            LedgerError::DuplicateAccountType(_) | LedgerError::DuplicateAccountNumber(_) => {
                Self::Conflict(message)
            }
            LedgerError::UnbalancedEntry { .. }
            | LedgerError::InvalidStatusTransition { .. }
            | LedgerError::CannotModifyPosted
            | LedgerError::TenantMismatch { .. } => Self::BusinessRule(message),
            LedgerError::Storage(_) => Self::Internal(message),
            _ => Self::Validation(message),
        }
    }
}
