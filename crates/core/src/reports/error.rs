//! Report error types.

use chrono::NaiveDate;
use ledgerly_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
///
/// Sparse or empty ledgers are never an error; they produce all-zero
/// statements.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Period starts after it ends.
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Month outside 1..=12 (or an unrepresentable year).
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// Quarter outside 1..=4 (or an unrepresentable year).
    #[error("Invalid quarter: Q{quarter} {year}")]
    InvalidQuarter {
        /// Requested year.
        year: i32,
        /// Requested quarter.
        quarter: u32,
    },

    /// Year range is inverted or unrepresentable.
    #[error("Invalid year range: {start} to {end}")]
    InvalidYearRange {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },

    /// Ledger data could not be read.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::InvalidMonth { .. } => "INVALID_MONTH",
            Self::InvalidQuarter { .. } => "INVALID_QUARTER",
            Self::InvalidYearRange { .. } => "INVALID_YEAR_RANGE",
            Self::Ledger(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidPeriod { .. }
            | Self::InvalidMonth { .. }
            | Self::InvalidQuarter { .. }
            | Self::InvalidYearRange { .. } => 400,
            Self::Ledger(err) => err.http_status_code(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Ledger(inner) => inner.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}
