//! Account balance calculations.
//!
//! Balances are always recomputed from an account's opening balance plus
//! its posted lines; nothing here reads a stored balance.

use chrono::NaiveDate;
use ledgerly_shared::types::TenantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::error::LedgerError;
use super::repository::{LedgerRepository, PostedLine};
use super::types::NormalBalance;
use crate::fiscal::DateRange;

/// Debit and credit sums over a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTotals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
}

impl SideTotals {
    /// Sums the debit and credit sides of posted lines.
    #[must_use]
    pub fn from_lines(lines: &[PostedLine]) -> Self {
        lines.iter().fold(Self::default(), |acc, posted| Self {
            debit: acc.debit + posted.line.debit,
            credit: acc.credit + posted.line.credit,
        })
    }

    /// Net movement on the given normal side.
    #[must_use]
    pub fn net(self, side: NormalBalance) -> Decimal {
        side.calculate_balance_change(self.debit, self.credit)
    }
}

/// Computes balances for one tenant through a repository.
pub struct BalanceCalculator<'a, R: LedgerRepository + ?Sized> {
    repo: &'a R,
    tenant: TenantId,
}

impl<'a, R: LedgerRepository + ?Sized> BalanceCalculator<'a, R> {
    /// Creates a calculator for `tenant`.
    #[must_use]
    pub fn new(repo: &'a R, tenant: TenantId) -> Self {
        Self { repo, tenant }
    }

    /// Debit and credit sums of posted lines in `range`.
    pub fn side_totals(&self, account: &Account, range: &DateRange) -> Result<SideTotals, LedgerError> {
        let lines = self.repo.posted_lines(self.tenant, account.id, range)?;
        Ok(SideTotals::from_lines(&lines))
    }

    /// Opening balance plus posted movement through `as_of`, on the
    /// account's normal side. May be negative; that is reported as-is.
    pub fn balance_as_of(&self, account: &Account, as_of: NaiveDate) -> Result<Decimal, LedgerError> {
        let totals = self.side_totals(account, &DateRange::through(as_of))?;
        Ok(account.opening_balance + totals.net(account.normal_balance()))
    }

    /// Balance at the close of the day before `date` (the opening balance
    /// if there is no such day).
    pub fn balance_before(&self, account: &Account, date: NaiveDate) -> Result<Decimal, LedgerError> {
        match date.pred_opt() {
            Some(previous) => self.balance_as_of(account, previous),
            None => Ok(account.opening_balance),
        }
    }

    /// Net posted movement within `range`, without the opening balance.
    pub fn activity_for_period(&self, account: &Account, range: &DateRange) -> Result<Decimal, LedgerError> {
        Ok(self.side_totals(account, range)?.net(account.normal_balance()))
    }

    /// Posted lines of `account` in `range`.
    pub fn lines(&self, account: &Account, range: &DateRange) -> Result<Vec<PostedLine>, LedgerError> {
        self.repo.posted_lines(self.tenant, account.id, range)
    }
}

/// Running balance across consecutive lines of one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position in the chain (0 for the starting balance).
    pub sequence: u32,
    /// Balance before this line.
    pub previous_balance: Decimal,
    /// Balance after this line.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Starts a chain at `balance`.
    #[must_use]
    pub const fn starting_at(balance: Decimal) -> Self {
        Self {
            sequence: 0,
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// Applies the next balance change.
    ///
    /// - current_balance[N] = previous_balance[N] + change
    /// - previous_balance[N] = current_balance[N-1]
    #[must_use]
    pub fn next(&self, balance_change: Decimal) -> Self {
        Self {
            sequence: self.sequence + 1,
            previous_balance: self.current_balance,
            current_balance: self.current_balance + balance_change,
        }
    }
}
