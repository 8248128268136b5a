//! Account ledger: posted lines of one account with a running balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ReportError;
use super::generator::StatementGenerator;
use crate::fiscal::DateRange;
use crate::ledger::{LedgerError, LedgerRepository, RunningBalance};

/// One posted line in an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedgerRow {
    /// Entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Line memo, or the entry narrative when the line has none.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line, on the account's normal side.
    pub running_balance: Decimal,
}

/// Activity of one account over a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedger {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Covered dates.
    pub range: DateRange,
    /// Balance at the close of the day before the range.
    pub opening_balance: Decimal,
    /// Posted lines in date order.
    pub rows: Vec<AccountLedgerRow>,
    /// Balance after the last line.
    pub closing_balance: Decimal,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Lists the posted lines of `account_number` within `range`.
    pub fn account_ledger(&self, account_number: &str, range: &DateRange) -> Result<AccountLedger, ReportError> {
        let account = self
            .active_accounts()?
            .into_iter()
            .find(|account| account.account_number == account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))?;

        let calculator = self.calculator();
        let opening_balance = calculator.balance_before(&account, range.start())?;
        let side = account.normal_balance();

        let mut running = RunningBalance::starting_at(opening_balance);
        let mut rows = Vec::new();
        for posted in calculator.lines(&account, range)? {
            running = running.next(side.calculate_balance_change(posted.line.debit, posted.line.credit));
            let description = posted.line.description.unwrap_or(posted.entry_description);
            rows.push(AccountLedgerRow {
                entry_number: posted.entry_number,
                entry_date: posted.entry_date,
                description,
                debit: posted.line.debit,
                credit: posted.line.credit,
                running_balance: running.current_balance,
            });
        }

        Ok(AccountLedger {
            account_number: account.account_number,
            account_name: account.account_name,
            range: *range,
            opening_balance,
            rows,
            closing_balance: running.current_balance,
        })
    }
}
