//! Trial balance.

use chrono::NaiveDate;
use ledgerly_shared::types::{Currency, TenantId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ReportError;
use super::generator::StatementGenerator;
use crate::ledger::{AccountCategory, LedgerRepository, NormalBalance};

/// One account's net balance placed in the debit or credit column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account category.
    pub category: AccountCategory,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

/// Column totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrialBalanceTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Debits less credits.
    pub difference: Decimal,
    /// `|difference|` is within the configured tolerance.
    pub is_balanced: bool,
}

/// Trial balance at a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    /// Tenant the figures belong to.
    pub tenant_id: TenantId,
    /// Balances are taken at the close of this date.
    pub as_of: NaiveDate,
    /// Reporting currency.
    pub currency: Currency,
    /// Accounts with a non-zero balance, in account-number order.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates the trial balance as of `as_of`.
    ///
    /// The opening balance counts on the account's normal side. A positive
    /// net balance goes in the normal-side column, a negative one in the
    /// opposite column.
    pub fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalance, ReportError> {
        let calculator = self.calculator();
        let mut rows = Vec::new();
        let mut totals = TrialBalanceTotals::default();

        for account in self.active_accounts()? {
            let balance = calculator.balance_as_of(&account, as_of)?;
            if balance.is_zero() {
                continue;
            }
            let (debit, credit) = match (account.normal_balance(), balance > Decimal::ZERO) {
                (NormalBalance::Debit, true) | (NormalBalance::Credit, false) => (balance.abs(), Decimal::ZERO),
                (NormalBalance::Debit, false) | (NormalBalance::Credit, true) => (Decimal::ZERO, balance.abs()),
            };
            totals.total_debit += debit;
            totals.total_credit += credit;
            rows.push(TrialBalanceRow {
                category: account.category(),
                account_number: account.account_number,
                account_name: account.account_name,
                debit,
                credit,
            });
        }

        totals.difference = totals.total_debit - totals.total_credit;
        totals.is_balanced = totals.difference.abs() <= self.options().balance_tolerance;

        if totals.is_balanced {
            debug!(tenant_id = %self.tenant(), %as_of, rows = rows.len(), total = %totals.total_debit, "Generated trial balance");
        } else {
            warn!(tenant_id = %self.tenant(), %as_of, difference = %totals.difference, "Trial balance does not balance");
        }

        Ok(TrialBalance {
            tenant_id: self.tenant(),
            as_of,
            currency: self.options().currency,
            rows,
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, AccountType, Classification, ExpenseBucket, InMemoryLedger, JournalEntry, JournalEntryLine};
    use crate::reports::StatementOptions;
    use rust_decimal_macros::dec;

    #[test]
    fn test_columns_follow_normal_side() {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let tenant = ledger.tenant_id();
        let cash = Account::new(tenant, "1000", "Cash", AccountType::new("CA", "Current Assets", Classification::Asset(None)))
            .with_opening_balance(dec!(1000), None);
        let payable = Account::new(tenant, "2000", "Accounts Payable", AccountType::new("CL", "Current Liabilities", Classification::Liability(None)))
            .with_opening_balance(dec!(400), None);
        let capital = Account::new(tenant, "3000", "Capital", AccountType::new("EQ", "Equity", Classification::Equity))
            .with_opening_balance(dec!(600), None);
        let rent = Account::new(tenant, "6000", "Rent", AccountType::new("OPEX", "Operating", Classification::Expense(ExpenseBucket::General)));
        let idle = Account::new(tenant, "6900", "Idle", AccountType::new("OPEX", "Operating", Classification::Expense(ExpenseBucket::General)));
        for account in [&cash, &payable, &capital, &rent, &idle] {
            ledger.add_account(account.clone()).unwrap();
        }

        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let entry = JournalEntry::new(tenant, "JE-1", date, "Rent paid ahead")
            .with_line(JournalEntryLine::debit(rent.id, dec!(1200)))
            .with_line(JournalEntryLine::credit(cash.id, dec!(1200)));
        let id = ledger.record(entry).unwrap();
        ledger.post(id).unwrap();

        let generator = StatementGenerator::new(&ledger, tenant, StatementOptions::default());
        let trial = generator.trial_balance(date).unwrap();

        assert_eq!(trial.rows.len(), 4);
        assert_eq!(trial.rows[0].account_number, "1000");
        assert_eq!(trial.rows[0].debit, Decimal::ZERO);
        assert_eq!(trial.rows[0].credit, dec!(200));
        assert_eq!(trial.rows[1].credit, dec!(400));
        assert_eq!(trial.rows[2].credit, dec!(600));
        assert_eq!(trial.rows[3].debit, dec!(1200));
        assert_eq!(trial.totals.total_debit, dec!(1200));
        assert_eq!(trial.totals.total_credit, dec!(1200));
        assert!(trial.totals.is_balanced);
    }

    #[test]
    fn test_cent_difference_is_within_tolerance() {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let tenant = ledger.tenant_id();
        let cash = Account::new(tenant, "1000", "Cash", AccountType::new("CA", "Current Assets", Classification::Asset(None)))
            .with_opening_balance(dec!(100.01), None);
        let capital = Account::new(tenant, "3000", "Capital", AccountType::new("EQ", "Equity", Classification::Equity))
            .with_opening_balance(dec!(100), None);
        ledger.add_account(cash).unwrap();
        ledger.add_account(capital).unwrap();

        let generator = StatementGenerator::new(&ledger, tenant, StatementOptions::default());
        let trial = generator.trial_balance(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()).unwrap();

        assert_eq!(trial.totals.difference, dec!(0.01));
        assert!(trial.totals.is_balanced);
    }
}
