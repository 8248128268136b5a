//! Statement generator.
//!
//! Every statement is recomputed from the repository on each call. No
//! cached or stored balance is read, so two calls with the same ledger and
//! period produce identical documents.

use chrono::NaiveDate;
use ledgerly_shared::types::TenantId;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{StatementHeader, StatementKind, StatementOptions};
use crate::fiscal::{DateRange, FinancialPeriod};
use crate::ledger::{Account, AccountCategory, BalanceCalculator, LedgerRepository};

/// Generates statement documents for one tenant.
pub struct StatementGenerator<'a, R: LedgerRepository + ?Sized> {
    repo: &'a R,
    tenant: TenantId,
    options: StatementOptions,
}

impl<'a, R: LedgerRepository + ?Sized> StatementGenerator<'a, R> {
    /// Creates a generator reading from `repo` on behalf of `tenant`.
    #[must_use]
    pub fn new(repo: &'a R, tenant: TenantId, options: StatementOptions) -> Self {
        Self {
            repo,
            tenant,
            options,
        }
    }

    /// Generator settings.
    #[must_use]
    pub const fn options(&self) -> &StatementOptions {
        &self.options
    }

    /// Tenant the generator reports on.
    #[must_use]
    pub const fn tenant(&self) -> TenantId {
        self.tenant
    }

    pub(crate) fn calculator(&self) -> BalanceCalculator<'a, R> {
        BalanceCalculator::new(self.repo, self.tenant)
    }

    /// Active accounts in account-number order.
    pub(crate) fn active_accounts(&self) -> Result<Vec<Account>, ReportError> {
        let mut accounts = self.repo.accounts(self.tenant)?;
        accounts.retain(|account| account.is_active);
        Ok(accounts)
    }

    /// Active accounts of one category.
    pub(crate) fn accounts_in(&self, category: AccountCategory) -> Result<Vec<Account>, ReportError> {
        let mut accounts = self.active_accounts()?;
        accounts.retain(|account| account.category() == category);
        Ok(accounts)
    }

    pub(crate) fn header(&self, kind: StatementKind, range: DateRange) -> StatementHeader {
        StatementHeader {
            kind,
            title: kind.to_string(),
            tenant_id: self.tenant,
            period: FinancialPeriod::from_range(range),
            standard: self.options.standard,
            currency: self.options.currency,
        }
    }

    /// Sum of the as-of balances of `accounts`.
    pub(crate) fn total_as_of(&self, accounts: &[Account], as_of: NaiveDate) -> Result<Decimal, ReportError> {
        let calculator = self.calculator();
        let mut total = Decimal::ZERO;
        for account in accounts {
            total += calculator.balance_as_of(account, as_of)?;
        }
        Ok(total)
    }

    /// Sum of the balances of `accounts` at the close of the day before `date`.
    pub(crate) fn total_before(&self, accounts: &[Account], date: NaiveDate) -> Result<Decimal, ReportError> {
        let calculator = self.calculator();
        let mut total = Decimal::ZERO;
        for account in accounts {
            total += calculator.balance_before(account, date)?;
        }
        Ok(total)
    }

    /// Revenue activity minus expense activity over `range`, before tax.
    pub(crate) fn pre_tax_income(&self, range: &DateRange) -> Result<Decimal, ReportError> {
        let calculator = self.calculator();
        let mut income = Decimal::ZERO;
        for account in self.active_accounts()? {
            match account.category() {
                AccountCategory::Revenue => income += calculator.activity_for_period(&account, range)?,
                AccountCategory::Expense => income -= calculator.activity_for_period(&account, range)?,
                _ => {}
            }
        }
        Ok(income)
    }
}
