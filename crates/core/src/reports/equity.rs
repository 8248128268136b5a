//! Statement of changes in equity.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::error::ReportError;
use super::generator::StatementGenerator;
use super::types::{StatementHeader, StatementKind};
use crate::fiscal::DateRange;
use crate::ledger::{AccountCategory, LedgerRepository};

/// Opening and closing balance of one equity account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityMovement {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Balance the day before the period.
    pub opening_balance: Decimal,
    /// Balance at the period end.
    pub closing_balance: Decimal,
    /// Closing less opening.
    pub change: Decimal,
}

/// Equity roll-forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquityTotals {
    /// Equity account balances the day before the period.
    pub opening_balance: Decimal,
    /// Net income from the income statement.
    pub net_income: Decimal,
    /// Dividends declared. Always zero for now.
    pub dividends_paid: Decimal,
    /// Owner contributions. Always zero for now.
    pub capital_contributions: Decimal,
    /// Other comprehensive income. Always zero for now.
    pub other_comprehensive_income: Decimal,
    /// Opening plus income and contributions less dividends.
    pub closing_balance: Decimal,
}

/// Statement of changes in equity for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityStatement {
    /// Document header.
    pub header: StatementHeader,
    /// Per-account movements.
    pub movements: Vec<EquityMovement>,
    /// Totals.
    pub totals: EquityTotals,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates the statement of changes in equity for `range`.
    pub fn equity_statement(&self, range: &DateRange) -> Result<EquityStatement, ReportError> {
        let net_income = self.income_statement(range)?.totals.net_income;
        self.equity_with_net_income(range, net_income)
    }

    pub(crate) fn equity_with_net_income(
        &self,
        range: &DateRange,
        net_income: Decimal,
    ) -> Result<EquityStatement, ReportError> {
        let calculator = self.calculator();
        let mut movements = Vec::new();
        let mut opening_balance = Decimal::ZERO;

        for account in self.accounts_in(AccountCategory::Equity)? {
            let opening = calculator.balance_before(&account, range.start())?;
            let closing = calculator.balance_as_of(&account, range.end())?;
            opening_balance += opening;
            if opening.is_zero() && closing.is_zero() {
                continue;
            }
            movements.push(EquityMovement {
                account_number: account.account_number,
                account_name: account.account_name,
                opening_balance: opening,
                closing_balance: closing,
                change: closing - opening,
            });
        }

        let dividends_paid = Decimal::ZERO;
        let capital_contributions = Decimal::ZERO;
        let other_comprehensive_income = Decimal::ZERO;
        let closing_balance = opening_balance + net_income - dividends_paid
            + capital_contributions
            + other_comprehensive_income;

        debug!(
            tenant_id = %self.tenant(),
            period = %range,
            accounts = movements.len(),
            %closing_balance,
            "Generated equity statement"
        );

        Ok(EquityStatement {
            header: self.header(StatementKind::EquityStatement, *range),
            movements,
            totals: EquityTotals {
                opening_balance,
                net_income,
                dividends_paid,
                capital_contributions,
                other_comprehensive_income,
                closing_balance,
            },
        })
    }
}
