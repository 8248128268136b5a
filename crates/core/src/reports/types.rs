//! Statement document building blocks.

use ledgerly_shared::config::ReportingConfig;
use ledgerly_shared::types::{Currency, TenantId};
use ledgerly_shared::AccountingStandard;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::fiscal::FinancialPeriod;
use crate::ledger::Account;

/// One account's amount inside a statement section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Amount shown on the statement.
    pub amount: Decimal,
}

/// A list of line items and their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Line items, in account-number order.
    pub items: Vec<LineItem>,
    /// Sum of the item amounts.
    pub total: Decimal,
}

impl Section {
    /// Adds `account` with `amount`. Zero amounts are left out.
    pub fn push(&mut self, account: &Account, amount: Decimal) {
        if amount.is_zero() {
            return;
        }
        self.total += amount;
        self.items.push(LineItem {
            account_number: account.account_number.clone(),
            account_name: account.account_name.clone(),
            amount,
        });
    }

    /// Returns true if the section has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Kinds of statement document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Statement of financial position.
    BalanceSheet,
    /// Profit and loss.
    IncomeStatement,
    /// Indirect-method cash flow.
    CashFlow,
    /// Statement of changes in equity.
    EquityStatement,
    /// All four statements plus notes.
    Comprehensive,
    /// Debit and credit listing of every account.
    TrialBalance,
}

impl StatementKind {
    /// Machine name used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
            Self::EquityStatement => "equity_statement",
            Self::Comprehensive => "comprehensive",
            Self::TrialBalance => "trial_balance",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow Statement",
            Self::EquityStatement => "Statement of Changes in Equity",
            Self::Comprehensive => "Comprehensive Financial Statements",
            Self::TrialBalance => "Trial Balance",
        };
        write!(f, "{title}")
    }
}

impl std::str::FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "balance_sheet" => Ok(Self::BalanceSheet),
            "income_statement" | "profit_and_loss" => Ok(Self::IncomeStatement),
            "cash_flow" => Ok(Self::CashFlow),
            "equity_statement" | "equity" => Ok(Self::EquityStatement),
            "comprehensive" => Ok(Self::Comprehensive),
            "trial_balance" => Ok(Self::TrialBalance),
            _ => Err(format!("Unknown statement kind: {s}")),
        }
    }
}

/// Identifies a statement document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementHeader {
    /// Statement kind.
    pub kind: StatementKind,
    /// Title, e.g. "Balance Sheet".
    pub title: String,
    /// Tenant the figures belong to.
    pub tenant_id: TenantId,
    /// Covered period.
    pub period: FinancialPeriod,
    /// Accounting standard named on the statement.
    pub standard: AccountingStandard,
    /// Reporting currency.
    pub currency: Currency,
}

/// Settings shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOptions {
    /// Accounting standard (labels only).
    pub standard: AccountingStandard,
    /// Reporting currency.
    pub currency: Currency,
    /// Flat tax rate on positive income before tax.
    pub tax_rate: Decimal,
    /// Largest difference still treated as balanced.
    pub balance_tolerance: Decimal,
}

impl StatementOptions {
    /// Replaces the tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Replaces the accounting standard.
    #[must_use]
    pub fn with_standard(mut self, standard: AccountingStandard) -> Self {
        self.standard = standard;
        self
    }
}

impl From<&ReportingConfig> for StatementOptions {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            standard: config.accounting_standard,
            currency: config.currency,
            tax_rate: config.tax_rate,
            balance_tolerance: config.balance_tolerance,
        }
    }
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self::from(&ReportingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AccountType, Classification};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_section_skips_zero_amounts() {
        let account = Account::new(
            TenantId::new(),
            "4000",
            "Sales",
            AccountType::new("REV", "Revenue", Classification::Revenue),
        );
        let mut section = Section::default();
        section.push(&account, dec!(0));
        assert!(section.is_empty());

        section.push(&account, dec!(125.50));
        section.push(&account, dec!(-25.50));
        assert_eq!(section.items.len(), 2);
        assert_eq!(section.total, dec!(100));
    }

    #[rstest]
    #[case("balance_sheet", StatementKind::BalanceSheet)]
    #[case("income-statement", StatementKind::IncomeStatement)]
    #[case("Cash_Flow", StatementKind::CashFlow)]
    #[case("equity", StatementKind::EquityStatement)]
    #[case("comprehensive", StatementKind::Comprehensive)]
    #[case("trial-balance", StatementKind::TrialBalance)]
    fn test_statement_kind_parse(#[case] input: &str, #[case] expected: StatementKind) {
        assert_eq!(input.parse::<StatementKind>().unwrap(), expected);
    }

    #[test]
    fn test_statement_kind_titles() {
        assert_eq!(StatementKind::EquityStatement.to_string(), "Statement of Changes in Equity");
        assert_eq!(StatementKind::CashFlow.as_str(), "cash_flow");
        assert!("ledger".parse::<StatementKind>().is_err());
    }

    #[test]
    fn test_options_from_default_config() {
        let options = StatementOptions::default();
        assert_eq!(options.tax_rate, dec!(0.21));
        assert_eq!(options.balance_tolerance, dec!(0.01));
        assert_eq!(options.standard, AccountingStandard::Gaap);
        assert_eq!(options.with_tax_rate(dec!(0)).tax_rate, dec!(0));
    }
}
