//! Cash flow statement (indirect method).

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::error::ReportError;
use super::generator::StatementGenerator;
use super::types::{Section, StatementHeader, StatementKind};
use crate::fiscal::DateRange;
use crate::ledger::{AccountCategory, AssetSubtype, LedgerRepository};

/// Cash from operations: net income plus non-cash items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperatingActivities {
    /// Net income from the income statement.
    pub net_income: Decimal,
    /// Non-cash adjustments. Empty for now.
    pub adjustments: Section,
    /// Working capital changes. Empty for now.
    pub working_capital_changes: Section,
    /// Net cash from operating activities.
    pub total: Decimal,
}

/// Cash flow totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CashFlowTotals {
    /// Net cash from operating activities.
    pub net_cash_from_operating: Decimal,
    /// Net cash from investing activities.
    pub net_cash_from_investing: Decimal,
    /// Net cash from financing activities.
    pub net_cash_from_financing: Decimal,
    /// Sum of the three activity totals.
    pub net_change_in_cash: Decimal,
    /// Cash balance the day before the period.
    pub cash_beginning: Decimal,
    /// `cash_beginning + net_change_in_cash`.
    pub cash_ending: Decimal,
    /// Cash balance per the ledger at the period end.
    pub cash_end_per_ledger: Decimal,
}

/// Sources and uses of cash for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowStatement {
    /// Document header.
    pub header: StatementHeader,
    /// Operating activities.
    pub operating: OperatingActivities,
    /// Fixed-asset movements, credits less debits.
    pub investing: Section,
    /// Liability and equity movements, credits less debits.
    pub financing: Section,
    /// Totals.
    pub totals: CashFlowTotals,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates the cash flow statement for `range`.
    pub fn cash_flow_statement(&self, range: &DateRange) -> Result<CashFlowStatement, ReportError> {
        let net_income = self.income_statement(range)?.totals.net_income;
        self.cash_flow_with_net_income(range, net_income)
    }

    pub(crate) fn cash_flow_with_net_income(
        &self,
        range: &DateRange,
        net_income: Decimal,
    ) -> Result<CashFlowStatement, ReportError> {
        let calculator = self.calculator();
        let accounts = self.active_accounts()?;

        let mut operating = OperatingActivities {
            net_income,
            ..OperatingActivities::default()
        };
        operating.total =
            net_income + operating.adjustments.total + operating.working_capital_changes.total;

        let mut investing = Section::default();
        let mut financing = Section::default();
        for account in &accounts {
            let target = match account.category() {
                AccountCategory::Asset if account.asset_subtype() == Some(AssetSubtype::Fixed) => {
                    &mut investing
                }
                AccountCategory::Liability | AccountCategory::Equity => &mut financing,
                _ => continue,
            };
            let sides = calculator.side_totals(account, range)?;
            target.push(account, sides.credit - sides.debit);
        }

        let cash_accounts: Vec<_> = accounts.into_iter().filter(|a| a.is_cash()).collect();
        let cash_beginning = self.total_before(&cash_accounts, range.start())?;
        let cash_end_per_ledger = self.total_as_of(&cash_accounts, range.end())?;

        let net_change_in_cash = operating.total + investing.total + financing.total;
        let totals = CashFlowTotals {
            net_cash_from_operating: operating.total,
            net_cash_from_investing: investing.total,
            net_cash_from_financing: financing.total,
            net_change_in_cash,
            cash_beginning,
            cash_ending: cash_beginning + net_change_in_cash,
            cash_end_per_ledger,
        };

        debug!(
            tenant_id = %self.tenant(),
            period = %range,
            net_change = %net_change_in_cash,
            cash_ending = %totals.cash_ending,
            "Generated cash flow statement"
        );

        Ok(CashFlowStatement {
            header: self.header(StatementKind::CashFlow, *range),
            operating,
            investing,
            financing,
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, AccountType, Classification, InMemoryLedger, JournalEntry, JournalEntryLine};
    use crate::reports::StatementOptions;
    use chrono::NaiveDate;
    use ledgerly_shared::types::TenantId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_investing_financing_and_cash_balances() {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let tenant = ledger.tenant_id();
        let asset = AccountType::new("ASSET", "Assets", Classification::Asset(None));
        let cash = Account::new(tenant, "1000", "Cash - Operating", asset.clone())
            .with_opening_balance(dec!(10000), None);
        let equipment = Account::new(tenant, "1500", "Equipment", asset);
        let loan = Account::new(
            tenant,
            "2500",
            "Bank Loan",
            AccountType::new("LTL", "Long-term Liabilities", Classification::Liability(None)),
        );
        let sales = Account::new(tenant, "4000", "Sales", AccountType::new("REV", "Revenue", Classification::Revenue));
        for account in [&cash, &equipment, &loan, &sales] {
            ledger.add_account(account.clone()).unwrap();
        }

        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let entries = [
            ("JE-1", equipment.id, cash.id, dec!(4000)),
            ("JE-2", cash.id, loan.id, dec!(6000)),
            ("JE-3", cash.id, sales.id, dec!(1000)),
        ];
        for (number, debit, credit, amount) in entries {
            let entry = JournalEntry::new(tenant, number, date, number)
                .with_line(JournalEntryLine::debit(debit, amount))
                .with_line(JournalEntryLine::credit(credit, amount));
            let id = ledger.record(entry).unwrap();
            ledger.post(id).unwrap();
        }

        let options = StatementOptions::default().with_tax_rate(Decimal::ZERO);
        let generator = StatementGenerator::new(&ledger, tenant, options);
        let statement = generator.cash_flow_statement(&DateRange::month(2024, 5).unwrap()).unwrap();

        assert_eq!(statement.operating.net_income, dec!(1000));
        assert!(statement.operating.adjustments.is_empty());
        assert_eq!(statement.totals.net_cash_from_investing, dec!(-4000));
        assert_eq!(statement.totals.net_cash_from_financing, dec!(6000));
        assert_eq!(statement.totals.net_change_in_cash, dec!(3000));
        assert_eq!(statement.totals.cash_beginning, dec!(10000));
        assert_eq!(statement.totals.cash_ending, dec!(13000));
        assert_eq!(statement.totals.cash_end_per_ledger, dec!(13000));
    }
}
