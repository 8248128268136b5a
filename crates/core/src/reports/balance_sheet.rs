//! Balance sheet.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ReportError;
use super::generator::StatementGenerator;
use super::types::{Section, StatementHeader, StatementKind};
use crate::analytics::ratios::ratio;
use crate::fiscal::DateRange;
use crate::ledger::{AccountCategory, AssetSubtype, LedgerRepository, LiabilitySubtype};

/// Assets grouped by subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetSections {
    /// Current assets.
    pub current: Section,
    /// Fixed assets.
    pub fixed: Section,
    /// Other assets.
    pub other: Section,
    /// All assets.
    pub total: Decimal,
}

/// Liabilities grouped by subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiabilitySections {
    /// Current liabilities.
    pub current: Section,
    /// Long-term liabilities.
    pub long_term: Section,
    /// Other liabilities.
    pub other: Section,
    /// All liabilities.
    pub total: Decimal,
}

/// Equity accounts plus year-to-date retained earnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquitySection {
    /// Equity account balances.
    pub accounts: Section,
    /// Year-to-date revenue less expenses, before tax.
    pub retained_earnings: Decimal,
    /// Accounts plus retained earnings.
    pub total: Decimal,
}

/// Balance sheet totals and the accounting-equation check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheetTotals {
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity including retained earnings.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: Decimal,
    /// Assets less liabilities and equity.
    pub difference: Decimal,
    /// `|difference|` is within the configured tolerance.
    pub is_balanced: bool,
}

/// Ratios derived from the balance sheet alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheetRatios {
    /// Current assets over current liabilities.
    pub current_ratio: Decimal,
    /// Liabilities over equity.
    pub debt_to_equity: Decimal,
    /// Equity over assets.
    pub equity_ratio: Decimal,
}

/// Financial position at the end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    /// Document header.
    pub header: StatementHeader,
    /// Date the balances are taken at.
    pub as_of: NaiveDate,
    /// Assets.
    pub assets: AssetSections,
    /// Liabilities.
    pub liabilities: LiabilitySections,
    /// Equity.
    pub equity: EquitySection,
    /// Totals.
    pub totals: BalanceSheetTotals,
    /// Ratios.
    pub ratios: BalanceSheetRatios,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates the balance sheet at the end of `range`.
    pub fn balance_sheet(&self, range: &DateRange) -> Result<BalanceSheet, ReportError> {
        let as_of = range.end();
        let calculator = self.calculator();
        let mut assets = AssetSections::default();
        let mut liabilities = LiabilitySections::default();
        let mut equity = EquitySection::default();

        for account in self.active_accounts()? {
            let category = account.category();
            if !category.is_balance_sheet() {
                continue;
            }
            let balance = calculator.balance_as_of(&account, as_of)?;
            match category {
                AccountCategory::Asset => match account.asset_subtype() {
                    Some(AssetSubtype::Current) => assets.current.push(&account, balance),
                    Some(AssetSubtype::Fixed) => assets.fixed.push(&account, balance),
                    _ => assets.other.push(&account, balance),
                },
                AccountCategory::Liability => match account.liability_subtype() {
                    Some(LiabilitySubtype::Current) => liabilities.current.push(&account, balance),
                    Some(LiabilitySubtype::LongTerm) => {
                        liabilities.long_term.push(&account, balance);
                    }
                    _ => liabilities.other.push(&account, balance),
                },
                _ => equity.accounts.push(&account, balance),
            }
        }

        assets.total = assets.current.total + assets.fixed.total + assets.other.total;
        liabilities.total =
            liabilities.current.total + liabilities.long_term.total + liabilities.other.total;
        equity.retained_earnings = self.pre_tax_income(&DateRange::year_to_date(as_of))?;
        equity.total = equity.accounts.total + equity.retained_earnings;

        let total_liabilities_and_equity = liabilities.total + equity.total;
        let difference = assets.total - total_liabilities_and_equity;
        let totals = BalanceSheetTotals {
            total_assets: assets.total,
            total_liabilities: liabilities.total,
            total_equity: equity.total,
            total_liabilities_and_equity,
            difference,
            is_balanced: difference.abs() <= self.options().balance_tolerance,
        };
        let ratios = BalanceSheetRatios {
            current_ratio: ratio(assets.current.total, liabilities.current.total),
            debt_to_equity: ratio(liabilities.total, equity.total),
            equity_ratio: ratio(equity.total, assets.total),
        };

        if totals.is_balanced {
            debug!(tenant_id = %self.tenant(), %as_of, total_assets = %totals.total_assets, "Generated balance sheet");
        } else {
            warn!(tenant_id = %self.tenant(), %as_of, %difference, "Balance sheet does not balance");
        }

        Ok(BalanceSheet {
            header: self.header(StatementKind::BalanceSheet, *range),
            as_of,
            assets,
            liabilities,
            equity,
            totals,
            ratios,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        Account, AccountType, Classification, ExpenseBucket, InMemoryLedger, JournalEntry,
        JournalEntryLine,
    };
    use crate::reports::StatementOptions;
    use ledgerly_shared::types::TenantId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn add(ledger: &mut InMemoryLedger, number: &str, name: &str, ty: AccountType, opening: Decimal) -> Account {
        let account = Account::new(ledger.tenant_id(), number, name, ty).with_opening_balance(opening, None);
        ledger.add_account(account.clone()).unwrap();
        account
    }

    #[test]
    fn test_groups_by_subtype_and_balances() {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let asset_type = AccountType::new("ASSET", "Assets", Classification::Asset(None));
        let liability_type = AccountType::new("LIAB", "Liabilities", Classification::Liability(None));
        let cash = add(&mut ledger, "1000", "Cash", asset_type.clone(), dec!(5000));
        add(&mut ledger, "1500", "Equipment", asset_type.clone(), dec!(20000));
        add(&mut ledger, "1900", "Deposits", asset_type, dec!(1000));
        add(&mut ledger, "2000", "Accounts Payable", liability_type.clone(), dec!(3000));
        add(&mut ledger, "2500", "Bank Loan", liability_type, dec!(10000));
        add(
            &mut ledger,
            "3000",
            "Owner's Capital",
            AccountType::new("EQ", "Equity", Classification::Equity),
            dec!(13000),
        );
        let sales = add(&mut ledger, "4000", "Sales", AccountType::new("REV", "Revenue", Classification::Revenue), dec!(0));
        let rent = add(
            &mut ledger,
            "6000",
            "Rent",
            AccountType::new("OPEX", "Operating", Classification::Expense(ExpenseBucket::General)),
            dec!(0),
        );

        let mut entry = JournalEntry::new(ledger.tenant_id(), "JE-1", d(2, 1), "Sale")
            .with_line(JournalEntryLine::debit(cash.id, dec!(800)))
            .with_line(JournalEntryLine::credit(sales.id, dec!(800)));
        let id = ledger.record(entry.clone()).unwrap();
        ledger.post(id).unwrap();
        entry = JournalEntry::new(ledger.tenant_id(), "JE-2", d(2, 2), "Rent")
            .with_line(JournalEntryLine::debit(rent.id, dec!(300)))
            .with_line(JournalEntryLine::credit(cash.id, dec!(300)));
        let id = ledger.record(entry).unwrap();
        ledger.post(id).unwrap();

        let generator = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default());
        let sheet = generator.balance_sheet(&DateRange::month(2024, 2).unwrap()).unwrap();

        assert_eq!(sheet.assets.current.total, dec!(5500));
        assert_eq!(sheet.assets.fixed.total, dec!(20000));
        assert_eq!(sheet.assets.other.total, dec!(1000));
        assert_eq!(sheet.liabilities.current.total, dec!(3000));
        assert_eq!(sheet.liabilities.long_term.total, dec!(10000));
        assert_eq!(sheet.equity.retained_earnings, dec!(500));
        assert_eq!(sheet.totals.total_assets, dec!(26500));
        assert_eq!(sheet.totals.total_liabilities_and_equity, dec!(26500));
        assert!(sheet.totals.is_balanced);
        assert_eq!(sheet.totals.difference, Decimal::ZERO);
        assert_eq!(sheet.ratios.current_ratio, dec!(1.8333));
        assert_eq!(sheet.ratios.debt_to_equity, dec!(0.9630));
        assert_eq!(sheet.ratios.equity_ratio, dec!(0.5094));
    }

    #[test]
    fn test_unbalanced_opening_positions_are_flagged() {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        add(
            &mut ledger,
            "1000",
            "Cash",
            AccountType::new("CA", "Current Assets", Classification::Asset(None)),
            dec!(100),
        );

        let generator = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default());
        let sheet = generator.balance_sheet(&DateRange::month(2024, 2).unwrap()).unwrap();

        assert!(!sheet.totals.is_balanced);
        assert_eq!(sheet.totals.difference, dec!(100));
        assert_eq!(sheet.ratios.debt_to_equity, Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(100.01), true)]
    #[case(dec!(100.02), false)]
    fn test_difference_at_tolerance_counts_as_balanced(#[case] cash_opening: Decimal, #[case] balanced: bool) {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        add(
            &mut ledger,
            "1000",
            "Cash",
            AccountType::new("CA", "Current Assets", Classification::Asset(None)),
            cash_opening,
        );
        add(
            &mut ledger,
            "3000",
            "Owner's Capital",
            AccountType::new("EQ", "Equity", Classification::Equity),
            dec!(100),
        );

        let generator = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default());
        let sheet = generator.balance_sheet(&DateRange::month(2024, 2).unwrap()).unwrap();

        assert_eq!(sheet.totals.difference, cash_opening - dec!(100));
        assert_eq!(sheet.totals.is_balanced, balanced);
    }
}
