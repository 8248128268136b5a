//! End-to-end statement generation over an in-memory ledger.
//!
//! Covers the full path from recording journal entries through posting to
//! the generated documents and their export.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ledgerly_core::export::{self, ExportFormat};
use ledgerly_core::fiscal::DateRange;
use ledgerly_core::ledger::{
    Account, AccountType, Classification, EntryStatus, ExpenseBucket, InMemoryLedger, JournalEntry,
    JournalEntryKind, JournalEntryLine, LedgerError, LedgerSnapshot,
};
use ledgerly_core::reports::{ReportError, StatementGenerator, StatementOptions};
use ledgerly_shared::types::{AccountId, JournalEntryId, TenantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// Cash, Sales, Rent, and Owner's Capital with a 1000 opening balance.
struct SmallBusiness {
    ledger: InMemoryLedger,
    cash: AccountId,
    sales: AccountId,
    rent: AccountId,
}

impl SmallBusiness {
    fn new() -> Self {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let tenant = ledger.tenant_id();

        let current_assets = AccountType::new("CA", "Current Assets", Classification::Asset(None));
        let equity = AccountType::new("EQ", "Equity", Classification::Equity);
        let revenue = AccountType::new("REV", "Revenue", Classification::Revenue);
        let rent = AccountType::new("RENT", "Rent", Classification::Expense(ExpenseBucket::General));

        let cash = ledger
            .add_account(Account::new(tenant, "1000", "Cash", current_assets).with_opening_balance(dec!(1000), None))
            .unwrap();
        ledger
            .add_account(
                Account::new(tenant, "3000", "Owner's Capital", equity).with_opening_balance(dec!(1000), None),
            )
            .unwrap();
        let sales = ledger.add_account(Account::new(tenant, "4000", "Sales Revenue", revenue)).unwrap();
        let rent = ledger.add_account(Account::new(tenant, "6100", "Rent Expense", rent)).unwrap();

        Self {
            ledger,
            cash,
            sales,
            rent,
        }
    }

    fn post(&mut self, number: &str, on: NaiveDate, debit: AccountId, credit: AccountId, amount: Decimal) {
        let id = self.record(number, on, debit, credit, amount);
        self.ledger.post(id).unwrap();
    }

    fn record(
        &mut self,
        number: &str,
        on: NaiveDate,
        debit: AccountId,
        credit: AccountId,
        amount: Decimal,
    ) -> JournalEntryId {
        let entry = JournalEntry::new(self.ledger.tenant_id(), number, on, format!("Entry {number}"))
            .with_line(JournalEntryLine::debit(debit, amount))
            .with_line(JournalEntryLine::credit(credit, amount));
        self.ledger.record(entry).unwrap()
    }

    /// Jan 5 cash sale of 500, Jan 10 rent of 200.
    fn january() -> Self {
        let mut business = Self::new();
        let (cash, sales, rent) = (business.cash, business.sales, business.rent);
        business.post("JE-1", date(1, 5), cash, sales, dec!(500));
        business.post("JE-2", date(1, 10), rent, cash, dec!(200));
        business
    }

    fn generator(&self, options: StatementOptions) -> StatementGenerator<'_, InMemoryLedger> {
        StatementGenerator::new(&self.ledger, self.ledger.tenant_id(), options)
    }
}

#[test]
fn test_january_statements_without_tax() {
    let business = SmallBusiness::january();
    let generator = business.generator(StatementOptions::default().with_tax_rate(Decimal::ZERO));
    let january = DateRange::month(2024, 1).unwrap();

    let income = generator.income_statement(&january).unwrap();
    assert_eq!(income.totals.gross_revenue, dec!(500));
    assert_eq!(income.totals.total_operating_expenses, dec!(200));
    assert_eq!(income.totals.net_income, dec!(300));

    let balance = generator.balance_sheet(&january).unwrap();
    assert_eq!(balance.totals.total_assets, dec!(1300));
    assert_eq!(balance.equity.retained_earnings, dec!(300));
    assert_eq!(balance.totals.total_equity, dec!(1300));
    assert_eq!(balance.totals.total_liabilities_and_equity, dec!(1300));
    assert!(balance.totals.is_balanced);

    let cash_flow = generator.cash_flow_statement(&january).unwrap();
    assert_eq!(cash_flow.totals.cash_beginning, dec!(1000));
    assert_eq!(cash_flow.totals.cash_end_per_ledger, dec!(1300));
    assert_eq!(cash_flow.totals.net_cash_from_operating, dec!(300));

    let equity = generator.equity_statement(&january).unwrap();
    assert_eq!(equity.totals.opening_balance, dec!(1000));
    assert_eq!(equity.totals.closing_balance, dec!(1300));
}

#[test]
fn test_january_statements_with_default_tax() {
    let business = SmallBusiness::january();
    let generator = business.generator(StatementOptions::default());
    let january = DateRange::month(2024, 1).unwrap();

    let income = generator.income_statement(&january).unwrap();
    assert_eq!(income.totals.income_before_tax, dec!(300));
    assert_eq!(income.totals.tax_expense, dec!(63));
    assert_eq!(income.totals.net_income, dec!(237));
    assert_eq!(income.totals.net_profit_margin, dec!(47.40));

    // Retained earnings on the balance sheet are pre-tax.
    let balance = generator.balance_sheet(&january).unwrap();
    assert!(balance.totals.is_balanced);
    assert_eq!(balance.equity.retained_earnings, dec!(300));
}

#[test]
fn test_drafts_and_voids_never_reach_statements() {
    let mut business = SmallBusiness::january();
    let (cash, sales) = (business.cash, business.sales);
    business.record("JE-3", date(1, 20), cash, sales, dec!(9999));
    let voided = business.record("JE-4", date(1, 21), cash, sales, dec!(5000));
    business.ledger.void(voided).unwrap();

    let generator = business.generator(StatementOptions::default().with_tax_rate(Decimal::ZERO));
    let january = DateRange::month(2024, 1).unwrap();

    assert_eq!(generator.income_statement(&january).unwrap().totals.gross_revenue, dec!(500));
    assert_eq!(generator.balance_sheet(&january).unwrap().totals.total_assets, dec!(1300));
    assert_eq!(
        business.ledger.entries().iter().filter(|e| e.status == EntryStatus::Draft).count(),
        1
    );
}

#[test]
fn test_unbalanced_entry_is_rejected_and_stays_draft() {
    let mut business = SmallBusiness::new();
    let tenant = business.ledger.tenant_id();
    let entry = JournalEntry::new(tenant, "JE-1", date(1, 5), "Lopsided")
        .with_line(JournalEntryLine::debit(business.cash, dec!(500)))
        .with_line(JournalEntryLine::credit(business.sales, dec!(450)));
    let id = business.ledger.record(entry).unwrap();

    let err = business.ledger.post(id).unwrap_err();
    assert!(matches!(err, LedgerError::UnbalancedEntry { .. }));
    assert_eq!(business.ledger.entry(id).unwrap().status, EntryStatus::Draft);
}

#[test]
fn test_reversal_restores_balances() {
    let mut business = SmallBusiness::new();
    let (cash, sales) = (business.cash, business.sales);
    let original = business.record("JE-1", date(1, 5), cash, sales, dec!(500));
    business.ledger.post(original).unwrap();

    let reversal = business.ledger.reverse(original, date(1, 31)).unwrap();
    let reversal_entry = business.ledger.entry(reversal).unwrap();
    assert_eq!(reversal_entry.kind, JournalEntryKind::Reversing);
    assert_eq!(reversal_entry.entry_number, "JE-1-REV");
    business.ledger.post(reversal).unwrap();

    let generator = business.generator(StatementOptions::default());
    let january = DateRange::month(2024, 1).unwrap();
    assert_eq!(generator.income_statement(&january).unwrap().totals.gross_revenue, Decimal::ZERO);

    let ledger = generator.account_ledger("1000", &january).unwrap();
    assert_eq!(ledger.rows.len(), 2);
    assert_eq!(ledger.rows[0].running_balance, dec!(1500));
    assert_eq!(ledger.closing_balance, dec!(1000));
}

#[test]
fn test_reversing_a_draft_is_rejected() {
    let mut business = SmallBusiness::new();
    let (cash, sales) = (business.cash, business.sales);
    let draft = business.record("JE-1", date(1, 5), cash, sales, dec!(500));

    let err = business.ledger.reverse(draft, date(1, 31)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidStatusTransition { .. }));
}

#[test]
fn test_unknown_account_in_account_ledger() {
    let business = SmallBusiness::january();
    let generator = business.generator(StatementOptions::default());
    let err = generator
        .account_ledger("9999", &DateRange::month(2024, 1).unwrap())
        .unwrap_err();
    assert!(matches!(err, ReportError::Ledger(LedgerError::AccountNotFound(_))));
}

#[test]
fn test_sample_ledger_november() {
    let ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::sample(TenantId::new())).unwrap();
    let generator = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default());
    let november = DateRange::month(2024, 11).unwrap();

    let income = generator.income_statement(&november).unwrap();
    assert_eq!(income.totals.gross_revenue, dec!(23000));
    assert_eq!(income.totals.total_cogs, dec!(9000));
    assert_eq!(income.totals.gross_profit, dec!(14000));
    assert_eq!(income.totals.total_operating_expenses, dec!(17300));
    assert_eq!(income.operating_expenses.administrative.total, dec!(12500));
    assert_eq!(income.operating_expenses.general.total, dec!(3800));
    assert_eq!(income.operating_expenses.other.total, dec!(1000));
    assert_eq!(income.totals.operating_income, dec!(-3300));
    assert_eq!(income.totals.tax_expense, Decimal::ZERO);
    assert_eq!(income.totals.net_income, dec!(-3300));

    let balance = generator.balance_sheet(&november).unwrap();
    assert_eq!(balance.assets.current.total, dec!(102700));
    assert_eq!(balance.assets.fixed.total, dec!(79000));
    assert_eq!(balance.totals.total_assets, dec!(181700));
    assert_eq!(balance.liabilities.current.total, dec!(20000));
    assert_eq!(balance.liabilities.long_term.total, dec!(50000));
    assert_eq!(balance.totals.total_equity, dec!(111700));
    assert!(balance.totals.is_balanced);

    let cash_flow = generator.cash_flow_statement(&november).unwrap();
    assert_eq!(cash_flow.totals.cash_beginning, dec!(50000));
    assert_eq!(cash_flow.totals.cash_end_per_ledger, dec!(48700));
    assert_eq!(cash_flow.totals.net_cash_from_investing, dec!(1000));
    assert_eq!(cash_flow.totals.net_cash_from_financing, Decimal::ZERO);

    let trial = generator.trial_balance(date(11, 30)).unwrap();
    assert_eq!(trial.totals.total_debit, dec!(229000));
    assert_eq!(trial.totals.total_credit, dec!(229000));
    assert!(trial.totals.is_balanced);
}

#[test]
fn test_snapshot_reload_produces_identical_package() {
    let ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::sample(TenantId::new())).unwrap();
    let json = serde_json::to_string(&ledger.to_snapshot()).unwrap();
    let reloaded = InMemoryLedger::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();

    let november = DateRange::month(2024, 11).unwrap();
    let before = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default())
        .comprehensive(&november)
        .unwrap();
    let after = StatementGenerator::new(&reloaded, reloaded.tenant_id(), StatementOptions::default())
        .comprehensive(&november)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&before).unwrap(),
        serde_json::to_value(&after).unwrap()
    );
}

#[test]
fn test_comprehensive_package_exports() {
    let ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::sample(TenantId::new())).unwrap();
    let generator = StatementGenerator::new(&ledger, ledger.tenant_id(), StatementOptions::default());
    let package = generator.comprehensive(&DateRange::month(2024, 11).unwrap()).unwrap();

    let mut json = Vec::new();
    export::write(&package, ExportFormat::Json, &mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert!(value.get("balance_sheet").is_some());
    assert!(value.get("notes_to_financial_statements").is_some());

    let mut csv = Vec::new();
    export::write(&package, ExportFormat::Csv, &mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert!(text.starts_with("Financial Statement Export"));
    assert!(text.contains("Product Sales"));
    assert!(text.contains("Standard:,GAAP"));
}
