//! Sample chart of accounts and one month of postings.

use chrono::NaiveDate;
use ledgerly_shared::types::TenantId;
use rust_decimal::Decimal;

use super::account::AccountType;
use super::entry::{EntryStatus, JournalEntryKind};
use super::snapshot::{AccountRecord, EntryRecord, LedgerSnapshot, LineRecord};
use super::types::{AssetSubtype, Classification, ExpenseBucket, LiabilitySubtype};

/// (code, name, classification)
const ACCOUNT_TYPES: &[(&str, &str, Classification)] = &[
    ("1000", "Cash and Cash Equivalents", Classification::Asset(Some(AssetSubtype::Current))),
    ("1100", "Accounts Receivable", Classification::Asset(Some(AssetSubtype::Current))),
    ("1200", "Inventory", Classification::Asset(Some(AssetSubtype::Current))),
    ("1500", "Property, Plant & Equipment", Classification::Asset(Some(AssetSubtype::Fixed))),
    ("1600", "Accumulated Depreciation", Classification::Asset(Some(AssetSubtype::Fixed))),
    ("2000", "Accounts Payable", Classification::Liability(Some(LiabilitySubtype::Current))),
    ("2100", "Accrued Expenses", Classification::Liability(Some(LiabilitySubtype::Current))),
    ("2500", "Long-term Debt", Classification::Liability(Some(LiabilitySubtype::LongTerm))),
    ("3000", "Common Stock", Classification::Equity),
    ("3100", "Retained Earnings", Classification::Equity),
    ("4000", "Sales Revenue", Classification::Revenue),
    ("4100", "Service Revenue", Classification::Revenue),
    ("5000", "Cost of Goods Sold", Classification::Expense(ExpenseBucket::CostOfSales)),
    ("6000", "Salaries & Wages", Classification::Expense(ExpenseBucket::Administrative)),
    ("6100", "Rent Expense", Classification::Expense(ExpenseBucket::General)),
    ("6200", "Utilities Expense", Classification::Expense(ExpenseBucket::General)),
    ("6300", "Office Supplies", Classification::Expense(ExpenseBucket::Administrative)),
    ("6400", "Depreciation Expense", Classification::Expense(ExpenseBucket::OtherOperating)),
];

/// (type code, account number, name, opening balance)
const ACCOUNTS: &[(&str, &str, &str, i64)] = &[
    ("1000", "1000-01", "Cash - Operating", 50_000),
    ("1100", "1100-01", "Accounts Receivable", 25_000),
    ("1200", "1200-01", "Inventory", 30_000),
    ("1500", "1500-01", "Equipment", 100_000),
    ("1600", "1600-01", "Accumulated Depreciation - Equipment", -20_000),
    ("2000", "2000-01", "Accounts Payable", 15_000),
    ("2100", "2100-01", "Accrued Salaries", 5_000),
    ("2500", "2500-01", "Bank Loan", 50_000),
    ("3000", "3000-01", "Common Stock", 75_000),
    ("3100", "3100-01", "Retained Earnings", 40_000),
    ("4000", "4000-01", "Product Sales", 0),
    ("4100", "4100-01", "Consulting Services", 0),
    ("5000", "5000-01", "Cost of Goods Sold", 0),
    ("6000", "6000-01", "Salaries Expense", 0),
    ("6100", "6100-01", "Rent Expense", 0),
    ("6200", "6200-01", "Utilities Expense", 0),
    ("6300", "6300-01", "Office Supplies Expense", 0),
    ("6400", "6400-01", "Depreciation Expense", 0),
];

/// (number, November day, description, debit account, credit account, amount)
const ENTRIES: &[(&str, u32, &str, &str, &str, i64)] = &[
    ("JE-2024-001", 1, "Record product sales for November", "1000-01", "4000-01", 15_000),
    ("JE-2024-002", 1, "Record cost of goods sold", "5000-01", "1200-01", 9_000),
    ("JE-2024-003", 5, "Consulting services provided", "1100-01", "4100-01", 8_000),
    ("JE-2024-004", 10, "Pay salaries", "6000-01", "1000-01", 12_000),
    ("JE-2024-005", 1, "Monthly rent payment", "6100-01", "1000-01", 3_000),
    ("JE-2024-006", 8, "Utility bills", "6200-01", "1000-01", 800),
    ("JE-2024-007", 3, "Purchase office supplies", "6300-01", "1000-01", 500),
    ("JE-2024-008", 30, "Monthly depreciation", "6400-01", "1600-01", 1_000),
];

impl LedgerSnapshot {
    /// A small trading company: balanced opening positions on 2024-01-01
    /// and eight posted entries in November 2024.
    #[must_use]
    pub fn sample(tenant_id: TenantId) -> Self {
        let opening_date = NaiveDate::from_ymd_opt(2024, 1, 1);

        let account_types = ACCOUNT_TYPES
            .iter()
            .map(|&(code, name, classification)| AccountType::new(code, name, classification))
            .collect();

        let accounts = ACCOUNTS
            .iter()
            .map(|&(type_code, number, name, opening)| AccountRecord {
                account_number: number.to_string(),
                account_name: name.to_string(),
                account_type: type_code.to_string(),
                opening_balance: Decimal::from(opening),
                opening_balance_date: opening_date,
                is_active: true,
            })
            .collect();

        let entries = ENTRIES
            .iter()
            .filter_map(|&(number, day, description, debit, credit, amount)| {
                let amount = Decimal::from(amount);
                Some(EntryRecord {
                    entry_number: number.to_string(),
                    entry_date: NaiveDate::from_ymd_opt(2024, 11, day)?,
                    entry_type: if number == "JE-2024-008" {
                        JournalEntryKind::Adjusting
                    } else {
                        JournalEntryKind::Standard
                    },
                    status: EntryStatus::Posted,
                    description: description.to_string(),
                    reference: None,
                    lines: vec![
                        LineRecord {
                            account_number: debit.to_string(),
                            debit: amount,
                            credit: Decimal::ZERO,
                            description: None,
                        },
                        LineRecord {
                            account_number: credit.to_string(),
                            debit: Decimal::ZERO,
                            credit: amount,
                            description: None,
                        },
                    ],
                })
            })
            .collect();

        Self {
            tenant_id,
            account_types,
            accounts,
            entries,
        }
    }
}
