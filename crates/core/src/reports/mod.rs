//! Financial statement generation.
//!
//! This module derives statement documents from ledger postings:
//! - Income Statement
//! - Balance Sheet
//! - Cash Flow Statement
//! - Statement of Changes in Equity
//! - Notes and the comprehensive package
//! - Trial Balance
//! - Account Ledger

pub mod account_ledger;
pub mod balance_sheet;
pub mod cash_flow;
pub mod comprehensive;
pub mod equity;
pub mod error;
pub mod generator;
pub mod income;
pub mod notes;
pub mod trial_balance;
pub mod types;


pub use account_ledger::{AccountLedger, AccountLedgerRow};
pub use balance_sheet::{
    AssetSections, BalanceSheet, BalanceSheetRatios, BalanceSheetTotals, EquitySection,
    LiabilitySections,
};
pub use cash_flow::{CashFlowStatement, CashFlowTotals, OperatingActivities};
pub use comprehensive::FinancialStatementPackage;
pub use equity::{EquityMovement, EquityStatement, EquityTotals};
pub use error::ReportError;
pub use generator::StatementGenerator;
pub use income::{IncomeStatement, IncomeStatementTotals, OperatingExpenses};
pub use notes::{AccountingPolicies, NotesToFinancialStatements};
pub use trial_balance::{TrialBalance, TrialBalanceRow, TrialBalanceTotals};
pub use types::{LineItem, Section, StatementHeader, StatementKind, StatementOptions};
