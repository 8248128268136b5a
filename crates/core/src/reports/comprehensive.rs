//! All four statements plus notes for one period.

use serde::Serialize;
use tracing::info;

use super::balance_sheet::BalanceSheet;
use super::cash_flow::CashFlowStatement;
use super::equity::EquityStatement;
use super::error::ReportError;
use super::generator::StatementGenerator;
use super::income::IncomeStatement;
use super::notes::NotesToFinancialStatements;
use super::types::{StatementHeader, StatementKind};
use crate::fiscal::DateRange;
use crate::ledger::LedgerRepository;

/// Complete set of financial statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialStatementPackage {
    /// Package header.
    pub header: StatementHeader,
    /// Balance sheet at the period end.
    pub balance_sheet: BalanceSheet,
    /// Income statement for the period.
    pub income_statement: IncomeStatement,
    /// Cash flow statement for the period.
    pub cash_flow: CashFlowStatement,
    /// Statement of changes in equity for the period.
    pub equity_statement: EquityStatement,
    /// Notes.
    pub notes_to_financial_statements: NotesToFinancialStatements,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates every statement for `range`. The income statement is
    /// computed once and its net income feeds the cash flow and equity
    /// statements.
    pub fn comprehensive(&self, range: &DateRange) -> Result<FinancialStatementPackage, ReportError> {
        let income_statement = self.income_statement(range)?;
        let net_income = income_statement.totals.net_income;
        let balance_sheet = self.balance_sheet(range)?;
        let cash_flow = self.cash_flow_with_net_income(range, net_income)?;
        let equity_statement = self.equity_with_net_income(range, net_income)?;

        info!(
            tenant_id = %self.tenant(),
            period = %range,
            standard = %self.options().standard,
            balanced = balance_sheet.totals.is_balanced,
            "Generated financial statement package"
        );

        Ok(FinancialStatementPackage {
            header: self.header(StatementKind::Comprehensive, *range),
            balance_sheet,
            income_statement,
            cash_flow,
            equity_statement,
            notes_to_financial_statements: self.notes(range),
        })
    }
}
