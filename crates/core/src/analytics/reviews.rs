//! Monthly and annual reviews.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::comparative::PeriodComparison;
use super::ratios::FinancialRatios;
use crate::fiscal::DateRange;
use crate::ledger::LedgerRepository;
use crate::reports::{FinancialStatementPackage, IncomeStatement, ReportError, StatementGenerator};

/// A month's statements compared with the month before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReview {
    /// Statements for the month.
    pub package: FinancialStatementPackage,
    /// Income statement for the previous month.
    pub previous_income_statement: IncomeStatement,
    /// Month-over-month changes.
    pub changes: PeriodComparison,
}

/// Headline figures of one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuarterSummary {
    /// Quarter number, 1 to 4.
    pub quarter: u32,
    /// Gross revenue.
    pub revenue: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Net income.
    pub net_income: Decimal,
}

/// A year's statements compared with the year before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReview {
    /// Statements for the year.
    pub package: FinancialStatementPackage,
    /// Statements for the previous year.
    pub previous_package: FinancialStatementPackage,
    /// Year-over-year changes.
    pub changes: PeriodComparison,
    /// Ratios for the year.
    pub ratios: FinancialRatios,
    /// Quarterly breakdown.
    pub quarters: Vec<QuarterSummary>,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Reviews calendar month `month` of `year`.
    pub fn monthly_review(&self, year: i32, month: u32) -> Result<MonthlyReview, ReportError> {
        let range = DateRange::month(year, month)?;
        let previous = range
            .previous_month()
            .ok_or(ReportError::InvalidMonth { year, month })?;

        let package = self.comprehensive(&range)?;
        let previous_income_statement = self.income_statement(&previous)?;
        let changes = PeriodComparison::between(&previous_income_statement, &package.income_statement);

        info!(tenant_id = %self.tenant(), year, month, "Generated monthly review");
        Ok(MonthlyReview {
            package,
            previous_income_statement,
            changes,
        })
    }

    /// Reviews calendar `year`.
    pub fn annual_review(&self, year: i32) -> Result<AnnualReview, ReportError> {
        let range = DateRange::year(year)?;
        let previous = range.previous_year().ok_or(ReportError::InvalidYearRange {
            start: year - 1,
            end: year,
        })?;

        let package = self.comprehensive(&range)?;
        let previous_package = self.comprehensive(&previous)?;
        let changes =
            PeriodComparison::between(&previous_package.income_statement, &package.income_statement);
        let ratios = FinancialRatios::from_package(&package);

        let mut quarters = Vec::with_capacity(4);
        for quarter in 1..=4 {
            let totals = self.income_statement(&DateRange::quarter(year, quarter)?)?.totals;
            quarters.push(QuarterSummary {
                quarter,
                revenue: totals.gross_revenue,
                gross_profit: totals.gross_profit,
                net_income: totals.net_income,
            });
        }

        info!(tenant_id = %self.tenant(), year, "Generated annual review");
        Ok(AnnualReview {
            package,
            previous_package,
            changes,
            ratios,
            quarters,
        })
    }
}
