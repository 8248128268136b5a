//! Income statement.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::error::ReportError;
use super::generator::StatementGenerator;
use super::types::{Section, StatementHeader, StatementKind};
use crate::analytics::ratios::percentage;
use crate::fiscal::DateRange;
use crate::ledger::{AccountCategory, ExpenseBucket, LedgerRepository};

/// Operating expenses grouped by bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperatingExpenses {
    /// Selling expenses.
    pub selling: Section,
    /// Administrative expenses.
    pub administrative: Section,
    /// General expenses.
    pub general: Section,
    /// Other operating expenses.
    pub other: Section,
    /// Sum of all four buckets.
    pub total: Decimal,
}

/// Income statement totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncomeStatementTotals {
    /// Revenue activity.
    pub gross_revenue: Decimal,
    /// Cost of sales activity.
    pub total_cogs: Decimal,
    /// Revenue less cost of sales.
    pub gross_profit: Decimal,
    /// Gross profit as a percentage of revenue.
    pub gross_profit_margin: Decimal,
    /// Operating expense activity.
    pub total_operating_expenses: Decimal,
    /// Gross profit less operating expenses.
    pub operating_income: Decimal,
    /// Operating income as a percentage of revenue.
    pub operating_margin: Decimal,
    /// Non-operating income. Always zero for now.
    pub other_income: Decimal,
    /// Non-operating expenses. Always zero for now.
    pub other_expenses: Decimal,
    /// Operating income plus other income less other expenses.
    pub income_before_tax: Decimal,
    /// Flat rate used for `tax_expense`.
    pub tax_rate: Decimal,
    /// `income_before_tax * tax_rate` when income before tax is positive,
    /// rounded to the reporting currency's minor units with banker's
    /// rounding. Zero otherwise.
    pub tax_expense: Decimal,
    /// Income before tax less tax.
    pub net_income: Decimal,
    /// Net income as a percentage of revenue.
    pub net_profit_margin: Decimal,
}

/// Profit and loss for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    /// Document header.
    pub header: StatementHeader,
    /// Revenue accounts.
    pub revenue: Section,
    /// Cost of sales accounts.
    pub cost_of_sales: Section,
    /// Operating expense accounts.
    pub operating_expenses: OperatingExpenses,
    /// Non-operating income. Empty for now.
    pub other_income: Section,
    /// Non-operating expenses. Empty for now.
    pub other_expenses: Section,
    /// Totals.
    pub totals: IncomeStatementTotals,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Generates the income statement for `range` from period activity.
    ///
    /// Tax is booked at currency precision, so `net_income` is exactly
    /// `income_before_tax - tax_expense` as reported.
    pub fn income_statement(&self, range: &DateRange) -> Result<IncomeStatement, ReportError> {
        let calculator = self.calculator();
        let mut revenue = Section::default();
        let mut cost_of_sales = Section::default();
        let mut operating = OperatingExpenses::default();

        for account in self.active_accounts()? {
            match account.category() {
                AccountCategory::Revenue => {
                    revenue.push(&account, calculator.activity_for_period(&account, range)?);
                }
                AccountCategory::Expense => {
                    let amount = calculator.activity_for_period(&account, range)?;
                    match account.expense_bucket() {
                        Some(ExpenseBucket::CostOfSales) => cost_of_sales.push(&account, amount),
                        Some(ExpenseBucket::Selling) => operating.selling.push(&account, amount),
                        Some(ExpenseBucket::Administrative) => {
                            operating.administrative.push(&account, amount);
                        }
                        Some(ExpenseBucket::General) => operating.general.push(&account, amount),
                        Some(ExpenseBucket::OtherOperating) | None => {
                            operating.other.push(&account, amount);
                        }
                    }
                }
                _ => {}
            }
        }

        operating.total = operating.selling.total
            + operating.administrative.total
            + operating.general.total
            + operating.other.total;

        let other_income = Section::default();
        let other_expenses = Section::default();
        let totals = self.income_totals(&revenue, &cost_of_sales, &operating, &other_income, &other_expenses);

        debug!(
            tenant_id = %self.tenant(),
            period = %range,
            gross_revenue = %totals.gross_revenue,
            net_income = %totals.net_income,
            "Generated income statement"
        );

        Ok(IncomeStatement {
            header: self.header(StatementKind::IncomeStatement, *range),
            revenue,
            cost_of_sales,
            operating_expenses: operating,
            other_income,
            other_expenses,
            totals,
        })
    }

    fn income_totals(
        &self,
        revenue: &Section,
        cost_of_sales: &Section,
        operating: &OperatingExpenses,
        other_income: &Section,
        other_expenses: &Section,
    ) -> IncomeStatementTotals {
        let gross_revenue = revenue.total;
        let total_cogs = cost_of_sales.total;
        let gross_profit = gross_revenue - total_cogs;
        let operating_income = gross_profit - operating.total;
        let income_before_tax = operating_income + other_income.total - other_expenses.total;

        let tax_rate = self.options().tax_rate;
        let tax_expense = if income_before_tax > Decimal::ZERO {
            self.options().currency.round(income_before_tax * tax_rate)
        } else {
            Decimal::ZERO
        };
        let net_income = income_before_tax - tax_expense;

        IncomeStatementTotals {
            gross_revenue,
            total_cogs,
            gross_profit,
            gross_profit_margin: percentage(gross_profit, gross_revenue),
            total_operating_expenses: operating.total,
            operating_income,
            operating_margin: percentage(operating_income, gross_revenue),
            other_income: other_income.total,
            other_expenses: other_expenses.total,
            income_before_tax,
            tax_rate,
            tax_expense,
            net_income,
            net_profit_margin: percentage(net_income, gross_revenue),
        }
    }
}
