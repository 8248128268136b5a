//! Flattening statement documents into export rows.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::reports::{
    BalanceSheet, CashFlowStatement, EquityStatement, FinancialStatementPackage, IncomeStatement,
    Section, StatementHeader, TrialBalance,
};

/// Identification lines written above the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHeader {
    /// Statement title.
    pub statement_type: String,
    /// Period label.
    pub period: String,
    /// Accounting standard, when the document names one.
    pub standard: Option<String>,
}

impl From<&StatementHeader> for ExportHeader {
    fn from(header: &StatementHeader) -> Self {
        Self {
            statement_type: header.title.clone(),
            period: header.period.name.clone(),
            standard: Some(header.standard.to_string()),
        }
    }
}

/// One exported row: a line item or a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Dotted section path, e.g. `assets.current`.
    pub section: String,
    /// Account number, empty for totals.
    pub account_number: String,
    /// Account name, or the total's name.
    pub account_name: String,
    /// Amount.
    pub amount: Decimal,
}

/// A document that can be written as rows.
pub trait Tabular: Serialize {
    /// Header block.
    fn export_header(&self) -> ExportHeader;

    /// Line item rows.
    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>);

    /// Total rows.
    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>);
}

fn path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn section_rows(prefix: &str, name: &str, section: &Section, rows: &mut Vec<ExportRow>) {
    let section_path = path(prefix, name);
    rows.extend(section.items.iter().map(|item| ExportRow {
        section: section_path.clone(),
        account_number: item.account_number.clone(),
        account_name: item.account_name.clone(),
        amount: item.amount,
    }));
}

fn totals(prefix: &str, values: &[(&str, Decimal)], rows: &mut Vec<ExportRow>) {
    let section = path(prefix, "totals");
    rows.extend(values.iter().map(|(name, amount)| ExportRow {
        section: section.clone(),
        account_number: String::new(),
        account_name: (*name).to_string(),
        amount: *amount,
    }));
}

impl Tabular for IncomeStatement {
    fn export_header(&self) -> ExportHeader {
        ExportHeader::from(&self.header)
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        section_rows(prefix, "revenue", &self.revenue, rows);
        section_rows(prefix, "cost_of_sales", &self.cost_of_sales, rows);
        let opex = &self.operating_expenses;
        section_rows(prefix, "operating_expenses.selling", &opex.selling, rows);
        section_rows(prefix, "operating_expenses.administrative", &opex.administrative, rows);
        section_rows(prefix, "operating_expenses.general", &opex.general, rows);
        section_rows(prefix, "operating_expenses.other", &opex.other, rows);
        section_rows(prefix, "other_income", &self.other_income, rows);
        section_rows(prefix, "other_expenses", &self.other_expenses, rows);
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let t = &self.totals;
        totals(
            prefix,
            &[
                ("gross_revenue", t.gross_revenue),
                ("total_cogs", t.total_cogs),
                ("gross_profit", t.gross_profit),
                ("gross_profit_margin", t.gross_profit_margin),
                ("total_operating_expenses", t.total_operating_expenses),
                ("operating_income", t.operating_income),
                ("operating_margin", t.operating_margin),
                ("other_income", t.other_income),
                ("other_expenses", t.other_expenses),
                ("income_before_tax", t.income_before_tax),
                ("tax_expense", t.tax_expense),
                ("net_income", t.net_income),
                ("net_profit_margin", t.net_profit_margin),
            ],
            rows,
        );
    }
}

impl Tabular for BalanceSheet {
    fn export_header(&self) -> ExportHeader {
        ExportHeader::from(&self.header)
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        section_rows(prefix, "assets.current", &self.assets.current, rows);
        section_rows(prefix, "assets.fixed", &self.assets.fixed, rows);
        section_rows(prefix, "assets.other", &self.assets.other, rows);
        section_rows(prefix, "liabilities.current", &self.liabilities.current, rows);
        section_rows(prefix, "liabilities.long_term", &self.liabilities.long_term, rows);
        section_rows(prefix, "liabilities.other", &self.liabilities.other, rows);
        section_rows(prefix, "equity", &self.equity.accounts, rows);
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let t = &self.totals;
        totals(
            prefix,
            &[
                ("retained_earnings", self.equity.retained_earnings),
                ("total_assets", t.total_assets),
                ("total_liabilities", t.total_liabilities),
                ("total_equity", t.total_equity),
                ("total_liabilities_and_equity", t.total_liabilities_and_equity),
                ("difference", t.difference),
            ],
            rows,
        );
    }
}

impl Tabular for CashFlowStatement {
    fn export_header(&self) -> ExportHeader {
        ExportHeader::from(&self.header)
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        section_rows(prefix, "operating.adjustments", &self.operating.adjustments, rows);
        section_rows(
            prefix,
            "operating.working_capital_changes",
            &self.operating.working_capital_changes,
            rows,
        );
        section_rows(prefix, "investing", &self.investing, rows);
        section_rows(prefix, "financing", &self.financing, rows);
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let t = &self.totals;
        totals(
            prefix,
            &[
                ("net_income", self.operating.net_income),
                ("net_cash_from_operating", t.net_cash_from_operating),
                ("net_cash_from_investing", t.net_cash_from_investing),
                ("net_cash_from_financing", t.net_cash_from_financing),
                ("net_change_in_cash", t.net_change_in_cash),
                ("cash_beginning", t.cash_beginning),
                ("cash_ending", t.cash_ending),
                ("cash_end_per_ledger", t.cash_end_per_ledger),
            ],
            rows,
        );
    }
}

impl Tabular for EquityStatement {
    fn export_header(&self) -> ExportHeader {
        ExportHeader::from(&self.header)
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let section = path(prefix, "movements");
        for movement in &self.movements {
            for (column, amount) in [
                ("opening_balance", movement.opening_balance),
                ("change", movement.change),
                ("closing_balance", movement.closing_balance),
            ] {
                rows.push(ExportRow {
                    section: path(&section, column),
                    account_number: movement.account_number.clone(),
                    account_name: movement.account_name.clone(),
                    amount,
                });
            }
        }
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let t = &self.totals;
        totals(
            prefix,
            &[
                ("opening_balance", t.opening_balance),
                ("net_income", t.net_income),
                ("dividends_paid", t.dividends_paid),
                ("capital_contributions", t.capital_contributions),
                ("other_comprehensive_income", t.other_comprehensive_income),
                ("closing_balance", t.closing_balance),
            ],
            rows,
        );
    }
}

impl Tabular for FinancialStatementPackage {
    fn export_header(&self) -> ExportHeader {
        ExportHeader::from(&self.header)
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        self.balance_sheet.line_rows(&path(prefix, "balance_sheet"), rows);
        self.income_statement.line_rows(&path(prefix, "income_statement"), rows);
        self.cash_flow.line_rows(&path(prefix, "cash_flow"), rows);
        self.equity_statement.line_rows(&path(prefix, "equity_statement"), rows);
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        self.balance_sheet.total_rows(&path(prefix, "balance_sheet"), rows);
        self.income_statement.total_rows(&path(prefix, "income_statement"), rows);
        self.cash_flow.total_rows(&path(prefix, "cash_flow"), rows);
        self.equity_statement.total_rows(&path(prefix, "equity_statement"), rows);
    }
}

impl Tabular for TrialBalance {
    fn export_header(&self) -> ExportHeader {
        ExportHeader {
            statement_type: "Trial Balance".to_string(),
            period: format!("As of {}", self.as_of),
            standard: None,
        }
    }

    fn line_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        for row in &self.rows {
            let (side, amount) = if row.debit.is_zero() {
                ("credit", row.credit)
            } else {
                ("debit", row.debit)
            };
            rows.push(ExportRow {
                section: path(prefix, side),
                account_number: row.account_number.clone(),
                account_name: row.account_name.clone(),
                amount,
            });
        }
    }

    fn total_rows(&self, prefix: &str, rows: &mut Vec<ExportRow>) {
        let t = &self.totals;
        totals(
            prefix,
            &[
                ("total_debit", t.total_debit),
                ("total_credit", t.total_credit),
                ("difference", t.difference),
            ],
            rows,
        );
    }
}
