//! Financial ratios.
//!
//! A ratio whose base is zero or negative resolves to zero. That is a
//! convention, not an error.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::reports::{BalanceSheet, CashFlowStatement, FinancialStatementPackage, IncomeStatement};

/// Decimal places kept for percentages.
const PERCENT_DP: u32 = 2;

/// Decimal places kept for multiples.
const RATIO_DP: u32 = 4;

/// `value / base * 100` rounded to 2 places, or 0 unless `base > 0`.
#[must_use]
pub fn percentage(value: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        (value / base * Decimal::ONE_HUNDRED).round_dp(PERCENT_DP)
    } else {
        Decimal::ZERO
    }
}

/// `value / base` rounded to 4 places, or 0 unless `base > 0`.
#[must_use]
pub fn ratio(value: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        (value / base).round_dp(RATIO_DP)
    } else {
        Decimal::ZERO
    }
}

/// Margins and returns, in percent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfitabilityRatios {
    /// Gross profit over revenue.
    pub gross_profit_margin: Decimal,
    /// Operating income over revenue.
    pub operating_profit_margin: Decimal,
    /// Net income over revenue.
    pub net_profit_margin: Decimal,
    /// Net income over total assets.
    pub return_on_assets: Decimal,
    /// Net income over total equity.
    pub return_on_equity: Decimal,
}

/// Short-term solvency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiquidityRatios {
    /// Current assets over current liabilities.
    pub current_ratio: Decimal,
    /// Current assets less current liabilities.
    pub working_capital: Decimal,
}

/// Capital structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeverageRatios {
    /// Total liabilities over total equity.
    pub debt_to_equity: Decimal,
    /// Total liabilities over total assets.
    pub debt_to_assets: Decimal,
    /// Total equity over total assets.
    pub equity_ratio: Decimal,
}

/// Use of assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EfficiencyRatios {
    /// Revenue over total assets.
    pub asset_turnover: Decimal,
    /// Operating cash flow over current liabilities.
    pub operating_cash_flow_ratio: Decimal,
}

/// Ratios derived from one period's statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinancialRatios {
    /// Profitability.
    pub profitability: ProfitabilityRatios,
    /// Liquidity.
    pub liquidity: LiquidityRatios,
    /// Leverage.
    pub leverage: LeverageRatios,
    /// Efficiency.
    pub efficiency: EfficiencyRatios,
}

impl FinancialRatios {
    /// Computes ratios from the statements of one period.
    #[must_use]
    pub fn from_statements(
        income: &IncomeStatement,
        balance: &BalanceSheet,
        cash_flow: &CashFlowStatement,
    ) -> Self {
        let revenue = income.totals.gross_revenue;
        let net_income = income.totals.net_income;
        let total_assets = balance.totals.total_assets;
        let total_liabilities = balance.totals.total_liabilities;
        let total_equity = balance.totals.total_equity;
        let current_assets = balance.assets.current.total;
        let current_liabilities = balance.liabilities.current.total;

        Self {
            profitability: ProfitabilityRatios {
                gross_profit_margin: percentage(income.totals.gross_profit, revenue),
                operating_profit_margin: percentage(income.totals.operating_income, revenue),
                net_profit_margin: percentage(net_income, revenue),
                return_on_assets: percentage(net_income, total_assets),
                return_on_equity: percentage(net_income, total_equity),
            },
            liquidity: LiquidityRatios {
                current_ratio: ratio(current_assets, current_liabilities),
                working_capital: current_assets - current_liabilities,
            },
            leverage: LeverageRatios {
                debt_to_equity: ratio(total_liabilities, total_equity),
                debt_to_assets: ratio(total_liabilities, total_assets),
                equity_ratio: ratio(total_equity, total_assets),
            },
            efficiency: EfficiencyRatios {
                asset_turnover: ratio(revenue, total_assets),
                operating_cash_flow_ratio: ratio(
                    cash_flow.totals.net_cash_from_operating,
                    current_liabilities,
                ),
            },
        }
    }

    /// Computes ratios from a statement package.
    #[must_use]
    pub fn from_package(package: &FinancialStatementPackage) -> Self {
        Self::from_statements(&package.income_statement, &package.balance_sheet, &package.cash_flow)
    }
}
