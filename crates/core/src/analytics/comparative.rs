//! Period-over-period changes and multi-year trends.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::fiscal::DateRange;
use crate::ledger::LedgerRepository;
use crate::reports::{IncomeStatement, ReportError, StatementGenerator};

/// Percent change from `old` to `new`, rounded to 2 places.
///
/// When `old` is zero the result is 100 if `new` is positive, else 0.
#[must_use]
pub fn pct_change(old: Decimal, new: Decimal) -> Decimal {
    if old.is_zero() {
        return if new > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    ((new - old) / old * Decimal::ONE_HUNDRED).round_dp(2)
}

/// One metric in two periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricChange {
    /// Earlier value.
    pub previous: Decimal,
    /// Later value.
    pub current: Decimal,
    /// `current - previous`.
    pub change: Decimal,
    /// [`pct_change`] of the two.
    pub percent_change: Decimal,
}

impl MetricChange {
    /// Compares `previous` with `current`.
    #[must_use]
    pub fn new(previous: Decimal, current: Decimal) -> Self {
        Self {
            previous,
            current,
            change: current - previous,
            percent_change: pct_change(previous, current),
        }
    }
}

/// Income statement headline figures compared across two periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    /// Later period label.
    pub current_period: String,
    /// Earlier period label.
    pub previous_period: String,
    /// Gross revenue.
    pub revenue: MetricChange,
    /// Gross profit.
    pub gross_profit: MetricChange,
    /// Operating income.
    pub operating_income: MetricChange,
    /// Net income.
    pub net_income: MetricChange,
}

impl PeriodComparison {
    /// Compares two income statements.
    #[must_use]
    pub fn between(previous: &IncomeStatement, current: &IncomeStatement) -> Self {
        let (p, c) = (&previous.totals, &current.totals);
        Self {
            current_period: current.header.period.name.clone(),
            previous_period: previous.header.period.name.clone(),
            revenue: MetricChange::new(p.gross_revenue, c.gross_revenue),
            gross_profit: MetricChange::new(p.gross_profit, c.gross_profit),
            operating_income: MetricChange::new(p.operating_income, c.operating_income),
            net_income: MetricChange::new(p.net_income, c.net_income),
        }
    }
}

/// Headline figures of one calendar year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    /// Calendar year.
    pub year: i32,
    /// Gross revenue.
    pub revenue: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Operating income.
    pub operating_income: Decimal,
    /// Net income.
    pub net_income: Decimal,
    /// Total assets at year end.
    pub total_assets: Decimal,
    /// Total liabilities at year end.
    pub total_liabilities: Decimal,
    /// Total equity at year end.
    pub total_equity: Decimal,
    /// Net cash from operating activities.
    pub operating_cash_flow: Decimal,
}

/// Growth of one metric into `year` from the year before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Later year of the pair.
    pub year: i32,
    /// Percent change from the previous year.
    pub growth: Decimal,
}

/// Year-over-year growth series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trends {
    /// Revenue growth.
    pub revenue_growth: Vec<TrendPoint>,
    /// Net income growth.
    pub profit_growth: Vec<TrendPoint>,
    /// Total asset growth.
    pub asset_growth: Vec<TrendPoint>,
}

impl Trends {
    /// Growth for each consecutive pair of years. Empty for fewer than two years.
    #[must_use]
    pub fn from_years(years: &[YearSummary]) -> Self {
        let mut trends = Self::default();
        for pair in years.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let point = |old, new| TrendPoint {
                year: curr.year,
                growth: pct_change(old, new),
            };
            trends.revenue_growth.push(point(prev.revenue, curr.revenue));
            trends.profit_growth.push(point(prev.net_income, curr.net_income));
            trends.asset_growth.push(point(prev.total_assets, curr.total_assets));
        }
        trends
    }
}

/// Yearly summaries and trends over a span of years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparativeAnalysis {
    /// First year.
    pub start_year: i32,
    /// Last year.
    pub end_year: i32,
    /// One summary per year, in year order.
    pub years: Vec<YearSummary>,
    /// Growth series.
    pub trends: Trends,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Headline figures for calendar `year`.
    pub fn year_summary(&self, year: i32) -> Result<YearSummary, ReportError> {
        let package = self.comprehensive(&DateRange::year(year)?)?;
        let income = &package.income_statement.totals;
        let balance = &package.balance_sheet.totals;
        Ok(YearSummary {
            year,
            revenue: income.gross_revenue,
            gross_profit: income.gross_profit,
            operating_income: income.operating_income,
            net_income: income.net_income,
            total_assets: balance.total_assets,
            total_liabilities: balance.total_liabilities,
            total_equity: balance.total_equity,
            operating_cash_flow: package.cash_flow.totals.net_cash_from_operating,
        })
    }

    /// Summarizes every year from `start_year` to `end_year` inclusive.
    /// Years are generated in parallel.
    pub fn comparative_analysis(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<ComparativeAnalysis, ReportError> {
        if start_year > end_year {
            return Err(ReportError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }

        let mut years = (start_year..=end_year)
            .into_par_iter()
            .map(|year| self.year_summary(year))
            .collect::<Result<Vec<_>, _>>()?;
        years.sort_by_key(|summary| summary.year);

        let trends = Trends::from_years(&years);
        info!(
            tenant_id = %self.tenant(),
            start_year,
            end_year,
            years = years.len(),
            "Generated comparative analysis"
        );

        Ok(ComparativeAnalysis {
            start_year,
            end_year,
            years,
            trends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), dec!(0), dec!(0))]
    #[case(dec!(0), dec!(100), dec!(100))]
    #[case(dec!(0), dec!(-40), dec!(0))]
    #[case(dec!(100), dec!(0), dec!(-100))]
    #[case(dec!(100), dec!(150), dec!(50))]
    #[case(dec!(3), dec!(4), dec!(33.33))]
    fn test_pct_change(#[case] old: Decimal, #[case] new: Decimal, #[case] expected: Decimal) {
        assert_eq!(pct_change(old, new), expected);
    }

    fn summary(year: i32, revenue: Decimal, net_income: Decimal, total_assets: Decimal) -> YearSummary {
        YearSummary {
            year,
            revenue,
            net_income,
            total_assets,
            ..YearSummary::default()
        }
    }

    #[test]
    fn test_trends_need_two_years() {
        assert_eq!(Trends::from_years(&[]), Trends::default());
        assert_eq!(
            Trends::from_years(&[summary(2024, dec!(1), dec!(1), dec!(1))]),
            Trends::default()
        );
    }

    #[test]
    fn test_trends_pair_consecutive_years() {
        let trends = Trends::from_years(&[
            summary(2022, dec!(100), dec!(10), dec!(1000)),
            summary(2023, dec!(150), dec!(5), dec!(1000)),
            summary(2024, dec!(120), dec!(0), dec!(1100)),
        ]);
        assert_eq!(trends.revenue_growth, vec![
            TrendPoint { year: 2023, growth: dec!(50) },
            TrendPoint { year: 2024, growth: dec!(-20) },
        ]);
        assert_eq!(trends.profit_growth[0].growth, dec!(-50));
        assert_eq!(trends.profit_growth[1].growth, dec!(-100));
        assert_eq!(trends.asset_growth[1].growth, dec!(10));
    }

    #[test]
    fn test_metric_change() {
        let change = MetricChange::new(dec!(200), dec!(150));
        assert_eq!(change.change, dec!(-50));
        assert_eq!(change.percent_change, dec!(-25));
    }
}
