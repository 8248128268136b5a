//! Reviews, ratios, and multi-year comparisons over the sample ledger.

#![allow(clippy::unwrap_used)]

use ledgerly_core::analytics::{pct_change, FinancialRatios};
use ledgerly_core::fiscal::DateRange;
use ledgerly_core::ledger::{InMemoryLedger, LedgerSnapshot};
use ledgerly_core::reports::{ReportError, StatementGenerator, StatementOptions};
use ledgerly_shared::types::TenantId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_ledger() -> InMemoryLedger {
    InMemoryLedger::from_snapshot(LedgerSnapshot::sample(TenantId::new())).unwrap()
}

fn generator(ledger: &InMemoryLedger) -> StatementGenerator<'_, InMemoryLedger> {
    StatementGenerator::new(ledger, ledger.tenant_id(), StatementOptions::default())
}

#[test]
fn test_monthly_review_compares_with_previous_month() {
    let ledger = sample_ledger();
    let review = generator(&ledger).monthly_review(2024, 11).unwrap();

    assert_eq!(review.package.income_statement.totals.gross_revenue, dec!(23000));
    assert_eq!(review.previous_income_statement.totals.gross_revenue, Decimal::ZERO);
    assert_eq!(review.changes.revenue.change, dec!(23000));
    assert_eq!(review.changes.revenue.percent_change, dec!(100));
    assert_eq!(review.changes.net_income.current, dec!(-3300));
    assert_eq!(review.changes.net_income.percent_change, Decimal::ZERO);
}

#[test]
fn test_monthly_review_in_january_reaches_back_a_year() {
    let ledger = sample_ledger();
    let review = generator(&ledger).monthly_review(2025, 1).unwrap();
    assert_eq!(
        review.previous_income_statement.header.period.range,
        DateRange::month(2024, 12).unwrap()
    );
}

#[test]
fn test_monthly_review_rejects_bad_month() {
    let ledger = sample_ledger();
    let err = generator(&ledger).monthly_review(2024, 13).unwrap_err();
    assert!(matches!(err, ReportError::InvalidMonth { year: 2024, month: 13 }));
}

#[test]
fn test_annual_review_quarters_and_ratios() {
    let ledger = sample_ledger();
    let review = generator(&ledger).annual_review(2024).unwrap();

    let revenue: Vec<Decimal> = review.quarters.iter().map(|q| q.revenue).collect();
    assert_eq!(revenue, vec![Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(23000)]);
    assert_eq!(review.quarters[3].net_income, dec!(-3300));

    assert_eq!(review.ratios.profitability.gross_profit_margin, dec!(60.87));
    assert_eq!(review.ratios.liquidity.current_ratio, dec!(5.135));
    assert_eq!(review.ratios.liquidity.working_capital, dec!(82700));
    assert_eq!(review.ratios.leverage.debt_to_equity, dec!(0.6267));
    assert_eq!(review.ratios, FinancialRatios::from_package(&review.package));
}

#[test]
fn test_comparative_analysis_orders_years_and_trends() {
    let ledger = sample_ledger();
    let analysis = generator(&ledger).comparative_analysis(2022, 2024).unwrap();

    let years: Vec<i32> = analysis.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2022, 2023, 2024]);
    assert_eq!(analysis.years[2].revenue, dec!(23000));
    assert_eq!(analysis.years[1].total_assets, dec!(185000));
    assert_eq!(analysis.years[2].total_assets, dec!(181700));

    assert_eq!(analysis.trends.revenue_growth.len(), 2);
    assert_eq!(analysis.trends.revenue_growth[1].year, 2024);
    assert_eq!(analysis.trends.revenue_growth[1].growth, dec!(100));
    assert_eq!(
        analysis.trends.asset_growth[1].growth,
        pct_change(dec!(185000), dec!(181700))
    );
    assert_eq!(analysis.trends.asset_growth[1].growth, dec!(-1.78));
}

#[test]
fn test_comparative_analysis_rejects_inverted_range() {
    let ledger = sample_ledger();
    let err = generator(&ledger).comparative_analysis(2025, 2024).unwrap_err();
    assert!(matches!(err, ReportError::InvalidYearRange { start: 2025, end: 2024 }));
}
