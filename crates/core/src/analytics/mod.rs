//! Ratio and comparative analytics over generated statements.

pub mod comparative;
pub mod ratios;
pub mod reviews;

pub use comparative::{
    pct_change, ComparativeAnalysis, MetricChange, PeriodComparison, TrendPoint, Trends,
    YearSummary,
};
pub use ratios::{
    percentage, ratio, EfficiencyRatios, FinancialRatios, LeverageRatios, LiquidityRatios,
    ProfitabilityRatios,
};
pub use reviews::{AnnualReview, MonthlyReview, QuarterSummary};
