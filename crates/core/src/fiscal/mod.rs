//! Reporting periods.

pub mod period;

pub use period::{DateRange, FinancialPeriod, PeriodType};
