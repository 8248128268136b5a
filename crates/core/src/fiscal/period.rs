//! Validated date ranges and reporting periods.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::error::ReportError;

/// Inclusive `[start, end]` date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Everything up to and including `end`.
    #[must_use]
    pub fn through(end: NaiveDate) -> Self {
        Self {
            start: NaiveDate::MIN,
            end,
        }
    }

    /// A calendar month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for a month outside 1..=12 or an unrepresentable year.
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ReportError::InvalidMonth { year, month })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(ReportError::InvalidMonth { year, month })?;
        Ok(Self { start, end })
    }

    /// A calendar quarter (1..=4).
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuarter` for a quarter outside 1..=4 or an unrepresentable year.
    pub fn quarter(year: i32, quarter: u32) -> Result<Self, ReportError> {
        if !(1..=4).contains(&quarter) {
            return Err(ReportError::InvalidQuarter { year, quarter });
        }
        let first_month = (quarter - 1) * 3 + 1;
        let start = NaiveDate::from_ymd_opt(year, first_month, 1)
            .ok_or(ReportError::InvalidQuarter { year, quarter })?;
        let end = start
            .checked_add_months(Months::new(3))
            .and_then(|next| next.pred_opt())
            .ok_or(ReportError::InvalidQuarter { year, quarter })?;
        Ok(Self { start, end })
    }

    /// A calendar year.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYearRange` for an unrepresentable year.
    pub fn year(year: i32) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidYearRange {
            start: year,
            end: year,
        };
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        Ok(Self { start, end })
    }

    /// January 1 of `end`'s year through `end`.
    #[must_use]
    pub fn year_to_date(end: NaiveDate) -> Self {
        Self {
            start: end.with_ordinal(1).unwrap_or(end),
            end,
        }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `end - start` in days (0 for a single-day range).
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The range of equal length ending the day before this one starts.
    #[must_use]
    pub fn previous_period(&self) -> Option<Self> {
        let end = self.start.pred_opt()?;
        let start = end.checked_sub_signed(Duration::days(self.days()))?;
        Some(Self { start, end })
    }

    /// The calendar month before the month `start` falls in.
    #[must_use]
    pub fn previous_month(&self) -> Option<Self> {
        let day = self.start.with_day(1)?.pred_opt()?;
        Self::month(day.year(), day.month()).ok()
    }

    /// The same range shifted back one year (Feb 29 clamps to Feb 28).
    #[must_use]
    pub fn previous_year(&self) -> Option<Self> {
        let start = self.start.checked_sub_months(Months::new(12))?;
        let end = self.end.checked_sub_months(Months::new(12))?;
        Some(Self { start, end })
    }

    /// Classifies the range by length.
    #[must_use]
    pub fn period_type(&self) -> PeriodType {
        PeriodType::from_days(self.days())
    }

    /// Human label: "January 2024", "Q1 2024", "FY 2024", or
    /// "2024-01-01 to 2024-02-15" for irregular ranges.
    #[must_use]
    pub fn label(&self) -> String {
        let year = self.start.year();
        if Self::year(year).is_ok_and(|r| r == *self) {
            return format!("FY {year}");
        }
        for quarter in 1..=4 {
            if Self::quarter(year, quarter).is_ok_and(|r| r == *self) {
                return format!("Q{quarter} {year}");
            }
        }
        if Self::month(year, self.start.month()).is_ok_and(|r| r == *self) {
            return self.start.format("%B %Y").to_string();
        }
        format!("{} to {}", self.start, self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Statement period granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Up to 31 days.
    Monthly,
    /// Up to 92 days.
    Quarterly,
    /// Anything longer.
    Annual,
}

impl PeriodType {
    /// Classifies a span of `end - start` days.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        if days <= 31 {
            Self::Monthly
        } else if days <= 92 {
            Self::Quarterly
        } else {
            Self::Annual
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Annual => write!(f, "Annual"),
        }
    }
}

/// A named reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialPeriod {
    /// Display name (see [`DateRange::label`]).
    pub name: String,
    /// Granularity.
    pub period_type: PeriodType,
    /// Covered dates.
    pub range: DateRange,
    /// Closed periods are final.
    pub is_closed: bool,
}

impl FinancialPeriod {
    /// Describes an open period covering `range`.
    #[must_use]
    pub fn from_range(range: DateRange) -> Self {
        Self {
            name: range.label(),
            period_type: range.period_type(),
            range,
            is_closed: false,
        }
    }
}
