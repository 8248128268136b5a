//! Ledger domain types: account categories, classification, and totals.
//!
//! Categories are a closed set. Refinements that statements depend on
//! (asset/liability subtype, expense bucket) are carried by
//! [`Classification`] so that an expense type without a bucket cannot exist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// One of the five account categories of the accounting equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Resources owned (cash, receivables, equipment).
    Asset,
    /// Obligations owed to others.
    Liability,
    /// Owners' residual interest.
    Equity,
    /// Income earned from operations.
    Revenue,
    /// Costs incurred to earn revenue.
    Expense,
}

impl AccountCategory {
    /// All categories in chart-of-accounts order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the side that increases accounts of this category.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true for categories reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for AccountCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::UnknownCategory(s.to_string())),
        }
    }
}

/// Side of the ledger that increases an account's balance.
///
/// - Asset/Expense: balance += debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance += credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Calculates the balance change for a debit/credit pair.
    #[must_use]
    pub fn calculate_balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Balance-sheet grouping for asset accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetSubtype {
    /// Realized within one operating cycle.
    #[serde(rename = "current_asset")]
    Current,
    /// Property, plant and equipment and other long-lived assets.
    #[serde(rename = "fixed_asset")]
    Fixed,
    /// Anything else.
    #[serde(rename = "other_asset")]
    Other,
}

impl AssetSubtype {
    /// Parses a subtype code such as `current_asset` or `fixed`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "current_asset" | "current" => Some(Self::Current),
            "fixed_asset" | "fixed" | "non_current_asset" => Some(Self::Fixed),
            "other_asset" | "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the canonical subtype code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Current => "current_asset",
            Self::Fixed => "fixed_asset",
            Self::Other => "other_asset",
        }
    }
}

/// Balance-sheet grouping for liability accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiabilitySubtype {
    /// Due within one year.
    #[serde(rename = "current_liability")]
    Current,
    /// Due after more than one year.
    #[serde(rename = "long_term_liability")]
    LongTerm,
    /// Anything else.
    #[serde(rename = "other_liability")]
    Other,
}

impl LiabilitySubtype {
    /// Parses a subtype code such as `current_liability` or `long_term`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "current_liability" | "current" => Some(Self::Current),
            "long_term_liability" | "long_term" | "non_current_liability" => Some(Self::LongTerm),
            "other_liability" | "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the canonical subtype code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Current => "current_liability",
            Self::LongTerm => "long_term_liability",
            Self::Other => "other_liability",
        }
    }
}

/// Income-statement grouping for expense accounts. Required on every
/// expense account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseBucket {
    /// Cost of goods sold; subtracted before gross profit.
    CostOfSales,
    /// Sales, marketing, commissions.
    Selling,
    /// Salaries, payroll, office costs.
    Administrative,
    /// Rent, utilities, insurance.
    General,
    /// Operating expenses not covered above.
    OtherOperating,
}

impl ExpenseBucket {
    /// Returns true for buckets that reduce operating income after gross profit.
    #[must_use]
    pub const fn is_operating(self) -> bool {
        !matches!(self, Self::CostOfSales)
    }
}

/// Category plus the refinement statements group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Asset with an optional explicit subtype; absent subtypes are
    /// inferred from the account name.
    Asset(Option<AssetSubtype>),
    /// Liability with an optional explicit subtype.
    Liability(Option<LiabilitySubtype>),
    /// Equity.
    Equity,
    /// Revenue.
    Revenue,
    /// Expense with its required bucket.
    Expense(ExpenseBucket),
}

impl Classification {
    /// Builds a classification from loosely typed parts.
    ///
    /// Subtype codes outside the known vocabulary are treated as absent.
    pub fn from_parts(
        type_code: &str,
        category: AccountCategory,
        subtype: Option<&str>,
        expense_bucket: Option<ExpenseBucket>,
    ) -> Result<Self, LedgerError> {
        let subtype = subtype.filter(|s| !s.trim().is_empty());
        Ok(match category {
            AccountCategory::Asset => Self::Asset(subtype.and_then(AssetSubtype::from_code)),
            AccountCategory::Liability => {
                Self::Liability(subtype.and_then(LiabilitySubtype::from_code))
            }
            AccountCategory::Equity => Self::Equity,
            AccountCategory::Revenue => Self::Revenue,
            AccountCategory::Expense => Self::Expense(
                expense_bucket
                    .ok_or_else(|| LedgerError::MissingExpenseBucket(type_code.to_string()))?,
            ),
        })
    }

    /// Returns the account category.
    #[must_use]
    pub const fn category(self) -> AccountCategory {
        match self {
            Self::Asset(_) => AccountCategory::Asset,
            Self::Liability(_) => AccountCategory::Liability,
            Self::Equity => AccountCategory::Equity,
            Self::Revenue => AccountCategory::Revenue,
            Self::Expense(_) => AccountCategory::Expense,
        }
    }

    /// Returns the explicit subtype code, if any.
    #[must_use]
    pub const fn subtype_code(self) -> Option<&'static str> {
        match self {
            Self::Asset(Some(subtype)) => Some(subtype.code()),
            Self::Liability(Some(subtype)) => Some(subtype.code()),
            _ => None,
        }
    }

    /// Returns the expense bucket for expense classifications.
    #[must_use]
    pub const fn expense_bucket(self) -> Option<ExpenseBucket> {
        match self {
            Self::Expense(bucket) => Some(bucket),
            _ => None,
        }
    }
}

/// Journal entry totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
