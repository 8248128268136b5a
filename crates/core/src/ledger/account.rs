//! Chart of accounts: account types and tenant-scoped accounts.

use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classify::{asset_subtype_from_name, is_cash_name, liability_subtype_from_name};
use super::error::LedgerError;
use super::types::{
    AccountCategory, AssetSubtype, Classification, ExpenseBucket, LiabilitySubtype, NormalBalance,
};

/// A chart-of-accounts type shared by many accounts.
///
/// Serialized in a flat `{code, name, category, subtype, expense_bucket}`
/// shape; deserialization validates the category and the expense bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccountTypeRecord", into = "AccountTypeRecord")]
pub struct AccountType {
    /// Unique type code (e.g. "CA", "OPEX").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category and grouping refinement.
    pub classification: Classification,
}

/// Wire shape of an [`AccountType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTypeRecord {
    /// Unique type code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category name (asset, liability, equity, revenue, expense).
    pub category: String,
    /// Optional subtype code (current_asset, fixed_asset, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Required for expense types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_bucket: Option<ExpenseBucket>,
}

impl TryFrom<AccountTypeRecord> for AccountType {
    type Error = LedgerError;

    fn try_from(record: AccountTypeRecord) -> Result<Self, Self::Error> {
        let category: AccountCategory = record.category.parse()?;
        let classification = Classification::from_parts(
            &record.code,
            category,
            record.subtype.as_deref(),
            record.expense_bucket,
        )?;
        Ok(Self {
            code: record.code,
            name: record.name,
            classification,
        })
    }
}

impl From<AccountType> for AccountTypeRecord {
    fn from(account_type: AccountType) -> Self {
        Self {
            category: account_type.classification.category().to_string(),
            subtype: account_type.classification.subtype_code().map(str::to_string),
            expense_bucket: account_type.classification.expense_bucket(),
            code: account_type.code,
            name: account_type.name,
        }
    }
}

impl AccountType {
    /// Creates an account type.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, classification: Classification) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            classification,
        }
    }

    /// Returns the account category.
    #[must_use]
    pub const fn category(&self) -> AccountCategory {
        self.classification.category()
    }

    /// Returns the side that increases accounts of this type.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.category().normal_balance()
    }
}

/// A tenant-scoped ledger account.
///
/// Balances are never stored here; they are derived from
/// `opening_balance` plus posted lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account number, unique within the tenant.
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Account type (category and grouping).
    pub account_type: AccountType,
    /// Signed opening balance on the account's normal side.
    pub opening_balance: Decimal,
    /// Date the opening balance was established.
    pub opening_balance_date: Option<NaiveDate>,
    /// Inactive accounts are kept for history but left out of statements.
    pub is_active: bool,
}

impl Account {
    /// Creates an active account with a zero opening balance.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        account_number: impl Into<String>,
        account_name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: AccountId::new(),
            tenant_id,
            account_number: account_number.into(),
            account_name: account_name.into(),
            account_type,
            opening_balance: Decimal::ZERO,
            opening_balance_date: None,
            is_active: true,
        }
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening_balance(mut self, amount: Decimal, as_of: Option<NaiveDate>) -> Self {
        self.opening_balance = amount;
        self.opening_balance_date = as_of;
        self
    }

    /// Marks the account inactive.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the account category.
    #[must_use]
    pub const fn category(&self) -> AccountCategory {
        self.account_type.category()
    }

    /// Returns the side that increases this account.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }

    /// Asset grouping: the explicit subtype, else inferred from the name.
    /// `None` for non-asset accounts.
    #[must_use]
    pub fn asset_subtype(&self) -> Option<AssetSubtype> {
        match self.account_type.classification {
            Classification::Asset(subtype) => {
                Some(subtype.unwrap_or_else(|| asset_subtype_from_name(&self.account_name)))
            }
            _ => None,
        }
    }

    /// Liability grouping: the explicit subtype, else inferred from the name.
    /// `None` for non-liability accounts.
    #[must_use]
    pub fn liability_subtype(&self) -> Option<LiabilitySubtype> {
        match self.account_type.classification {
            Classification::Liability(subtype) => {
                Some(subtype.unwrap_or_else(|| liability_subtype_from_name(&self.account_name)))
            }
            _ => None,
        }
    }

    /// Expense bucket for expense accounts.
    #[must_use]
    pub const fn expense_bucket(&self) -> Option<ExpenseBucket> {
        self.account_type.classification.expense_bucket()
    }

    /// Cash accounts are asset accounts whose name contains "cash".
    #[must_use]
    pub fn is_cash(&self) -> bool {
        self.category() == AccountCategory::Asset && is_cash_name(&self.account_name)
    }
}
