//! Name-keyword fallbacks for asset and liability grouping.
//!
//! Only consulted when an account type carries no explicit subtype.
//! Expense accounts never reach this module: their bucket is required.

use super::types::{AssetSubtype, LiabilitySubtype};

const CURRENT_ASSET_KEYWORDS: [&str; 4] = ["cash", "receivable", "inventory", "prepaid"];
const FIXED_ASSET_KEYWORDS: [&str; 6] = [
    "equipment",
    "building",
    "land",
    "vehicle",
    "furniture",
    "intangible",
];
const CURRENT_LIABILITY_KEYWORDS: [&str; 4] = ["payable", "accrued", "short-term", "current"];
const LONG_TERM_LIABILITY_KEYWORDS: [&str; 4] = ["long-term", "mortgage", "bonds", "loan"];

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Infers an asset subtype from the account name.
#[must_use]
pub fn asset_subtype_from_name(name: &str) -> AssetSubtype {
    if contains_any(name, &CURRENT_ASSET_KEYWORDS) {
        AssetSubtype::Current
    } else if contains_any(name, &FIXED_ASSET_KEYWORDS) {
        AssetSubtype::Fixed
    } else {
        AssetSubtype::Other
    }
}

/// Infers a liability subtype from the account name.
///
/// "Long-term" is checked first so "Current portion of long-term debt"
/// style names are not swallowed by the "current" keyword.
#[must_use]
pub fn liability_subtype_from_name(name: &str) -> LiabilitySubtype {
    if contains_any(name, &LONG_TERM_LIABILITY_KEYWORDS) {
        LiabilitySubtype::LongTerm
    } else if contains_any(name, &CURRENT_LIABILITY_KEYWORDS) {
        LiabilitySubtype::Current
    } else {
        LiabilitySubtype::Other
    }
}

/// Returns true when an account name marks it as a cash account.
#[must_use]
pub fn is_cash_name(name: &str) -> bool {
    name.to_lowercase().contains("cash")
}
