//! Notes to the financial statements.

use serde::Serialize;

use super::generator::StatementGenerator;
use crate::fiscal::DateRange;
use crate::ledger::LedgerRepository;

/// Basis on which the statements were prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountingPolicies {
    /// Names the accounting standard.
    pub basis_of_preparation: String,
    /// Reporting currency.
    pub reporting_currency: String,
    /// Period covered.
    pub reporting_period: String,
}

/// Policy text accompanying a statement package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesToFinancialStatements {
    /// Accounting policies.
    pub accounting_policies: AccountingPolicies,
    /// Significant accounting estimates.
    pub significant_accounting_estimates: Vec<String>,
    /// Revenue recognition policy.
    pub revenue_recognition: String,
    /// Inventory valuation policy.
    pub inventory_valuation: String,
    /// Depreciation policy.
    pub depreciation_methods: String,
    /// Contingent liabilities.
    pub contingent_liabilities: Vec<String>,
    /// Related party transactions.
    pub related_party_transactions: Vec<String>,
    /// Events after the reporting date.
    pub subsequent_events: Vec<String>,
}

impl<R: LedgerRepository + ?Sized> StatementGenerator<'_, R> {
    /// Notes for a package covering `range`. Nothing here is computed.
    #[must_use]
    pub fn notes(&self, range: &DateRange) -> NotesToFinancialStatements {
        let options = self.options();
        NotesToFinancialStatements {
            accounting_policies: AccountingPolicies {
                basis_of_preparation: format!(
                    "These financial statements have been prepared in accordance with {}.",
                    options.standard
                ),
                reporting_currency: options.currency.display_name(),
                reporting_period: range.to_string(),
            },
            significant_accounting_estimates: Vec::new(),
            revenue_recognition: "Revenue is recognized when performance obligations are satisfied."
                .to_string(),
            inventory_valuation:
                "Inventory is valued at lower of cost or net realizable value using FIFO method."
                    .to_string(),
            depreciation_methods:
                "Fixed assets are depreciated using the straight-line method over their useful lives."
                    .to_string(),
            contingent_liabilities: Vec::new(),
            related_party_transactions: Vec::new(),
            subsequent_events: Vec::new(),
        }
    }
}
