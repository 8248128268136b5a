//! Data access seam between the ledger and statement generation.
//!
//! Statement code only ever sees a [`LedgerRepository`]. Persistence
//! backends implement it; [`InMemoryLedger`] is the in-process
//! implementation used by the CLI and by tests.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, JournalEntryId, TenantId};
use tracing::{debug, info};

use super::account::{Account, AccountType};
use super::entry::{EntryStatus, JournalEntry, JournalEntryLine};
use super::error::LedgerError;
use super::types::EntryTotals;
use crate::cache::BalanceCache;
use crate::fiscal::DateRange;

/// A posted journal line together with the entry fields reports need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedLine {
    /// Parent entry.
    pub entry_id: JournalEntryId,
    /// Parent entry number.
    pub entry_number: String,
    /// Parent entry date.
    pub entry_date: NaiveDate,
    /// Parent entry narrative.
    pub entry_description: String,
    /// The line itself.
    pub line: JournalEntryLine,
}

/// Read access to one tenant's ledger.
///
/// Implementations must only return lines of entries whose status is
/// posted; draft and void entries never reach statement generation.
pub trait LedgerRepository: Send + Sync {
    /// All accounts of the tenant, active or not, ordered by account number.
    fn accounts(&self, tenant: TenantId) -> Result<Vec<Account>, LedgerError>;

    /// Posted lines for `account` dated within `range`, ordered by entry
    /// date then entry number.
    fn posted_lines(
        &self,
        tenant: TenantId,
        account: AccountId,
        range: &DateRange,
    ) -> Result<Vec<PostedLine>, LedgerError>;
}

/// Single-tenant ledger held in memory.
///
/// When a [`BalanceCache`] is attached, every successful [`post`](Self::post)
/// invalidates the cached balances of the accounts the entry touches.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    tenant_id: TenantId,
    account_types: BTreeMap<String, AccountType>,
    accounts: Vec<Account>,
    by_number: HashMap<String, usize>,
    by_id: HashMap<AccountId, usize>,
    entries: Vec<JournalEntry>,
    balance_cache: Option<BalanceCache>,
}

impl InMemoryLedger {
    /// Creates an empty ledger for `tenant_id`.
    #[must_use]
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            account_types: BTreeMap::new(),
            accounts: Vec::new(),
            by_number: HashMap::new(),
            by_id: HashMap::new(),
            entries: Vec::new(),
            balance_cache: None,
        }
    }

    /// Attaches a balance cache that posting keeps fresh.
    #[must_use]
    pub fn with_cache(mut self, cache: BalanceCache) -> Self {
        self.balance_cache = Some(cache);
        self
    }

    /// The attached balance cache, if any.
    #[must_use]
    pub const fn balance_cache(&self) -> Option<&BalanceCache> {
        self.balance_cache.as_ref()
    }

    /// The tenant this ledger belongs to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Registers an account type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccountType` if the code is already registered.
    pub fn add_account_type(&mut self, account_type: AccountType) -> Result<(), LedgerError> {
        if self.account_types.contains_key(&account_type.code) {
            return Err(LedgerError::DuplicateAccountType(account_type.code));
        }
        self.account_types.insert(account_type.code.clone(), account_type);
        Ok(())
    }

    /// Looks up a registered account type by code.
    #[must_use]
    pub fn account_type(&self, code: &str) -> Option<&AccountType> {
        self.account_types.get(code)
    }

    /// Registered account types ordered by code.
    pub fn account_types(&self) -> impl Iterator<Item = &AccountType> {
        self.account_types.values()
    }

    /// Adds an account, registering its type if the code is new.
    ///
    /// # Errors
    ///
    /// Returns `TenantMismatch`, `DuplicateAccountNumber`, or
    /// `DuplicateAccountType` when the type code is already registered with
    /// a different definition.
    pub fn add_account(&mut self, account: Account) -> Result<AccountId, LedgerError> {
        self.check_tenant(account.tenant_id)?;
        if self.by_number.contains_key(&account.account_number) {
            return Err(LedgerError::DuplicateAccountNumber(account.account_number));
        }
        match self.account_types.get(&account.account_type.code) {
            Some(registered) if *registered != account.account_type => {
                return Err(LedgerError::DuplicateAccountType(account.account_type.code));
            }
            Some(_) => {}
            None => {
                self.account_types
                    .insert(account.account_type.code.clone(), account.account_type.clone());
            }
        }

        let id = account.id;
        let index = self.accounts.len();
        self.by_number.insert(account.account_number.clone(), index);
        self.by_id.insert(id, index);
        self.accounts.push(account);
        Ok(id)
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.by_id.get(&id).map(|&i| &self.accounts[i])
    }

    /// Looks up an account by its number.
    #[must_use]
    pub fn account_by_number(&self, number: &str) -> Option<&Account> {
        self.by_number.get(number).map(|&i| &self.accounts[i])
    }

    /// All accounts in insertion order.
    #[must_use]
    pub fn all_accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All journal entries in insertion order, whatever their status.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Looks up a journal entry.
    #[must_use]
    pub fn entry(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Stores a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `TenantMismatch`, `AccountNotFound` for a line referencing an
    /// unknown account, or `InvalidStatusTransition` for a non-draft entry.
    pub fn record(&mut self, entry: JournalEntry) -> Result<JournalEntryId, LedgerError> {
        self.check_tenant(entry.tenant_id)?;
        if entry.status != EntryStatus::Draft {
            return Err(LedgerError::InvalidStatusTransition {
                from: entry.status,
                to: EntryStatus::Draft,
            });
        }
        if let Some(line) = entry
            .lines
            .iter()
            .find(|line| !self.by_id.contains_key(&line.account_id))
        {
            return Err(LedgerError::AccountNotFound(line.account_id.to_string()));
        }
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Posts a stored draft through the validation gate, then invalidates
    /// the attached cache for every account the entry touches.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or any validation/lifecycle error.
    pub fn post(&mut self, id: JournalEntryId) -> Result<EntryTotals, LedgerError> {
        let cache = self.balance_cache.clone();
        let entry = self.entry_mut(id)?;
        let totals = entry.post()?;
        info!(entry = %entry.entry_number, date = %entry.entry_date, amount = %totals.total_debit, "posted journal entry");
        if let Some(cache) = cache {
            cache.on_entry_posted(entry);
        }
        Ok(totals)
    }

    /// Voids a stored draft.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `InvalidStatusTransition`.
    pub fn void(&mut self, id: JournalEntryId) -> Result<(), LedgerError> {
        self.entry_mut(id)?.void()
    }

    /// Records a draft reversal of a posted entry and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `InvalidStatusTransition`, or `EmptyReversal`.
    pub fn reverse(
        &mut self,
        id: JournalEntryId,
        entry_date: NaiveDate,
    ) -> Result<JournalEntryId, LedgerError> {
        let original = self.entry(id).ok_or(LedgerError::EntryNotFound(id))?;
        let reversal = original.reverse(entry_date)?;
        debug!(original = %original.entry_number, reversal = %reversal.entry_number, "recorded reversal");
        self.record(reversal)
    }

    fn entry_mut(&mut self, id: JournalEntryId) -> Result<&mut JournalEntry, LedgerError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::EntryNotFound(id))
    }

    fn check_tenant(&self, found: TenantId) -> Result<(), LedgerError> {
        if found == self.tenant_id {
            Ok(())
        } else {
            Err(LedgerError::TenantMismatch {
                expected: self.tenant_id,
                found,
            })
        }
    }
}

impl LedgerRepository for InMemoryLedger {
    fn accounts(&self, tenant: TenantId) -> Result<Vec<Account>, LedgerError> {
        self.check_tenant(tenant)?;
        let mut accounts = self.accounts.clone();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(accounts)
    }

    fn posted_lines(
        &self,
        tenant: TenantId,
        account: AccountId,
        range: &DateRange,
    ) -> Result<Vec<PostedLine>, LedgerError> {
        self.check_tenant(tenant)?;
        if !self.by_id.contains_key(&account) {
            return Err(LedgerError::AccountNotFound(account.to_string()));
        }

        let mut lines: Vec<PostedLine> = self
            .entries
            .iter()
            .filter(|entry| entry.is_posted() && range.contains(entry.entry_date))
            .flat_map(|entry| {
                entry
                    .lines
                    .iter()
                    .filter(|line| line.account_id == account)
                    .map(|line| PostedLine {
                        entry_id: entry.id,
                        entry_number: entry.entry_number.clone(),
                        entry_date: entry.entry_date,
                        entry_description: entry.description.clone(),
                        line: line.clone(),
                    })
            })
            .collect();
        lines.sort_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then_with(|| a.entry_number.cmp(&b.entry_number))
        });
        Ok(lines)
    }
}
