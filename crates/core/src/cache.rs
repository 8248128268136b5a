//! Display-balance caching using Moka.
//!
//! Dashboards and account lists show many balances that change only when
//! entries are posted. [`BalanceCache`] keeps those values for a short time.
//! Statement generation never reads from it: statements always recompute
//! from posted lines.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use ledgerly_shared::config::CacheConfig;
use ledgerly_shared::types::{AccountId, TenantId};
use moka::sync::Cache;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::ledger::{Account, BalanceCalculator, JournalEntry, LedgerError, LedgerRepository};

/// Default cache capacity (number of balances).
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Cache key: one account's balance at the close of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BalanceKey {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account.
    pub account_id: AccountId,
    /// As-of date.
    pub as_of: NaiveDate,
}

/// Read-through cache of as-of balances for display.
///
/// Posting an entry invalidates every cached balance of the accounts it
/// touches (see [`BalanceCache::on_entry_posted`]). Attach the cache with
/// [`InMemoryLedger::with_cache`](crate::ledger::InMemoryLedger::with_cache)
/// and posting runs the invalidation itself.
#[derive(Clone)]
pub struct BalanceCache {
    cache: Cache<BalanceKey, Decimal>,
}

impl fmt::Debug for BalanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalanceCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl BalanceCache {
    /// Creates a cache with default settings.
    ///
    /// Default: 10,000 balances max, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of balances to cache
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self { cache }
    }

    /// Creates a cache from the `cache` configuration section.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Returns the balance of `account` as of `as_of`, computing and
    /// caching it on a miss.
    pub fn balance_as_of<R: LedgerRepository + ?Sized>(
        &self,
        calculator: &BalanceCalculator<'_, R>,
        account: &Account,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let key = BalanceKey {
            tenant_id: account.tenant_id,
            account_id: account.id,
            as_of,
        };

        if let Some(balance) = self.cache.get(&key) {
            return Ok(balance);
        }

        let balance = calculator.balance_as_of(account, as_of)?;
        self.cache.insert(key, balance);
        Ok(balance)
    }

    /// Drops every cached balance of `account_id`.
    pub fn invalidate_account(&self, tenant_id: TenantId, account_id: AccountId) {
        let result = self.cache.invalidate_entries_if(move |key, _| {
            key.tenant_id == tenant_id && key.account_id == account_id
        });
        if let Err(err) = result {
            warn!(%account_id, error = %err, "Balance invalidation failed, clearing cache");
            self.cache.invalidate_all();
        }
    }

    /// Invalidates the accounts touched by a newly posted entry.
    pub fn on_entry_posted(&self, entry: &JournalEntry) {
        let accounts = entry.account_ids();
        debug!(entry = %entry.entry_number, accounts = accounts.len(), "Invalidating cached balances");
        for account_id in accounts {
            self.invalidate_account(entry.tenant_id, account_id);
        }
    }

    /// Returns a cached balance without computing it.
    #[must_use]
    pub fn cached(&self, key: &BalanceKey) -> Option<Decimal> {
        self.cache.get(key)
    }
}

impl Default for BalanceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AccountType, Classification, InMemoryLedger, JournalEntryLine};
    use rust_decimal_macros::dec;

    fn fixture() -> (InMemoryLedger, Account, Account) {
        let mut ledger = InMemoryLedger::new(TenantId::new());
        let tenant = ledger.tenant_id();
        let cash = Account::new(tenant, "1000", "Cash", AccountType::new("CA", "Current Assets", Classification::Asset(None)))
            .with_opening_balance(dec!(100), None);
        let sales = Account::new(tenant, "4000", "Sales", AccountType::new("REV", "Revenue", Classification::Revenue));
        ledger.add_account(cash.clone()).unwrap();
        ledger.add_account(sales.clone()).unwrap();
        (ledger, cash, sales)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    }

    fn cash_sale(ledger: &InMemoryLedger, number: &str, cash: &Account, sales: &Account) -> JournalEntry {
        JournalEntry::new(ledger.tenant_id(), number, day(), "Sale")
            .with_line(JournalEntryLine::debit(cash.id, dec!(40)))
            .with_line(JournalEntryLine::credit(sales.id, dec!(40)))
    }

    #[test]
    fn test_posting_refreshes_attached_cache() {
        let (ledger, cash, sales) = fixture();
        let cache = BalanceCache::new();
        let mut ledger = ledger.with_cache(cache.clone());
        let key = BalanceKey { tenant_id: ledger.tenant_id(), account_id: cash.id, as_of: day() };

        {
            let calculator = BalanceCalculator::new(&ledger, ledger.tenant_id());
            assert_eq!(cache.balance_as_of(&calculator, &cash, day()).unwrap(), dec!(100));
        }
        assert_eq!(cache.cached(&key), Some(dec!(100)));

        let id = ledger.record(cash_sale(&ledger, "JE-1", &cash, &sales)).unwrap();
        assert_eq!(cache.cached(&key), Some(dec!(100)));
        ledger.post(id).unwrap();
        assert_eq!(cache.cached(&key), None);

        let calculator = BalanceCalculator::new(&ledger, ledger.tenant_id());
        assert_eq!(cache.balance_as_of(&calculator, &cash, day()).unwrap(), dec!(140));
    }

    #[test]
    fn test_detached_cache_needs_explicit_invalidation() {
        let (mut ledger, cash, sales) = fixture();
        let cache = BalanceCache::new();
        {
            let calculator = BalanceCalculator::new(&ledger, ledger.tenant_id());
            cache.balance_as_of(&calculator, &cash, day()).unwrap();
        }

        let id = ledger.record(cash_sale(&ledger, "JE-1", &cash, &sales)).unwrap();
        ledger.post(id).unwrap();
        cache.on_entry_posted(ledger.entry(id).unwrap());

        let calculator = BalanceCalculator::new(&ledger, ledger.tenant_id());
        assert_eq!(cache.balance_as_of(&calculator, &cash, day()).unwrap(), dec!(140));
    }

    #[test]
    fn test_invalidation_is_scoped_to_account() {
        let (ledger, cash, sales) = fixture();
        let cache = BalanceCache::with_config(100, 60);
        let calculator = BalanceCalculator::new(&ledger, ledger.tenant_id());
        cache.balance_as_of(&calculator, &cash, day()).unwrap();
        cache.balance_as_of(&calculator, &sales, day()).unwrap();

        cache.invalidate_account(ledger.tenant_id(), sales.id);
        let cash_key = BalanceKey { tenant_id: ledger.tenant_id(), account_id: cash.id, as_of: day() };
        let sales_key = BalanceKey { tenant_id: ledger.tenant_id(), account_id: sales.id, as_of: day() };
        assert_eq!(cache.cached(&cash_key), Some(dec!(100)));
        assert_eq!(cache.cached(&sales_key), None);
    }
}
