//! Application configuration management.
//!
//! Values are layered: `config/default`, then `config/{RUN_MODE}`, then
//! `LEDGERLY__SECTION__KEY` environment variables. Every field has a default
//! so an empty environment yields a usable configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Statement generation settings.
    pub reporting: ReportingConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Display-balance cache settings.
    pub cache: CacheConfig,
}

/// Accounting framework a statement package is prepared under.
///
/// Only affects labeling, never computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountingStandard {
    /// US Generally Accepted Accounting Principles.
    #[default]
    Gaap,
    /// International Financial Reporting Standards.
    Ifrs,
}

impl std::fmt::Display for AccountingStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gaap => write!(f, "GAAP"),
            Self::Ifrs => write!(f, "IFRS"),
        }
    }
}

impl std::str::FromStr for AccountingStandard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GAAP" => Ok(Self::Gaap),
            "IFRS" => Ok(Self::Ifrs),
            _ => Err(format!("Unknown accounting standard: {s}")),
        }
    }
}

/// Statement generation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Standard named in statement headers and notes.
    pub accounting_standard: AccountingStandard,
    /// Flat income tax rate applied to positive income before tax.
    pub tax_rate: Decimal,
    /// Reporting currency.
    pub currency: Currency,
    /// Largest difference still treated as balanced.
    pub balance_tolerance: Decimal,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            accounting_standard: AccountingStandard::Gaap,
            tax_rate: Decimal::new(21, 2),
            currency: Currency::Usd,
            balance_tolerance: Decimal::new(1, 2),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ledgerly=info".to_string(),
            json: false,
        }
    }
}

/// Display-balance cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached balances.
    pub max_capacity: u64,
    /// Time-to-live for each cached balance, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl_secs: 300, // 5 minutes
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
