//! Shared types, errors, and configuration for Ledgerly.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency metadata and monetary rounding
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccountingStandard, AppConfig};
pub use error::{AppError, AppResult};
