//! fos-config
//!
//! Persistent settings for the finance_os binary: where the database lives,
//! the log filter and forecast defaults. Owns the Config model plus disk
//! persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, ReconciliationBasis, DEFAULT_LOG_FILTER};
