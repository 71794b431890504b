use fos_config::ConfigError;
use fos_core::CoreError;
use fos_domain::DateParseError;
use fos_storage_sqlite::StoreError;
use thiserror::Error;

/// Error type returned by the [`FinanceOs`](crate::FinanceOs) facade and the binary.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Date(#[from] DateParseError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

impl FinanceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FinanceError::Core(err) if err.is_validation())
            || matches!(self, FinanceError::Date(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FinanceError::Core(err) if err.is_not_found())
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, FinanceError::Store(_))
            || matches!(self, FinanceError::Core(err) if err.is_storage())
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
