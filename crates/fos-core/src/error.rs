use fos_domain::{AccountId, DateParseError, ObligationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Obligation not found: {0}")]
    ObligationNotFound(ObligationId),
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::AccountNotFound(_) | CoreError::ObligationNotFound(_)
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, CoreError::Storage(_))
    }
}

impl From<DateParseError> for CoreError {
    fn from(err: DateParseError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
