use fos_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt value in {table}.{column}: {detail}")]
    CorruptRow {
        table: &'static str,
        column: &'static str,
        detail: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn corrupt(table: &'static str, column: &'static str, detail: impl ToString) -> Self {
        StoreError::CorruptRow {
            table,
            column,
            detail: detail.to_string(),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_surface_as_core_storage_failures() {
        let err: CoreError = StoreError::corrupt("accounts", "role", "`boss`").into();
        assert!(err.is_storage());
        assert!(err.to_string().contains("accounts.role"));
    }
}
