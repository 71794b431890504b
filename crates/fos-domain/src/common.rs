//! Shared identifier types and parsing helpers for domain enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw identifier generated by the store for inserted rows.
pub type RowId = i64;

/// Exposes the store-generated identifier of a persisted entity.
pub trait Identifiable {
    type Id: Copy;

    fn id(&self) -> Self::Id;
}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(pub RowId);

        impl $name {
            pub fn get(self) -> RowId {
                self.0
            }
        }

        impl From<RowId> for $name {
            fn from(value: RowId) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

row_id!(
    /// Identifier of an [`Account`](crate::Account).
    AccountId,
    "account"
);
row_id!(
    /// Identifier of a [`Transaction`](crate::Transaction).
    TransactionId,
    "transaction"
);
row_id!(
    /// Identifier of a [`FixedObligation`](crate::FixedObligation).
    ObligationId,
    "obligation"
);
row_id!(
    /// Identifier of a [`Reconciliation`](crate::Reconciliation).
    ReconciliationId,
    "reconciliation"
);

/// Error returned when a stored enum label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
