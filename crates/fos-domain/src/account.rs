use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Represents a cash account tracked by the ledger.
///
/// Accounts are never deleted; `active = false` retires them while keeping
/// their transaction history referentially intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub kind: AccountKind,
    pub role: AccountRole,
    pub active: bool,
}

impl Account {
    pub fn is_operational(&self) -> bool {
        self.role == AccountRole::Operational
    }
}

impl Identifiable for Account {
    type Id = AccountId;

    fn id(&self) -> AccountId {
        self.id
    }
}

/// Input for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub role: AccountRole,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, kind: AccountKind, role: AccountRole) -> Self {
        Self {
            name: name.into(),
            kind,
            role,
        }
    }

    pub fn vault(name: impl Into<String>, kind: AccountKind) -> Self {
        Self::new(name, kind, AccountRole::Vault)
    }

    pub fn operational(name: impl Into<String>, kind: AccountKind) -> Self {
        Self::new(name, kind, AccountRole::Operational)
    }
}

/// Legal entity that owns the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Personal,
    Business,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Personal => "personal",
            AccountKind::Business => "business",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "personal" => Ok(AccountKind::Personal),
            "business" => Ok(AccountKind::Business),
            other => Err(ParseEnumError::new("account kind", other)),
        }
    }
}

/// Role of the account in weekly spending control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// The single account whose expenses count as weekly variable spending.
    Operational,
    Vault,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountRole::Operational => "operational",
            AccountRole::Vault => "vault",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "operational" => Ok(AccountRole::Operational),
            "vault" => Ok(AccountRole::Vault),
            other => Err(ParseEnumError::new("account role", other)),
        }
    }
}

/// Read-side selection of accounts. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub id: Option<AccountId>,
    pub role: Option<AccountRole>,
    pub active: Option<bool>,
}

impl AccountFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }

    pub fn by_id(id: AccountId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn matches(&self, account: &Account) -> bool {
        self.id.map_or(true, |id| account.id == id)
            && self.role.map_or(true, |role| account.role == role)
            && self.active.map_or(true, |active| account.active == active)
    }
}
