//! Domain models for ledger transactions.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Category recorded on both legs of a transfer.
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// An immutable ledger row.
///
/// `amount` is never negative; direction is carried entirely by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: TransactionKind,
    pub account_id: AccountId,
    pub category: Option<String>,
    pub description: Option<String>,
    pub method: Option<PaymentMethod>,
    /// Shared by the two legs of a transfer, absent on every other row.
    pub transfer_group: Option<Uuid>,
}

impl Transaction {
    /// Contribution of this row to its account balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
            TransactionKind::Transfer => 0.0,
        }
    }

    pub fn is_transfer_leg(&self) -> bool {
        self.transfer_group.is_some()
    }
}

impl Identifiable for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}

/// Input for a single ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: TransactionKind,
    pub account_id: AccountId,
    pub category: Option<String>,
    pub description: Option<String>,
    pub method: Option<PaymentMethod>,
    pub transfer_group: Option<Uuid>,
}

impl NewTransaction {
    pub fn new(date: NaiveDate, amount: f64, kind: TransactionKind, account_id: AccountId) -> Self {
        Self {
            date,
            amount,
            kind,
            account_id,
            category: None,
            description: None,
            method: None,
            transfer_group: None,
        }
    }

    pub fn income(date: NaiveDate, amount: f64, account_id: AccountId) -> Self {
        Self::new(date, amount, TransactionKind::Income, account_id)
    }

    pub fn expense(date: NaiveDate, amount: f64, account_id: AccountId) -> Self {
        Self::new(date, amount, TransactionKind::Expense, account_id)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// Request to move money between two accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub date: NaiveDate,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: f64,
    pub description: Option<String>,
    pub method: Option<PaymentMethod>,
}

impl TransferRequest {
    pub fn new(date: NaiveDate, from_account: AccountId, to_account: AccountId, amount: f64) -> Self {
        Self {
            date,
            from_account,
            to_account,
            amount,
            description: None,
            method: None,
        }
    }
}

/// Identifiers of the two rows written for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    pub group: Uuid,
    pub expense_id: TransactionId,
    pub income_id: TransactionId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Legacy single-row transfer marker; it carries no balance effect.
    Transfer,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "transfer" => Ok(TransactionKind::Transfer),
            other => Err(ParseEnumError::new("transaction kind", other)),
        }
    }
}

/// How money left or entered the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Boleto,
    Debit,
    Card,
    Other,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "boleto" => Ok(PaymentMethod::Boleto),
            "debit" => Ok(PaymentMethod::Debit),
            "card" => Ok(PaymentMethod::Card),
            "other" => Ok(PaymentMethod::Other),
            _ => Err(ParseEnumError::new("payment method", value)),
        }
    }
}

/// Read-side selection of transactions. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<AccountId>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub method: Option<PaymentMethod>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    pub fn of_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn until(mut self, to: NaiveDate) -> Self {
        self.date_to = Some(to);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.account_id.map_or(true, |id| txn.account_id == id)
            && self.kind.map_or(true, |kind| txn.kind == kind)
            && self
                .category
                .as_deref()
                .map_or(true, |category| txn.category.as_deref() == Some(category))
            && self.method.map_or(true, |method| txn.method == Some(method))
            && self.date_from.map_or(true, |from| txn.date >= from)
            && self.date_to.map_or(true, |to| txn.date <= to)
    }
}
