//! Raw row shapes read from SQLite and their conversion into domain types.
//!
//! Rows are read as plain column values first; enum, date and UUID parsing
//! happens afterwards so a bad value is reported with its table and column.

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Row;
use uuid::Uuid;

use fos_domain::{
    calendar, Account, AccountId, FixedObligation, ObligationId, Reconciliation,
    ReconciliationId, RowId, Transaction, TransactionId,
};

use crate::StoreError;

pub(crate) const ACCOUNT_COLUMNS: &str = "id, name, type, role, active";
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, date, amount, transaction_type, account_id, category, description, method, transfer_group";
pub(crate) const OBLIGATION_COLUMNS: &str =
    "id, name, amount, frequency, due_day, account_id, category, active";
pub(crate) const RECONCILIATION_COLUMNS: &str =
    "id, week_start, week_end, account_id, real_balance, computed_balance, delta, notes";

pub(crate) struct AccountRow {
    id: RowId,
    name: String,
    kind: String,
    role: String,
    active: bool,
}

impl AccountRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            role: row.get("role")?,
            active: row.get("active")?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<Account, StoreError> {
        Ok(Account {
            id: AccountId(self.id),
            name: self.name,
            kind: parse_enum("accounts", "type", &self.kind)?,
            role: parse_enum("accounts", "role", &self.role)?,
            active: self.active,
        })
    }
}

pub(crate) struct TransactionRow {
    id: RowId,
    date: String,
    amount: f64,
    kind: String,
    account_id: RowId,
    category: Option<String>,
    description: Option<String>,
    method: Option<String>,
    transfer_group: Option<String>,
}

impl TransactionRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            amount: row.get("amount")?,
            kind: row.get("transaction_type")?,
            account_id: row.get("account_id")?,
            category: row.get("category")?,
            description: row.get("description")?,
            method: row.get("method")?,
            transfer_group: row.get("transfer_group")?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<Transaction, StoreError> {
        Ok(Transaction {
            id: TransactionId(self.id),
            date: parse_date("transactions", "date", &self.date)?,
            amount: self.amount,
            kind: parse_enum("transactions", "transaction_type", &self.kind)?,
            account_id: AccountId(self.account_id),
            category: self.category,
            description: self.description,
            method: self
                .method
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_enum("transactions", "method", &raw))
                .transpose()?,
            transfer_group: self
                .transfer_group
                .map(|raw| parse_uuid("transactions", "transfer_group", &raw))
                .transpose()?,
        })
    }
}

pub(crate) struct ObligationRow {
    id: RowId,
    name: String,
    amount: f64,
    frequency: String,
    due_day: u32,
    account_id: RowId,
    category: Option<String>,
    active: bool,
}

impl ObligationRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            amount: row.get("amount")?,
            frequency: row.get("frequency")?,
            due_day: row.get("due_day")?,
            account_id: row.get("account_id")?,
            category: row.get("category")?,
            active: row.get("active")?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<FixedObligation, StoreError> {
        Ok(FixedObligation {
            id: ObligationId(self.id),
            name: self.name,
            amount: self.amount,
            frequency: parse_enum("planned_fixed", "frequency", &self.frequency)?,
            due_day: self.due_day,
            account_id: AccountId(self.account_id),
            category: self.category,
            active: self.active,
        })
    }
}

pub(crate) struct ReconciliationRow {
    id: RowId,
    week_start: String,
    week_end: String,
    account_id: RowId,
    real_balance: f64,
    computed_balance: f64,
    delta: f64,
    notes: Option<String>,
}

impl ReconciliationRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            week_start: row.get("week_start")?,
            week_end: row.get("week_end")?,
            account_id: row.get("account_id")?,
            real_balance: row.get("real_balance")?,
            computed_balance: row.get("computed_balance")?,
            delta: row.get("delta")?,
            notes: row.get("notes")?,
        })
    }

    pub(crate) fn into_domain(self) -> Result<Reconciliation, StoreError> {
        Ok(Reconciliation {
            id: ReconciliationId(self.id),
            week_start: parse_date("reconciliations", "week_start", &self.week_start)?,
            week_end: parse_date("reconciliations", "week_end", &self.week_end)?,
            account_id: AccountId(self.account_id),
            real_balance: self.real_balance,
            computed_balance: self.computed_balance,
            delta: self.delta,
            note: self.notes,
        })
    }
}

fn parse_enum<T>(table: &'static str, column: &'static str, raw: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.parse::<T>()
        .map_err(|err| StoreError::corrupt(table, column, err))
}

fn parse_date(table: &'static str, column: &'static str, raw: &str) -> Result<NaiveDate, StoreError> {
    calendar::parse_date(raw).map_err(|err| StoreError::corrupt(table, column, err))
}

fn parse_uuid(table: &'static str, column: &'static str, raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|err| StoreError::corrupt(table, column, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_domain::{AccountRole, TransactionKind};

    #[test]
    fn unknown_enum_value_names_its_column() {
        let row = AccountRow {
            id: 1,
            name: "Main".into(),
            kind: "personal".into(),
            role: "operacional".into(),
            active: true,
        };
        let err = row.into_domain().unwrap_err();
        assert!(err.to_string().contains("accounts.role"));
    }

    #[test]
    fn blank_method_reads_as_none() {
        let row = TransactionRow {
            id: 7,
            date: "2026-01-19".into(),
            amount: 10.0,
            kind: "expense".into(),
            account_id: 1,
            category: None,
            description: None,
            method: Some(String::new()),
            transfer_group: None,
        };
        let txn = row.into_domain().unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert!(txn.method.is_none());
    }

    #[test]
    fn account_row_round_trips_role() {
        let row = AccountRow {
            id: 2,
            name: "Reserve".into(),
            kind: "business".into(),
            role: "vault".into(),
            active: false,
        };
        let account = row.into_domain().unwrap();
        assert_eq!(account.role, AccountRole::Vault);
        assert!(!account.active);
    }
}
