use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;
use rusqlite::{params, types::ToSql, Connection, OptionalExtension};
use tracing::{debug, info};

use fos_core::{CoreError, Store, WriteOp};
use fos_domain::{
    calendar, Account, AccountFilter, FixedObligation, Reconciliation, ReconciliationFilter,
    RowId, Transaction, TransactionFilter,
};

use crate::{
    rows::{
        AccountRow, ObligationRow, ReconciliationRow, TransactionRow, ACCOUNT_COLUMNS,
        OBLIGATION_COLUMNS, RECONCILIATION_COLUMNS, TRANSACTION_COLUMNS,
    },
    schema, StoreError,
};

/// SQLite-backed [`Store`]. Clones share one serialized connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates the database file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self::init(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "sqlite store opened");
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        schema::apply_pragmas(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Backing file; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f` against the raw connection under the store lock.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock();
        Ok(f(&conn)?)
    }

    fn query<R, T>(
        &self,
        sql: &str,
        values: &[Box<dyn ToSql>],
        read: fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>,
        convert: fn(R) -> Result<T, StoreError>,
    ) -> Result<Vec<T>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let params: Vec<&dyn ToSql> = values.iter().map(AsRef::as_ref).collect();
        let raw = stmt
            .query_map(params.as_slice(), read)?
            .collect::<rusqlite::Result<Vec<R>>>()?;
        raw.into_iter().map(convert).collect()
    }
}

fn where_clause(clauses: &[&str]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

fn apply(conn: &Connection, op: &WriteOp) -> Result<Option<RowId>, StoreError> {
    match op {
        WriteOp::InsertAccount(account) => {
            conn.execute(
                "INSERT INTO accounts (name, type, role, active) VALUES (?1, ?2, ?3, 1)",
                params![account.name, account.kind.as_str(), account.role.as_str()],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        }
        WriteOp::SetAccountRole { account, role } => {
            conn.execute(
                "UPDATE accounts SET role = ?1 WHERE id = ?2",
                params![role.as_str(), account.get()],
            )?;
            Ok(None)
        }
        WriteOp::DemoteOperational => {
            conn.execute(
                "UPDATE accounts SET role = 'vault' WHERE role = 'operational'",
                [],
            )?;
            Ok(None)
        }
        WriteOp::SetAccountActive { account, active } => {
            conn.execute(
                "UPDATE accounts SET active = ?1 WHERE id = ?2",
                params![active, account.get()],
            )?;
            Ok(None)
        }
        WriteOp::InsertTransaction(txn) => {
            conn.execute(
                "INSERT INTO transactions
                    (date, amount, transaction_type, account_id, category, description, method, transfer_group)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    calendar::format_date(txn.date),
                    txn.amount,
                    txn.kind.as_str(),
                    txn.account_id.get(),
                    txn.category,
                    txn.description,
                    txn.method.map(|method| method.as_str()),
                    txn.transfer_group.map(|group| group.to_string()),
                ],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        }
        WriteOp::InsertObligation(obligation) => {
            conn.execute(
                "INSERT INTO planned_fixed (name, amount, frequency, due_day, account_id, category, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
                params![
                    obligation.name,
                    obligation.amount,
                    obligation.frequency.as_str(),
                    obligation.due_day,
                    obligation.account_id.get(),
                    obligation.category,
                ],
            )?;
            Ok(Some(conn.last_insert_rowid()))
        }
        WriteOp::SetObligationActive { obligation, active } => {
            conn.execute(
                "UPDATE planned_fixed SET active = ?1 WHERE id = ?2",
                params![active, obligation.get()],
            )?;
            Ok(None)
        }
        WriteOp::UpsertReconciliation(record) => {
            let id: RowId = conn.query_row(
                "INSERT INTO reconciliations
                    (week_start, week_end, account_id, real_balance, computed_balance, delta, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(week_start, account_id) DO UPDATE SET
                    week_end = excluded.week_end,
                    real_balance = excluded.real_balance,
                    computed_balance = excluded.computed_balance,
                    delta = excluded.delta,
                    notes = excluded.notes
                 RETURNING id",
                params![
                    calendar::format_date(record.week.start),
                    calendar::format_date(record.week.end),
                    record.account_id.get(),
                    record.real_balance,
                    record.computed_balance,
                    record.delta(),
                    record.note,
                ],
                |row| row.get(0),
            )?;
            Ok(Some(id))
        }
        WriteOp::PutSetting { key, value } => {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(None)
        }
    }
}

impl Store for SqliteStore {
    fn accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, CoreError> {
        let mut clauses = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(id) = filter.id {
            clauses.push("id = ?");
            values.push(Box::new(id.get()));
        }
        if let Some(role) = filter.role {
            clauses.push("role = ?");
            values.push(Box::new(role.as_str()));
        }
        if let Some(active) = filter.active {
            clauses.push("active = ?");
            values.push(Box::new(active));
        }
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts{} ORDER BY name, id",
            where_clause(&clauses)
        );
        Ok(self.query(&sql, &values, AccountRow::read, AccountRow::into_domain)?)
    }

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, CoreError> {
        let mut clauses = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(account) = filter.account_id {
            clauses.push("account_id = ?");
            values.push(Box::new(account.get()));
        }
        if let Some(kind) = filter.kind {
            clauses.push("transaction_type = ?");
            values.push(Box::new(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            clauses.push("category = ?");
            values.push(Box::new(category.clone()));
        }
        if let Some(method) = filter.method {
            clauses.push("method = ?");
            values.push(Box::new(method.as_str()));
        }
        if let Some(from) = filter.date_from {
            clauses.push("date >= ?");
            values.push(Box::new(calendar::format_date(from)));
        }
        if let Some(to) = filter.date_to {
            clauses.push("date <= ?");
            values.push(Box::new(calendar::format_date(to)));
        }
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions{} ORDER BY date DESC, id DESC",
            where_clause(&clauses)
        );
        let rows = self.query(&sql, &values, TransactionRow::read, TransactionRow::into_domain)?;
        debug!(rows = rows.len(), "transactions queried");
        Ok(rows)
    }

    fn obligations(&self, active_only: bool) -> Result<Vec<FixedObligation>, CoreError> {
        let sql = format!(
            "SELECT {OBLIGATION_COLUMNS} FROM planned_fixed{} ORDER BY id",
            if active_only { " WHERE active = 1" } else { "" }
        );
        Ok(self.query(&sql, &[], ObligationRow::read, ObligationRow::into_domain)?)
    }

    fn reconciliations(
        &self,
        filter: &ReconciliationFilter,
    ) -> Result<Vec<Reconciliation>, CoreError> {
        let mut clauses = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(week_start) = filter.week_start {
            clauses.push("week_start = ?");
            values.push(Box::new(calendar::format_date(week_start)));
        }
        if let Some(account) = filter.account_id {
            clauses.push("account_id = ?");
            values.push(Box::new(account.get()));
        }
        let sql = format!(
            "SELECT {RECONCILIATION_COLUMNS} FROM reconciliations{} ORDER BY week_start DESC, account_id",
            where_clause(&clauses)
        );
        Ok(self.query(
            &sql,
            &values,
            ReconciliationRow::read,
            ReconciliationRow::into_domain,
        )?)
    }

    fn setting(&self, key: &str) -> Result<Option<String>, CoreError> {
        let value = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })?;
        Ok(value)
    }

    fn write(&self, op: WriteOp) -> Result<Option<RowId>, CoreError> {
        let conn = self.conn.lock();
        let id = apply(&conn, &op)?;
        debug!(op = op.label(), ?id, "write applied");
        Ok(id)
    }

    fn atomic_write(&self, ops: Vec<WriteOp>) -> Result<Vec<Option<RowId>>, CoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(StoreError::from)?;
        let mut ids = Vec::with_capacity(ops.len());
        for op in &ops {
            ids.push(apply(&tx, op)?);
        }
        tx.commit().map_err(StoreError::from)?;
        debug!(ops = ops.len(), "atomic batch committed");
        Ok(ids)
    }
}
