//! DDL for the ledger tables.
//!
//! Table and column names are shared with databases written by earlier
//! releases, so they are never renamed. [`migrate`] is idempotent.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::StoreError;

pub const SCHEMA_VERSION: i64 = 2;

const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
";

const TABLES: &str = r"
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK(type IN ('personal', 'business')),
    role TEXT NOT NULL CHECK(role IN ('operational', 'vault')),
    active BOOLEAN NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL CHECK(amount >= 0),
    transaction_type TEXT NOT NULL CHECK(transaction_type IN ('income', 'expense', 'transfer')),
    account_id INTEGER NOT NULL REFERENCES accounts(id),
    category TEXT,
    description TEXT,
    method TEXT,
    transfer_group TEXT
);

CREATE TABLE IF NOT EXISTS planned_fixed (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    amount REAL NOT NULL,
    frequency TEXT NOT NULL CHECK(frequency IN ('monthly')),
    due_day INTEGER NOT NULL CHECK(due_day BETWEEN 1 AND 31),
    account_id INTEGER NOT NULL REFERENCES accounts(id),
    category TEXT,
    active BOOLEAN NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS reconciliations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    week_start TEXT NOT NULL,
    week_end TEXT NOT NULL,
    account_id INTEGER NOT NULL REFERENCES accounts(id),
    real_balance REAL NOT NULL,
    computed_balance REAL NOT NULL,
    delta REAL NOT NULL,
    notes TEXT,
    UNIQUE(week_start, account_id)
);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

const INDEXES: &str = r"
-- At most one account may hold the operational role.
CREATE UNIQUE INDEX IF NOT EXISTS idx_accounts_single_operational
    ON accounts(role) WHERE role = 'operational';
CREATE INDEX IF NOT EXISTS idx_transactions_account_date
    ON transactions(account_id, date);
CREATE INDEX IF NOT EXISTS idx_transactions_transfer_group
    ON transactions(transfer_group) WHERE transfer_group IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_reconciliations_week
    ON reconciliations(week_start);
";

pub fn apply_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(PRAGMAS)?;
    Ok(())
}

/// Brings the schema up to [`SCHEMA_VERSION`].
pub fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    conn.execute_batch(TABLES)?;
    // Version 1 databases predate transfer groups.
    if !has_column(conn, "transactions", "transfer_group")? {
        conn.execute_batch("ALTER TABLE transactions ADD COLUMN transfer_group TEXT;")?;
        info!("added transactions.transfer_group column");
    }
    conn.execute_batch(INDEXES)?;
    if current != SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        info!(from = current, to = SCHEMA_VERSION, "schema migrated");
    } else {
        debug!(version = current, "schema up to date");
    }
    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>("name"))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
