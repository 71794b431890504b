#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use finance_os::FinanceOs;
use fos_core::FixedClock;
use fos_domain::{AccountId, AccountKind, NewAccount, NewTransaction, TransactionKind};
use fos_storage_sqlite::SqliteStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(raw: &str) -> NaiveDate {
    fos_domain::calendar::parse_date(raw).expect("valid test date")
}

/// Creates a facade over a fresh on-disk database, pinned to `today`.
///
/// The returned store shares its connection with the facade.
pub fn setup_test_env(today: &str) -> (FinanceOs, SqliteStore) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("finance_os.db");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = SqliteStore::open(&path).expect("open sqlite store");
    let app = FinanceOs::new(Box::new(store.clone()), Box::new(FixedClock::new(date(today))));
    (app, store)
}

/// Operational "Checking" and vault "Reserve" accounts.
pub fn with_accounts(app: &FinanceOs) -> (AccountId, AccountId) {
    let checking = app
        .create_account(NewAccount::operational("Checking", AccountKind::Personal))
        .expect("create checking");
    let reserve = app
        .create_account(NewAccount::vault("Reserve", AccountKind::Personal))
        .expect("create reserve");
    (checking, reserve)
}

pub fn record(app: &FinanceOs, on: &str, amount: f64, kind: TransactionKind, account: AccountId) {
    app.add_transaction(NewTransaction::new(date(on), amount, kind, account))
        .expect("record transaction");
}
