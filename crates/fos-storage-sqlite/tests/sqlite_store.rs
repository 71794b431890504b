use chrono::NaiveDate;
use fos_core::{CoreError, LedgerService, Store, WriteOp};
use fos_domain::{
    calendar::WeekRange, AccountFilter, AccountId, AccountKind, AccountRole, NewAccount,
    NewFixedObligation, NewTransaction, PaymentMethod, ReconciliationFilter, ReconciliationRecord,
    TransactionFilter, TransferRequest,
};
use fos_storage_sqlite::SqliteStore;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn insert_account(store: &SqliteStore, name: &str, role: AccountRole) -> AccountId {
    let id = store
        .write(WriteOp::InsertAccount(NewAccount::new(
            name,
            AccountKind::Personal,
            role,
        )))
        .unwrap()
        .unwrap();
    AccountId(id)
}

#[test]
fn data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("finance.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        let account = insert_account(&store, "Checking", AccountRole::Operational);
        store
            .write(WriteOp::InsertTransaction(
                NewTransaction::income(date(2026, 1, 19), 1000.0, account)
                    .with_method(PaymentMethod::Pix)
                    .with_category("Salary"),
            ))
            .unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
    }

    let reopened = SqliteStore::open(&path).unwrap();
    let rows = reopened.transactions(&TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].method, Some(PaymentMethod::Pix));
    assert_eq!(rows[0].category.as_deref(), Some("Salary"));
    assert!(rows[0].transfer_group.is_none());
}

#[test]
fn transactions_are_ordered_newest_first() {
    let store = SqliteStore::in_memory().unwrap();
    let account = insert_account(&store, "Checking", AccountRole::Vault);
    for (day, amount) in [(20, 1.0), (19, 2.0), (20, 3.0), (21, 4.0)] {
        store
            .write(WriteOp::InsertTransaction(NewTransaction::expense(
                date(2026, 1, day),
                amount,
                account,
            )))
            .unwrap();
    }
    let amounts: Vec<_> = store
        .transactions(&TransactionFilter::for_account(account))
        .unwrap()
        .into_iter()
        .map(|txn| txn.amount)
        .collect();
    assert_eq!(amounts, vec![4.0, 3.0, 1.0, 2.0]);

    let bounded = store
        .transactions(&TransactionFilter::for_account(account).between(date(2026, 1, 20), date(2026, 1, 20)))
        .unwrap();
    assert_eq!(bounded.len(), 2);
}

#[test]
fn demote_then_promote_keeps_single_operational_account() {
    let store = SqliteStore::in_memory().unwrap();
    let first = insert_account(&store, "First", AccountRole::Operational);
    let second = insert_account(&store, "Second", AccountRole::Vault);

    let direct = store.write(WriteOp::SetAccountRole {
        account: second,
        role: AccountRole::Operational,
    });
    assert!(matches!(direct, Err(CoreError::Storage(_))));

    store
        .atomic_write(vec![
            WriteOp::DemoteOperational,
            WriteOp::SetAccountRole {
                account: second,
                role: AccountRole::Operational,
            },
        ])
        .unwrap();
    let operational = store
        .accounts(&AccountFilter {
            role: Some(AccountRole::Operational),
            ..AccountFilter::default()
        })
        .unwrap();
    assert_eq!(operational.len(), 1);
    assert_eq!(operational[0].id, second);
    assert_eq!(store.account(first).unwrap().unwrap().role, AccountRole::Vault);
}

#[test]
fn failing_second_leg_rolls_back_the_transfer() {
    let store = SqliteStore::in_memory().unwrap();
    let from = insert_account(&store, "Checking", AccountRole::Operational);
    let to = insert_account(&store, "Reserve", AccountRole::Vault);
    store
        .with_conn(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER reject_income BEFORE INSERT ON transactions
                 WHEN NEW.transaction_type = 'income'
                 BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
        })
        .unwrap();

    let err = LedgerService::add_transfer(
        &store,
        TransferRequest::new(date(2026, 1, 20), from, to, 250.0),
    )
    .unwrap_err();

    assert!(err.is_storage());
    assert!(store
        .transactions(&TransactionFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn reconciliation_upsert_keeps_one_row_and_id() {
    let store = SqliteStore::in_memory().unwrap();
    let account = insert_account(&store, "Checking", AccountRole::Operational);
    let week = WeekRange::starting(date(2026, 1, 19));
    let record = |real: f64| ReconciliationRecord {
        week,
        account_id: account,
        real_balance: real,
        computed_balance: 600.0,
        note: None,
    };

    let first = store.write(WriteOp::UpsertReconciliation(record(650.0))).unwrap();
    let second = store.write(WriteOp::UpsertReconciliation(record(590.0))).unwrap();
    assert_eq!(first, second);

    let rows = store.reconciliations(&ReconciliationFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].delta, -10.0);
    assert_eq!(rows[0].week_end, date(2026, 1, 25));
}

#[test]
fn obligations_filter_on_active_flag() {
    let store = SqliteStore::in_memory().unwrap();
    let account = insert_account(&store, "Checking", AccountRole::Vault);
    let rent = store
        .write(WriteOp::InsertObligation(
            NewFixedObligation::monthly("Rent", 1200.0, 5, account).with_category("Housing"),
        ))
        .unwrap()
        .unwrap();
    store
        .write(WriteOp::InsertObligation(NewFixedObligation::monthly(
            "Gym", 90.0, 10, account,
        )))
        .unwrap();
    store
        .write(WriteOp::SetObligationActive {
            obligation: rent.into(),
            active: false,
        })
        .unwrap();

    assert_eq!(store.obligations(false).unwrap().len(), 2);
    let active = store.obligations(true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Gym");
}

#[test]
fn settings_overwrite_previous_value() {
    let store = SqliteStore::in_memory().unwrap();
    assert_eq!(store.setting("weekly_cap_amount").unwrap(), None);
    for value in ["450", "500"] {
        store
            .write(WriteOp::PutSetting {
                key: "weekly_cap_amount".into(),
                value: value.into(),
            })
            .unwrap();
    }
    assert_eq!(store.setting("weekly_cap_amount").unwrap().as_deref(), Some("500"));
}

#[test]
fn corrupt_rows_surface_as_storage_errors() {
    let store = SqliteStore::in_memory().unwrap();
    let account = insert_account(&store, "Checking", AccountRole::Vault);
    store
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO transactions (date, amount, transaction_type, account_id)
                 VALUES ('19/01/2026', 10.0, 'expense', ?1)",
                [account.get()],
            )
        })
        .unwrap();
    let err = store.transactions(&TransactionFilter::default()).unwrap_err();
    assert!(err.is_storage());
    assert!(err.to_string().contains("transactions.date"));
}
