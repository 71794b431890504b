mod common;

use common::{date, record, setup_test_env, with_accounts};
use fos_domain::{
    AccountId, NewTransaction, PaymentMethod, TransactionFilter, TransactionKind, TransferRequest,
};

#[test]
fn balance_follows_income_minus_expense() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, _) = with_accounts(&app);
    record(&app, "2026-01-19", 1000.0, TransactionKind::Income, checking);
    record(&app, "2026-01-20", 50.0, TransactionKind::Expense, checking);
    record(&app, "2026-01-21", 100.0, TransactionKind::Expense, checking);

    assert_eq!(app.account_balance(checking, None).unwrap(), 850.0);
    assert_eq!(
        app.account_balance(checking, Some(date("2026-01-20"))).unwrap(),
        950.0
    );
}

#[test]
fn new_account_opens_at_zero() {
    let (app, _) = setup_test_env("2026-01-21");
    let (_, reserve) = with_accounts(&app);
    assert_eq!(app.account_balance(reserve, None).unwrap(), 0.0);
}

#[test]
fn balance_of_unknown_account_is_not_found() {
    let (app, _) = setup_test_env("2026-01-21");
    assert!(app.account_balance(AccountId(42), None).unwrap_err().is_not_found());
}

#[test]
fn transfer_moves_money_without_changing_total_cash() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    record(&app, "2026-01-19", 1000.0, TransactionKind::Income, checking);

    let receipt = app
        .add_transfer(
            TransferRequest::new(date("2026-01-20"), checking, reserve, 300.0),
        )
        .unwrap();

    assert_eq!(app.account_balance(checking, None).unwrap(), 700.0);
    assert_eq!(app.account_balance(reserve, None).unwrap(), 300.0);
    assert_eq!(app.total_cash().unwrap(), 1000.0);

    let legs: Vec<_> = app
        .list_transactions(&TransactionFilter::default())
        .unwrap()
        .into_iter()
        .filter(|txn| txn.transfer_group == Some(receipt.group))
        .collect();
    assert_eq!(legs.len(), 2);
    assert!(legs.iter().all(|leg| leg.date == date("2026-01-20") && leg.amount == 300.0));
    let expense = legs.iter().find(|leg| leg.kind == TransactionKind::Expense).unwrap();
    assert_eq!(expense.account_id, checking);
    assert_eq!(expense.id, receipt.expense_id);
}

#[test]
fn failed_second_leg_leaves_ledger_untouched() {
    let (app, store) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    store
        .with_conn(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER fail_income_leg BEFORE INSERT ON transactions
                 WHEN NEW.transaction_type = 'income'
                 BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
        })
        .unwrap();

    let err = app
        .add_transfer(TransferRequest::new(date("2026-01-20"), checking, reserve, 300.0))
        .unwrap_err();

    assert!(err.is_storage());
    assert!(app
        .list_transactions(&TransactionFilter::default())
        .unwrap()
        .is_empty());
    assert_eq!(app.total_cash().unwrap(), 0.0);
}

#[test]
fn listing_is_newest_first_and_filterable() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    app.add_transaction(
        NewTransaction::expense(date("2026-01-19"), 20.0, checking).with_method(PaymentMethod::Card),
    )
    .unwrap();
    app.add_transaction(
        NewTransaction::expense(date("2026-01-21"), 30.0, checking).with_method(PaymentMethod::Pix),
    )
    .unwrap();
    record(&app, "2026-01-20", 500.0, TransactionKind::Income, reserve);

    let all = app.list_transactions(&TransactionFilter::default()).unwrap();
    let dates: Vec<_> = all.iter().map(|txn| txn.date).collect();
    assert_eq!(
        dates,
        vec![date("2026-01-21"), date("2026-01-20"), date("2026-01-19")]
    );

    let card_only = TransactionFilter {
        method: Some(PaymentMethod::Card),
        ..TransactionFilter::default()
    };
    let rows = app.list_transactions(&card_only).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 20.0);
}

#[test]
fn writes_against_inactive_accounts_are_rejected() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    app.deactivate_account(reserve).unwrap();

    let err = app
        .add_transaction(NewTransaction::income(date("2026-01-20"), 10.0, reserve))
        .unwrap_err();
    assert!(err.is_validation());

    let err = app
        .add_transfer(TransferRequest::new(date("2026-01-20"), checking, reserve, 10.0))
        .unwrap_err();
    assert!(err.is_validation());
}
