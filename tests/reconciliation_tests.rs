mod common;

use common::{date, record, setup_test_env, with_accounts};
use finance_os::Defaults;
use fos_core::{BalanceBasis, ReconcileRequest};
use fos_domain::{AccountId, TransactionKind};

#[test]
fn second_reconciliation_overwrites_the_first() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, _) = with_accounts(&app);
    record(&app, "2026-01-19", 600.0, TransactionKind::Income, checking);

    let week = date("2026-01-19");
    let first = app.reconcile_account(week, checking, 650.0).unwrap();
    assert_eq!(
        app.reconciliation_for(week, checking).unwrap().unwrap().delta,
        50.0
    );
    let second = app.reconcile_account(week, checking, 580.0).unwrap();
    assert_eq!(first, second);

    let rows = app.reconciliations_for_week(week).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].real_balance, 580.0);
    assert_eq!(rows[0].computed_balance, 600.0);
    assert_eq!(rows[0].delta, -20.0);
    assert_eq!(
        rows[0].note.as_deref(),
        Some("Delta of -20.00 (real - computed) for 2026-01-19 to 2026-01-25.")
    );
    // A delta is data only.
    assert_eq!(app.account_balance(checking, None).unwrap(), 600.0);
}

#[test]
fn weeks_are_tracked_per_account() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    let week = date("2026-01-19");
    assert!(!app.is_week_reconciled(week).unwrap());

    app.reconcile_account(week, checking, 0.0).unwrap();
    app.reconcile(ReconcileRequest::new(week, reserve, 10.0).with_note("cash box"))
        .unwrap();

    assert!(app.is_week_reconciled(week).unwrap());
    assert!(!app.is_week_reconciled(date("2026-01-12")).unwrap());
    let rows = app.reconciliations_for_week(week).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].is_balanced());
    assert_eq!(rows[1].note.as_deref(), Some("cash box"));
}

#[test]
fn configured_week_end_basis_excludes_later_rows() {
    let (app, _) = setup_test_env("2026-02-04");
    let app = app.with_defaults(Defaults {
        reconciliation_basis: BalanceBasis::WeekEnd,
        ..Defaults::default()
    });
    let (checking, _) = with_accounts(&app);
    record(&app, "2026-01-20", 400.0, TransactionKind::Income, checking);
    record(&app, "2026-02-02", 150.0, TransactionKind::Expense, checking);

    app.reconcile_account(date("2026-01-19"), checking, 400.0).unwrap();
    let row = app
        .reconciliation_for(date("2026-01-19"), checking)
        .unwrap()
        .unwrap();
    assert_eq!(row.computed_balance, 400.0);
    assert_eq!(row.delta, 0.0);
}

#[test]
fn invalid_reconciliations_are_rejected() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, _) = with_accounts(&app);
    assert!(app
        .reconcile_account(date("2026-01-21"), checking, 1.0)
        .unwrap_err()
        .is_validation());
    assert!(app
        .reconcile_account(date("2026-01-19"), AccountId(99), 1.0)
        .unwrap_err()
        .is_not_found());
    assert!(app
        .reconcile_account(date("2026-01-19"), checking, f64::INFINITY)
        .unwrap_err()
        .is_validation());
}
