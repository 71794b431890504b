mod common;

use common::{date, setup_test_env, with_accounts};
use fos_domain::NewFixedObligation;

#[test]
fn due_day_past_month_end_clamps_to_last_day() {
    let (app, _) = setup_test_env("2026-02-01");
    let (checking, _) = with_accounts(&app);
    app.add_obligation(NewFixedObligation::monthly("Rent", 1200.0, 30, checking))
        .unwrap();

    let events = app
        .generate_events(date("2026-02-01"), date("2026-02-28"))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].due_date, date("2026-02-28"));
    assert_eq!(events[0].amount(), 1200.0);

    let leap = app
        .generate_events(date("2028-02-01"), date("2028-02-29"))
        .unwrap();
    assert_eq!(leap[0].due_date, date("2028-02-29"));
}

#[test]
fn events_span_months_and_respect_bounds() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, reserve) = with_accounts(&app);
    app.add_obligation(
        NewFixedObligation::monthly("Internet", 100.0, 15, checking).with_category("Utilities"),
    )
    .unwrap();
    app.add_obligation(NewFixedObligation::monthly("Insurance", 250.0, 1, reserve))
        .unwrap();

    let events = app
        .generate_events(date("2026-01-15"), date("2026-03-01"))
        .unwrap();
    let due: Vec<_> = events
        .iter()
        .map(|event| (event.due_date, event.obligation.name.as_str()))
        .collect();
    assert_eq!(
        due,
        vec![
            (date("2026-01-15"), "Internet"),
            (date("2026-02-01"), "Insurance"),
            (date("2026-02-15"), "Internet"),
            (date("2026-03-01"), "Insurance"),
        ]
    );
    assert_eq!(
        app.total_for_period(date("2026-01-15"), date("2026-03-01"))
            .unwrap(),
        700.0
    );
    assert_eq!(
        app.total_for_period(date("2026-01-16"), date("2026-01-31"))
            .unwrap(),
        0.0
    );
}

#[test]
fn deactivated_obligations_stop_producing_events() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, _) = with_accounts(&app);
    let gym = app
        .add_obligation(NewFixedObligation::monthly("Gym", 90.0, 10, checking))
        .unwrap();
    app.deactivate_obligation(gym).unwrap();

    assert!(app.list_active_obligations().unwrap().is_empty());
    assert!(app
        .generate_events(date("2026-01-01"), date("2026-12-31"))
        .unwrap()
        .is_empty());
}

#[test]
fn invalid_obligations_are_rejected() {
    let (app, _) = setup_test_env("2026-01-21");
    let (checking, _) = with_accounts(&app);
    for bad in [
        NewFixedObligation::monthly("", 10.0, 5, checking),
        NewFixedObligation::monthly("Zero", 0.0, 5, checking),
        NewFixedObligation::monthly("Late", 10.0, 32, checking),
    ] {
        assert!(app.add_obligation(bad).unwrap_err().is_validation());
    }
    assert!(app
        .generate_events(date("2026-02-01"), date("2026-01-01"))
        .unwrap_err()
        .is_validation());
}
