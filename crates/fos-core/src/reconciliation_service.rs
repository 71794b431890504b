//! Weekly human-reviewed reconciliation.
//!
//! A reconciliation stores what the user reports against what the ledger
//! computes. The delta is data: nothing here writes to the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use fos_domain::{
    calendar::{self, WeekRange},
    AccountId, Reconciliation, ReconciliationFilter, ReconciliationId, ReconciliationRecord,
};

use crate::{
    account_service::AccountService,
    ledger_service::LedgerService,
    storage::{expect_row_id, Store, WriteOp},
    CoreError,
};

/// Point in time at which the computed balance is taken.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BalanceBasis {
    /// Every transaction recorded so far, regardless of date.
    #[default]
    CallTime,
    /// Transactions dated on or before the reconciled week's Sunday.
    WeekEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileRequest {
    pub week_start: NaiveDate,
    pub account_id: AccountId,
    pub real_balance: f64,
    pub note: Option<String>,
    pub basis: BalanceBasis,
}

impl ReconcileRequest {
    pub fn new(week_start: NaiveDate, account_id: AccountId, real_balance: f64) -> Self {
        Self {
            week_start,
            account_id,
            real_balance,
            note: None,
            basis: BalanceBasis::default(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_basis(mut self, basis: BalanceBasis) -> Self {
        self.basis = basis;
        self
    }
}

pub struct ReconciliationService;

impl ReconciliationService {
    /// Records `real_balance` for the account and week, computing the balance at call time.
    pub fn reconcile_account(
        store: &dyn Store,
        week_start: NaiveDate,
        account_id: AccountId,
        real_balance: f64,
    ) -> Result<ReconciliationId, CoreError> {
        Self::reconcile(store, ReconcileRequest::new(week_start, account_id, real_balance))
    }

    /// Upserts the reconciliation keyed on `(week_start, account_id)`; last write wins.
    pub fn reconcile(
        store: &dyn Store,
        request: ReconcileRequest,
    ) -> Result<ReconciliationId, CoreError> {
        if !calendar::is_monday(request.week_start) {
            return Err(CoreError::Validation(format!(
                "week start {} is not a Monday",
                request.week_start
            )));
        }
        if !request.real_balance.is_finite() {
            return Err(CoreError::validation("real balance must be a finite number"));
        }
        AccountService::get(store, request.account_id)?;

        let week = WeekRange::starting(request.week_start);
        let as_of = match request.basis {
            BalanceBasis::CallTime => None,
            BalanceBasis::WeekEnd => Some(week.end),
        };
        let computed_balance = LedgerService::account_balance(store, request.account_id, as_of)?;
        let delta = request.real_balance - computed_balance;
        let note = request
            .note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| default_note(delta, &week));

        let record = ReconciliationRecord {
            week,
            account_id: request.account_id,
            real_balance: request.real_balance,
            computed_balance,
            note: Some(note),
        };
        let id = ReconciliationId(expect_row_id(
            "upsert_reconciliation",
            store.write(WriteOp::UpsertReconciliation(record))?,
        )?);
        info!(
            reconciliation = %id,
            account = %request.account_id,
            week = %week,
            real_balance = request.real_balance,
            computed_balance,
            delta,
            "reconciliation recorded"
        );
        Ok(id)
    }

    pub fn reconciliation_for(
        store: &dyn Store,
        week_start: NaiveDate,
        account_id: AccountId,
    ) -> Result<Option<Reconciliation>, CoreError> {
        let filter = ReconciliationFilter {
            week_start: Some(week_start),
            account_id: Some(account_id),
        };
        Ok(store.reconciliations(&filter)?.into_iter().next())
    }

    pub fn reconciliations_for_week(
        store: &dyn Store,
        week_start: NaiveDate,
    ) -> Result<Vec<Reconciliation>, CoreError> {
        store.reconciliations(&ReconciliationFilter {
            week_start: Some(week_start),
            account_id: None,
        })
    }

    /// True once at least one account has been reconciled for the week.
    pub fn is_week_reconciled(store: &dyn Store, week_start: NaiveDate) -> Result<bool, CoreError> {
        Ok(!Self::reconciliations_for_week(store, week_start)?.is_empty())
    }
}

fn default_note(delta: f64, week: &WeekRange) -> String {
    format!("Delta of {delta:.2} (real - computed) for {week}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_note_names_delta_and_period() {
        let week = WeekRange::starting(NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
        assert_eq!(
            default_note(50.0, &week),
            "Delta of 50.00 (real - computed) for 2026-01-19 to 2026-01-25."
        );
    }

    #[test]
    fn request_defaults_to_call_time_basis() {
        let request = ReconcileRequest::new(
            NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
            AccountId(1),
            650.0,
        );
        assert_eq!(request.basis, BalanceBasis::CallTime);
        assert!(request.note.is_none());
    }
}
