//! Fixed-obligation templates and their expansion over date ranges.

use chrono::NaiveDate;
use tracing::{debug, info};

use fos_domain::{FixedObligation, FixedObligationEvent, NewFixedObligation, ObligationId};

use crate::{
    account_service::AccountService,
    ledger_service::validate_amount,
    storage::{expect_row_id, Store, WriteOp},
    CoreError,
};

pub struct ScheduleService;

impl ScheduleService {
    /// Registers a monthly obligation template.
    pub fn add_obligation(
        store: &dyn Store,
        obligation: NewFixedObligation,
    ) -> Result<ObligationId, CoreError> {
        if obligation.name.trim().is_empty() {
            return Err(CoreError::validation("obligation name must not be empty"));
        }
        validate_amount(obligation.amount)?;
        if !(1..=31).contains(&obligation.due_day) {
            return Err(CoreError::Validation(format!(
                "due day must be within 1..=31, got {}",
                obligation.due_day
            )));
        }
        AccountService::require_active(store, obligation.account_id)?;
        let name = obligation.name.clone();
        let id = ObligationId(expect_row_id(
            "insert_obligation",
            store.write(WriteOp::InsertObligation(obligation))?,
        )?);
        info!(obligation = %id, name = %name, "fixed obligation registered");
        Ok(id)
    }

    /// Retires a template so it no longer produces events.
    pub fn deactivate_obligation(store: &dyn Store, id: ObligationId) -> Result<(), CoreError> {
        let exists = store
            .obligations(false)?
            .iter()
            .any(|obligation| obligation.id == id);
        if !exists {
            return Err(CoreError::ObligationNotFound(id));
        }
        store.write(WriteOp::SetObligationActive {
            obligation: id,
            active: false,
        })?;
        info!(obligation = %id, "fixed obligation deactivated");
        Ok(())
    }

    pub fn list_active_obligations(store: &dyn Store) -> Result<Vec<FixedObligation>, CoreError> {
        store.obligations(true)
    }

    /// Due-dated events of every active template within `[start, end]`,
    /// ordered by due date and then obligation id.
    pub fn generate_events(
        store: &dyn Store,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FixedObligationEvent>, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "period start {start} is after end {end}"
            )));
        }
        let mut events: Vec<_> = Self::list_active_obligations(store)?
            .iter()
            .flat_map(|obligation| obligation.events_between(start, end))
            .collect();
        events.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.obligation.id.cmp(&b.obligation.id))
        });
        debug!(%start, %end, count = events.len(), "fixed obligation events generated");
        Ok(events)
    }

    pub fn total_for_period(
        store: &dyn Store,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, CoreError> {
        Ok(Self::generate_events(store, start, end)?
            .iter()
            .map(FixedObligationEvent::amount)
            .sum())
    }
}
