use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fos_domain::{calendar::WeekRange, Account};

use crate::{
    account_service::AccountService,
    kpi_service::{KpiService, WeeklySpending},
    reconciliation_service::ReconciliationService,
    storage::Store,
    time::Clock,
    CoreError,
};

/// Everything the home screen shows for one reference week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub week: WeekRange,
    pub operational: Option<Account>,
    /// Absent while no operational account is configured.
    pub spending: Option<WeeklySpending>,
    pub total_cash: f64,
    pub week_reconciled: bool,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(
        store: &dyn Store,
        clock: &dyn Clock,
        reference: Option<NaiveDate>,
    ) -> Result<DashboardSnapshot, CoreError> {
        let week = WeekRange::containing(reference.unwrap_or_else(|| clock.today()));
        let operational = AccountService::operational(store)?;
        let spending = match &operational {
            Some(account) => Some(KpiService::weekly_spending_status(
                store,
                clock,
                account.id,
                Some(week.start),
            )?),
            None => None,
        };
        Ok(DashboardSnapshot {
            week,
            operational,
            spending,
            total_cash: KpiService::total_cash(store)?,
            week_reconciled: ReconciliationService::is_week_reconciled(store, week.start)?,
        })
    }
}
