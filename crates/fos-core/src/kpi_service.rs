//! Weekly spending and cash indicators.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fos_domain::{
    calendar::{self, WeekRange},
    AccountFilter, AccountId, TransactionFilter, TransactionKind,
};

use crate::{
    account_service::AccountService, ledger_service::LedgerService,
    settings_service::SettingsService, storage::Store, time::Clock, CoreError,
};

/// Share of the cap up to which spending counts as within plan.
const WITHIN_PLAN_PERCENT: f64 = 80.0;

/// Spending for one week measured against the configured cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklySpending {
    pub week: WeekRange,
    pub spent: f64,
    pub cap: f64,
    /// Percentage of the cap already spent; `0.0` without a cap.
    pub utilization: f64,
    pub status: SpendingStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpendingStatus {
    NoCap,
    WithinPlan,
    NearLimit,
    OverLimit,
}

impl SpendingStatus {
    pub fn classify(spent: f64, cap: f64) -> Self {
        if cap <= 0.0 {
            return SpendingStatus::NoCap;
        }
        let percentage = spent / cap * 100.0;
        if percentage <= WITHIN_PLAN_PERCENT {
            SpendingStatus::WithinPlan
        } else if percentage <= 100.0 {
            SpendingStatus::NearLimit
        } else {
            SpendingStatus::OverLimit
        }
    }
}

impl fmt::Display for SpendingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpendingStatus::NoCap => "No cap configured",
            SpendingStatus::WithinPlan => "Within plan",
            SpendingStatus::NearLimit => "Approaching the cap",
            SpendingStatus::OverLimit => "Cap exceeded",
        };
        f.write_str(label)
    }
}

pub struct KpiService;

impl KpiService {
    /// Sum of expense rows on `account_id` dated within the week starting at `week_start`.
    ///
    /// Transfer legs are excluded.
    pub fn weekly_variable_expenses(
        store: &dyn Store,
        week_start: NaiveDate,
        account_id: AccountId,
    ) -> Result<f64, CoreError> {
        if !calendar::is_monday(week_start) {
            return Err(CoreError::Validation(format!(
                "week start {week_start} is not a Monday"
            )));
        }
        AccountService::get(store, account_id)?;
        let week = WeekRange::starting(week_start);
        let filter = TransactionFilter::for_account(account_id)
            .of_kind(TransactionKind::Expense)
            .between(week.start, week.end);
        let total: f64 = store
            .transactions(&filter)?
            .iter()
            .filter(|txn| !txn.is_transfer_leg())
            .map(|txn| txn.amount)
            .sum();
        debug!(account = %account_id, week = %week, total, "weekly variable expenses");
        Ok(total)
    }

    /// Weekly variable expenses for the week containing `reference`, or today.
    pub fn current_week_variable_expenses(
        store: &dyn Store,
        clock: &dyn Clock,
        account_id: AccountId,
        reference: Option<NaiveDate>,
    ) -> Result<f64, CoreError> {
        let week = calendar::current_week_range(Some(reference.unwrap_or_else(|| clock.today())));
        Self::weekly_variable_expenses(store, week.start, account_id)
    }

    /// Sum of balances over every active account. Transfers cancel out here.
    pub fn total_cash(store: &dyn Store) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for account in store.accounts(&AccountFilter::active())? {
            total += LedgerService::account_balance(store, account.id, None)?;
        }
        debug!(total, "total cash computed");
        Ok(total)
    }

    /// Current week spending of `account_id` compared with the weekly cap.
    pub fn weekly_spending_status(
        store: &dyn Store,
        clock: &dyn Clock,
        account_id: AccountId,
        reference: Option<NaiveDate>,
    ) -> Result<WeeklySpending, CoreError> {
        let week = calendar::current_week_range(Some(reference.unwrap_or_else(|| clock.today())));
        let spent = Self::weekly_variable_expenses(store, week.start, account_id)?;
        let cap = SettingsService::weekly_cap(store)?;
        let utilization = if cap > 0.0 { spent / cap * 100.0 } else { 0.0 };
        Ok(WeeklySpending {
            week,
            spent,
            cap,
            utilization,
            status: SpendingStatus::classify(spent, cap),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds_follow_cap_percentage() {
        assert_eq!(SpendingStatus::classify(100.0, 0.0), SpendingStatus::NoCap);
        assert_eq!(SpendingStatus::classify(300.0, 450.0), SpendingStatus::WithinPlan);
        assert_eq!(SpendingStatus::classify(361.0, 450.0), SpendingStatus::NearLimit);
        assert_eq!(SpendingStatus::classify(450.0, 450.0), SpendingStatus::NearLimit);
        assert_eq!(SpendingStatus::classify(450.5, 450.0), SpendingStatus::OverLimit);
    }
}
