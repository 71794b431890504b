//! Cash position projection from fixed obligations and trailing variable spending.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fos_domain::calendar;

use crate::{
    account_service::AccountService, kpi_service::KpiService, schedule_service::ScheduleService,
    storage::Store, time::Clock, CoreError,
};

/// Trailing window used by [`ForecastService::forecast_cash_flow`].
pub const DEFAULT_AVERAGE_WEEKS: u32 = 4;
/// Longest trailing window accepted for the weekly average (ten years).
pub const MAX_AVERAGE_WEEKS: u32 = 520;
/// Longest forecast horizon accepted, in days (ten years).
pub const MAX_FORECAST_DAYS: u32 = 3_660;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CashFlowForecast {
    pub days: u32,
    pub current_cash: f64,
    pub planned_fixed_expenses: f64,
    pub projected_variable_expenses: f64,
    pub forecasted_cash: f64,
}

impl CashFlowForecast {
    /// Combines the three inputs; variable spending scales by `days / 7`.
    pub fn project(
        days: u32,
        current_cash: f64,
        planned_fixed_expenses: f64,
        average_weekly_variable: f64,
    ) -> Self {
        let projected_variable_expenses = average_weekly_variable * f64::from(days) / 7.0;
        Self {
            days,
            current_cash,
            planned_fixed_expenses,
            projected_variable_expenses,
            forecasted_cash: current_cash - planned_fixed_expenses - projected_variable_expenses,
        }
    }
}

pub struct ForecastService;

impl ForecastService {
    /// Mean weekly variable spending of the operational account over the
    /// `num_weeks` most recent weeks, the current partial week included.
    ///
    /// Returns `0.0` when no operational account exists or `num_weeks` is zero.
    /// Windows longer than [`MAX_AVERAGE_WEEKS`] are a validation error.
    pub fn average_weekly_variable_expenses(
        store: &dyn Store,
        clock: &dyn Clock,
        num_weeks: u32,
    ) -> Result<f64, CoreError> {
        if num_weeks > MAX_AVERAGE_WEEKS {
            return Err(CoreError::validation(format!(
                "average window of {num_weeks} weeks exceeds {MAX_AVERAGE_WEEKS}"
            )));
        }
        if num_weeks == 0 {
            return Ok(0.0);
        }
        let Some(operational) = AccountService::operational(store)? else {
            debug!("no operational account; average weekly variable expenses is zero");
            return Ok(0.0);
        };
        let current = calendar::current_week_range(Some(clock.today()));
        let mut total = 0.0;
        for offset in 0..num_weeks {
            let week = current
                .previous(offset)
                .ok_or_else(|| CoreError::validation("average window out of range"))?;
            total += KpiService::weekly_variable_expenses(store, week.start, operational.id)?;
        }
        let average = total / f64::from(num_weeks);
        debug!(account = %operational.id, num_weeks, average, "average weekly variable expenses");
        Ok(average)
    }

    pub fn forecast_cash_flow(
        store: &dyn Store,
        clock: &dyn Clock,
        days: u32,
    ) -> Result<CashFlowForecast, CoreError> {
        Self::forecast_with(store, clock, days, DEFAULT_AVERAGE_WEEKS)
    }

    /// Forecast `days` ahead of today using a `num_weeks` trailing average.
    ///
    /// Horizons beyond [`MAX_FORECAST_DAYS`] are a validation error.
    pub fn forecast_with(
        store: &dyn Store,
        clock: &dyn Clock,
        days: u32,
        num_weeks: u32,
    ) -> Result<CashFlowForecast, CoreError> {
        let today = clock.today();
        let horizon = forecast_horizon(today, days)?;
        let current_cash = KpiService::total_cash(store)?;
        let planned = ScheduleService::total_for_period(store, today, horizon)?;
        let average = Self::average_weekly_variable_expenses(store, clock, num_weeks)?;
        let forecast = CashFlowForecast::project(days, current_cash, planned, average);
        debug!(
            days,
            %horizon,
            current_cash,
            planned,
            projected = forecast.projected_variable_expenses,
            forecasted = forecast.forecasted_cash,
            "cash flow forecast"
        );
        Ok(forecast)
    }
}

fn forecast_horizon(today: NaiveDate, days: u32) -> Result<NaiveDate, CoreError> {
    if days > MAX_FORECAST_DAYS {
        return Err(CoreError::validation(format!(
            "forecast horizon of {days} days exceeds {MAX_FORECAST_DAYS}"
        )));
    }
    Duration::try_days(i64::from(days))
        .and_then(|span| today.checked_add_signed(span))
        .ok_or_else(|| CoreError::validation("forecast horizon out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_subtracts_fixed_and_scaled_variable_spending() {
        let forecast = CashFlowForecast::project(30, 800.0, 1600.0, 150.0);
        assert!((forecast.projected_variable_expenses - 642.857).abs() < 0.01);
        assert!((forecast.forecasted_cash - -1442.86).abs() < 0.01);
    }

    #[test]
    fn zero_day_projection_keeps_current_cash_less_fixed() {
        let forecast = CashFlowForecast::project(0, 500.0, 0.0, 150.0);
        assert_eq!(forecast.projected_variable_expenses, 0.0);
        assert_eq!(forecast.forecasted_cash, 500.0);
    }

    #[test]
    fn horizon_is_bounded_and_checked() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        assert_eq!(
            forecast_horizon(today, 30).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
        );
        assert!(forecast_horizon(today, u32::MAX).unwrap_err().is_validation());
        assert!(forecast_horizon(NaiveDate::MAX, 1).unwrap_err().is_validation());
    }
}
