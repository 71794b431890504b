use tracing::info;

use fos_domain::settings::WEEKLY_CAP_AMOUNT;

use crate::{
    storage::{Store, WriteOp},
    CoreError,
};

pub struct SettingsService;

impl SettingsService {
    /// Weekly variable-expense ceiling; `0.0` when never configured.
    pub fn weekly_cap(store: &dyn Store) -> Result<f64, CoreError> {
        match store.setting(WEEKLY_CAP_AMOUNT)? {
            None => Ok(0.0),
            Some(raw) if raw.trim().is_empty() => Ok(0.0),
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                CoreError::Storage(format!("setting `{WEEKLY_CAP_AMOUNT}` holds `{raw}`"))
            }),
        }
    }

    pub fn set_weekly_cap(store: &dyn Store, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "weekly cap must be zero or positive, got {amount}"
            )));
        }
        store.write(WriteOp::PutSetting {
            key: WEEKLY_CAP_AMOUNT.to_string(),
            value: amount.to_string(),
        })?;
        info!(amount, "weekly cap updated");
        Ok(())
    }
}
