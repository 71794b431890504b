use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Overrides the database location regardless of the stored config.
pub const DB_PATH_ENV: &str = "FINANCEOS_DB_PATH";
pub const DEFAULT_DB_FILE: &str = "finance_os.db";
pub const DEFAULT_LOG_FILTER: &str = "finance_os=info,fos_core=info,fos_storage_sqlite=warn";

/// Balance compared against the reported one when reconciling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationBasis {
    #[default]
    CallTime,
    WeekEnd,
}

/// User-editable settings persisted as `config/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Database file. Defaults to `<data dir>/finance_os.db`.
    pub database_path: Option<PathBuf>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Config::default_forecast_days")]
    pub forecast_days: u32,
    #[serde(default = "Config::default_average_weeks")]
    pub average_weeks: u32,
    #[serde(default)]
    pub reconciliation_basis: ReconciliationBasis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: Self::default_log_filter(),
            forecast_days: Self::default_forecast_days(),
            average_weeks: Self::default_average_weeks(),
            reconciliation_basis: ReconciliationBasis::default(),
        }
    }
}

impl Config {
    fn default_log_filter() -> String {
        DEFAULT_LOG_FILTER.into()
    }

    fn default_forecast_days() -> u32 {
        30
    }

    fn default_average_weeks() -> u32 {
        4
    }

    /// Effective database path: `FINANCEOS_DB_PATH`, then the stored path,
    /// then `finance_os.db` inside `data_dir`.
    pub fn resolve_database_path(&self, data_dir: &Path) -> PathBuf {
        if let Some(from_env) = env::var_os(DB_PATH_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(from_env);
        }
        self.database_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_DB_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"forecast_days": 14}"#).unwrap();
        assert_eq!(config.forecast_days, 14);
        assert_eq!(config.average_weeks, 4);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.reconciliation_basis, ReconciliationBasis::CallTime);
    }

    #[test]
    fn basis_uses_snake_case_names() {
        let json = serde_json::to_string(&ReconciliationBasis::WeekEnd).unwrap();
        assert_eq!(json, "\"week_end\"");
    }
}
