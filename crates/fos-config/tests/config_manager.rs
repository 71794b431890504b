use std::path::PathBuf;

use fos_config::{Config, ConfigError, ConfigManager, ReconciliationBasis};
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_missing() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert!(manager.config_path().starts_with(dir.path()));
    assert_eq!(manager.load().unwrap(), Config::default());
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let config = Config {
        database_path: Some(PathBuf::from("/srv/ledger.db")),
        forecast_days: 60,
        average_weeks: 8,
        reconciliation_basis: ReconciliationBasis::WeekEnd,
        ..Config::default()
    };
    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
    let leftovers: Vec<_> = std::fs::read_dir(manager.config_path().parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    std::fs::write(manager.config_path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn default_database_lives_in_base_dir() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let config = Config {
        database_path: Some(dir.path().join("custom.db")),
        ..Config::default()
    };
    if std::env::var_os("FINANCEOS_DB_PATH").is_none() {
        assert_eq!(manager.database_path(&config), dir.path().join("custom.db"));
        assert_eq!(
            manager.database_path(&Config::default()),
            dir.path().join("finance_os.db")
        );
    }
}
