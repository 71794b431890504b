use std::{env, path::PathBuf};

use dirs::home_dir;

/// Overrides the data directory holding the config and default database.
pub const HOME_ENV: &str = "FINANCEOS_HOME";
const DEFAULT_DIR_NAME: &str = ".finance_os";

/// Installs the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins over `default_filter` when set; an unparseable filter falls
/// back to the built-in directives.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(fos_config::DEFAULT_LOG_FILTER));

    // A subscriber installed elsewhere (e.g. by a test harness) stays in place.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the application data directory, defaulting to `~/.finance_os`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
