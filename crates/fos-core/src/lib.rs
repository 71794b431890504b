//! fos-core
//!
//! Ledger, scheduling, KPI, reconciliation and forecast services for finance_os.
//! Depends on fos-domain. Persistence is reached only through the [`Store`] trait.

pub mod account_service;
pub mod error;
pub mod forecast_service;
pub mod kpi_service;
pub mod ledger_service;
pub mod reconciliation_service;
pub mod schedule_service;
pub mod settings_service;
pub mod storage;
pub mod summary_service;
pub mod time;


pub use account_service::*;
pub use error::CoreError;
pub use forecast_service::*;
pub use kpi_service::*;
pub use ledger_service::LedgerService;
pub use reconciliation_service::*;
pub use schedule_service::*;
pub use settings_service::*;
pub use storage::{Store, WriteOp};
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
