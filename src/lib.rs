#![doc(test(attr(deny(warnings))))]

//! finance_os is a cash-flow ledger: accounts, income and expense rows,
//! two-leg transfers, monthly fixed obligations, weekly spending indicators,
//! human-reviewed reconciliation and a short-horizon cash forecast.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use app::{Defaults, FinanceOs};
pub use errors::FinanceError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once with `log_filter`; `RUST_LOG` wins when set.
/// Later calls are no-ops.
pub fn init(log_filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(log_filter);
        tracing::debug!(log_filter, "finance_os tracing initialized.");
    });
}
