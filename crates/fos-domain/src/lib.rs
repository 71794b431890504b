//! fos-domain
//!
//! Pure domain models (Account, Transaction, FixedObligation, Reconciliation)
//! and calendar arithmetic. No I/O, no storage. Only data types and core enums.

pub mod account;
pub mod calendar;
pub mod common;
pub mod obligation;
pub mod reconciliation;
pub mod settings;
pub mod transaction;

pub use account::*;
pub use calendar::{DateParseError, WeekRange};
pub use common::*;
pub use obligation::*;
pub use reconciliation::*;
pub use transaction::*;
