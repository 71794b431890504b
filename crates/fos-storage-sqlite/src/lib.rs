//! fos-storage-sqlite
//!
//! SQLite persistence for finance_os. Implements `fos_core::Store` on a single
//! connection guarded by a mutex; multi-statement batches run inside one
//! SQLite transaction.

mod error;
mod rows;
pub mod schema;
mod store;

pub use error::StoreError;
pub use store::SqliteStore;
