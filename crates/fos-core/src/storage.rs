//! Persistence contract shared by every service.
//!
//! A store answers typed read queries and applies [`WriteOp`]s, either one at
//! a time or as an all-or-nothing batch. [`Store::atomic_write`] is the only
//! concurrency-safety mechanism the services rely on: a batch that fails
//! part-way must leave no visible trace.

use fos_domain::{
    Account, AccountFilter, AccountId, AccountRole, FixedObligation, NewAccount,
    NewFixedObligation, NewTransaction, ObligationId, Reconciliation, ReconciliationFilter,
    ReconciliationRecord, RowId, Transaction, TransactionFilter,
};

use crate::CoreError;

/// A single write statement.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    InsertAccount(NewAccount),
    SetAccountRole { account: AccountId, role: AccountRole },
    /// Moves whichever account currently holds the operational role back to vault.
    DemoteOperational,
    SetAccountActive { account: AccountId, active: bool },
    InsertTransaction(NewTransaction),
    InsertObligation(NewFixedObligation),
    SetObligationActive { obligation: ObligationId, active: bool },
    /// Insert or overwrite the row keyed on `(week_start, account_id)`.
    UpsertReconciliation(ReconciliationRecord),
    PutSetting { key: String, value: String },
}

impl WriteOp {
    /// Short label used in logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            WriteOp::InsertAccount(_) => "insert_account",
            WriteOp::SetAccountRole { .. } => "set_account_role",
            WriteOp::DemoteOperational => "demote_operational",
            WriteOp::SetAccountActive { .. } => "set_account_active",
            WriteOp::InsertTransaction(_) => "insert_transaction",
            WriteOp::InsertObligation(_) => "insert_obligation",
            WriteOp::SetObligationActive { .. } => "set_obligation_active",
            WriteOp::UpsertReconciliation(_) => "upsert_reconciliation",
            WriteOp::PutSetting { .. } => "put_setting",
        }
    }
}

/// Abstraction over durable relational storage.
pub trait Store: Send + Sync {
    /// Accounts ordered by name, then id.
    fn accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, CoreError>;

    /// Transactions ordered newest first: date descending, then id descending.
    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, CoreError>;

    /// Obligation templates ordered by id.
    fn obligations(&self, active_only: bool) -> Result<Vec<FixedObligation>, CoreError>;

    /// Reconciliations ordered by week start descending, then account id.
    fn reconciliations(
        &self,
        filter: &ReconciliationFilter,
    ) -> Result<Vec<Reconciliation>, CoreError>;

    fn setting(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Applies one statement, returning the generated row id for inserts and upserts.
    fn write(&self, op: WriteOp) -> Result<Option<RowId>, CoreError>;

    /// Applies every statement or none of them.
    fn atomic_write(&self, ops: Vec<WriteOp>) -> Result<Vec<Option<RowId>>, CoreError>;

    fn account(&self, id: AccountId) -> Result<Option<Account>, CoreError> {
        Ok(self.accounts(&AccountFilter::by_id(id))?.into_iter().next())
    }
}

/// Extracts the generated id of an insert, failing loudly when the store returned none.
pub(crate) fn expect_row_id(op: &'static str, id: Option<RowId>) -> Result<RowId, CoreError> {
    id.ok_or_else(|| CoreError::Storage(format!("{op} returned no row id")))
}
