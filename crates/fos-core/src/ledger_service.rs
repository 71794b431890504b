//! Transaction recording, balance computation and the two-row transfer protocol.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use fos_domain::{
    AccountId, NewTransaction, Transaction, TransactionFilter, TransactionId, TransactionKind,
    TransferReceipt, TransferRequest, TRANSFER_CATEGORY,
};

use crate::{
    account_service::AccountService,
    storage::{expect_row_id, Store, WriteOp},
    CoreError,
};

pub struct LedgerService;

impl LedgerService {
    /// Appends one income or expense row and returns its identifier.
    pub fn add_transaction(
        store: &dyn Store,
        transaction: NewTransaction,
    ) -> Result<TransactionId, CoreError> {
        validate_amount(transaction.amount)?;
        if transaction.kind == TransactionKind::Transfer {
            return Err(CoreError::validation(
                "transfers are recorded with add_transfer",
            ));
        }
        AccountService::require_active(store, transaction.account_id)?;
        let NewTransaction {
            date,
            amount,
            kind,
            account_id,
            ..
        } = transaction;
        let id = TransactionId(expect_row_id(
            "insert_transaction",
            store.write(WriteOp::InsertTransaction(NewTransaction {
                transfer_group: None,
                ..transaction
            }))?,
        )?);
        info!(transaction = %id, account = %account_id, %kind, amount, %date, "transaction recorded");
        Ok(id)
    }

    /// Matching transactions, newest first.
    pub fn list_transactions(
        store: &dyn Store,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, CoreError> {
        store.transactions(filter)
    }

    /// `Σ income − Σ expense` over the account's rows dated on or before `as_of`.
    ///
    /// Every account opens at zero. Transfer legs are ordinary income/expense
    /// rows, so no special case is needed here.
    pub fn account_balance(
        store: &dyn Store,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, CoreError> {
        AccountService::get(store, account_id)?;
        let mut filter = TransactionFilter::for_account(account_id);
        filter.date_to = as_of;
        let rows = store.transactions(&filter)?;
        let legacy_markers = rows
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Transfer)
            .count();
        if legacy_markers > 0 {
            warn!(
                account = %account_id,
                legacy_markers,
                "ignoring single-row transfer markers in balance"
            );
        }
        let balance: f64 = rows.iter().map(Transaction::signed_amount).sum();
        debug!(account = %account_id, ?as_of, balance, "account balance computed");
        Ok(balance)
    }

    /// Records a transfer as an expense on the source and an income on the
    /// destination. Both rows are written in one atomic batch.
    pub fn add_transfer(
        store: &dyn Store,
        request: TransferRequest,
    ) -> Result<TransferReceipt, CoreError> {
        validate_amount(request.amount)?;
        if request.from_account == request.to_account {
            return Err(CoreError::validation(
                "transfer source and destination must differ",
            ));
        }
        AccountService::require_active(store, request.from_account)?;
        AccountService::require_active(store, request.to_account)?;

        let group = Uuid::new_v4();
        let description = transfer_description(&request);
        let leg = |kind: TransactionKind, account_id: AccountId| NewTransaction {
            date: request.date,
            amount: request.amount,
            kind,
            account_id,
            category: Some(TRANSFER_CATEGORY.to_string()),
            description: Some(description.clone()),
            method: request.method,
            transfer_group: Some(group),
        };
        let ids = store.atomic_write(vec![
            WriteOp::InsertTransaction(leg(TransactionKind::Expense, request.from_account)),
            WriteOp::InsertTransaction(leg(TransactionKind::Income, request.to_account)),
        ])?;
        let receipt = TransferReceipt {
            group,
            expense_id: TransactionId(expect_row_id(
                "insert_transaction",
                ids.first().copied().flatten(),
            )?),
            income_id: TransactionId(expect_row_id(
                "insert_transaction",
                ids.get(1).copied().flatten(),
            )?),
        };
        info!(
            %group,
            from = %request.from_account,
            to = %request.to_account,
            amount = request.amount,
            date = %request.date,
            "transfer recorded"
        );
        Ok(receipt)
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "amount must be a positive number, got {amount}"
        )))
    }
}

fn transfer_description(request: &TransferRequest) -> String {
    let target = request.to_account.get();
    match request.description.as_deref().map(str::trim) {
        Some(note) if !note.is_empty() => format!("Transfer to account {target}: {note}"),
        _ => format!("Transfer to account {target}"),
    }
}
