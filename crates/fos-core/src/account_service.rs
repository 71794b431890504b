//! Account registry and single-operational-account management.

use fos_domain::{Account, AccountFilter, AccountId, AccountRole, NewAccount};
use tracing::info;

use crate::{
    storage::{expect_row_id, Store, WriteOp},
    CoreError,
};

pub struct AccountService;

impl AccountService {
    /// Registers an account. An operational account takes the role over from
    /// the previous holder within the same atomic write.
    pub fn create(store: &dyn Store, account: NewAccount) -> Result<AccountId, CoreError> {
        let name = account.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::validation("account name must not be empty"));
        }
        Self::validate_name(store, &name)?;
        let account = NewAccount {
            name: name.clone(),
            ..account
        };
        let role = account.role;
        let id = match role {
            AccountRole::Operational => {
                let ids = store.atomic_write(vec![
                    WriteOp::DemoteOperational,
                    WriteOp::InsertAccount(account),
                ])?;
                expect_row_id("insert_account", ids.get(1).copied().flatten())?
            }
            AccountRole::Vault => {
                expect_row_id("insert_account", store.write(WriteOp::InsertAccount(account))?)?
            }
        };
        let id = AccountId(id);
        info!(account = %id, name = %name, %role, "account created");
        Ok(id)
    }

    pub fn list(store: &dyn Store, active_only: bool) -> Result<Vec<Account>, CoreError> {
        let filter = if active_only {
            AccountFilter::active()
        } else {
            AccountFilter::all()
        };
        store.accounts(&filter)
    }

    pub fn get(store: &dyn Store, id: AccountId) -> Result<Account, CoreError> {
        store.account(id)?.ok_or(CoreError::AccountNotFound(id))
    }

    /// Returns the account when it exists and is active.
    ///
    /// Write paths report unknown references as validation failures.
    pub fn require_active(store: &dyn Store, id: AccountId) -> Result<Account, CoreError> {
        match store.account(id)? {
            Some(account) if account.active => Ok(account),
            Some(_) => Err(CoreError::Validation(format!("{id} is inactive"))),
            None => Err(CoreError::Validation(format!("{id} does not exist"))),
        }
    }

    /// The active account currently holding the operational role, if any.
    pub fn operational(store: &dyn Store) -> Result<Option<Account>, CoreError> {
        let filter = AccountFilter {
            role: Some(AccountRole::Operational),
            active: Some(true),
            ..AccountFilter::default()
        };
        Ok(store.accounts(&filter)?.into_iter().next())
    }

    /// Promotes `id` to operational, demoting the previous holder atomically.
    pub fn set_operational(store: &dyn Store, id: AccountId) -> Result<(), CoreError> {
        let account = Self::get(store, id)?;
        if !account.active {
            return Err(CoreError::Validation(format!(
                "{id} is inactive and cannot become operational"
            )));
        }
        if account.is_operational() {
            return Ok(());
        }
        store.atomic_write(vec![
            WriteOp::DemoteOperational,
            WriteOp::SetAccountRole {
                account: id,
                role: AccountRole::Operational,
            },
        ])?;
        info!(account = %id, "operational account reassigned");
        Ok(())
    }

    /// Soft-deactivates an account. History stays in place.
    pub fn deactivate(store: &dyn Store, id: AccountId) -> Result<(), CoreError> {
        let account = Self::get(store, id)?;
        if !account.active {
            return Ok(());
        }
        let mut ops = Vec::with_capacity(2);
        if account.is_operational() {
            ops.push(WriteOp::SetAccountRole {
                account: id,
                role: AccountRole::Vault,
            });
        }
        ops.push(WriteOp::SetAccountActive {
            account: id,
            active: false,
        });
        store.atomic_write(ops)?;
        info!(account = %id, "account deactivated");
        Ok(())
    }

    fn validate_name(store: &dyn Store, candidate: &str) -> Result<(), CoreError> {
        let normalized = candidate.to_lowercase();
        let duplicate = store
            .accounts(&AccountFilter::all())?
            .iter()
            .any(|account| account.name.trim().to_lowercase() == normalized);
        if duplicate {
            Err(CoreError::Validation(format!(
                "Account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
