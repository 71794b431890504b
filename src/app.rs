//! Facade bundling a store, a clock and the configured defaults.
//!
//! Every ledger operation is reachable from here; presentation layers call
//! these methods and render the returned values.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use fos_config::{Config, ReconciliationBasis};
use fos_core::{
    AccountService, BalanceBasis, CashFlowForecast, Clock, DashboardSnapshot, ForecastService,
    KpiService, LedgerService, ReconcileRequest, ReconciliationService, ScheduleService,
    SettingsService, Store, SummaryService, SystemClock, WeeklySpending,
};
use fos_domain::{
    Account, AccountId, FixedObligation, FixedObligationEvent, NewAccount, NewFixedObligation,
    NewTransaction, ObligationId, Reconciliation, ReconciliationId, Transaction,
    TransactionFilter, TransactionId, TransferReceipt, TransferRequest,
};
use fos_storage_sqlite::SqliteStore;

use crate::errors::Result;

/// Defaults applied when a caller does not pass them explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub forecast_days: u32,
    pub average_weeks: u32,
    pub reconciliation_basis: BalanceBasis,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults::from(&Config::default())
    }
}

impl From<&Config> for Defaults {
    fn from(config: &Config) -> Self {
        Self {
            forecast_days: config.forecast_days,
            average_weeks: config.average_weeks,
            reconciliation_basis: match config.reconciliation_basis {
                ReconciliationBasis::CallTime => BalanceBasis::CallTime,
                ReconciliationBasis::WeekEnd => BalanceBasis::WeekEnd,
            },
        }
    }
}

pub struct FinanceOs {
    store: Box<dyn Store>,
    clock: Box<dyn Clock>,
    defaults: Defaults,
}

impl FinanceOs {
    pub fn new(store: Box<dyn Store>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            defaults: Defaults::default(),
        }
    }

    /// Opens the SQLite database at `path` with the system clock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = SqliteStore::open(path)?;
        Ok(Self::new(Box::new(store), Box::new(SystemClock)))
    }

    pub fn in_memory() -> Result<Self> {
        let store = SqliteStore::in_memory()?;
        Ok(Self::new(Box::new(store), Box::new(SystemClock)))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> Defaults {
        self.defaults
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    // Accounts

    pub fn create_account(&self, account: NewAccount) -> Result<AccountId> {
        Ok(AccountService::create(self.store(), account)?)
    }

    pub fn list_accounts(&self, active_only: bool) -> Result<Vec<Account>> {
        Ok(AccountService::list(self.store(), active_only)?)
    }

    pub fn account(&self, id: AccountId) -> Result<Account> {
        Ok(AccountService::get(self.store(), id)?)
    }

    pub fn operational_account(&self) -> Result<Option<Account>> {
        Ok(AccountService::operational(self.store())?)
    }

    pub fn set_operational(&self, id: AccountId) -> Result<()> {
        Ok(AccountService::set_operational(self.store(), id)?)
    }

    pub fn deactivate_account(&self, id: AccountId) -> Result<()> {
        Ok(AccountService::deactivate(self.store(), id)?)
    }

    // Ledger

    pub fn add_transaction(&self, transaction: NewTransaction) -> Result<TransactionId> {
        Ok(LedgerService::add_transaction(self.store(), transaction)?)
    }

    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(LedgerService::list_transactions(self.store(), filter)?)
    }

    pub fn account_balance(&self, id: AccountId, as_of: Option<NaiveDate>) -> Result<f64> {
        Ok(LedgerService::account_balance(self.store(), id, as_of)?)
    }

    pub fn add_transfer(&self, request: TransferRequest) -> Result<TransferReceipt> {
        Ok(LedgerService::add_transfer(self.store(), request)?)
    }

    // Fixed obligations

    pub fn add_obligation(&self, obligation: NewFixedObligation) -> Result<ObligationId> {
        Ok(ScheduleService::add_obligation(self.store(), obligation)?)
    }

    pub fn deactivate_obligation(&self, id: ObligationId) -> Result<()> {
        Ok(ScheduleService::deactivate_obligation(self.store(), id)?)
    }

    pub fn list_active_obligations(&self) -> Result<Vec<FixedObligation>> {
        Ok(ScheduleService::list_active_obligations(self.store())?)
    }

    pub fn generate_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FixedObligationEvent>> {
        Ok(ScheduleService::generate_events(self.store(), start, end)?)
    }

    pub fn total_for_period(&self, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        Ok(ScheduleService::total_for_period(self.store(), start, end)?)
    }

    // KPIs and settings

    pub fn weekly_variable_expenses(&self, week_start: NaiveDate, account: AccountId) -> Result<f64> {
        Ok(KpiService::weekly_variable_expenses(self.store(), week_start, account)?)
    }

    pub fn current_week_variable_expenses(
        &self,
        account: AccountId,
        reference: Option<NaiveDate>,
    ) -> Result<f64> {
        Ok(KpiService::current_week_variable_expenses(
            self.store(),
            self.clock.as_ref(),
            account,
            reference,
        )?)
    }

    pub fn total_cash(&self) -> Result<f64> {
        Ok(KpiService::total_cash(self.store())?)
    }

    pub fn weekly_spending_status(
        &self,
        account: AccountId,
        reference: Option<NaiveDate>,
    ) -> Result<WeeklySpending> {
        Ok(KpiService::weekly_spending_status(
            self.store(),
            self.clock.as_ref(),
            account,
            reference,
        )?)
    }

    pub fn weekly_cap(&self) -> Result<f64> {
        Ok(SettingsService::weekly_cap(self.store())?)
    }

    pub fn set_weekly_cap(&self, amount: f64) -> Result<()> {
        Ok(SettingsService::set_weekly_cap(self.store(), amount)?)
    }

    // Reconciliation

    /// Reconciles with the configured balance basis.
    pub fn reconcile_account(
        &self,
        week_start: NaiveDate,
        account: AccountId,
        real_balance: f64,
    ) -> Result<ReconciliationId> {
        let request = ReconcileRequest::new(week_start, account, real_balance)
            .with_basis(self.defaults.reconciliation_basis);
        self.reconcile(request)
    }

    pub fn reconcile(&self, request: ReconcileRequest) -> Result<ReconciliationId> {
        Ok(ReconciliationService::reconcile(self.store(), request)?)
    }

    pub fn reconciliation_for(
        &self,
        week_start: NaiveDate,
        account: AccountId,
    ) -> Result<Option<Reconciliation>> {
        Ok(ReconciliationService::reconciliation_for(
            self.store(),
            week_start,
            account,
        )?)
    }

    pub fn reconciliations_for_week(&self, week_start: NaiveDate) -> Result<Vec<Reconciliation>> {
        Ok(ReconciliationService::reconciliations_for_week(
            self.store(),
            week_start,
        )?)
    }

    pub fn is_week_reconciled(&self, week_start: NaiveDate) -> Result<bool> {
        Ok(ReconciliationService::is_week_reconciled(self.store(), week_start)?)
    }

    // Forecast and summary

    pub fn average_weekly_variable_expenses(&self, num_weeks: u32) -> Result<f64> {
        Ok(ForecastService::average_weekly_variable_expenses(
            self.store(),
            self.clock.as_ref(),
            num_weeks,
        )?)
    }

    pub fn forecast_cash_flow(&self, days: u32) -> Result<CashFlowForecast> {
        Ok(ForecastService::forecast_cash_flow(
            self.store(),
            self.clock.as_ref(),
            days,
        )?)
    }

    /// Forecast over `days` using the configured trailing window.
    pub fn forecast_with(&self, days: u32, num_weeks: u32) -> Result<CashFlowForecast> {
        Ok(ForecastService::forecast_with(
            self.store(),
            self.clock.as_ref(),
            days,
            num_weeks,
        )?)
    }

    /// Forecast using the configured horizon and trailing window.
    pub fn default_forecast(&self) -> Result<CashFlowForecast> {
        self.forecast_with(self.defaults.forecast_days, self.defaults.average_weeks)
    }

    pub fn dashboard(&self, reference: Option<NaiveDate>) -> Result<DashboardSnapshot> {
        let snapshot = SummaryService::dashboard(self.store(), self.clock.as_ref(), reference)?;
        debug!(week = %snapshot.week, total_cash = snapshot.total_cash, "dashboard computed");
        Ok(snapshot)
    }
}
