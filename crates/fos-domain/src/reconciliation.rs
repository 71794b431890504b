use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar::WeekRange, common::*};

/// Human-reported balance recorded against the computed balance for one week.
///
/// The delta is informative only; nothing ever adjusts the ledger from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    pub id: ReconciliationId,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub account_id: AccountId,
    pub real_balance: f64,
    pub computed_balance: f64,
    pub delta: f64,
    pub note: Option<String>,
}

impl Reconciliation {
    pub fn week(&self) -> WeekRange {
        WeekRange {
            start: self.week_start,
            end: self.week_end,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.delta.abs() < 0.005
    }
}

impl Identifiable for Reconciliation {
    type Id = ReconciliationId;

    fn id(&self) -> ReconciliationId {
        self.id
    }
}

/// Row written by an upsert keyed on `(week.start, account_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationRecord {
    pub week: WeekRange,
    pub account_id: AccountId,
    pub real_balance: f64,
    pub computed_balance: f64,
    pub note: Option<String>,
}

impl ReconciliationRecord {
    pub fn delta(&self) -> f64 {
        self.real_balance - self.computed_balance
    }
}

/// Read-side selection of reconciliations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationFilter {
    pub week_start: Option<NaiveDate>,
    pub account_id: Option<AccountId>,
}

impl ReconciliationFilter {
    pub fn matches(&self, row: &Reconciliation) -> bool {
        self.week_start.map_or(true, |start| row.week_start == start)
            && self.account_id.map_or(true, |id| row.account_id == id)
    }
}
