//! Recurring fixed obligations and their expansion into dated events.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{calendar, common::*};

/// Template for a bill that falls due on the same day every month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedObligation {
    pub id: ObligationId,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    /// Day of month, 1..=31. Clamped to the month's last day when needed.
    pub due_day: u32,
    pub account_id: AccountId,
    pub category: Option<String>,
    pub active: bool,
}

impl FixedObligation {
    /// Concrete due date inside the given month.
    pub fn due_date_in(&self, year: i32, month: u32) -> Option<NaiveDate> {
        calendar::clamp_to_month(year, month, self.due_day)
    }

    /// Expands the template into events whose due date lies in `[start, end]`.
    ///
    /// Every calendar month overlapping the range is visited exactly once.
    pub fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<FixedObligationEvent> {
        let mut events = Vec::new();
        if start > end {
            return events;
        }
        let (mut year, mut month) = (start.year(), start.month());
        let last = (end.year(), end.month());
        while (year, month) <= last {
            if let Some(due_date) = self.due_date_in(year, month) {
                if start <= due_date && due_date <= end {
                    events.push(FixedObligationEvent {
                        obligation: self.clone(),
                        due_date,
                    });
                }
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        events
    }
}

impl Identifiable for FixedObligation {
    type Id = ObligationId;

    fn id(&self) -> ObligationId {
        self.id
    }
}

/// Input for registering a fixed obligation template.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFixedObligation {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub due_day: u32,
    pub account_id: AccountId,
    pub category: Option<String>,
}

impl NewFixedObligation {
    pub fn monthly(name: impl Into<String>, amount: f64, due_day: u32, account_id: AccountId) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency: Frequency::Monthly,
            due_day,
            account_id,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A template paired with one concrete due date. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedObligationEvent {
    pub obligation: FixedObligation,
    pub due_date: NaiveDate,
}

impl FixedObligationEvent {
    pub fn amount(&self) -> f64 {
        self.obligation.amount
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "monthly" => Ok(Frequency::Monthly),
            other => Err(ParseEnumError::new("frequency", other)),
        }
    }
}
