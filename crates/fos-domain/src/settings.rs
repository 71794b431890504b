//! Well-known keys of the key/value settings table.

/// Weekly variable-expense ceiling for the operational account.
pub const WEEKLY_CAP_AMOUNT: &str = "weekly_cap_amount";
