//! Effective-dated allowance percentage entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthKey;

/// A DA or HRA percentage effective from `(year, month)` until superseded.
///
/// Tables are global, not per teacher, and hold at most one entry per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageEntry {
    /// The calendar month the percentage takes effect.
    pub month: u32,
    /// The calendar year the percentage takes effect.
    pub year: i32,
    /// The percentage, e.g. `22` for 22%.
    pub percentage: Decimal,
}

impl PercentageEntry {
    /// The month this entry takes effect.
    pub fn effective_month(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}
