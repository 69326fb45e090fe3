//! Effective-dated DA/HRA percentage lookup.

use rust_decimal::Decimal;

use crate::models::{MonthKey, PercentageEntry};

/// Resolves the percentage in effect for `(year, month)`.
///
/// Among all entries effective on or before the target month, the one with
/// the greatest `(year, month)` wins. The table may be in any order. Returns
/// zero when no entry is in effect yet.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::percentage_for;
/// use salary_engine::models::PercentageEntry;
/// use rust_decimal::Decimal;
///
/// let table = vec![
///     PercentageEntry { month: 7, year: 2009, percentage: Decimal::from(27) },
///     PercentageEntry { month: 1, year: 2009, percentage: Decimal::from(22) },
/// ];
/// assert_eq!(percentage_for(&table, 2009, 6), Decimal::from(22));
/// assert_eq!(percentage_for(&table, 2010, 3), Decimal::from(27));
/// assert_eq!(percentage_for(&table, 2008, 12), Decimal::ZERO);
/// ```
pub fn percentage_for(table: &[PercentageEntry], year: i32, month: u32) -> Decimal {
    let target = MonthKey { year, month };
    table
        .iter()
        .filter(|entry| entry.effective_month() <= target)
        .max_by_key(|entry| entry.effective_month())
        .map(|entry| entry.percentage)
        .unwrap_or(Decimal::ZERO)
}
