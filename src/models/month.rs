//! Calendar month keys.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A `(year, month)` composite key.
///
/// Ordering is chronological, so a `BTreeMap<MonthKey, _>` iterates months in
/// calendar order.
///
/// # Example
///
/// ```
/// use salary_engine::models::MonthKey;
///
/// let march = MonthKey::new(2009, 3);
/// let april = march.next();
/// assert_eq!(april, MonthKey::new(2009, 4));
/// assert!(march < april);
/// assert_eq!(MonthKey::new(2008, 12).next(), MonthKey::new(2009, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 to 12.
    pub month: u32,
}

impl MonthKey {
    /// Creates a new key. `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The preceding calendar month.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// The first day of this month, or `None` if the year is out of range.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The last day of this month, or `None` if the year is out of range.
    pub fn last_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month())
    }

    /// Standard Gregorian number of days in this month.
    pub fn days_in_month(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if is_leap_year(self.year) => 29,
            _ => 28,
        }
    }

    /// Returns `true` if `date` falls within this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Iterator over a closed range of calendar months.
///
/// # Example
///
/// ```
/// use salary_engine::models::{MonthKey, MonthRange};
///
/// let months: Vec<MonthKey> = MonthRange::new(MonthKey::new(2008, 11), MonthKey::new(2009, 2)).collect();
/// assert_eq!(months.len(), 4);
/// assert_eq!(months[2], MonthKey::new(2009, 1));
/// ```
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: MonthKey,
    last: MonthKey,
}

impl MonthRange {
    /// Months from `first` through `last` inclusive. Empty if `first > last`.
    pub fn new(first: MonthKey, last: MonthKey) -> Self {
        Self { next: first, last }
    }

    /// Months touched by the date range `[start, end]`.
    pub fn covering(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(MonthKey::of(start), MonthKey::of(end))
    }
}

impl Iterator for MonthRange {
    type Item = MonthKey;

    fn next(&mut self) -> Option<MonthKey> {
        if self.next > self.last {
            return None;
        }
        let current = self.next;
        self.next = current.next();
        Some(current)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
