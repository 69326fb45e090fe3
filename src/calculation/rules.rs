//! Historical pay commission constants.
//!
//! These are facts of one specific pay-commission timeline, not tunables.
//! [`EngineSettings`](crate::config::EngineSettings) defaults to them and a
//! dataset may only override them through `settings.yaml`.

use rust_decimal::Decimal;

use crate::models::MonthKey;

/// From the first day of this month the 5th-era displayed basic is inflated
/// by [`PAY_REVISION_MULTIPLIER`].
pub const PAY_REVISION_MONTH: MonthKey = MonthKey {
    year: 2004,
    month: 4,
};

/// Multiplier applied to 5th-era basic on and after [`PAY_REVISION_MONTH`].
pub const PAY_REVISION_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The 5th era runs through the last day of this month (31 March 2009).
pub const FIFTH_ERA_LAST_MONTH: MonthKey = MonthKey {
    year: 2009,
    month: 3,
};

/// The 6th era starts on the first day of this month (1 April 2009).
pub const SIXTH_ERA_FIRST_MONTH: MonthKey = MonthKey {
    year: 2009,
    month: 4,
};

/// The last month any era is computed for.
pub const FINAL_HORIZON_MONTH: MonthKey = MonthKey {
    year: 2019,
    month: 1,
};

/// The terminal month paid from a fixed mid-month cutover day.
pub const FINAL_CUTOFF_MONTH: MonthKey = MonthKey {
    year: 2019,
    month: 1,
};

/// The cutover day of [`FINAL_CUTOFF_MONTH`].
pub const FINAL_CUTOVER_DAY: u32 = 11;

/// Flat 5th-era yearly increment on payable figures.
pub const FLAT_INCREMENT_PAYABLE: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Flat 5th-era yearly increment on paid figures.
pub const FLAT_INCREMENT_PAID: Decimal = Decimal::from_parts(125, 0, 0, false, 0);

/// Yearly increment rate of the 6th and 7th eras, applied to basic plus grade pay.
pub const YEARLY_INCREMENT_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);
