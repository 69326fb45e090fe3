//! Yearly increment models of the three pay commission eras.
//!
//! | Era | Increment | Rounding |
//! |-----|-----------|----------|
//! | 5th | flat 150 payable / 125 paid | none |
//! | 6th | 3% of basic + grade pay | up to the next 10 |
//! | 7th | 3% of basic + grade pay | to the hundred, remainder above 50 rounds up |

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::EngineSettings;
use crate::models::{Figures, MonthKey, PayBaseline, PayCommission};

const TEN: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const FIFTY: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Rounds up to the next multiple of 10.
///
/// ```
/// use salary_engine::calculation::ceil_to_ten;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(ceil_to_ten(Decimal::from_str("451.8").unwrap()), Decimal::from(460));
/// assert_eq!(ceil_to_ten(Decimal::from(450)), Decimal::from(450));
/// ```
pub fn ceil_to_ten(value: Decimal) -> Decimal {
    (value / TEN).ceil() * TEN
}

/// Rounds to a whole hundred: a remainder of up to 50 rounds down, anything
/// above 50 rounds up.
///
/// ```
/// use salary_engine::calculation::round_to_nearest_50;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_nearest_50(Decimal::from(1550)), Decimal::from(1500));
/// assert_eq!(round_to_nearest_50(Decimal::from(1551)), Decimal::from(1600));
/// assert_eq!(round_to_nearest_50(Decimal::from(1599)), Decimal::from(1600));
/// ```
pub fn round_to_nearest_50(value: Decimal) -> Decimal {
    let hundreds = (value / HUNDRED).floor() * HUNDRED;
    if value - hundreds <= FIFTY {
        hundreds
    } else {
        hundreds + HUNDRED
    }
}

/// How an era computes and schedules its yearly increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementModel {
    /// 5th era: a fixed amount added to basic. Displayed basic is inflated
    /// by `revision_multiplier` from `revision_month` onwards.
    Flat {
        /// The amount added each anniversary.
        amount: Decimal,
        /// First month of the displayed-basic revision.
        revision_month: MonthKey,
        /// Displayed-basic multiplier.
        revision_multiplier: Decimal,
    },
    /// 6th era: `rate` of basic plus grade pay, rounded up to the next 10.
    PercentRoundTen {
        /// The increment rate.
        rate: Decimal,
    },
    /// 7th era: `rate` of basic plus grade pay, see [`round_to_nearest_50`].
    PercentRoundFifty {
        /// The increment rate.
        rate: Decimal,
    },
}

impl IncrementModel {
    /// The model an era uses for the given figures.
    pub fn for_era(era: PayCommission, figures: Figures, settings: &EngineSettings) -> Self {
        match era {
            PayCommission::Fifth => IncrementModel::Flat {
                amount: settings.flat_increment.for_figures(figures),
                revision_month: settings.pay_revision_month,
                revision_multiplier: settings.pay_revision_multiplier,
            },
            PayCommission::Sixth => IncrementModel::PercentRoundTen {
                rate: settings.yearly_increment_rate,
            },
            PayCommission::Seventh => IncrementModel::PercentRoundFifty {
                rate: settings.yearly_increment_rate,
            },
        }
    }

    /// The amount added to basic on an anniversary.
    pub fn increment(&self, current: PayBaseline) -> Decimal {
        match *self {
            IncrementModel::Flat { amount, .. } => amount,
            IncrementModel::PercentRoundTen { rate } => ceil_to_ten(rate * current.total()),
            IncrementModel::PercentRoundFifty { rate } => {
                round_to_nearest_50(rate * current.total())
            }
        }
    }

    /// The displayed basic for `basic` in `month`.
    pub fn displayed_basic(&self, basic: Decimal, month: MonthKey) -> Decimal {
        match *self {
            IncrementModel::Flat {
                revision_month,
                revision_multiplier,
                ..
            } if month >= revision_month => basic * revision_multiplier,
            _ => basic,
        }
    }

    /// Whether the yearly increment is due in `month`, given the anniversary
    /// date. The flat model requires a year strictly after the anchor year;
    /// the percent models are due from the anniversary month itself.
    pub fn is_due(&self, month: MonthKey, anniversary: NaiveDate) -> bool {
        if month.month != anniversary.month() {
            return false;
        }
        match self {
            IncrementModel::Flat { .. } => month.year > anniversary.year(),
            IncrementModel::PercentRoundTen { .. } | IncrementModel::PercentRoundFifty { .. } => {
                month >= MonthKey::of(anniversary)
            }
        }
    }

    /// Whether a mid-month grade change splits the month into two rows.
    pub fn splits_mid_month(&self) -> bool {
        !matches!(self, IncrementModel::Flat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_round_to_nearest_50_boundaries() {
        assert_eq!(round_to_nearest_50(dec("1550")), dec("1500"));
        assert_eq!(round_to_nearest_50(dec("1551")), dec("1600"));
        assert_eq!(round_to_nearest_50(dec("1599")), dec("1600"));
        assert_eq!(round_to_nearest_50(dec("1500")), dec("1500"));
        assert_eq!(round_to_nearest_50(dec("1550.4")), dec("1600"));
    }

    #[test]
    fn test_ceil_to_ten() {
        assert_eq!(ceil_to_ten(dec("451.8")), dec("460"));
        assert_eq!(ceil_to_ten(dec("460")), dec("460"));
        assert_eq!(ceil_to_ten(dec("460.01")), dec("470"));
    }

    #[test]
    fn test_sixth_era_increment_example() {
        let model = IncrementModel::for_era(
            PayCommission::Sixth,
            Figures::Payable,
            &EngineSettings::default(),
        );
        let current = PayBaseline::new(dec("10860"), dec("4200"));
        assert_eq!(model.increment(current), dec("460"));
    }

    #[test]
    fn test_seventh_era_increment() {
        let model = IncrementModel::for_era(
            PayCommission::Seventh,
            Figures::Payable,
            &EngineSettings::default(),
        );
        // 3% of 56100 = 1683 -> 1700
        assert_eq!(
            model.increment(PayBaseline::new(dec("56100"), Decimal::ZERO)),
            dec("1700")
        );
        // 3% of 51700 = 1551 -> 1600
        assert_eq!(
            model.increment(PayBaseline::new(dec("51700"), Decimal::ZERO)),
            dec("1600")
        );
    }

    #[test]
    fn test_flat_increment_depends_on_figures() {
        let settings = EngineSettings::default();
        let payable = IncrementModel::for_era(PayCommission::Fifth, Figures::Payable, &settings);
        let paid = IncrementModel::for_era(PayCommission::Fifth, Figures::Paid, &settings);
        let current = PayBaseline::new(dec("1000"), Decimal::ZERO);
        assert_eq!(payable.increment(current), dec("150"));
        assert_eq!(paid.increment(current), dec("125"));
    }

    #[test]
    fn test_flat_displayed_basic_after_revision() {
        let model = IncrementModel::for_era(
            PayCommission::Fifth,
            Figures::Payable,
            &EngineSettings::default(),
        );
        assert_eq!(
            model.displayed_basic(dec("1150"), MonthKey::new(2004, 3)),
            dec("1150")
        );
        assert_eq!(
            model.displayed_basic(dec("1150"), MonthKey::new(2004, 4)),
            dec("1725")
        );
    }

    #[test]
    fn test_percent_models_display_raw_basic() {
        let model = IncrementModel::PercentRoundTen { rate: dec("0.03") };
        assert_eq!(
            model.displayed_basic(dec("10860"), MonthKey::new(2010, 1)),
            dec("10860")
        );
        assert!(model.splits_mid_month());
    }

    #[test]
    fn test_flat_is_due_strictly_after_anchor_year() {
        let model = IncrementModel::for_era(
            PayCommission::Fifth,
            Figures::Payable,
            &EngineSettings::default(),
        );
        let anchor = date(2000, 1, 10);
        assert!(!model.is_due(MonthKey::new(2000, 1), anchor));
        assert!(model.is_due(MonthKey::new(2001, 1), anchor));
        assert!(!model.is_due(MonthKey::new(2001, 2), anchor));
        assert!(!model.splits_mid_month());
    }

    #[test]
    fn test_percent_is_due_from_anniversary_month() {
        let model = IncrementModel::PercentRoundFifty { rate: dec("0.03") };
        let anniversary = date(2016, 7, 1);
        assert!(!model.is_due(MonthKey::new(2015, 7), anniversary));
        assert!(model.is_due(MonthKey::new(2016, 7), anniversary));
        assert!(model.is_due(MonthKey::new(2017, 7), anniversary));
        assert!(!model.is_due(MonthKey::new(2017, 1), anniversary));
    }

    proptest! {
        #[test]
        fn prop_ceil_to_ten_never_decreases(cents in 1i64..100_000_000) {
            let value = Decimal::new(cents, 2);
            let rounded = ceil_to_ten(value);
            prop_assert!(rounded >= value);
            prop_assert!(rounded - value < TEN);
            prop_assert_eq!(rounded % TEN, Decimal::ZERO);
        }

        #[test]
        fn prop_round_to_nearest_50_lands_on_hundreds(whole in 0i64..10_000_000) {
            let value = Decimal::from(whole);
            let rounded = round_to_nearest_50(value);
            prop_assert_eq!(rounded % HUNDRED, Decimal::ZERO);
            prop_assert!((rounded - value).abs() <= FIFTY);
        }
    }
}
