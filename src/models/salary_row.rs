//! Computed salary rows.
//!
//! This module contains the row types emitted by the engine: the raw monthly
//! progression row ([`ComputedSalaryRow`]), the allowance-aware row
//! ([`AllowanceRow`]) and the payable-versus-paid reconciliation row
//! ([`DifferenceRow`]). Rows are rebuilt from scratch on every computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MonthKey, PayCommission};

/// Serializes in-month event dates as `dd/mm/yyyy`.
mod dmy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let value: Option<String> = Option::deserialize(d)?;
        value
            .map(|s| NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// One month of a pay progression.
///
/// A month normally produces exactly one row. When a grade change lands on a
/// day other than the 1st in the 6th or 7th era, the month produces two rows
/// sharing `(year, month)` but with different `date` values.
///
/// # Example
///
/// ```
/// use salary_engine::models::ComputedSalaryRow;
/// use rust_decimal::Decimal;
///
/// let row = ComputedSalaryRow {
///     month: 7,
///     year: 2010,
///     date: None,
///     basic: Decimal::from(11320),
///     m_basic: Decimal::from(11320),
///     grade_pay: Decimal::from(4200),
///     total: Decimal::from(15520),
///     yearly_increment_applied: true,
/// };
/// let json = serde_json::to_value(&row).unwrap();
/// assert!(json["date"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedSalaryRow {
    /// The calendar month.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// The in-month event date (grade change), serialized as `dd/mm/yyyy`.
    #[serde(default, with = "dmy_date")]
    pub date: Option<NaiveDate>,
    /// Raw basic pay carried by the progression.
    #[serde(alias = "xbasic")]
    pub basic: Decimal,
    /// Displayed basic pay.
    #[serde(rename = "mbasic")]
    pub m_basic: Decimal,
    /// Grade pay.
    pub grade_pay: Decimal,
    /// `m_basic + grade_pay`.
    pub total: Decimal,
    /// Whether the yearly increment was applied this month.
    pub yearly_increment_applied: bool,
}

impl ComputedSalaryRow {
    /// The month this row belongs to.
    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

/// One month of an allowance-aware salary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRow {
    /// The calendar month.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// The in-month event date carried over from the progression row.
    #[serde(default, with = "dmy_date")]
    pub date: Option<NaiveDate>,
    /// The era whose progression supplied this month.
    pub commission: PayCommission,
    /// Gregorian days in the month.
    pub days_in_month: u32,
    /// Leave Without Pay days.
    pub lwp_days: u32,
    /// Half Leave Without Pay days.
    pub hlwp_days: u32,
    /// Days paid for, after leave and mid-month cutovers.
    pub working_days: Decimal,
    /// Full-month displayed basic from the progression.
    #[serde(rename = "mbasic")]
    pub m_basic: Decimal,
    /// Full-month grade pay from the progression.
    pub m_grade_pay: Decimal,
    /// Prorated basic pay.
    pub basic: Decimal,
    /// Prorated grade pay.
    pub grade_pay: Decimal,
    /// `basic + grade_pay` after proration.
    pub calculated_total: Decimal,
    /// DA percentage in effect.
    pub da_percent: Decimal,
    /// DA amount.
    pub da_amount: Decimal,
    /// HRA percentage in effect.
    pub hra_percent: Decimal,
    /// HRA amount.
    pub hra_amount: Decimal,
    /// `calculated_total + da_amount + hra_amount`.
    pub final_total: Decimal,
}

impl AllowanceRow {
    /// The month this row belongs to.
    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

/// A payable-versus-paid comparison for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceRow {
    /// The calendar month.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// The entitled breakdown.
    pub payable: AllowanceRow,
    /// The disbursed breakdown.
    pub paid: AllowanceRow,
    /// Payable minus paid prorated basic.
    pub basic_difference: Decimal,
    /// Payable minus paid prorated grade pay.
    pub grade_pay_difference: Decimal,
    /// Payable minus paid calculated total.
    pub total_difference: Decimal,
    /// Payable minus paid DA amount.
    pub da_difference: Decimal,
    /// Payable minus paid HRA amount.
    pub hra_difference: Decimal,
    /// Payable minus paid final total.
    pub final_total_difference: Decimal,
}
