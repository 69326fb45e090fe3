//! Allowance and proration layer.
//!
//! Turns the stitched progression into payroll rows: working days after leave
//! and mid-month cutovers, prorated basic and grade pay, then DA and HRA on
//! top. Money is rounded half away from zero at each stage.

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{FinalCutoff, PercentageTables};
use crate::models::{AllowanceRow, LeaveRecord, MonthKey, MonthRange};

use super::era_router::{Horizon, StitchedMonth, StitchedSeries};
use super::leave_lookup::{MonthlyLeave, monthly_leave};
use super::percentage_lookup::percentage_for;

const TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Rounds a money amount to a whole unit, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the days paid for in a month.
///
/// `from_day` is the day pay starts from: the in-month event day, the final
/// cutover day, or `None` for a full month. Each HLWP day counts as half a
/// day. The result never goes below zero.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{working_days, MonthlyLeave};
/// use rust_decimal::Decimal;
///
/// let leave = MonthlyLeave { lwp_days: 2, hlwp_days: 4 };
/// assert_eq!(working_days(30, None, leave), Decimal::from(26));
/// assert_eq!(working_days(31, Some(11), MonthlyLeave::default()), Decimal::from(21));
/// ```
pub fn working_days(days_in_month: u32, from_day: Option<u32>, leave: MonthlyLeave) -> Decimal {
    let skipped = from_day.map_or(0, |day| day.saturating_sub(1));
    let days = Decimal::from(days_in_month)
        - Decimal::from(skipped)
        - Decimal::from(leave.lwp_days)
        - Decimal::from(leave.hlwp_days) / TWO;
    days.max(Decimal::ZERO)
}

/// Prorates a full-month amount to `working_days`.
pub fn prorate(amount: Decimal, days_in_month: u32, working_days: Decimal) -> Decimal {
    if days_in_month == 0 {
        return Decimal::ZERO;
    }
    round_money(amount / Decimal::from(days_in_month) * working_days)
}

/// Inputs shared by every month of an allowance report.
#[derive(Debug, Clone, Copy)]
pub struct AllowanceContext<'a> {
    /// The teacher the leave records are filtered by.
    pub teacher_id: &'a str,
    /// The teacher's leave records.
    pub leaves: &'a [LeaveRecord],
    /// Global DA/HRA tables.
    pub tables: &'a PercentageTables,
    /// The terminal cutover month.
    pub final_cutoff: FinalCutoff,
    /// Whether DA is applied. HRA reports leave it out.
    pub include_da: bool,
}

/// Builds the allowance row for one stitched month.
pub fn allowance_row(
    month: MonthKey,
    stitched: &StitchedMonth,
    ctx: &AllowanceContext<'_>,
) -> AllowanceRow {
    let row = &stitched.row;
    let days_in_month = month.days_in_month();
    let leave = monthly_leave(ctx.leaves, ctx.teacher_id, month);

    let from_day = match row.date {
        Some(date) => Some(date.day()),
        None if month == ctx.final_cutoff.month => Some(ctx.final_cutoff.cutover_day),
        None => None,
    };
    let working = working_days(days_in_month, from_day, leave);

    let basic = prorate(row.m_basic, days_in_month, working);
    let grade_pay = prorate(row.grade_pay, days_in_month, working);
    let calculated_total = basic + grade_pay;

    let da_percent = if ctx.include_da {
        percentage_for(&ctx.tables.da, month.year, month.month)
    } else {
        Decimal::ZERO
    };
    let hra_percent = percentage_for(&ctx.tables.hra, month.year, month.month);
    let da_amount = round_money(calculated_total * da_percent / HUNDRED);
    let hra_amount = round_money(calculated_total * hra_percent / HUNDRED);

    AllowanceRow {
        month: month.month,
        year: month.year,
        date: row.date,
        commission: stitched.era,
        days_in_month,
        lwp_days: leave.lwp_days,
        hlwp_days: leave.hlwp_days,
        working_days: working,
        m_basic: row.m_basic,
        m_grade_pay: row.grade_pay,
        basic,
        grade_pay,
        calculated_total,
        da_percent,
        da_amount,
        hra_percent,
        hra_amount,
        final_total: calculated_total + da_amount + hra_amount,
    }
}

/// Builds allowance rows for every horizon month the stitched series covers.
/// Months no era covers are skipped.
pub fn allowance_rows(
    series: &StitchedSeries,
    horizon: Horizon,
    ctx: &AllowanceContext<'_>,
) -> Vec<AllowanceRow> {
    MonthRange::covering(horizon.start, horizon.end)
        .filter_map(|month| {
            series
                .months
                .get(&month)
                .map(|stitched| allowance_row(month, stitched, ctx))
        })
        .collect()
}
