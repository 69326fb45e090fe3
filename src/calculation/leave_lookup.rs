//! Leave Without Pay day counts.
//!
//! Leave records are populated by the leave-management feature of the
//! administrative layer. When nothing has been recorded every lookup is zero,
//! which is the common case for historical recomputation.

use crate::models::{LeaveRecord, LeaveType, MonthKey};

/// Counts the days of `leave_type` recorded for a teacher in `(year, month)`.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::leave_days_for;
/// use salary_engine::models::{LeaveRecord, LeaveType};
///
/// let records = vec![
///     LeaveRecord { teacher_id: "t_001".to_string(), leave_type: LeaveType::Lwp, month: 8, year: 2012, day: 3 },
///     LeaveRecord { teacher_id: "t_001".to_string(), leave_type: LeaveType::Lwp, month: 8, year: 2012, day: 4 },
/// ];
/// assert_eq!(leave_days_for(&records, "t_001", 2012, 8, LeaveType::Lwp), 2);
/// assert_eq!(leave_days_for(&records, "t_001", 2012, 8, LeaveType::Hlwp), 0);
/// ```
pub fn leave_days_for(
    records: &[LeaveRecord],
    teacher_id: &str,
    year: i32,
    month: u32,
    leave_type: LeaveType,
) -> u32 {
    records
        .iter()
        .filter(|r| {
            r.teacher_id == teacher_id
                && r.leave_type == leave_type
                && r.year == year
                && r.month == month
        })
        .count() as u32
}

/// LWP and HLWP day counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyLeave {
    /// Leave Without Pay days.
    pub lwp_days: u32,
    /// Half Leave Without Pay days.
    pub hlwp_days: u32,
}

/// Resolves both leave counts for a teacher's month.
pub fn monthly_leave(records: &[LeaveRecord], teacher_id: &str, month: MonthKey) -> MonthlyLeave {
    MonthlyLeave {
        lwp_days: leave_days_for(records, teacher_id, month.year, month.month, LeaveType::Lwp),
        hlwp_days: leave_days_for(records, teacher_id, month.year, month.month, LeaveType::Hlwp),
    }
}
