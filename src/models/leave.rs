//! Leave-without-pay records.

use serde::{Deserialize, Serialize};

/// The kind of unpaid leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Leave Without Pay. Each day removes a full working day.
    #[serde(rename = "LWP")]
    Lwp,
    /// Half Leave Without Pay. Each day removes half a working day.
    #[serde(rename = "HLWP")]
    Hlwp,
}

/// A single day of unpaid leave taken by a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The teacher this record belongs to.
    pub teacher_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// The calendar month of the leave day.
    pub month: u32,
    /// The calendar year of the leave day.
    pub year: i32,
    /// The day of the month.
    pub day: u32,
}
