//! Core data models for the salary engine.
//!
//! This module contains the input records supplied by the administrative layer
//! and the row types the engine emits.

mod commission;
mod grade;
mod leave;
mod month;
mod pay;
mod percentage;
mod records;
mod report;
mod salary_row;
mod teacher;

pub use commission::{CommissionRecord, CommissionType};
pub use grade::{GradeRecord, GradeType};
pub use leave::{LeaveRecord, LeaveType};
pub use month::{MonthKey, MonthRange};
pub use pay::{Figures, PayBaseline, PayCommission};
pub use percentage::PercentageEntry;
pub use records::TeacherRecords;
pub use report::{
    ReportKey, ReportKind, ReportRows, ReportType, ReportWarning, SalaryReport,
    UnknownReportType,
};
pub use salary_row::{AllowanceRow, ComputedSalaryRow, DifferenceRow};
pub use teacher::{Teacher, TeacherStatus};
