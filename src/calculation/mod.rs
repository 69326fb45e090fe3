//! Calculation logic for the salary engine.
//!
//! This module contains the lookups (DA/HRA percentages, leave days, grade
//! timeline), the monthly progression state machine with its three increment
//! models, era routing and stitching, the allowance and proration layer, the
//! payable-versus-paid reconciliation, and report computation on top of them.

mod allowance;
mod era_router;
mod grade_timeline;
mod increment;
mod leave_lookup;
mod percentage_lookup;
mod progression;
mod reconciliation;
mod report;
pub mod rules;

pub use allowance::{
    AllowanceContext, allowance_row, allowance_rows, prorate, round_money, working_days,
};
pub use era_router::{
    CommissionSet, EraRouter, Horizon, INVERTED_ERA_SKIPPED, StitchedMonth, StitchedSeries,
};
pub use grade_timeline::GradeTimeline;
pub use increment::{IncrementModel, ceil_to_ten, round_to_nearest_50};
pub use leave_lookup::{MonthlyLeave, leave_days_for, monthly_leave};
pub use percentage_lookup::percentage_for;
pub use progression::{ProgressionInput, run_progression, step};
pub use reconciliation::reconcile;
pub use report::{ReportQuery, compute_report, compute_rows};
