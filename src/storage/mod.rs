//! Persistence of computed reports.
//!
//! Reports are stored under a `(teacher_id, report_type, commission)` key.
//! Storing a report always replaces every row previously held under its key;
//! there are no partial or merged updates.

mod memory;

pub use memory::InMemoryReportStore;

use crate::models::{ReportKey, SalaryReport};

/// Storage for computed reports.
pub trait ReportStore: Send + Sync {
    /// Deletes whatever is stored under the report's key, then stores the
    /// report. Returns the replaced report, if any.
    fn replace(&self, report: SalaryReport) -> Option<SalaryReport>;

    /// Returns the report stored under `key`.
    fn get(&self, key: &ReportKey) -> Option<SalaryReport>;

    /// Number of stored reports.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
