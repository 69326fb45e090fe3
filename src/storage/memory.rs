//! In-memory report store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::models::{ReportKey, SalaryReport};

use super::ReportStore;

/// A [`ReportStore`] backed by a map behind a read-write lock.
///
/// # Example
///
/// ```
/// use salary_engine::storage::{InMemoryReportStore, ReportStore};
///
/// let store = InMemoryReportStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<ReportKey, SalaryReport>>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn replace(&self, report: SalaryReport) -> Option<SalaryReport> {
        let key = report.key();
        let mut reports = self.reports.write().unwrap_or_else(PoisonError::into_inner);
        let previous = reports.remove(&key);
        debug!(
            teacher_id = %key.teacher_id,
            report_type = %key.report_type,
            replaced_rows = previous.as_ref().map_or(0, |r| r.rows.len()),
            rows = report.rows.len(),
            "Replacing stored report"
        );
        reports.insert(key, report);
        previous
    }

    fn get(&self, key: &ReportKey) -> Option<SalaryReport> {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn len(&self) -> usize {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
