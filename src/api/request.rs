//! Request types for the salary engine API.
//!
//! This module defines the JSON request structures for the `/reports` and
//! `/reports/batch` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ReportQuery;
use crate::models::{ReportType, TeacherRecords};

/// Request body for `POST /reports`.
///
/// Carries one teacher's fully-loaded records next to the report selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The teacher and their grade, commission and leave records.
    #[serde(flatten)]
    pub records: TeacherRecords,
    /// The report to compute.
    pub report_type: ReportType,
    /// First day of the requested range.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the requested range.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ReportRequest {
    /// The report selection of this request.
    pub fn query(&self) -> ReportQuery {
        ReportQuery {
            report_type: self.report_type,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Request body for `POST /reports/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The report to compute for every teacher.
    pub report_type: ReportType,
    /// First day of the requested range.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the requested range.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The teachers to compute.
    pub teachers: Vec<TeacherRecords>,
}

impl BatchRequest {
    /// The report selection shared by every teacher in the batch.
    pub fn query(&self) -> ReportQuery {
        ReportQuery {
            report_type: self.report_type,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
