//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during salary recomputation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PayCommission;

/// The main error type for the salary engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::MissingFirstGrade {
///     teacher_id: "t_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Teacher 't_001' has no first grade record");
/// assert!(error.is_fatal_for_teacher());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The teacher has no `first` grade record to anchor the computation.
    #[error("Teacher '{teacher_id}' has no first grade record")]
    MissingFirstGrade {
        /// The teacher whose anchor is missing.
        teacher_id: String,
    },

    /// The teacher has no 6th-commission record.
    #[error("Teacher '{teacher_id}' has no 6th pay commission record")]
    MissingSixthCommission {
        /// The teacher whose commission record is missing.
        teacher_id: String,
    },

    /// The first grade date is later than the commission date of the era.
    #[error(
        "Teacher '{teacher_id}': first grade date {first_grade_date} is after the {era} commission date {commission_date}"
    )]
    InvertedRange {
        /// The teacher.
        teacher_id: String,
        /// The era that cannot be computed.
        era: PayCommission,
        /// The teacher's first grade date.
        first_grade_date: NaiveDate,
        /// The commission pay date.
        commission_date: NaiveDate,
    },

    /// The requested report horizon ends before it starts.
    #[error("Invalid report range: {start} is after {end}")]
    InvalidRange {
        /// The requested start.
        start: NaiveDate,
        /// The requested end.
        end: NaiveDate,
    },

    /// A teacher's input records were inconsistent.
    #[error("Invalid teacher field '{field}': {message}")]
    InvalidTeacher {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns `true` for the conditions that abort a teacher's computation
    /// before any iteration: a missing anchor grade or a missing 6th-commission
    /// record. Batch callers skip the teacher and continue.
    pub fn is_fatal_for_teacher(&self) -> bool {
        matches!(
            self,
            EngineError::MissingFirstGrade { .. } | EngineError::MissingSixthCommission { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
