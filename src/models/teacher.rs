//! Teacher model and related types.
//!
//! This module defines the [`Teacher`] struct and [`TeacherStatus`] enum. Teacher
//! records are owned by the administrative layer and are read-only to the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The service status of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    /// Currently in service.
    Active,
    /// Retired on superannuation.
    Retired,
    /// No longer in service for another reason.
    Inactive,
}

/// Represents a government-employed teacher whose salary history is recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: String,
    /// The teacher's full name.
    pub name: String,
    /// The city of the posting.
    pub city: String,
    /// The teacher's date of birth.
    pub birthday: NaiveDate,
    /// The date the teacher joined service.
    pub joining_date: NaiveDate,
    /// The retirement date, if the teacher has retired.
    #[serde(default)]
    pub retirement_date: Option<NaiveDate>,
    /// The service status.
    pub status: TeacherStatus,
}

impl Teacher {
    /// Clamps `date` to the teacher's retirement date.
    ///
    /// Retirement truncates every computation horizon, so any era or report end
    /// date is passed through here.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::{Teacher, TeacherStatus};
    /// use chrono::NaiveDate;
    ///
    /// let teacher = Teacher {
    ///     id: "t_001".to_string(),
    ///     name: "A. Patil".to_string(),
    ///     city: "Pune".to_string(),
    ///     birthday: NaiveDate::from_ymd_opt(1960, 5, 10).unwrap(),
    ///     joining_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
    ///     retirement_date: NaiveDate::from_ymd_opt(2018, 5, 31),
    ///     status: TeacherStatus::Retired,
    /// };
    /// let horizon = NaiveDate::from_ymd_opt(2019, 1, 31).unwrap();
    /// assert_eq!(teacher.truncate_to_retirement(horizon), NaiveDate::from_ymd_opt(2018, 5, 31).unwrap());
    /// ```
    pub fn truncate_to_retirement(&self, date: NaiveDate) -> NaiveDate {
        match self.retirement_date {
            Some(retirement) if retirement < date => retirement,
            _ => date,
        }
    }
}
