//! The fully-loaded input records for one teacher.

use serde::{Deserialize, Serialize};

use super::{CommissionRecord, GradeRecord, LeaveRecord, Teacher};

/// Everything the engine reads for one teacher.
///
/// The calling layer loads these from its own storage. Grade and commission
/// records may arrive in any order; leave records are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecords {
    /// The teacher.
    pub teacher: Teacher,
    /// Grade history, including exactly one `first` record.
    pub grades: Vec<GradeRecord>,
    /// 6th (mandatory) and 7th (optional) commission records.
    pub commissions: Vec<CommissionRecord>,
    /// Leave Without Pay records.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
}

impl TeacherRecords {
    /// The teacher's identifier.
    pub fn teacher_id(&self) -> &str {
        &self.teacher.id
    }
}
