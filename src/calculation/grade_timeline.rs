//! Date-ordered view of a teacher's grade history.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{GradeRecord, GradeType, MonthKey};

/// A teacher's grade records, sorted by date, anchored by exactly one
/// `first` grade.
///
/// Construction fails fast with [`EngineError::MissingFirstGrade`] when the
/// anchor is absent, so every computation holding a timeline has an anchor.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::GradeTimeline;
/// use salary_engine::models::{GradeRecord, GradeType, MonthKey};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let first = GradeRecord {
///     teacher_id: "t_001".to_string(),
///     grade_type: GradeType::First,
///     grade_date: NaiveDate::from_ymd_opt(1998, 6, 15).unwrap(),
///     payable_basic: Decimal::from(5500),
///     payable_grade_pay: Decimal::ZERO,
///     paid_basic: Decimal::from(5500),
///     paid_grade_pay: Decimal::ZERO,
/// };
/// let timeline = GradeTimeline::new("t_001", vec![first]).unwrap();
/// assert_eq!(timeline.first_grade_date(), NaiveDate::from_ymd_opt(1998, 6, 15).unwrap());
///
/// let from = NaiveDate::from_ymd_opt(1998, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(1998, 12, 31).unwrap();
/// assert_eq!(timeline.changes_in_month(MonthKey::new(1998, 6), from, to).count(), 1);
/// assert_eq!(timeline.changes_in_month(MonthKey::new(1998, 7), from, to).count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeTimeline {
    records: Vec<GradeRecord>,
    first_index: usize,
}

impl GradeTimeline {
    /// Sorts `records` by grade date and locates the `first` anchor.
    ///
    /// Returns an error if the anchor is missing, if more than one `first`
    /// record exists, or if a record belongs to another teacher.
    pub fn new(teacher_id: &str, mut records: Vec<GradeRecord>) -> EngineResult<Self> {
        if let Some(foreign) = records.iter().find(|r| r.teacher_id != teacher_id) {
            return Err(EngineError::InvalidTeacher {
                field: "grades".to_string(),
                message: format!(
                    "grade record dated {} belongs to teacher '{}'",
                    foreign.grade_date, foreign.teacher_id
                ),
            });
        }

        // Stable sort keeps submission order for same-day records.
        records.sort_by_key(|r| r.grade_date);

        let mut firsts = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.grade_type == GradeType::First)
            .map(|(i, _)| i);

        let first_index = firsts.next().ok_or_else(|| EngineError::MissingFirstGrade {
            teacher_id: teacher_id.to_string(),
        })?;

        if firsts.next().is_some() {
            return Err(EngineError::InvalidTeacher {
                field: "grades".to_string(),
                message: "more than one first grade record".to_string(),
            });
        }

        Ok(Self {
            records,
            first_index,
        })
    }

    /// All records in ascending date order.
    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    /// The `first` grade record.
    pub fn first_grade(&self) -> &GradeRecord {
        &self.records[self.first_index]
    }

    /// The anchor date of the yearly increment anniversary.
    pub fn first_grade_date(&self) -> NaiveDate {
        self.first_grade().grade_date
    }

    /// Grade changes dated within `month` and within `[from, to]`, earliest
    /// first.
    pub fn changes_in_month(
        &self,
        month: MonthKey,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = &GradeRecord> + '_ {
        self.records.iter().filter(move |r| {
            month.contains(r.grade_date) && r.grade_date >= from && r.grade_date <= to
        })
    }

    /// A copy of this timeline without the non-first grade changes dated
    /// within `[from, to]`.
    pub fn excluding_window(&self, from: NaiveDate, to: NaiveDate) -> Self {
        let mut first_index = 0;
        let mut records = Vec::with_capacity(self.records.len());
        for (i, r) in self.records.iter().enumerate() {
            if i == self.first_index {
                first_index = records.len();
                records.push(r.clone());
            } else if r.grade_date < from || r.grade_date > to {
                records.push(r.clone());
            }
        }
        Self {
            records,
            first_index,
        }
    }
}
