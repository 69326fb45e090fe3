//! Higher-grade (promotion) records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Figures, PayBaseline};

/// The sequential promotion milestone a grade record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeType {
    /// The first grade. Anchors the yearly increment anniversary.
    First,
    /// The second higher grade.
    Second,
    /// The third higher grade.
    Third,
}

/// A grade change for one teacher, effective on `grade_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// The teacher this record belongs to.
    pub teacher_id: String,
    /// The promotion milestone.
    pub grade_type: GradeType,
    /// The date the grade takes effect.
    pub grade_date: NaiveDate,
    /// Entitled basic pay from the grade date.
    pub payable_basic: Decimal,
    /// Entitled grade pay from the grade date.
    pub payable_grade_pay: Decimal,
    /// Disbursed basic pay from the grade date.
    pub paid_basic: Decimal,
    /// Disbursed grade pay from the grade date.
    pub paid_grade_pay: Decimal,
}

impl GradeRecord {
    /// Returns the basic/grade-pay pair for the requested figures.
    pub fn baseline(&self, figures: Figures) -> PayBaseline {
        match figures {
            Figures::Payable => PayBaseline::new(self.payable_basic, self.payable_grade_pay),
            Figures::Paid => PayBaseline::new(self.paid_basic, self.paid_grade_pay),
        }
    }
}
