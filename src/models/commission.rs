//! Per-teacher pay commission baseline records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Figures, PayBaseline, PayCommission};

/// The commission a [`CommissionRecord`] belongs to.
///
/// Only the 6th and 7th commissions carry per-teacher fixation records; the
/// 5th era is reconstructed from the teacher's grade history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommissionType {
    /// 6th Pay Commission fixation. Mandatory for every computation.
    #[serde(rename = "6th")]
    Sixth,
    /// 7th Pay Commission fixation. Optional.
    #[serde(rename = "7th")]
    Seventh,
}

impl From<CommissionType> for PayCommission {
    fn from(value: CommissionType) -> Self {
        match value {
            CommissionType::Sixth => PayCommission::Sixth,
            CommissionType::Seventh => PayCommission::Seventh,
        }
    }
}

/// A teacher's pay fixation under one commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// The teacher this record belongs to.
    pub teacher_id: String,
    /// The commission this fixation belongs to.
    pub commission_type: CommissionType,
    /// The date the fixed pay takes effect.
    pub pay_date: NaiveDate,
    /// Entitled basic pay on fixation.
    pub payable_basic: Decimal,
    /// Entitled grade pay on fixation.
    pub payable_grade_pay: Decimal,
    /// Disbursed basic pay on fixation.
    pub paid_basic: Decimal,
    /// Disbursed grade pay on fixation.
    pub paid_grade_pay: Decimal,
    /// The first date a yearly increment is due under this commission.
    pub yearly_increment_date: NaiveDate,
}

impl CommissionRecord {
    /// Returns the basic/grade-pay pair for the requested figures.
    pub fn baseline(&self, figures: Figures) -> PayBaseline {
        match figures {
            Figures::Payable => PayBaseline::new(self.payable_basic, self.payable_grade_pay),
            Figures::Paid => PayBaseline::new(self.paid_basic, self.paid_grade_pay),
        }
    }
}
