//! Report catalogue and output envelope.
//!
//! This module contains the [`ReportType`] tags callers request, the
//! [`SalaryReport`] envelope returned for each computation and the
//! [`ReportKey`] rows are persisted under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AllowanceRow, ComputedSalaryRow, DifferenceRow, Figures, PayCommission};

/// The report a caller asks the engine to compute.
///
/// # Example
///
/// ```
/// use salary_engine::models::{Figures, PayCommission, ReportType};
/// use std::str::FromStr;
///
/// let report = ReportType::from_str("paid-6th").unwrap();
/// assert_eq!(report, ReportType::Paid6th);
/// assert_eq!(report.figures(), Some(Figures::Paid));
/// assert_eq!(report.commission(), Some(PayCommission::Sixth));
/// assert_eq!(report.as_str(), "paid-6th");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Payable progression of the 5th era.
    #[serde(rename = "payable-5th")]
    Payable5th,
    /// Paid progression of the 5th era.
    #[serde(rename = "paid-5th")]
    Paid5th,
    /// Payable progression of the 6th era.
    #[serde(rename = "payable-6th")]
    Payable6th,
    /// Paid progression of the 6th era.
    #[serde(rename = "paid-6th")]
    Paid6th,
    /// Payable progression of the 7th era.
    #[serde(rename = "payable-7th")]
    Payable7th,
    /// Paid progression of the 7th era.
    #[serde(rename = "paid-7th")]
    Paid7th,
    /// 5th-era payable support progression, ignoring grade changes around the 6th transition.
    #[serde(rename = "sup-payable-5th")]
    SupPayable5th,
    /// 5th-era paid support progression, ignoring grade changes around the 6th transition.
    #[serde(rename = "sup-paid-5th")]
    SupPaid5th,
    /// 6th-era payable support progression, starting at the 6th-commission pay date.
    #[serde(rename = "sup-payable-6th")]
    SupPayable6th,
    /// 6th-era paid support progression, starting at the 6th-commission pay date.
    #[serde(rename = "sup-paid-6th")]
    SupPaid6th,
    /// Stitched payable salary with HRA only.
    #[serde(rename = "payable-hra")]
    PayableHra,
    /// Stitched paid salary with HRA only.
    #[serde(rename = "paid-hra")]
    PaidHra,
    /// Stitched payable salary with DA and HRA.
    #[serde(rename = "all-payable")]
    AllPayable,
    /// Stitched paid salary with DA and HRA.
    #[serde(rename = "all-paid")]
    AllPaid,
    /// Payable minus paid reconciliation.
    #[serde(rename = "different")]
    Different,
}

/// The shape of computation a [`ReportType`] requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// A single era's raw progression.
    Era(PayCommission),
    /// The 5th-era support progression.
    SupportFifth,
    /// The 6th-era support progression.
    SupportSixth,
    /// The stitched allowance report; `include_da` is false for HRA-only reports.
    Allowance {
        /// Whether DA is applied.
        include_da: bool,
    },
    /// The payable-versus-paid reconciliation.
    Reconciliation,
}

impl ReportType {
    /// Every report type, in catalogue order.
    pub const ALL: [ReportType; 15] = [
        ReportType::Payable5th,
        ReportType::Paid5th,
        ReportType::Payable6th,
        ReportType::Paid6th,
        ReportType::Payable7th,
        ReportType::Paid7th,
        ReportType::SupPayable5th,
        ReportType::SupPaid5th,
        ReportType::SupPayable6th,
        ReportType::SupPaid6th,
        ReportType::PayableHra,
        ReportType::PaidHra,
        ReportType::AllPayable,
        ReportType::AllPaid,
        ReportType::Different,
    ];

    /// The wire tag of this report type.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Payable5th => "payable-5th",
            ReportType::Paid5th => "paid-5th",
            ReportType::Payable6th => "payable-6th",
            ReportType::Paid6th => "paid-6th",
            ReportType::Payable7th => "payable-7th",
            ReportType::Paid7th => "paid-7th",
            ReportType::SupPayable5th => "sup-payable-5th",
            ReportType::SupPaid5th => "sup-paid-5th",
            ReportType::SupPayable6th => "sup-payable-6th",
            ReportType::SupPaid6th => "sup-paid-6th",
            ReportType::PayableHra => "payable-hra",
            ReportType::PaidHra => "paid-hra",
            ReportType::AllPayable => "all-payable",
            ReportType::AllPaid => "all-paid",
            ReportType::Different => "different",
        }
    }

    /// Which figures the report reads, or `None` for the reconciliation, which reads both.
    pub fn figures(self) -> Option<Figures> {
        match self {
            ReportType::Payable5th
            | ReportType::Payable6th
            | ReportType::Payable7th
            | ReportType::SupPayable5th
            | ReportType::SupPayable6th
            | ReportType::PayableHra
            | ReportType::AllPayable => Some(Figures::Payable),
            ReportType::Paid5th
            | ReportType::Paid6th
            | ReportType::Paid7th
            | ReportType::SupPaid5th
            | ReportType::SupPaid6th
            | ReportType::PaidHra
            | ReportType::AllPaid => Some(Figures::Paid),
            ReportType::Different => None,
        }
    }

    /// The commission the report is scoped to, or `None` for stitched reports.
    pub fn commission(self) -> Option<PayCommission> {
        match self.kind() {
            ReportKind::Era(era) => Some(era),
            ReportKind::SupportFifth => Some(PayCommission::Fifth),
            ReportKind::SupportSixth => Some(PayCommission::Sixth),
            ReportKind::Allowance { .. } | ReportKind::Reconciliation => None,
        }
    }

    /// The computation this report requires.
    pub fn kind(self) -> ReportKind {
        match self {
            ReportType::Payable5th | ReportType::Paid5th => ReportKind::Era(PayCommission::Fifth),
            ReportType::Payable6th | ReportType::Paid6th => ReportKind::Era(PayCommission::Sixth),
            ReportType::Payable7th | ReportType::Paid7th => {
                ReportKind::Era(PayCommission::Seventh)
            }
            ReportType::SupPayable5th | ReportType::SupPaid5th => ReportKind::SupportFifth,
            ReportType::SupPayable6th | ReportType::SupPaid6th => ReportKind::SupportSixth,
            ReportType::PayableHra | ReportType::PaidHra => {
                ReportKind::Allowance { include_da: false }
            }
            ReportType::AllPayable | ReportType::AllPaid => {
                ReportKind::Allowance { include_da: true }
            }
            ReportType::Different => ReportKind::Reconciliation,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a report tag is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReportType(pub String);

impl std::fmt::Display for UnknownReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown report type: {}", self.0)
    }
}

impl std::error::Error for UnknownReportType {}

impl std::str::FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownReportType(s.to_string()))
    }
}

/// The rows of a computed report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ReportRows {
    /// Raw monthly progression rows.
    Progression(Vec<ComputedSalaryRow>),
    /// Prorated rows with allowances.
    Allowance(Vec<AllowanceRow>),
    /// Payable-versus-paid rows.
    Difference(Vec<DifferenceRow>),
}

impl ReportRows {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Progression(rows) => rows.len(),
            ReportRows::Allowance(rows) => rows.len(),
            ReportRows::Difference(rows) => rows.len(),
        }
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A non-fatal condition met while computing a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete result of one report computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReport {
    /// Unique identifier for this computation.
    pub calculation_id: Uuid,
    /// When the computation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the computation.
    pub engine_version: String,
    /// The teacher the report is for.
    pub teacher_id: String,
    /// The report that was computed.
    pub report_type: ReportType,
    /// The era the report is scoped to, if any.
    pub commission: Option<PayCommission>,
    /// The computed rows.
    #[serde(flatten)]
    pub rows: ReportRows,
    /// Non-fatal conditions met during computation.
    pub warnings: Vec<ReportWarning>,
}

impl SalaryReport {
    /// The key this report is persisted under.
    pub fn key(&self) -> ReportKey {
        ReportKey::new(&self.teacher_id, self.report_type)
    }
}

/// Composite persistence key: `(teacher_id, report_type, commission)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportKey {
    /// The teacher.
    pub teacher_id: String,
    /// The report type.
    pub report_type: ReportType,
    /// The era the report type is scoped to.
    pub commission: Option<PayCommission>,
}

impl ReportKey {
    /// Builds the key for a teacher and report type.
    pub fn new(teacher_id: &str, report_type: ReportType) -> Self {
        Self {
            teacher_id: teacher_id.to_string(),
            report_type,
            commission: report_type.commission(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_tag_round_trips_through_from_str() {
        for report in ReportType::ALL {
            assert_eq!(ReportType::from_str(report.as_str()).unwrap(), report);
            assert_eq!(
                serde_json::to_string(&report).unwrap(),
                format!("\"{}\"", report.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = ReportType::from_str("payable-8th").unwrap_err();
        assert_eq!(err.to_string(), "unknown report type: payable-8th");
    }

    #[test]
    fn test_support_reports_are_scoped_to_their_era() {
        assert_eq!(
            ReportType::SupPaid5th.commission(),
            Some(PayCommission::Fifth)
        );
        assert_eq!(
            ReportType::SupPayable6th.commission(),
            Some(PayCommission::Sixth)
        );
        assert_eq!(ReportType::AllPaid.commission(), None);
    }

    #[test]
    fn test_hra_reports_exclude_da() {
        assert_eq!(
            ReportType::PayableHra.kind(),
            ReportKind::Allowance { include_da: false }
        );
        assert_eq!(
            ReportType::AllPayable.kind(),
            ReportKind::Allowance { include_da: true }
        );
    }

    #[test]
    fn test_different_reads_both_figures() {
        assert_eq!(ReportType::Different.figures(), None);
        assert_eq!(ReportType::Different.kind(), ReportKind::Reconciliation);
    }

    #[test]
    fn test_report_key_carries_commission() {
        let key = ReportKey::new("t_001", ReportType::Payable7th);
        assert_eq!(key.commission, Some(PayCommission::Seventh));
        assert_ne!(key, ReportKey::new("t_001", ReportType::Paid7th));
    }

    #[test]
    fn test_report_rows_serialize_with_kind_tag() {
        let rows = ReportRows::Progression(vec![]);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json["kind"], "progression");
        assert!(rows.is_empty());
    }
}
