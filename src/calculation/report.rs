//! Report computation.
//!
//! This module ties the layers together: it validates a teacher's records,
//! resolves the report horizon and dispatches on the report type to the era
//! router, the allowance layer or the reconciliation layer.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceRow, Figures, ReportKind, ReportRows, ReportType, ReportWarning, SalaryReport,
    TeacherRecords,
};

use super::allowance::{AllowanceContext, allowance_rows};
use super::era_router::{CommissionSet, EraRouter, Horizon};
use super::grade_timeline::GradeTimeline;
use super::reconciliation::reconcile;

/// Which report to compute and over what range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// The report to compute.
    pub report_type: ReportType,
    /// First day of the requested range. Defaults to the first grade date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the requested range. Defaults to the final horizon.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    /// A query over the default range.
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            start_date: None,
            end_date: None,
        }
    }
}

/// Computes the rows of a report and any non-fatal warnings.
///
/// # Errors
///
/// * [`EngineError::MissingFirstGrade`] if no `first` grade record exists
/// * [`EngineError::MissingSixthCommission`] if no 6th commission record exists
/// * [`EngineError::InvertedRange`] for a single-era report whose first grade
///   date is after its commission date
/// * [`EngineError::InvalidRange`] if the requested start is after the end
/// * [`EngineError::InvalidTeacher`] for records that do not belong to the
///   teacher or duplicated records
pub fn compute_rows(
    records: &TeacherRecords,
    query: &ReportQuery,
    config: &EngineConfig,
) -> EngineResult<(ReportRows, Vec<ReportWarning>)> {
    let teacher_id = records.teacher_id();
    if teacher_id.trim().is_empty() {
        return Err(EngineError::InvalidTeacher {
            field: "teacher.id".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    let timeline = GradeTimeline::new(teacher_id, records.grades.clone())?;
    let commissions = CommissionSet::resolve(teacher_id, &records.commissions)?;
    let settings = config.settings();
    let router = EraRouter::new(&records.teacher, &timeline, commissions, settings);
    let horizon = resolve_horizon(&router, records, query)?;

    debug!(
        teacher_id = %teacher_id,
        report_type = %query.report_type,
        start = %horizon.start,
        end = %horizon.end,
        "Computing report"
    );

    let report_type = query.report_type;
    let result = match report_type.kind() {
        ReportKind::Era(era) => (
            ReportRows::Progression(router.era_rows(era, figures_of(report_type)?, horizon)?),
            Vec::new(),
        ),
        ReportKind::SupportFifth => (
            ReportRows::Progression(
                router.support_fifth_rows(figures_of(report_type)?, horizon)?,
            ),
            Vec::new(),
        ),
        ReportKind::SupportSixth => (
            ReportRows::Progression(
                router.support_sixth_rows(figures_of(report_type)?, horizon)?,
            ),
            Vec::new(),
        ),
        ReportKind::Allowance { include_da } => {
            let (rows, warnings) = allowance_series(
                &router,
                records,
                config,
                figures_of(report_type)?,
                include_da,
                horizon,
            )?;
            (ReportRows::Allowance(rows), warnings)
        }
        ReportKind::Reconciliation => {
            let (payable, mut warnings) =
                allowance_series(&router, records, config, Figures::Payable, true, horizon)?;
            let (paid, paid_warnings) =
                allowance_series(&router, records, config, Figures::Paid, true, horizon)?;
            for warning in paid_warnings {
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
            (ReportRows::Difference(reconcile(&payable, &paid)), warnings)
        }
    };

    debug!(
        teacher_id = %teacher_id,
        report_type = %report_type,
        rows = result.0.len(),
        warnings = result.1.len(),
        "Report computed"
    );
    Ok(result)
}

/// Computes a report and wraps it in a [`SalaryReport`] envelope.
///
/// The rows are deterministic for unchanged inputs; only the envelope's
/// `calculation_id` and `timestamp` differ between runs.
pub fn compute_report(
    records: &TeacherRecords,
    query: &ReportQuery,
    config: &EngineConfig,
) -> EngineResult<SalaryReport> {
    let (rows, warnings) = compute_rows(records, query, config)?;
    Ok(SalaryReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        teacher_id: records.teacher_id().to_string(),
        report_type: query.report_type,
        commission: query.report_type.commission(),
        rows,
        warnings,
    })
}

fn figures_of(report_type: ReportType) -> EngineResult<Figures> {
    report_type
        .figures()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("report type {} has no single figure set", report_type),
        })
}

fn resolve_horizon(
    router: &EraRouter<'_>,
    records: &TeacherRecords,
    query: &ReportQuery,
) -> EngineResult<Horizon> {
    let default = router.default_horizon()?;
    if query.start_date.is_none() && query.end_date.is_none() {
        // Already truncated at retirement; may be inverted, yielding no rows.
        return Ok(default);
    }

    let start = query.start_date.unwrap_or(default.start);
    let end = query.end_date.unwrap_or(default.end);
    let requested = Horizon::new(start, end)?;
    Ok(Horizon {
        end: records.teacher.truncate_to_retirement(requested.end),
        ..requested
    })
}

fn allowance_series(
    router: &EraRouter<'_>,
    records: &TeacherRecords,
    config: &EngineConfig,
    figures: Figures,
    include_da: bool,
    horizon: Horizon,
) -> EngineResult<(Vec<AllowanceRow>, Vec<ReportWarning>)> {
    let series = router.stitched(figures, horizon)?;
    let ctx = AllowanceContext {
        teacher_id: records.teacher_id(),
        leaves: &records.leaves,
        tables: config.tables(),
        final_cutoff: config.settings().final_cutoff,
        include_da,
    };
    Ok((allowance_rows(&series, horizon, &ctx), series.warnings))
}
