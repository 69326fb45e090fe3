//! Era routing and stitching.
//!
//! A teacher's history is split into up to three pay commission windows,
//! each computed by its own progression with its own baseline and increment
//! model. The stitched series merges them into one month-keyed map with the
//! precedence 5th > 6th > 7th.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CommissionRecord, CommissionType, ComputedSalaryRow, Figures, MonthKey, PayBaseline,
    PayCommission, ReportWarning, Teacher,
};

use super::grade_timeline::GradeTimeline;
use super::increment::IncrementModel;
use super::progression::{ProgressionInput, run_progression};

/// Warning code for an era skipped because its range is inverted.
pub const INVERTED_ERA_SKIPPED: &str = "INVERTED_ERA_SKIPPED";

/// A closed date range bounding a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl Horizon {
    /// Creates a horizon, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns `true` if `month` overlaps the range.
    pub fn covers(&self, month: MonthKey) -> bool {
        month >= MonthKey::of(self.start) && month <= MonthKey::of(self.end)
    }
}

/// A teacher's 6th (mandatory) and 7th (optional) commission records.
#[derive(Debug, Clone, Copy)]
pub struct CommissionSet<'a> {
    /// The 6th pay commission record.
    pub sixth: &'a CommissionRecord,
    /// The 7th pay commission record, if one was fixed.
    pub seventh: Option<&'a CommissionRecord>,
}

impl<'a> CommissionSet<'a> {
    /// Picks out the commission records for `teacher_id`.
    ///
    /// # Errors
    ///
    /// * [`EngineError::MissingSixthCommission`] if there is no 6th record
    /// * [`EngineError::InvalidTeacher`] if a record belongs to another
    ///   teacher or a commission type appears twice
    pub fn resolve(teacher_id: &str, records: &'a [CommissionRecord]) -> EngineResult<Self> {
        let mut sixth = None;
        let mut seventh = None;
        for record in records {
            if record.teacher_id != teacher_id {
                return Err(EngineError::InvalidTeacher {
                    field: "commissions".to_string(),
                    message: format!(
                        "{} commission record belongs to teacher '{}'",
                        PayCommission::from(record.commission_type),
                        record.teacher_id
                    ),
                });
            }
            let slot = match record.commission_type {
                CommissionType::Sixth => &mut sixth,
                CommissionType::Seventh => &mut seventh,
            };
            if slot.replace(record).is_some() {
                return Err(EngineError::InvalidTeacher {
                    field: "commissions".to_string(),
                    message: format!(
                        "more than one {} commission record",
                        PayCommission::from(record.commission_type)
                    ),
                });
            }
        }

        let sixth = sixth.ok_or_else(|| EngineError::MissingSixthCommission {
            teacher_id: teacher_id.to_string(),
        })?;
        Ok(Self { sixth, seventh })
    }
}

/// The stitched month of one era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchedMonth {
    /// The era that supplied the month.
    pub era: PayCommission,
    /// The month's last row from that era.
    pub row: ComputedSalaryRow,
}

/// All eras merged into one month-keyed series.
#[derive(Debug, Clone, Default)]
pub struct StitchedSeries {
    /// Months in calendar order.
    pub months: BTreeMap<MonthKey, StitchedMonth>,
    /// Eras skipped while stitching.
    pub warnings: Vec<ReportWarning>,
}

#[derive(Debug, Clone, Copy)]
struct EraWindow {
    era: PayCommission,
    start: NaiveDate,
    end: NaiveDate,
    initial: PayBaseline,
    anniversary: NaiveDate,
}

/// Computes era progressions for one teacher.
#[derive(Debug, Clone)]
pub struct EraRouter<'a> {
    teacher: &'a Teacher,
    timeline: &'a GradeTimeline,
    commissions: CommissionSet<'a>,
    settings: &'a EngineSettings,
}

impl<'a> EraRouter<'a> {
    /// Creates a router over a teacher's resolved records.
    pub fn new(
        teacher: &'a Teacher,
        timeline: &'a GradeTimeline,
        commissions: CommissionSet<'a>,
        settings: &'a EngineSettings,
    ) -> Self {
        Self {
            teacher,
            timeline,
            commissions,
            settings,
        }
    }

    /// The default report horizon: first grade date to the final horizon,
    /// truncated at retirement. Empty when the teacher retired before the
    /// first grade date.
    pub fn default_horizon(&self) -> EngineResult<Horizon> {
        let end = self
            .teacher
            .truncate_to_retirement(self.settings.final_horizon()?);
        Ok(Horizon {
            start: self.timeline.first_grade_date(),
            end,
        })
    }

    /// Rows of one era's progression that fall inside `horizon`.
    ///
    /// Returns no rows when the teacher has no record for the era (7th) or the
    /// era's window is empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvertedRange`] if the first grade date is later
    /// than the commission date the era is anchored on.
    pub fn era_rows(
        &self,
        era: PayCommission,
        figures: Figures,
        horizon: Horizon,
    ) -> EngineResult<Vec<ComputedSalaryRow>> {
        match self.window(era, figures)? {
            Some(window) => self.run(window, self.timeline, figures, horizon),
            None => Ok(Vec::new()),
        }
    }

    /// 5th-era rows ignoring every non-first grade change dated between the
    /// 6th commission pay date and the end of the 5th era.
    pub fn support_fifth_rows(
        &self,
        figures: Figures,
        horizon: Horizon,
    ) -> EngineResult<Vec<ComputedSalaryRow>> {
        let timeline = self
            .timeline
            .excluding_window(self.commissions.sixth.pay_date, self.settings.fifth_era_end()?);
        match self.window(PayCommission::Fifth, figures)? {
            Some(window) => self.run(window, &timeline, figures, horizon),
            None => Ok(Vec::new()),
        }
    }

    /// 6th-era rows starting at the 6th commission pay date instead of the
    /// fixed era start.
    pub fn support_sixth_rows(
        &self,
        figures: Figures,
        horizon: Horizon,
    ) -> EngineResult<Vec<ComputedSalaryRow>> {
        match self.window(PayCommission::Sixth, figures)? {
            Some(mut window) => {
                window.start = self
                    .commissions
                    .sixth
                    .pay_date
                    .max(self.timeline.first_grade_date());
                self.run(window, self.timeline, figures, horizon)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Every era merged by month with precedence 5th > 6th > 7th.
    ///
    /// Within one era the last row of a month wins, which is the new-grade
    /// row of a split month. An era whose range is inverted is skipped with
    /// a warning.
    pub fn stitched(&self, figures: Figures, horizon: Horizon) -> EngineResult<StitchedSeries> {
        let mut series = StitchedSeries::default();
        for era in PayCommission::PRECEDENCE {
            let rows = match self.era_rows(era, figures, horizon) {
                Ok(rows) => rows,
                Err(EngineError::InvertedRange {
                    first_grade_date,
                    commission_date,
                    ..
                }) => {
                    warn!(
                        teacher_id = %self.teacher.id,
                        era = %era,
                        %first_grade_date,
                        %commission_date,
                        "Skipping era with inverted range"
                    );
                    series.warnings.push(ReportWarning {
                        code: INVERTED_ERA_SKIPPED.to_string(),
                        message: format!(
                            "{} era skipped: first grade date {} is after commission date {}",
                            era, first_grade_date, commission_date
                        ),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut era_months: BTreeMap<MonthKey, ComputedSalaryRow> = BTreeMap::new();
            for row in rows {
                era_months.insert(row.key(), row);
            }
            for (key, row) in era_months {
                series
                    .months
                    .entry(key)
                    .or_insert(StitchedMonth { era, row });
            }
        }
        Ok(series)
    }

    fn window(&self, era: PayCommission, figures: Figures) -> EngineResult<Option<EraWindow>> {
        let first_grade_date = self.timeline.first_grade_date();
        let sixth = self.commissions.sixth;
        let final_horizon = self.settings.final_horizon()?;

        let (anchor, window) = match era {
            PayCommission::Fifth => (
                sixth,
                EraWindow {
                    era,
                    start: first_grade_date,
                    end: self.settings.fifth_era_end()?,
                    initial: sixth.baseline(figures),
                    anniversary: first_grade_date,
                },
            ),
            PayCommission::Sixth => {
                let end = match self.commissions.seventh {
                    Some(seventh) => seventh.pay_date.pred_opt().ok_or_else(|| {
                        EngineError::CalculationError {
                            message: format!("no day before {}", seventh.pay_date),
                        }
                    })?,
                    None => final_horizon,
                };
                (
                    sixth,
                    EraWindow {
                        era,
                        start: self.settings.sixth_era_start()?.max(first_grade_date),
                        end,
                        initial: sixth.baseline(figures),
                        anniversary: sixth.yearly_increment_date,
                    },
                )
            }
            PayCommission::Seventh => match self.commissions.seventh {
                Some(seventh) => (
                    seventh,
                    EraWindow {
                        era,
                        start: seventh.pay_date,
                        end: final_horizon,
                        initial: seventh.baseline(figures),
                        anniversary: seventh.yearly_increment_date,
                    },
                ),
                None => return Ok(None),
            },
        };

        if first_grade_date > anchor.pay_date {
            return Err(EngineError::InvertedRange {
                teacher_id: self.teacher.id.clone(),
                era,
                first_grade_date,
                commission_date: anchor.pay_date,
            });
        }

        Ok(Some(EraWindow {
            end: self.teacher.truncate_to_retirement(window.end),
            ..window
        }))
    }

    fn run(
        &self,
        window: EraWindow,
        timeline: &GradeTimeline,
        figures: Figures,
        horizon: Horizon,
    ) -> EngineResult<Vec<ComputedSalaryRow>> {
        debug!(
            teacher_id = %self.teacher.id,
            era = %window.era,
            start = %window.start,
            end = %window.end,
            "Running era progression"
        );
        let input = ProgressionInput {
            era: window.era,
            start: window.start,
            end: window.end,
            initial: window.initial,
            timeline,
            anniversary: window.anniversary,
            model: IncrementModel::for_era(window.era, figures, self.settings),
            figures,
        };
        let mut rows = run_progression(&input)?;
        rows.retain(|r| horizon.covers(r.key()));
        Ok(rows)
    }
}
