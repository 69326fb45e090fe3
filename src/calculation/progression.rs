//! Monthly progression engine.
//!
//! This module walks a closed calendar range month by month, carrying basic
//! and grade pay forward. Each month either takes a grade change from the
//! timeline or, on the anniversary month, the era's yearly increment. A grade
//! change always wins over the increment.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComputedSalaryRow, Figures, MonthKey, MonthRange, PayBaseline, PayCommission};

use super::grade_timeline::GradeTimeline;
use super::increment::IncrementModel;

/// Everything one era's progression needs.
#[derive(Debug, Clone)]
pub struct ProgressionInput<'a> {
    /// The era being computed, used for logging.
    pub era: PayCommission,
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
    /// Basic and grade pay at the start of the window.
    pub initial: PayBaseline,
    /// The teacher's grade history.
    pub timeline: &'a GradeTimeline,
    /// The yearly increment anniversary.
    pub anniversary: NaiveDate,
    /// How the yearly increment is computed and scheduled.
    pub model: IncrementModel,
    /// Payable or paid figures.
    pub figures: Figures,
}

/// Advances the progression by one month.
///
/// A grade change dated inside both `month` and the input window replaces the
/// carried state and suppresses the increment. Otherwise the increment is
/// added when the model says it is due.
///
/// # Arguments
///
/// * `state` - Basic and grade pay carried from the previous month
/// * `month` - The month being processed
/// * `input` - The era's progression input
///
/// # Returns
///
/// The state to carry into the next month and the row emitted for `month`.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{step, GradeTimeline, IncrementModel, ProgressionInput};
/// use salary_engine::models::{Figures, GradeRecord, GradeType, MonthKey, PayBaseline, PayCommission};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let first_date = NaiveDate::from_ymd_opt(2006, 7, 1).unwrap();
/// let timeline = GradeTimeline::new("t_001", vec![GradeRecord {
///     teacher_id: "t_001".to_string(),
///     grade_type: GradeType::First,
///     grade_date: first_date,
///     payable_basic: Decimal::from(10860),
///     payable_grade_pay: Decimal::from(4200),
///     paid_basic: Decimal::from(10860),
///     paid_grade_pay: Decimal::from(4200),
/// }]).unwrap();
/// let initial = PayBaseline::new(Decimal::from(10860), Decimal::from(4200));
/// let input = ProgressionInput {
///     era: PayCommission::Sixth,
///     start: NaiveDate::from_ymd_opt(2009, 4, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
///     initial,
///     timeline: &timeline,
///     anniversary: first_date,
///     model: IncrementModel::PercentRoundTen { rate: Decimal::new(3, 2) },
///     figures: Figures::Payable,
/// };
///
/// let (next, row) = step(initial, MonthKey::new(2009, 7), &input);
/// assert!(row.yearly_increment_applied);
/// assert_eq!(next.basic, Decimal::from(11320));
/// ```
pub fn step(
    state: PayBaseline,
    month: MonthKey,
    input: &ProgressionInput<'_>,
) -> (PayBaseline, ComputedSalaryRow) {
    let mut changes = input
        .timeline
        .changes_in_month(month, input.start, input.end);
    let change = changes.next();

    let (next, date, increment_applied) = match change {
        Some(grade) => {
            if changes.next().is_some() {
                warn!(
                    teacher_id = %grade.teacher_id,
                    era = %input.era,
                    month = %month,
                    applied = %grade.grade_date,
                    "More than one grade change in month, applying the earliest"
                );
            }
            (grade.baseline(input.figures), Some(grade.grade_date), false)
        }
        None if input.model.is_due(month, input.anniversary) => {
            let increment = input.model.increment(state);
            (
                PayBaseline::new(state.basic + increment, state.grade_pay),
                None,
                true,
            )
        }
        None => (state, None, false),
    };

    let row = emit(month, date, next, increment_applied, &input.model);
    (next, row)
}

/// Runs the progression over `[input.start, input.end]`.
///
/// Emits one row per calendar month, plus the leading half of every
/// mid-month split for models that split. An inverted window yields no rows.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if a split date cannot be
/// represented.
pub fn run_progression(input: &ProgressionInput<'_>) -> EngineResult<Vec<ComputedSalaryRow>> {
    if input.start > input.end {
        return Ok(Vec::new());
    }

    let mut state = input.initial;
    let mut rows = Vec::new();
    for month in MonthRange::covering(input.start, input.end) {
        let (next, row) = step(state, month, input);
        state = next;
        rows.push(row);
    }

    if input.model.splits_mid_month() {
        rows = split_mid_month_changes(rows, input)?;
    }
    Ok(rows)
}

/// Inserts the old-grade part of every month whose grade change lands after
/// the 1st. The inserted row carries the previous month's closing figures, or
/// the initial baseline when there is no previous row.
fn split_mid_month_changes(
    rows: Vec<ComputedSalaryRow>,
    input: &ProgressionInput<'_>,
) -> EngineResult<Vec<ComputedSalaryRow>> {
    let mut out: Vec<ComputedSalaryRow> = Vec::with_capacity(rows.len() + 2);
    for row in rows {
        let change_date = match row.date {
            Some(date) if date.day() != 1 => date,
            _ => {
                out.push(row);
                continue;
            }
        };

        let key = row.key();
        let carried = match out.last() {
            Some(prev) if prev.key() == key.previous() => {
                PayBaseline::new(prev.basic, prev.grade_pay)
            }
            _ => input.initial,
        };
        let day_before =
            change_date
                .pred_opt()
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!("cannot split month {} before {}", key, change_date),
                })?;

        out.push(emit(key, Some(day_before), carried, false, &input.model));
        out.push(row);
    }
    Ok(out)
}

fn emit(
    month: MonthKey,
    date: Option<NaiveDate>,
    pay: PayBaseline,
    yearly_increment_applied: bool,
    model: &IncrementModel,
) -> ComputedSalaryRow {
    let m_basic = model.displayed_basic(pay.basic, month);
    ComputedSalaryRow {
        month: month.month,
        year: month.year,
        date,
        basic: pay.basic,
        m_basic,
        grade_pay: pay.grade_pay,
        total: m_basic + pay.grade_pay,
        yearly_increment_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::models::{GradeRecord, GradeType};
    use chrono::Duration;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn grade(grade_type: GradeType, on: NaiveDate, basic: &str, grade_pay: &str) -> GradeRecord {
        GradeRecord {
            teacher_id: "t_001".to_string(),
            grade_type,
            grade_date: on,
            payable_basic: dec(basic),
            payable_grade_pay: dec(grade_pay),
            paid_basic: dec(basic),
            paid_grade_pay: dec(grade_pay),
        }
    }

    fn sixth_model() -> IncrementModel {
        IncrementModel::for_era(
            PayCommission::Sixth,
            Figures::Payable,
            &EngineSettings::default(),
        )
    }

    fn input<'a>(
        timeline: &'a GradeTimeline,
        start: NaiveDate,
        end: NaiveDate,
        initial: PayBaseline,
        anniversary: NaiveDate,
        model: IncrementModel,
    ) -> ProgressionInput<'a> {
        ProgressionInput {
            era: PayCommission::Sixth,
            start,
            end,
            initial,
            timeline,
            anniversary,
            model,
            figures: Figures::Payable,
        }
    }

    #[test]
    fn test_sixth_era_increment_example() {
        let first = date(2006, 7, 1);
        let timeline =
            GradeTimeline::new("t_001", vec![grade(GradeType::First, first, "10860", "4200")])
                .unwrap();
        let initial = PayBaseline::new(dec("10860"), dec("4200"));
        let input = input(
            &timeline,
            date(2007, 1, 1),
            date(2007, 12, 31),
            initial,
            first,
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 12);
        let july = &rows[6];
        assert_eq!(july.key(), MonthKey::new(2007, 7));
        assert!(july.yearly_increment_applied);
        assert_eq!(july.basic, dec("11320"));
        assert_eq!(july.total, dec("15520"));
        assert_eq!(rows[5].basic, dec("10860"));
        assert_eq!(rows[11].basic, dec("11320"));
    }

    #[test]
    fn test_fifth_era_flat_increment_and_revision() {
        let first = date(2003, 1, 1);
        let timeline =
            GradeTimeline::new("t_001", vec![grade(GradeType::First, first, "1000", "0")]).unwrap();
        let model = IncrementModel::for_era(
            PayCommission::Fifth,
            Figures::Payable,
            &EngineSettings::default(),
        );
        let mut input = input(
            &timeline,
            first,
            date(2004, 6, 30),
            PayBaseline::new(dec("1000"), Decimal::ZERO),
            first,
            model,
        );
        input.era = PayCommission::Fifth;

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 18);
        // Anchor month takes the first grade, no increment.
        assert_eq!(rows[0].date, Some(first));
        assert!(!rows[0].yearly_increment_applied);

        let jan_2004 = &rows[12];
        assert!(jan_2004.yearly_increment_applied);
        assert_eq!(jan_2004.basic, dec("1150"));
        assert_eq!(jan_2004.m_basic, dec("1150"));

        let apr_2004 = &rows[15];
        assert_eq!(apr_2004.key(), MonthKey::new(2004, 4));
        assert_eq!(apr_2004.m_basic, dec("1725"));
        assert_eq!(apr_2004.total, dec("1725"));
    }

    #[test]
    fn test_grade_change_suppresses_increment_in_anniversary_month() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "10860", "4200"),
                grade(GradeType::Second, date(2010, 7, 1), "13000", "4400"),
            ],
        )
        .unwrap();
        let input = input(
            &timeline,
            date(2010, 6, 1),
            date(2010, 8, 31),
            PayBaseline::new(dec("12000"), dec("4200")),
            first,
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        let july = &rows[1];
        assert!(!july.yearly_increment_applied);
        assert_eq!(july.basic, dec("13000"));
        assert_eq!(july.grade_pay, dec("4400"));
        assert_eq!(july.total, dec("17400"));
        assert_eq!(july.date, Some(date(2010, 7, 1)));
    }

    #[test]
    fn test_mid_month_change_splits_into_two_rows() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "10860", "4200"),
                grade(GradeType::Second, date(2011, 10, 15), "14230", "4400"),
            ],
        )
        .unwrap();
        let input = input(
            &timeline,
            date(2011, 8, 1),
            date(2011, 11, 30),
            PayBaseline::new(dec("12500"), dec("4200")),
            first,
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 5);

        let october: Vec<&ComputedSalaryRow> = rows
            .iter()
            .filter(|r| r.key() == MonthKey::new(2011, 10))
            .collect();
        assert_eq!(october.len(), 2);
        assert_eq!(october[0].date, Some(date(2011, 10, 14)));
        assert_eq!(october[0].total, dec("16700"));
        assert_eq!(october[1].date, Some(date(2011, 10, 15)));
        assert_eq!(october[1].total, dec("18630"));
        // November carries the new grade.
        assert_eq!(rows[4].basic, dec("14230"));
    }

    #[test]
    fn test_split_in_first_month_falls_back_to_initial() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "10860", "4200"),
                grade(GradeType::Second, date(2011, 10, 15), "14230", "4400"),
            ],
        )
        .unwrap();
        let initial = PayBaseline::new(dec("12500"), dec("4200"));
        let input = input(
            &timeline,
            date(2011, 10, 1),
            date(2011, 10, 31),
            initial,
            first,
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].basic, initial.basic);
        assert_eq!(rows[0].grade_pay, initial.grade_pay);
    }

    #[test]
    fn test_flat_model_never_splits() {
        let first = date(2000, 1, 10);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "4000", "0"),
                grade(GradeType::Second, date(2002, 5, 20), "5000", "0"),
            ],
        )
        .unwrap();
        let model = IncrementModel::for_era(
            PayCommission::Fifth,
            Figures::Payable,
            &EngineSettings::default(),
        );
        let input = input(
            &timeline,
            first,
            date(2002, 12, 31),
            PayBaseline::new(dec("4000"), Decimal::ZERO),
            first,
            model,
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 36);
        assert_eq!(rows[28].date, Some(date(2002, 5, 20)));
        assert_eq!(rows[28].basic, dec("5000"));
    }

    #[test]
    fn test_grade_change_outside_window_is_ignored() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![grade(GradeType::First, first, "10860", "4200")],
        )
        .unwrap();
        // Window starts mid-July, after the first grade date.
        let input = input(
            &timeline,
            date(2006, 7, 15),
            date(2006, 8, 31),
            PayBaseline::new(dec("9000"), dec("4200")),
            date(2006, 1, 1),
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].basic, dec("9000"));
    }

    #[test]
    fn test_in_window_change_wins_over_earlier_change_outside_window() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "10860", "4200"),
                grade(GradeType::Second, date(2010, 7, 5), "13000", "4400"),
                grade(GradeType::Third, date(2010, 7, 20), "14500", "4600"),
            ],
        )
        .unwrap();
        // Window opens between the two July changes.
        let input = input(
            &timeline,
            date(2010, 7, 10),
            date(2010, 8, 31),
            PayBaseline::new(dec("12000"), dec("4200")),
            first,
            sixth_model(),
        );

        let rows = run_progression(&input).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, Some(date(2010, 7, 19)));
        assert_eq!(rows[0].basic, dec("12000"));

        let july = &rows[1];
        assert_eq!(july.date, Some(date(2010, 7, 20)));
        assert_eq!(july.basic, dec("14500"));
        assert_eq!(july.grade_pay, dec("4600"));
        assert!(!july.yearly_increment_applied);
        assert!(rows.iter().all(|r| !r.yearly_increment_applied));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let first = date(2006, 7, 1);
        let timeline =
            GradeTimeline::new("t_001", vec![grade(GradeType::First, first, "10860", "4200")])
                .unwrap();
        let input = input(
            &timeline,
            date(2010, 1, 1),
            date(2009, 12, 31),
            PayBaseline::new(dec("10860"), dec("4200")),
            first,
            sixth_model(),
        );
        assert!(run_progression(&input).unwrap().is_empty());
    }

    #[test]
    fn test_progression_is_deterministic() {
        let first = date(2006, 7, 1);
        let timeline = GradeTimeline::new(
            "t_001",
            vec![
                grade(GradeType::First, first, "10860", "4200"),
                grade(GradeType::Second, date(2012, 3, 9), "16000", "4400"),
            ],
        )
        .unwrap();
        let input = input(
            &timeline,
            date(2009, 4, 1),
            date(2015, 12, 31),
            PayBaseline::new(dec("10860"), dec("4200")),
            first,
            sixth_model(),
        );
        assert_eq!(
            run_progression(&input).unwrap(),
            run_progression(&input).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_rows_cover_every_month_once(
            start_offset in 0i64..3000,
            span in 0i64..2500,
            change_offset in 0i64..5000,
        ) {
            let first = date(2001, 3, 12);
            let change = first + Duration::days(change_offset);
            let timeline = GradeTimeline::new(
                "t_001",
                vec![
                    grade(GradeType::First, first, "9000", "4200"),
                    grade(GradeType::Second, change, "12000", "4600"),
                ],
            )
            .unwrap();
            let start = first + Duration::days(start_offset);
            let end = start + Duration::days(span);
            let input = input(
                &timeline,
                start,
                end,
                PayBaseline::new(dec("9000"), dec("4200")),
                first,
                sixth_model(),
            );

            let rows = run_progression(&input).unwrap();
            let expected: Vec<MonthKey> = MonthRange::covering(start, end).collect();
            let distinct: BTreeSet<MonthKey> = rows.iter().map(|r| r.key()).collect();
            prop_assert_eq!(distinct.into_iter().collect::<Vec<_>>(), expected.clone());

            let split_months = rows
                .windows(2)
                .filter(|w| w[0].key() == w[1].key())
                .count();
            prop_assert_eq!(rows.len(), expected.len() + split_months);
            prop_assert!(split_months <= 2);
        }
    }
}
