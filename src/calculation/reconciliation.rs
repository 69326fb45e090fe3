//! Payable-versus-paid reconciliation.

use std::collections::BTreeMap;

use crate::models::{AllowanceRow, DifferenceRow, MonthKey};

/// Joins the payable and paid allowance series by month and computes
/// `payable - paid` for each money field.
///
/// Only months present on both sides produce a row; a month missing from
/// either series is skipped, not treated as zero. For a month with several
/// rows on one side, the last one is used.
pub fn reconcile(payable: &[AllowanceRow], paid: &[AllowanceRow]) -> Vec<DifferenceRow> {
    let paid_by_month: BTreeMap<MonthKey, &AllowanceRow> =
        paid.iter().map(|row| (row.key(), row)).collect();
    let payable_by_month: BTreeMap<MonthKey, &AllowanceRow> =
        payable.iter().map(|row| (row.key(), row)).collect();

    payable_by_month
        .into_iter()
        .filter_map(|(key, payable)| {
            paid_by_month
                .get(&key)
                .map(|paid| difference(key, payable, paid))
        })
        .collect()
}

fn difference(key: MonthKey, payable: &AllowanceRow, paid: &AllowanceRow) -> DifferenceRow {
    DifferenceRow {
        month: key.month,
        year: key.year,
        basic_difference: payable.basic - paid.basic,
        grade_pay_difference: payable.grade_pay - paid.grade_pay,
        total_difference: payable.calculated_total - paid.calculated_total,
        da_difference: payable.da_amount - paid.da_amount,
        hra_difference: payable.hra_amount - paid.hra_amount,
        final_total_difference: payable.final_total - paid.final_total,
        payable: payable.clone(),
        paid: paid.clone(),
    }
}
