//! Pay commission eras and figure selection.
//!
//! Every grade and commission record carries two parallel sets of money
//! fields: the officially entitled ("payable") figures and the actually
//! disbursed ("paid") figures. [`Figures`] selects between them and
//! [`PayBaseline`] is the selected basic/grade-pay pair.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pay commission regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PayCommission {
    /// 5th Pay Commission, flat yearly increments.
    #[serde(rename = "5th")]
    Fifth,
    /// 6th Pay Commission, 3% increments rounded up to the next 10.
    #[serde(rename = "6th")]
    Sixth,
    /// 7th Pay Commission, 3% increments rounded to the nearest 100 (50 rounds down).
    #[serde(rename = "7th")]
    Seventh,
}

impl PayCommission {
    /// All eras in stitching precedence order.
    pub const PRECEDENCE: [PayCommission; 3] = [
        PayCommission::Fifth,
        PayCommission::Sixth,
        PayCommission::Seventh,
    ];

    /// Returns the short tag used in report keys (`5th`, `6th`, `7th`).
    pub fn tag(self) -> &'static str {
        match self {
            PayCommission::Fifth => "5th",
            PayCommission::Sixth => "6th",
            PayCommission::Seventh => "7th",
        }
    }
}

impl std::fmt::Display for PayCommission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Which parallel set of money fields a computation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Figures {
    /// The officially entitled figures.
    Payable,
    /// The figures actually disbursed.
    Paid,
}

/// A basic pay and grade pay pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBaseline {
    /// Basic pay.
    pub basic: Decimal,
    /// Grade pay.
    pub grade_pay: Decimal,
}

impl PayBaseline {
    /// Creates a new baseline.
    pub fn new(basic: Decimal, grade_pay: Decimal) -> Self {
        Self { basic, grade_pay }
    }

    /// Basic plus grade pay.
    pub fn total(&self) -> Decimal {
        self.basic + self.grade_pay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_serializes_as_ordinal_tag() {
        assert_eq!(
            serde_json::to_string(&PayCommission::Sixth).unwrap(),
            "\"6th\""
        );
        let parsed: PayCommission = serde_json::from_str("\"7th\"").unwrap();
        assert_eq!(parsed, PayCommission::Seventh);
    }

    #[test]
    fn test_precedence_order_is_fifth_sixth_seventh() {
        assert_eq!(
            PayCommission::PRECEDENCE,
            [
                PayCommission::Fifth,
                PayCommission::Sixth,
                PayCommission::Seventh
            ]
        );
    }

    #[test]
    fn test_baseline_total() {
        let baseline = PayBaseline::new(Decimal::from(10860), Decimal::from(4200));
        assert_eq!(baseline.total(), Decimal::from(15060));
    }

    #[test]
    fn test_figures_serialization() {
        assert_eq!(serde_json::to_string(&Figures::Paid).unwrap(), "\"paid\"");
    }
}
