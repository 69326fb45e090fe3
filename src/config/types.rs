//! Configuration types for salary recomputation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::rules;
use crate::error::{EngineError, EngineResult};
use crate::models::{Figures, MonthKey, PercentageEntry};

/// The terminal month paid from a fixed cutover day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FinalCutoff {
    /// The cutoff month.
    pub month: MonthKey,
    /// Working days in the cutoff month are counted from this day.
    pub cutover_day: u32,
}

/// Flat 5th-era yearly increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FlatIncrements {
    /// Increment added to payable basic.
    pub payable: Decimal,
    /// Increment added to paid basic.
    pub paid: Decimal,
}

impl FlatIncrements {
    /// The increment for the requested figures.
    pub fn for_figures(&self, figures: Figures) -> Decimal {
        match figures {
            Figures::Payable => self.payable,
            Figures::Paid => self.paid,
        }
    }
}

/// Engine settings from `settings.yaml`.
///
/// Every field defaults to the historical constant in
/// [`rules`](crate::calculation::rules), so a dataset only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// First month of the 5th-era displayed-basic revision.
    pub pay_revision_month: MonthKey,
    /// Displayed-basic multiplier from `pay_revision_month`.
    pub pay_revision_multiplier: Decimal,
    /// Last month of the 5th era.
    pub fifth_era_last_month: MonthKey,
    /// First month of the 6th era.
    pub sixth_era_first_month: MonthKey,
    /// Last month any era is computed for.
    pub final_horizon_month: MonthKey,
    /// The terminal cutover month.
    pub final_cutoff: FinalCutoff,
    /// Flat 5th-era increments.
    pub flat_increment: FlatIncrements,
    /// 6th/7th-era yearly increment rate.
    pub yearly_increment_rate: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            pay_revision_month: rules::PAY_REVISION_MONTH,
            pay_revision_multiplier: rules::PAY_REVISION_MULTIPLIER,
            fifth_era_last_month: rules::FIFTH_ERA_LAST_MONTH,
            sixth_era_first_month: rules::SIXTH_ERA_FIRST_MONTH,
            final_horizon_month: rules::FINAL_HORIZON_MONTH,
            final_cutoff: FinalCutoff {
                month: rules::FINAL_CUTOFF_MONTH,
                cutover_day: rules::FINAL_CUTOVER_DAY,
            },
            flat_increment: FlatIncrements {
                payable: rules::FLAT_INCREMENT_PAYABLE,
                paid: rules::FLAT_INCREMENT_PAID,
            },
            yearly_increment_rate: rules::YEARLY_INCREMENT_RATE,
        }
    }
}

impl EngineSettings {
    /// 31 March 2009 by default.
    pub fn fifth_era_end(&self) -> EngineResult<NaiveDate> {
        last_day(self.fifth_era_last_month)
    }

    /// 1 April 2009 by default.
    pub fn sixth_era_start(&self) -> EngineResult<NaiveDate> {
        first_day(self.sixth_era_first_month)
    }

    /// The last day of the final horizon month.
    pub fn final_horizon(&self) -> EngineResult<NaiveDate> {
        last_day(self.final_horizon_month)
    }

    /// Checks the settings for internal consistency.
    pub fn validate(&self) -> EngineResult<()> {
        for month in [
            self.pay_revision_month,
            self.fifth_era_last_month,
            self.sixth_era_first_month,
            self.final_horizon_month,
            self.final_cutoff.month,
        ] {
            if !(1..=12).contains(&month.month) {
                return Err(EngineError::ConfigParseError {
                    path: "settings.yaml".to_string(),
                    message: format!("month out of range: {}", month.month),
                });
            }
        }
        if self.fifth_era_last_month >= self.sixth_era_first_month {
            return Err(EngineError::ConfigParseError {
                path: "settings.yaml".to_string(),
                message: "fifth_era_last_month must precede sixth_era_first_month".to_string(),
            });
        }
        if self.final_horizon_month < self.sixth_era_first_month {
            return Err(EngineError::ConfigParseError {
                path: "settings.yaml".to_string(),
                message: "final_horizon_month must not precede sixth_era_first_month".to_string(),
            });
        }
        let cutoff_days = self.final_cutoff.month.days_in_month();
        if self.final_cutoff.cutover_day == 0 || self.final_cutoff.cutover_day > cutoff_days {
            return Err(EngineError::ConfigParseError {
                path: "settings.yaml".to_string(),
                message: format!(
                    "final_cutoff.cutover_day must be between 1 and {}",
                    cutoff_days
                ),
            });
        }
        Ok(())
    }
}

fn first_day(month: MonthKey) -> EngineResult<NaiveDate> {
    month.first_day().ok_or_else(|| EngineError::CalculationError {
        message: format!("month {} is out of the calendar range", month),
    })
}

fn last_day(month: MonthKey) -> EngineResult<NaiveDate> {
    month.last_day().ok_or_else(|| EngineError::CalculationError {
        message: format!("month {} is out of the calendar range", month),
    })
}

/// A percentage table file (`da.yaml` or `hra.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PercentageFile {
    /// The effective-dated entries, in any order.
    pub entries: Vec<PercentageEntry>,
}

/// The global DA and HRA percentage tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentageTables {
    /// Dearness Allowance entries.
    pub da: Vec<PercentageEntry>,
    /// House Rent Allowance entries.
    pub hra: Vec<PercentageEntry>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    settings: EngineSettings,
    tables: PercentageTables,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: EngineSettings, tables: PercentageTables) -> Self {
        Self { settings, tables }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the percentage tables.
    pub fn tables(&self) -> &PercentageTables {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_historical_dates() {
        let settings = EngineSettings::default();
        assert_eq!(
            settings.fifth_era_end().unwrap(),
            NaiveDate::from_ymd_opt(2009, 3, 31).unwrap()
        );
        assert_eq!(
            settings.sixth_era_start().unwrap(),
            NaiveDate::from_ymd_opt(2009, 4, 1).unwrap()
        );
        assert_eq!(
            settings.final_horizon().unwrap(),
            NaiveDate::from_ymd_opt(2019, 1, 31).unwrap()
        );
        assert_eq!(settings.final_cutoff.cutover_day, 11);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "final_cutoff:\n  month: { year: 2019, month: 2 }\n  cutover_day: 11\n";
        let settings: EngineSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.final_cutoff.month, MonthKey::new(2019, 2));
        assert_eq!(settings.flat_increment.payable, Decimal::from(150));
        assert_eq!(settings.pay_revision_month, MonthKey::new(2004, 4));
    }

    #[test]
    fn test_flat_increment_by_figures() {
        let settings = EngineSettings::default();
        assert_eq!(
            settings.flat_increment.for_figures(Figures::Payable),
            Decimal::from(150)
        );
        assert_eq!(
            settings.flat_increment.for_figures(Figures::Paid),
            Decimal::from(125)
        );
    }

    #[test]
    fn test_validate_rejects_overlapping_eras() {
        let settings = EngineSettings {
            sixth_era_first_month: MonthKey::new(2009, 3),
            ..EngineSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_cutover_day_past_month_end() {
        let settings = EngineSettings {
            final_cutoff: FinalCutoff {
                month: MonthKey::new(2019, 2),
                cutover_day: 30,
            },
            ..EngineSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
