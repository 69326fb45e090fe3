//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and allowance percentage tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineSettings, PercentageFile, PercentageTables};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/pay_commission/
/// ├── settings.yaml   # Historical era boundaries and increment constants
/// ├── da.yaml         # Dearness Allowance percentages by effective month
/// └── hra.yaml        # House Rent Allowance percentages by effective month
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pay_commission").unwrap();
/// println!("DA entries: {}", loader.config().tables().da.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or if
    /// the settings are inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("settings.yaml"))?;
        settings.validate()?;

        let da = Self::load_yaml::<PercentageFile>(&path.join("da.yaml"))?;
        let hra = Self::load_yaml::<PercentageFile>(&path.join("hra.yaml"))?;

        let tables = PercentageTables {
            da: da.entries,
            hra: hra.entries,
        };
        Self::check_unique_months("da.yaml", &tables.da)?;
        Self::check_unique_months("hra.yaml", &tables.hra)?;

        debug!(
            path = %path.display(),
            da_entries = tables.da.len(),
            hra_entries = tables.hra.len(),
            "Loaded pay commission configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, tables),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Percentage tables hold at most one entry per (year, month).
    fn check_unique_months(
        file: &str,
        entries: &[crate::models::PercentageEntry],
    ) -> EngineResult<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in entries {
            if !(1..=12).contains(&entry.month) {
                return Err(EngineError::ConfigParseError {
                    path: file.to_string(),
                    message: format!("month out of range: {}", entry.month),
                });
            }
            if !seen.insert(entry.effective_month()) {
                return Err(EngineError::ConfigParseError {
                    path: file.to_string(),
                    message: format!("duplicate entry for {}", entry.effective_month()),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
