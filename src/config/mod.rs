//! Configuration loading and management for the salary engine.
//!
//! This module loads the historical settings and the global DA/HRA
//! percentage tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pay_commission").unwrap();
//! println!("Final horizon: {}", config.config().settings().final_horizon_month);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, FinalCutoff, FlatIncrements, PercentageFile, PercentageTables,
};
