//! Pay Commission salary recomputation engine for government teachers
//!
//! This crate reconstructs a teacher's month-by-month salary history across the
//! 5th, 6th and 7th Pay Commission eras, applies DA and HRA with leave
//! proration, and reconciles what was payable against what was paid.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
