//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::storage::{InMemoryReportStore, ReportStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded engine configuration and the report store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// Where computed reports are persisted.
    store: Arc<dyn ReportStore>,
}

impl AppState {
    /// Creates a new application state with an in-memory report store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(InMemoryReportStore::new()))
    }

    /// Creates a new application state with the given report store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn ReportStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the report store.
    pub fn store(&self) -> &dyn ReportStore {
        self.store.as_ref()
    }
}
