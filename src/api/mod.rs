//! HTTP API module for the salary engine.
//!
//! This module provides the REST endpoints for computing, batching and
//! reading back teacher salary reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse, BatchItem, BatchResponse};
pub use state::AppState;
