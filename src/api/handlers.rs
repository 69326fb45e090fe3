//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_report;
use crate::models::{ReportKey, ReportType};

use super::request::{BatchRequest, ReportRequest};
use super::response::{ApiError, ApiErrorResponse, BatchItem, BatchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports", post(report_handler))
        .route("/reports/batch", post(batch_handler))
        .route("/reports/:teacher_id/:report_type", get(get_report_handler))
        .with_state(state)
}

/// Handler for POST /reports endpoint.
///
/// Computes one report, replaces whatever was stored under its key, and
/// returns it.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let query = request.query();
    match compute_report(&request.records, &query, state.config().config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                teacher_id = %report.teacher_id,
                report_type = %report.report_type,
                rows = report.rows.len(),
                warnings = report.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Report computed successfully"
            );
            state.store().replace(report.clone());
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                teacher_id = %request.records.teacher_id(),
                report_type = %query.report_type,
                error = %err,
                "Report computation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /reports/batch endpoint.
///
/// Each teacher is computed independently. A failing teacher is logged and
/// reported in the response without stopping the rest of the batch.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let batch_id = Uuid::new_v4();
    info!(correlation_id = %batch_id, "Processing batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(batch_id, rejection),
    };

    let start_time = Instant::now();
    let query = request.query();
    let config = state.config().config();
    let mut results = Vec::with_capacity(request.teachers.len());
    let mut failed = 0;

    for records in &request.teachers {
        let teacher_id = records.teacher_id().to_string();
        match compute_report(records, &query, config) {
            Ok(report) => {
                state.store().replace(report.clone());
                results.push(BatchItem {
                    teacher_id,
                    report: Some(report),
                    error: None,
                });
            }
            Err(err) => {
                warn!(
                    correlation_id = %batch_id,
                    teacher_id = %teacher_id,
                    report_type = %query.report_type,
                    fatal = err.is_fatal_for_teacher(),
                    error = %err,
                    "Skipping teacher in batch"
                );
                failed += 1;
                let api_error: ApiErrorResponse = err.into();
                results.push(BatchItem {
                    teacher_id,
                    report: None,
                    error: Some(api_error.error),
                });
            }
        }
    }

    let succeeded = results.len() - failed;
    info!(
        correlation_id = %batch_id,
        report_type = %query.report_type,
        succeeded,
        failed,
        duration_us = start_time.elapsed().as_micros(),
        "Batch completed"
    );

    json_response(
        StatusCode::OK,
        BatchResponse {
            batch_id,
            report_type: query.report_type,
            succeeded,
            failed,
            results,
        },
    )
}

/// Handler for GET /reports/:teacher_id/:report_type endpoint.
async fn get_report_handler(
    State(state): State<AppState>,
    Path((teacher_id, tag)): Path<(String, String)>,
) -> Response {
    let report_type = match ReportType::from_str(&tag) {
        Ok(report_type) => report_type,
        Err(_) => {
            return json_response(StatusCode::BAD_REQUEST, ApiError::unknown_report_type(&tag));
        }
    };

    match state.store().get(&ReportKey::new(&teacher_id, report_type)) {
        Some(report) => json_response(StatusCode::OK, report),
        None => json_response(
            StatusCode::NOT_FOUND,
            ApiError::report_not_found(&teacher_id, report_type),
        ),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{
        CommissionRecord, CommissionType, GradeRecord, GradeType, ReportRows, SalaryReport,
        Teacher, TeacherRecords, TeacherStatus,
    };
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/pay_commission").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_records(teacher_id: &str) -> TeacherRecords {
        TeacherRecords {
            teacher: Teacher {
                id: teacher_id.to_string(),
                name: "V. Pawar".to_string(),
                city: "Satara".to_string(),
                birthday: make_date("1970-01-20"),
                joining_date: make_date("2001-08-01"),
                retirement_date: None,
                status: TeacherStatus::Active,
            },
            grades: vec![GradeRecord {
                teacher_id: teacher_id.to_string(),
                grade_type: GradeType::First,
                grade_date: make_date("2001-08-01"),
                payable_basic: Decimal::from(5000),
                payable_grade_pay: Decimal::ZERO,
                paid_basic: Decimal::from(5000),
                paid_grade_pay: Decimal::ZERO,
            }],
            commissions: vec![CommissionRecord {
                teacher_id: teacher_id.to_string(),
                commission_type: CommissionType::Sixth,
                pay_date: make_date("2006-01-01"),
                payable_basic: Decimal::from(10860),
                payable_grade_pay: Decimal::from(4200),
                paid_basic: Decimal::from(10500),
                paid_grade_pay: Decimal::from(4200),
                yearly_increment_date: make_date("2006-07-01"),
            }],
            leaves: vec![],
        }
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_report_request_returns_200_and_stores() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let request = ReportRequest {
            records: create_test_records("t_001"),
            report_type: ReportType::Payable6th,
            start_date: None,
            end_date: None,
        };
        let response = router
            .oneshot(post_json("/reports", serde_json::to_string(&request).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: SalaryReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.teacher_id, "t_001");
        assert!(matches!(report.rows, ReportRows::Progression(_)));

        let stored = state
            .store()
            .get(&ReportKey::new("t_001", ReportType::Payable6th))
            .unwrap();
        assert_eq!(stored.calculation_id, report.calculation_id);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_first_grade_returns_422() {
        let router = create_router(create_test_state());

        let mut records = create_test_records("t_001");
        records.grades.clear();
        let request = ReportRequest {
            records,
            report_type: ReportType::AllPayable,
            start_date: None,
            end_date: None,
        };
        let response = router
            .oneshot(post_json("/reports", serde_json::to_string(&request).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_FIRST_GRADE");
    }

    #[tokio::test]
    async fn test_batch_continues_after_failing_teacher() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let mut broken = create_test_records("t_002");
        broken.commissions.clear();
        let request = BatchRequest {
            report_type: ReportType::AllPaid,
            start_date: None,
            end_date: None,
            teachers: vec![
                create_test_records("t_001"),
                broken,
                create_test_records("t_003"),
            ],
        };
        let response = router
            .oneshot(post_json(
                "/reports/batch",
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let batch: BatchResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(batch.succeeded, 2);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.results[1].teacher_id, "t_002");
        assert_eq!(
            batch.results[1].error.as_ref().unwrap().code,
            "MISSING_SIXTH_COMMISSION"
        );
        assert!(batch.results[2].report.is_some());
        assert_eq!(state.store().len(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_report_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/reports/t_001/payable-8th")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_report_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/reports/t_001/all-paid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "REPORT_NOT_FOUND");
    }
}
