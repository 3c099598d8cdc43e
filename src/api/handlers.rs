//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_salary;
use crate::config::{ConfigLoader, RateTable, RateTableSummary};
use crate::error::EngineResult;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, RateTablesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/rate-tables", get(rate_tables_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Picks the rate table for the request, runs the gross-to-net calculation
/// and returns the result with a fresh calculation id.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let config = state.config();
    let rates = match select_rate_table(config, &request) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rate table selection failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    match calculate_salary(&request.input, rates) {
        Ok(calculation) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                rate_table = %rates.version,
                gross = %calculation.gross.total,
                net_pay = %calculation.salary.net_pay,
                warnings = calculation.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(CalculationResponse::new(calculation)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /rate-tables endpoint.
async fn rate_tables_handler(State(state): State<AppState>) -> Json<RateTablesResponse> {
    let config = state.config();
    Json(RateTablesResponse {
        jurisdiction: config.metadata().clone(),
        rate_tables: config
            .rate_tables()
            .iter()
            .map(RateTableSummary::from)
            .collect(),
    })
}

/// Explicit version first, then the table in force on the pay date, then
/// the table in force today.
fn select_rate_table<'a>(
    config: &'a ConfigLoader,
    request: &CalculationRequest,
) -> EngineResult<&'a RateTable> {
    match (&request.rate_table, request.pay_date) {
        (Some(version), _) => config.get_rate_table(version),
        (None, Some(date)) => config.rate_table_for_date(date),
        (None, None) => config.rate_table_for_date(Utc::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalaryInput;
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/hu").expect("Failed to load config");
        AppState::new(config)
    }

    fn request(rate_table: Option<&str>, pay_date: Option<&str>) -> CalculationRequest {
        CalculationRequest {
            rate_table: rate_table.map(str::to_string),
            pay_date: pay_date.map(|d| d.parse::<NaiveDate>().unwrap()),
            input: SalaryInput::new(Decimal::from(500_000), Decimal::from(176)),
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&request(Some("hu-2024-a"), None)).unwrap();

        let (status, json) = send(router, post_json(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rate_table_version"], "hu-2024-a");
        assert_eq!(json["salary"]["net_pay"], "345375");
        assert!(json["calculation_id"].is_string());
        assert!(json["timestamp"].is_string());
        assert_eq!(json["engine_version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, json) = send(router, post_json("{ not json".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{ "rate_table": "hu-2024-a", "input": { "base_salary": "500000" } }"#;

        let (status, json) = send(router, post_json(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("standard_hours"));
    }

    #[tokio::test]
    async fn test_unknown_rate_table_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&request(Some("hu-1999"), None)).unwrap();

        let (status, json) = send(router, post_json(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "RATE_TABLE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_zero_standard_hours_returns_400() {
        let router = create_router(create_test_state());
        let mut req = request(Some("hu-2024-a"), None);
        req.input.standard_hours = Decimal::ZERO;
        let body = serde_json::to_string(&req).unwrap();

        let (status, json) = send(router, post_json(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_rate_tables_listing() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("GET")
            .uri("/rate-tables")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["jurisdiction"]["currency"], "HUF");
        let versions: Vec<&str> = json["rate_tables"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["version"].as_str().unwrap())
            .collect();
        assert_eq!(versions, vec!["hu-2024-a", "hu-2024-b", "hu-2025-a"]);
    }

    #[test]
    fn test_select_by_version_wins_over_pay_date() {
        let config = ConfigLoader::load("./config/hu").unwrap();
        let req = request(Some("hu-2024-a"), Some("2025-06-01"));

        assert_eq!(select_rate_table(&config, &req).unwrap().version, "hu-2024-a");
    }

    #[test]
    fn test_select_by_pay_date() {
        let config = ConfigLoader::load("./config/hu").unwrap();

        let mid_2024 = request(None, Some("2024-08-10"));
        assert_eq!(select_rate_table(&config, &mid_2024).unwrap().version, "hu-2024-b");

        let boundary = request(None, Some("2025-01-01"));
        assert_eq!(select_rate_table(&config, &boundary).unwrap().version, "hu-2025-a");

        let too_early = request(None, Some("2023-12-31"));
        assert!(select_rate_table(&config, &too_early).is_err());
    }

    #[test]
    fn test_select_defaults_to_today() {
        let config = ConfigLoader::load("./config/hu").unwrap();
        let req = request(None, None);

        assert_eq!(select_rate_table(&config, &req).unwrap().version, "hu-2025-a");
    }
}
