//! Response types for the payroll engine API.
//!
//! This module defines the success bodies, the error response structures and
//! the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{PayrollMetadata, RateTableSummary};
use crate::error::EngineError;
use crate::models::PayrollCalculation;

/// Body returned by `POST /calculate`.
///
/// The calculation itself is deterministic; the identifier and timestamp
/// are added per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The calculation result.
    #[serde(flatten)]
    pub calculation: PayrollCalculation,
}

impl CalculationResponse {
    /// Wraps a calculation with a fresh identifier and the current time.
    pub fn new(calculation: PayrollCalculation) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            calculation,
        }
    }
}

/// Body returned by `GET /rate-tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTablesResponse {
    /// Jurisdiction metadata.
    pub jurisdiction: PayrollMetadata,
    /// Loaded rate tables, oldest first.
    pub rate_tables: Vec<RateTableSummary>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("Check the value of '{}'", field),
                ),
            },
            EngineError::InvalidRateTable { version, .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_RATE_TABLE",
                    "Rate table is malformed",
                    format!("{} (table {})", message, version),
                ),
            },
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    message,
                ),
            },
            EngineError::RateTableNotFound { version } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_TABLE_NOT_FOUND",
                    message,
                    format!("No rate table with version '{}' is loaded", version),
                ),
            },
            EngineError::NoRateTableInForce { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "NO_RATE_TABLE_IN_FORCE",
                    message,
                    format!("Every loaded rate table takes effect after {}", date),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_input("standard_hours", "must be greater than zero").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
        assert!(api_error.error.message.contains("standard_hours"));
    }

    #[test]
    fn test_unknown_version_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::RateTableNotFound {
            version: "hu-1999".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RATE_TABLE_NOT_FOUND");
    }

    #[test]
    fn test_no_table_in_force_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::NoRateTableInForce {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "NO_RATE_TABLE_IN_FORCE");
    }

    #[test]
    fn test_configuration_problems_are_server_errors() {
        let invalid_table: ApiErrorResponse = EngineError::InvalidRateTable {
            version: "hu-2024-a".to_string(),
            field: "pension_rate".to_string(),
            message: "cannot be negative".to_string(),
        }
        .into();
        assert_eq!(invalid_table.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(invalid_table.error.code, "INVALID_RATE_TABLE");

        let missing: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/nowhere".to_string(),
        }
        .into();
        assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing.error.code, "CONFIG_ERROR");
    }
}
