//! Response types for the legal engine API.
//!
//! This module defines the error response structures, the mapping from
//! [`EngineError`] to HTTP status codes, and response bodies that add
//! display fields to the engine results.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::format_years;
use crate::error::EngineError;
use crate::models::DosimetryResult;

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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("The value of '{}' is not allowed", field),
                ),
            },
            EngineError::InvalidFormat { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "FORMAT_ERROR",
                    message,
                    format!("'{}' must be a number such as 3.000,50", field),
                ),
            },
            EngineError::CrimeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "CRIME_NOT_FOUND",
                    message,
                    format!("The crime id '{}' is not in the catalog", id),
                ),
            },
        }
    }
}

/// Dosimetry result with each phase rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosimetryResponse {
    /// The numeric result.
    #[serde(flatten)]
    pub result: DosimetryResult,
    /// Phase 1 as "X ano(s) e Y mês(es)".
    pub phase1_text: String,
    /// Phase 2 as "X ano(s) e Y mês(es)".
    pub phase2_text: String,
    /// Phase 3 as "X ano(s) e Y mês(es)".
    pub phase3_text: String,
}

impl From<DosimetryResult> for DosimetryResponse {
    fn from(result: DosimetryResult) -> Self {
        Self {
            phase1_text: format_years(result.phase1),
            phase2_text: format_years(result.phase2),
            phase3_text: format_years(result.phase3),
            result,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is up.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Name of the loaded tables.
    pub tables: String,
}
