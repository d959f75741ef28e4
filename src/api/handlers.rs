//! HTTP request handlers for the legal engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_dosimetry, calculate_limitation, calculate_termination};
use crate::error::EngineError;
use crate::models::ContractPeriod;

use super::request::{CrimeQuery, DosimetryRequest, LimitationRequest, TerminationRequest};
use super::response::{ApiError, ApiErrorResponse, DosimetryResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/termination", post(termination_handler))
        .route("/dosimetry", post(dosimetry_handler))
        .route("/limitation", post(limitation_handler))
        .route("/crimes", get(crimes_handler))
        .route("/civil-terms", get(civil_terms_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON extraction failure into an error body.
///
/// Missing fields are validation errors; anything else the body could not
/// be decoded into is malformed JSON.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let (status, error) = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiError::validation_error(body_text),
                )
            } else {
                (StatusCode::BAD_REQUEST, ApiError::malformed_json(body_text))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            (
                StatusCode::BAD_REQUEST,
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err)),
            )
        }
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json"),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            ApiError::malformed_json("Failed to parse request body"),
        ),
    };
    json_response(status, error)
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for POST /termination.
///
/// Parses the locale-formatted form fields and returns every settlement
/// line with its deductions.
async fn termination_handler(
    State(state): State<AppState>,
    payload: Result<Json<TerminationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing termination request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = ContractPeriod::try_from(request)
        .and_then(|contract| calculate_termination(&contract, state.config().tables()));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                total_gross = %result.total_gross,
                total_net = %result.total_net,
                duration_us = start_time.elapsed().as_micros(),
                "Termination calculated"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /dosimetry.
async fn dosimetry_handler(
    State(state): State<AppState>,
    payload: Result<Json<DosimetryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dosimetry request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = request
        .resolve(state.config())
        .and_then(|input| calculate_dosimetry(&input));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                crime_id = request.crime_id.as_deref().unwrap_or("-"),
                phase3 = %result.phase3,
                regime = ?result.regime,
                duration_us = start_time.elapsed().as_micros(),
                "Dosimetry calculated"
            );
            json_response(StatusCode::OK, DosimetryResponse::from(result))
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /limitation.
///
/// Expiry is judged against `evaluation_date`, or today's local date.
async fn limitation_handler(
    payload: Result<Json<LimitationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing limitation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let evaluation_date = request
        .evaluation_date
        .unwrap_or_else(|| Local::now().date_naive());

    match calculate_limitation(&request.input, evaluation_date) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                deadline = %result.deadline_date,
                expired = result.expired,
                "Limitation calculated"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /crimes.
async fn crimes_handler(
    State(state): State<AppState>,
    Query(query): Query<CrimeQuery>,
) -> Response {
    let crimes = state
        .config()
        .search_crimes(query.q.as_deref().unwrap_or_default());
    json_response(StatusCode::OK, crimes)
}

/// Handler for GET /civil-terms.
async fn civil_terms_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().civil_terms())
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tables: state.config().tables().metadata.name.clone(),
    })
}
