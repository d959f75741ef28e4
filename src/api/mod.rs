//! HTTP API module for the legal computation engines.
//!
//! This module exposes the termination, dosimetry and limitation engines
//! as JSON endpoints, plus read-only access to the crime and civil-term
//! catalogs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CrimeQuery, DosimetryRequest, LimitationRequest, TerminationRequest};
pub use response::{ApiError, ApiErrorResponse, DosimetryResponse, HealthResponse};
pub use state::AppState;
