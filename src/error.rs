//! Error types for the legal computation engines.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engines and their configuration can report.

use thiserror::Error;

/// The main error type for the legal computation engines.
///
/// Validation failures ([`EngineError::InvalidInput`]) and parse failures
/// ([`EngineError::InvalidFormat`]) are kept apart so callers can tell a
/// badly typed form field from a value the law does not allow.
///
/// # Example
///
/// ```
/// use legal_engine::error::EngineError;
///
/// let error = EngineError::InvalidFormat {
///     field: "gross_salary".to_string(),
///     value: "abc".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid format for 'gross_salary': 'abc'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input value is out of range or inconsistent with another input.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A locale-formatted monetary or numeric string could not be parsed.
    #[error("Invalid format for '{field}': '{value}'")]
    InvalidFormat {
        /// The input field that failed to parse.
        field: String,
        /// The raw text that was received.
        value: String,
    },

    /// The crime id is not present in the crime catalog.
    #[error("Crime not found: {id}")]
    CrimeNotFound {
        /// The crime id that was requested.
        id: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
