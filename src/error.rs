//! Error types for the settlement engine.
//!
//! Every calculator validates its inputs before building a ledger, so a call
//! either yields a complete result or one of these errors.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the settlement engine.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::InvalidGrade {
///     grade: "extreme".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid hazard grade: extreme");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input value was missing, malformed or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// What made the field invalid.
        message: String,
    },

    /// An unhealthiness grade outside {minimal, medium, maximum}.
    #[error("Invalid hazard grade: {grade}")]
    InvalidGrade {
        /// The grade text as received.
        grade: String,
    },

    /// No configured minimum wage is effective on the requested date.
    #[error("No minimum wage configured for {date}")]
    MinimumWageNotFound {
        /// The date for which the minimum wage was requested.
        date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
