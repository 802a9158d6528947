//! Error types for the pay and dunning engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating pay or working
//! through the payment recovery pipeline.

use thiserror::Error;

/// The main error type for the engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tradepay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A wage calculator input was missing, non-numeric or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A payment recovery record broke one of its invariants.
    #[error("Invalid recovery record '{id}': {message}")]
    InvalidRecord {
        /// The ID of the offending record.
        id: String,
        /// A description of the broken invariant.
        message: String,
    },

    /// No payment recovery record exists with the given ID.
    #[error("Recovery record not found: {id}")]
    RecordNotFound {
        /// The ID that was looked up.
        id: String,
    },

    /// The requested dunning action is not allowed in the record's current state.
    #[error("Operation not allowed on record '{id}': {message}")]
    InvalidOperation {
        /// The ID of the record the action targeted.
        id: String,
        /// Why the action was refused.
        message: String,
    },

    /// The external recovery store reported a failure.
    #[error("Remote operation '{operation}' failed: {message}")]
    RemoteOperation {
        /// The logical operation that failed (e.g. "send_next_email").
        operation: String,
        /// The human-readable failure message.
        message: String,
    },

    /// Writing the CSV export failed.
    #[error("Export failed: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        Self::Export {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
