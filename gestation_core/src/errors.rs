//! # Error Types
//!
//! Structured error types for gestation_core. Every engine failure is one of
//! three kinds, all of them user-facing validation failures that the caller
//! surfaces as an inline form message:
//!
//! - [`DatingError::InvalidInput`] - a required field is missing or malformed
//! - [`DatingError::OutOfRange`] - a value is outside clinically sane bounds
//! - [`DatingError::InvalidTimeline`] - the anchor date falls after the
//!   reference date
//!
//! Loading engine settings from disk has its own [`SettingsError`], since a
//! broken settings file is an operator problem and not a calculation failure.
//!
//! ## Example
//!
//! ```rust
//! use gestation_core::errors::{DatingError, DatingResult};
//!
//! fn validate_weeks(weeks: i64) -> DatingResult<()> {
//!     if weeks < 0 {
//!         return Err(DatingError::invalid_input(
//!             "estimated_age_weeks",
//!             weeks.to_string(),
//!             "Weeks cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_weeks(-1).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for engine operations
pub type DatingResult<T> = Result<T, DatingError>;

/// Structured error type for a gestational dating calculation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DatingError {
    /// A required field is missing, or a value is malformed (e.g. negative weeks)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A value is well-formed but outside clinically sane bounds
    #[error("Value out of range for '{field}': {value} - {reason}")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },

    /// The anchor date lies after the reference date (negative elapsed time)
    #[error("Invalid timeline: anchor date {anchor_date} is after reference date {as_of}")]
    InvalidTimeline {
        anchor_date: NaiveDate,
        as_of: NaiveDate,
    },
}

impl DatingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DatingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error for a field that was not supplied
    pub fn missing_field(field: impl Into<String>) -> Self {
        DatingError::InvalidInput {
            field: field.into(),
            value: "null".to_string(),
            reason: "Required field is missing".to_string(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DatingError::OutOfRange {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidTimeline error
    pub fn invalid_timeline(anchor_date: NaiveDate, as_of: NaiveDate) -> Self {
        DatingError::InvalidTimeline { anchor_date, as_of }
    }

    /// Name of the offending input field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            DatingError::InvalidInput { field, .. } | DatingError::OutOfRange { field, .. } => Some(field.as_str()),
            DatingError::InvalidTimeline { .. } => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DatingError::InvalidInput { .. } => "INVALID_INPUT",
            DatingError::OutOfRange { .. } => "OUT_OF_RANGE",
            DatingError::InvalidTimeline { .. } => "INVALID_TIMELINE",
        }
    }
}

/// Errors raised while loading, saving or validating [`crate::settings::EngineSettings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Underlying file operation failed
    #[error("File error: {operation} on '{path}' - {source}")]
    Io {
        operation: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for the settings schema
    #[error("Could not parse settings '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Settings could not be encoded as JSON
    #[error("Could not serialize settings for '{path}': {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Settings parsed but are internally inconsistent
    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },
}
