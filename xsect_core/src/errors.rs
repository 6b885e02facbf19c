//! # Error Types
//!
//! Structured error types for xsect_core. The engine itself never fails:
//! layout and estimation always return a value, and degenerate geometry shows
//! up as non-finite numbers instead of an error. These errors cover the edges
//! around it: validating user input before it reaches the engine, loading
//! settings, and serializing results.
//!
//! ## Example
//!
//! ```rust
//! use xsect_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_um: f64) -> CalcResult<()> {
//!     if width_um <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "trace_width_um",
//!             width_um.to_string(),
//!             "Trace width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for xsect_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for the fallible edges of the engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, non-finite, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error (settings file)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if this is an input error
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("trace_width_um", "-5", "Trace width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::file_error("read", "settings.json", "not found").error_code(),
            "FILE_ERROR"
        );
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_field_accessor() {
        let error = CalcError::invalid_input("epsilon_r", "0.5", "below 1.0");
        assert_eq!(error.field(), Some("epsilon_r"));
        assert_eq!(CalcError::serialization("x").field(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let calc: CalcError = err.into();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
