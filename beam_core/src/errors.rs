//! # Error Types
//!
//! Structured error types for beam_core. Every variant carries enough context
//! to point at the offending span, support or load, so callers (and tools
//! reading the JSON form) can fix the model without guessing.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{BeamError, BeamResult};
//!
//! fn validate_length(length: f64) -> BeamResult<()> {
//!     if length <= 0.0 {
//!         return Err(BeamError::invalid_model(
//!             "spans[0].length",
//!             length.to_string(),
//!             "Span length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type BeamResult<T> = Result<T, BeamError>;

/// Structured error type for beam analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BeamError {
    /// The structural model is malformed or kinematically unstable.
    ///
    /// Always detected before any numerical work starts.
    #[error("Invalid model at '{field}': {value} - {reason}")]
    InvalidModel {
        field: String,
        value: String,
        reason: String,
    },

    /// A pivot of the compatibility system vanished.
    #[error("Numerical degeneracy in {equation}: pivot {pivot:e}")]
    NumericalDegeneracy { equation: String, pivot: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Model document version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl BeamError {
    /// Create an InvalidModel error
    pub fn invalid_model(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BeamError::InvalidModel {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NumericalDegeneracy error
    pub fn numerical_degeneracy(equation: impl Into<String>, pivot: f64) -> Self {
        BeamError::NumericalDegeneracy {
            equation: equation.into(),
            pivot,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BeamError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        BeamError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The model field an InvalidModel error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            BeamError::InvalidModel { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Check if the error comes from the model itself rather than the environment
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            BeamError::InvalidModel { .. } | BeamError::NumericalDegeneracy { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BeamError::InvalidModel { .. } => "INVALID_MODEL",
            BeamError::NumericalDegeneracy { .. } => "NUMERICAL_DEGENERACY",
            BeamError::FileError { .. } => "FILE_ERROR",
            BeamError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BeamError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for BeamError {
    fn from(e: serde_json::Error) -> Self {
        BeamError::serialization(e.to_string())
    }
}
