//! Shared Error Types
//!
//! Errors that describe bad input rather than a failed request. They are
//! raised by form validation before anything is sent to the backend.
//!
//! # Usage
//!
//! ```rust
//! use rewear::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title is required");
//! assert!(error.to_string().contains("title"));
//! ```
use thiserror::Error;

/// Errors raised by local validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The message without the field prefix, suitable for showing next to a form
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}
