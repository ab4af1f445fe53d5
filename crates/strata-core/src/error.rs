//! Error types for the Strata library.
//!
//! This module defines the error type shared by the core data model.

use thiserror::Error;

/// A specialized Result type for core Strata operations.
pub type StrataResult<T> = Result<T, StrataError>;

/// The main error type for core Strata operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrataError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Malformed input data.
    #[error("Validation error: {reason}")]
    Validation {
        /// Description of what is malformed.
        reason: String,
    },

    /// Unknown or unsupported configuration value.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the configuration error.
        reason: String,
    },
}

impl StrataError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
