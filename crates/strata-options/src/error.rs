//! Error types for option pricing and risk-factor builders.

use strata_core::types::Date;
use strata_core::StrataError;
use strata_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for option operations.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors that can occur during option operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Unrecognised or inconsistent configuration.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid input data.
    #[error("Validation error: {reason}")]
    Validation {
        /// Description of the problem.
        reason: String,
    },

    /// The American dividend fixed point did not settle.
    #[error(
        "Dividend yield for {maturity} did not converge after {iterations} iterations (last change {last_change:.3e})"
    )]
    DividendNonConvergence {
        /// Expiry being solved.
        maturity: Date,
        /// Iterations performed.
        iterations: u32,
        /// Last change in the yield estimate.
        last_change: f64,
    },

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] StrataError),
}

impl OptionsError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a dividend non-convergence error.
    #[must_use]
    pub fn dividend_non_convergence(maturity: Date, iterations: u32, last_change: f64) -> Self {
        Self::DividendNonConvergence {
            maturity,
            iterations,
            last_change,
        }
    }
}
