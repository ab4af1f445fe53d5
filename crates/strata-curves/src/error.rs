//! Error types for curve operations.
//!
//! Covers validation of curve inputs, calibration of curve models and the
//! numeric domain checks of the spot-curve bootstrap.

use strata_core::types::Date;
use strata_core::StrataError;
use strata_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve model calibration failed to converge.
    #[error(
        "Calibration failed after {iterations} iterations (residual: {residual:.2e}): {message}"
    )]
    CalibrationFailure {
        /// Number of iterations attempted.
        iterations: usize,
        /// Final residual value.
        residual: f64,
        /// Description of failure.
        message: String,
    },

    /// Points of one curve carry different evaluation dates.
    #[error("Evaluation date mismatch: expected {expected}, got {got}")]
    EvaluationDateMismatch {
        /// Evaluation date of the first point.
        expected: Date,
        /// Conflicting evaluation date.
        got: Date,
    },

    /// Not enough data points.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Tenor and value arrays differ in length.
    #[error("Length mismatch: {tenors} tenors but {values} values")]
    LengthMismatch {
        /// Number of tenors.
        tenors: usize,
        /// Number of values.
        values: usize,
    },

    /// Invalid value (NaN, Inf, or out of range).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// A logarithm argument in the bootstrap is not positive.
    #[error("Numeric domain error at tenor {tenor:.4}: log argument {argument:.6e} is not positive")]
    NumericDomain {
        /// Tenor being bootstrapped.
        tenor: f64,
        /// The offending logarithm argument.
        argument: f64,
    },

    /// The curve has no fitted model.
    #[error("{kind} curve has no fitted model")]
    NotFitted {
        /// Curve kind.
        kind: String,
    },

    /// Mathematical error.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the mathematical error.
        reason: String,
    },

    /// Error from the core data model.
    #[error(transparent)]
    Core(#[from] StrataError),
}

impl CurveError {
    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(
        iterations: usize,
        residual: f64,
        message: impl Into<String>,
    ) -> Self {
        Self::CalibrationFailure {
            iterations,
            residual,
            message: message.into(),
        }
    }

    /// Creates an evaluation date mismatch error.
    #[must_use]
    pub fn evaluation_date_mismatch(expected: Date, got: Date) -> Self {
        Self::EvaluationDateMismatch { expected, got }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTenors {
            index,
            prev,
            current,
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(tenors: usize, values: usize) -> Self {
        Self::LengthMismatch { tenors, values }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a numeric domain error.
    #[must_use]
    pub fn numeric_domain(tenor: f64, argument: f64) -> Self {
        Self::NumericDomain { tenor, argument }
    }

    /// Returns true for malformed-input errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EvaluationDateMismatch { .. }
                | Self::InsufficientPoints { .. }
                | Self::NonMonotonicTenors { .. }
                | Self::LengthMismatch { .. }
                | Self::InvalidValue { .. }
                | Self::Core(StrataError::Validation { .. })
        )
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::MathError {
            reason: err.to_string(),
        }
    }
}
