//! Engine error types.

use thiserror::Error;

use strata_config::ConfigError;
use strata_core::StrataError;
use strata_curves::CurveError;
use strata_options::OptionsError;
use strata_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Curve fitting or bootstrapping failed.
    #[error("curve build error: {0}")]
    Curve(#[from] CurveError),

    /// Dividend or surface construction failed.
    #[error("option analytics error: {0}")]
    Options(#[from] OptionsError),

    /// A snapshot store operation failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Invalid input data.
    #[error("core error: {0}")]
    Core(#[from] StrataError),

    /// A stage produced a result that cannot feed the next stage.
    #[error("{stage} stage failed: {reason}")]
    Stage {
        /// Pipeline stage name
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl EngineError {
    /// Creates a stage failure.
    #[must_use]
    pub fn stage(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_curve_error() {
        let err: EngineError = CurveError::insufficient_points(2, 0).into();
        assert!(matches!(err, EngineError::Curve(_)));
        assert!(err.to_string().starts_with("curve build error"));
    }

    #[test]
    fn test_options_error_keeps_curve_source() {
        let err: EngineError = OptionsError::from(CurveError::NotFitted {
            kind: "dividend".to_string(),
        })
        .into();
        assert!(matches!(err, EngineError::Options(OptionsError::Curve(_))));
    }

    #[test]
    fn test_stage_display() {
        let err = EngineError::stage("surface", "no expiries left");
        assert_eq!(err.to_string(), "surface stage failed: no expiries left");
    }
}
