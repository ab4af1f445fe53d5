//! Nelson-Siegel parametric curve model.
//!
//! The Nelson-Siegel form models a rate at maturity `t` as
//!
//! ```text
//! f(t) = b0 + b1 * (1 - e^(-x)) / x + b2 * ((1 - e^(-x)) / x - e^(-x)),  x = t / tau
//! ```
//!
//! where:
//! - `b0` is the long-term level
//! - `b1` is the short-term component
//! - `b2` is the medium-term hump
//! - `tau` is the decay factor
//!
//! Parameters are calibrated by minimising the root-mean-square error of the
//! fit with a bounded Nelder-Mead search.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_math::optimization::{nelder_mead, OptimizationConfig};

use crate::error::{CurveError, CurveResult};
use crate::model::CurveModel;

/// Maturities below this return `b0` directly.
const SHORT_END: f64 = 1e-6;

/// Nelson-Siegel model parameters and fit quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNelsonSiegel")]
pub struct NelsonSiegel {
    /// Long-term level.
    pub b0: f64,
    /// Short-term component.
    pub b1: f64,
    /// Medium-term component.
    pub b2: f64,
    /// Decay factor (must be positive).
    pub tau: f64,
    /// RMSE achieved by the calibration, when fitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
}

#[derive(Deserialize)]
struct RawNelsonSiegel {
    b0: f64,
    b1: f64,
    b2: f64,
    tau: f64,
    #[serde(default)]
    rmse: Option<f64>,
}

impl TryFrom<RawNelsonSiegel> for NelsonSiegel {
    type Error = CurveError;

    fn try_from(raw: RawNelsonSiegel) -> Result<Self, Self::Error> {
        let mut model = Self::new(raw.b0, raw.b1, raw.b2, raw.tau)?;
        model.rmse = raw.rmse;
        Ok(model)
    }
}

impl NelsonSiegel {
    /// Creates a model from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `tau` is not positive or any parameter is not finite.
    pub fn new(b0: f64, b1: f64, b2: f64, tau: f64) -> CurveResult<Self> {
        if [b0, b1, b2, tau].iter().any(|p| !p.is_finite()) {
            return Err(CurveError::invalid_value(
                "Nelson-Siegel parameters must be finite",
            ));
        }
        if tau <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "Nelson-Siegel tau must be positive, got {tau}"
            )));
        }
        Ok(Self {
            b0,
            b1,
            b2,
            tau,
            rmse: None,
        })
    }

    /// Calibrates the model to `(tenors, values)`.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationFailure` if the optimiser does not converge within
    /// the configured iteration budget.
    pub fn fit(tenors: &[f64], values: &[f64], settings: &NelsonSiegelFit) -> CurveResult<Self> {
        if tenors.len() != values.len() {
            return Err(CurveError::length_mismatch(tenors.len(), values.len()));
        }
        if tenors.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        if tenors.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(CurveError::invalid_value(
                "curve points must be finite to fit Nelson-Siegel",
            ));
        }

        let objective = |p: &[f64]| rmse(p[0], p[1], p[2], p[3], tenors, values);
        let result = nelder_mead(
            objective,
            &settings.initial_guess,
            Some(&settings.bounds),
            &settings.optimization_config(),
        )?;

        if !result.converged {
            return Err(CurveError::calibration_failed(
                result.iterations as usize,
                result.objective_value,
                "Nelson-Siegel fit did not converge",
            ));
        }

        let p = &result.parameters;
        log::debug!(
            "Nelson-Siegel fit: b0={:.6} b1={:.6} b2={:.6} tau={:.4} rmse={:.3e} ({} iterations)",
            p[0],
            p[1],
            p[2],
            p[3],
            result.objective_value,
            result.iterations
        );

        Ok(Self {
            b0: p[0],
            b1: p[1],
            b2: p[2],
            tau: p[3],
            rmse: Some(result.objective_value),
        })
    }

    /// Returns `(b0, b1, b2, tau)`.
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.b0, self.b1, self.b2, self.tau)
    }

    /// Root-mean-square error of the calibration.
    pub fn rmse(&self) -> Option<f64> {
        self.rmse
    }
}

fn evaluate(b0: f64, b1: f64, b2: f64, tau: f64, t: f64) -> f64 {
    if t < SHORT_END {
        return b0;
    }
    let x = t / tau;
    let decay = (-x).exp();
    let slope = (1.0 - decay) / x;
    b0 + b1 * slope + b2 * (slope - decay)
}

fn rmse(b0: f64, b1: f64, b2: f64, tau: f64, tenors: &[f64], values: &[f64]) -> f64 {
    let sum_sq: f64 = tenors
        .iter()
        .zip(values)
        .map(|(&t, &v)| (evaluate(b0, b1, b2, tau, t) - v).powi(2))
        .sum();
    (sum_sq / tenors.len() as f64).sqrt()
}

impl CurveModel for NelsonSiegel {
    fn value(&self, t: f64) -> f64 {
        evaluate(self.b0, self.b1, self.b2, self.tau, t)
    }

    fn name(&self) -> &'static str {
        "nelson_siegel"
    }
}

impl fmt::Display for NelsonSiegel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NelsonSiegel(b0={:.6}, b1={:.6}, b2={:.6}, tau={:.4}",
            self.b0, self.b1, self.b2, self.tau
        )?;
        if let Some(rmse) = self.rmse {
            write!(f, ", rmse={rmse:.3e}")?;
        }
        write!(f, ")")
    }
}

fn default_initial_guess() -> [f64; 4] {
    [0.03, -0.02, 0.02, 2.0]
}

fn default_bounds() -> [(f64, f64); 4] {
    [(0.0, 0.10), (-0.10, 0.10), (-0.10, 0.10), (0.05, 10.0)]
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_parameter_tolerance() -> f64 {
    1e-7
}

fn default_max_iterations() -> u32 {
    10_000
}

/// Calibration settings for a Nelson-Siegel fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NelsonSiegelFit {
    /// Starting point `[b0, b1, b2, tau]`.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: [f64; 4],
    /// Box constraints per parameter.
    #[serde(default = "default_bounds")]
    pub bounds: [(f64, f64); 4],
    /// Convergence tolerance on the RMSE spread of the simplex.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Convergence tolerance on the parameter spread of the simplex.
    #[serde(default = "default_parameter_tolerance")]
    pub parameter_tolerance: f64,
    /// Iteration budget across all restarts.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for NelsonSiegelFit {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            bounds: default_bounds(),
            tolerance: default_tolerance(),
            parameter_tolerance: default_parameter_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl NelsonSiegelFit {
    /// Settings used for dividend-yield curves: a faster initial decay.
    #[must_use]
    pub fn dividend() -> Self {
        Self {
            initial_guess: [0.03, -0.02, 0.02, 0.5],
            ..Self::default()
        }
    }

    /// Sets the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: [f64; 4]) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Optimiser settings derived from these fit settings.
    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig::default()
            .with_tolerance(self.tolerance)
            .with_parameter_tolerance(self.parameter_tolerance)
            .with_max_iterations(self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn sample(ns: &NelsonSiegel, tenors: &[f64]) -> Vec<f64> {
        tenors.iter().map(|&t| ns.value(t)).collect()
    }

    #[test]
    fn test_short_end_is_level() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 2.0).unwrap();
        assert_eq!(ns.value(0.0), 0.05);
        assert_eq!(ns.value(1e-7), 0.05);
    }

    #[test]
    fn test_long_end_converges_to_level() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 2.0).unwrap();
        assert_relative_eq!(ns.value(1000.0), 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_upward_slope() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.0, 2.0).unwrap();
        assert!(ns.value(1.0) < ns.value(5.0));
        assert!(ns.value(5.0) < ns.value(30.0));
    }

    #[test]
    fn test_invalid_tau() {
        assert!(NelsonSiegel::new(0.05, -0.02, 0.01, 0.0).is_err());
        assert!(NelsonSiegel::new(0.05, -0.02, 0.01, -1.0).is_err());
        assert!(NelsonSiegel::new(f64::NAN, -0.02, 0.01, 1.0).is_err());
    }

    #[test]
    fn test_deserialize_validates_tau() {
        let stored = r#"{"b0":0.05,"b1":-0.02,"b2":0.01,"tau":2.0,"rmse":0.0001}"#;
        let ns: NelsonSiegel = serde_json::from_str(stored).unwrap();
        assert_eq!(ns.tau, 2.0);
        assert_eq!(ns.rmse, Some(0.0001));

        let zero = r#"{"b0":0.05,"b1":-0.02,"b2":0.01,"tau":0.0}"#;
        let negative = r#"{"b0":0.05,"b1":-0.02,"b2":0.01,"tau":-1.5}"#;
        assert!(serde_json::from_str::<NelsonSiegel>(zero).is_err());
        assert!(serde_json::from_str::<NelsonSiegel>(negative).is_err());
    }

    #[test]
    fn test_fit_recovers_generated_curve() {
        let truth = NelsonSiegel::new(0.045, -0.01, 0.01, 1.5).unwrap();
        let tenors = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];
        let values = sample(&truth, &tenors);

        let fitted = NelsonSiegel::fit(&tenors, &values, &NelsonSiegelFit::default()).unwrap();
        assert!(fitted.rmse().unwrap() < 1e-4);
        for &t in &tenors {
            assert_relative_eq!(fitted.value(t), truth.value(t), epsilon = 5e-4);
        }
    }

    #[test]
    fn test_fit_respects_bounds() {
        // A 15% level is outside the b0 bound
        let tenors = [1.0, 2.0, 5.0, 10.0];
        let values = [0.15, 0.15, 0.15, 0.15];
        let fitted = NelsonSiegel::fit(&tenors, &values, &NelsonSiegelFit::default()).unwrap();
        assert!(fitted.b0 <= 0.10);
        assert!(fitted.tau >= 0.05 && fitted.tau <= 10.0);
    }

    #[test]
    fn test_fit_budget_exhausted() {
        let tenors = [0.5, 1.0, 2.0, 5.0, 10.0];
        let values = [0.04, 0.041, 0.043, 0.045, 0.046];
        let settings = NelsonSiegelFit::default().with_max_iterations(3);
        let err = NelsonSiegel::fit(&tenors, &values, &settings).unwrap_err();
        assert!(matches!(err, CurveError::CalibrationFailure { .. }));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let settings = NelsonSiegelFit::default();
        assert!(matches!(
            NelsonSiegel::fit(&[1.0, 2.0], &[0.01], &settings),
            Err(CurveError::LengthMismatch { .. })
        ));
        assert!(matches!(
            NelsonSiegel::fit(&[], &[], &settings),
            Err(CurveError::InsufficientPoints { .. })
        ));
        assert!(matches!(
            NelsonSiegel::fit(&[1.0], &[f64::NAN], &settings),
            Err(CurveError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_dividend_settings() {
        let settings = NelsonSiegelFit::dividend();
        assert_eq!(settings.initial_guess[3], 0.5);
        assert_eq!(settings.bounds, NelsonSiegelFit::default().bounds);
    }

    #[test]
    fn test_display() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 2.0).unwrap();
        assert!(ns.to_string().starts_with("NelsonSiegel(b0=0.050000"));
    }

    proptest! {
        #[test]
        fn prop_value_at_zero_is_b0(
            b0 in 0.0..0.1f64,
            b1 in -0.1..0.1f64,
            b2 in -0.1..0.1f64,
            tau in 0.05..10.0f64,
        ) {
            let ns = NelsonSiegel::new(b0, b1, b2, tau).unwrap();
            prop_assert_eq!(ns.value(0.0), b0);
        }
    }
}
