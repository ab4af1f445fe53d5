//! Curve construction settings.

use serde::{Deserialize, Serialize};
use strata_curves::nelson_siegel::NelsonSiegelFit;
use strata_curves::{BootstrapConfig, CurveFitMethod};

use crate::error::{Validate, ValidationError};

fn default_par_fit() -> CurveFitMethod {
    CurveFitMethod::NelsonSiegel(NelsonSiegelFit::default())
}

fn default_spot_fit() -> CurveFitMethod {
    CurveFitMethod::PiecewiseLinear
}

fn default_dividend_fit() -> CurveFitMethod {
    CurveFitMethod::NelsonSiegel(NelsonSiegelFit::dividend())
}

/// How each curve is fitted and how the spot curve is bootstrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvesConfig {
    /// Model fitted to the raw par quotes.
    #[serde(default = "default_par_fit")]
    pub par_fit: CurveFitMethod,
    /// Model fitted to the bootstrapped spot points.
    #[serde(default = "default_spot_fit")]
    pub spot_fit: CurveFitMethod,
    /// Model fitted to the implied dividend yields.
    #[serde(default = "default_dividend_fit")]
    pub dividend_fit: CurveFitMethod,
    /// Bootstrap tenor grid.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for CurvesConfig {
    fn default() -> Self {
        Self {
            par_fit: default_par_fit(),
            spot_fit: default_spot_fit(),
            dividend_fit: default_dividend_fit(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl Validate for CurvesConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (name, method) in [
            ("par_fit", &self.par_fit),
            ("spot_fit", &self.spot_fit),
            ("dividend_fit", &self.dividend_fit),
        ] {
            errors.extend(method.validate().into_iter().map(|e| e.within(name)));
        }

        if let Err(err) = self.bootstrap.steps() {
            errors.push(ValidationError::with_rule(
                "bootstrap",
                err.to_string(),
                "valid_grid",
            ));
        }

        errors
    }
}

impl Validate for CurveFitMethod {
    fn validate(&self) -> Vec<ValidationError> {
        match self {
            CurveFitMethod::NelsonSiegel(fit) => fit.validate(),
            CurveFitMethod::PiecewiseLinear => Vec::new(),
        }
    }
}

impl Validate for NelsonSiegelFit {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (i, ((lo, hi), guess)) in self.bounds.iter().zip(&self.initial_guess).enumerate() {
            if !(lo <= hi) {
                errors.push(ValidationError::with_rule(
                    format!("bounds[{i}]"),
                    format!("lower bound {lo} exceeds upper bound {hi}"),
                    "ordered_bounds",
                ));
            } else if !(lo <= guess && guess <= hi) {
                errors.push(ValidationError::with_rule(
                    format!("initial_guess[{i}]"),
                    format!("initial guess {guess} outside [{lo}, {hi}]"),
                    "guess_in_bounds",
                ));
            }
        }

        if self.bounds[3].0 <= 0.0 {
            errors.push(ValidationError::with_rule(
                "bounds[3]",
                "tau must be bounded away from zero",
                "positive_tau",
            ));
        }

        if !(self.tolerance > 0.0) || !(self.parameter_tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Tolerances must be positive",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be at least 1",
                "valid_iterations",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CurvesConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.spot_fit, CurveFitMethod::PiecewiseLinear);
        match &config.dividend_fit {
            CurveFitMethod::NelsonSiegel(fit) => assert_eq!(fit.initial_guess[3], 0.5),
            CurveFitMethod::PiecewiseLinear => panic!("expected Nelson-Siegel"),
        }
    }

    #[test]
    fn test_guess_outside_bounds() {
        let fit = NelsonSiegelFit::default().with_initial_guess([0.5, -0.02, 0.02, 2.0]);
        let errors = fit.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "initial_guess[0]");
    }

    #[test]
    fn test_field_paths_are_prefixed() {
        let config = CurvesConfig {
            par_fit: CurveFitMethod::NelsonSiegel(NelsonSiegelFit::default().with_max_iterations(0)),
            bootstrap: BootstrapConfig::new(30.0, 0.0),
            ..CurvesConfig::default()
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["par_fit.max_iterations", "bootstrap"]);
    }
}
