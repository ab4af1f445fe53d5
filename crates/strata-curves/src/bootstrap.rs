//! Coupon stripping of a par curve into a spot curve.
//!
//! For each tenor `dt = k * step` the semiannual coupon `c = par(dt) / 2` is
//! discounted at the spot rates already stripped for shorter tenors, and the
//! new continuously compounded spot rate solves
//!
//! ```text
//! pv + (1 + c) * e^(-r * dt) = 1   =>   r = -ln((1 - pv) / (1 + c)) / dt
//! ```
//!
//! The recursion is sequential: every point depends on all earlier ones.

use serde::{Deserialize, Serialize};
use strata_core::types::{Date, YieldPoint};

use crate::curve::{Curve, CurveKind};
use crate::error::{CurveError, CurveResult};
use crate::model::{CurveFitMethod, CurveModel};

/// One-month tenor, converted from the first par observation.
const ONE_MONTH: f64 = 1.0 / 12.0;

/// Tenors closer than this are treated as equal.
const TENOR_EPSILON: f64 = 1e-12;

fn default_max_tenor() -> f64 {
    30.0
}

fn default_step() -> f64 {
    0.5
}

/// Tenor grid of the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Longest bootstrapped tenor in years.
    #[serde(default = "default_max_tenor")]
    pub max_tenor: f64,
    /// Spacing of the tenor grid in years.
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_tenor: default_max_tenor(),
            step: default_step(),
        }
    }
}

impl BootstrapConfig {
    /// Creates a bootstrap grid.
    pub fn new(max_tenor: f64, step: f64) -> Self {
        Self { max_tenor, step }
    }

    /// Number of grid tenors, `floor(max_tenor / step)`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidValue` unless `0 < step <= max_tenor`.
    pub fn steps(&self) -> CurveResult<usize> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "bootstrap step must be positive, got {}",
                self.step
            )));
        }
        if !self.max_tenor.is_finite() || self.max_tenor < self.step {
            return Err(CurveError::invalid_value(format!(
                "bootstrap max tenor {} is shorter than the step {}",
                self.max_tenor, self.step
            )));
        }
        Ok((self.max_tenor / self.step + 1e-9).floor() as usize)
    }
}

/// Strips a fitted par curve into a continuously compounded spot curve.
#[derive(Debug, Clone, Default)]
pub struct SpotCurveBootstrapper {
    config: BootstrapConfig,
}

impl SpotCurveBootstrapper {
    /// Creates a bootstrapper on the given grid.
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Grid configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstraps the spot curve from a par curve.
    ///
    /// An unfitted par curve is fitted with default Nelson-Siegel first. The
    /// one-month point uses the shortest raw par observation.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NumericDomain` if a logarithm argument becomes
    /// non-positive, or any error from fitting the par curve.
    pub fn bootstrap(&self, par_curve: &Curve) -> CurveResult<Curve> {
        let fitted;
        let model = if let Some(model) = par_curve.model() {
            model
        } else {
            log::debug!("par curve is unfitted, fitting default Nelson-Siegel");
            fitted = par_curve.fit(&CurveFitMethod::default())?;
            fitted
                .model()
                .ok_or_else(|| CurveError::NotFitted {
                    kind: par_curve.kind().to_string(),
                })?
        };

        let short_par_rate = par_curve.points()[0].rate;
        self.bootstrap_model(model, short_par_rate, par_curve.evaluation_date())
    }

    /// Bootstraps the spot curve from a par model directly.
    pub fn bootstrap_model(
        &self,
        par_model: &dyn CurveModel,
        short_par_rate: f64,
        evaluation_date: Date,
    ) -> CurveResult<Curve> {
        let steps = self.config.steps()?;
        let mut stripped: Vec<(f64, f64)> = Vec::with_capacity(steps + 1);

        for k in 1..=steps {
            let dt = k as f64 * self.config.step;
            let coupon = par_model.value(dt) / 2.0;

            let pv: f64 = stripped
                .iter()
                .filter(|(t, _)| *t < dt)
                .map(|(t, r)| coupon * (-r * t).exp())
                .sum();

            let remaining = 1.0 - pv;
            let argument = remaining / (1.0 + coupon);
            if remaining <= 0.0 || argument <= 0.0 || !argument.is_finite() {
                return Err(CurveError::numeric_domain(dt, argument));
            }
            stripped.push((dt, -argument.ln() / dt));
        }

        if !stripped
            .iter()
            .any(|(t, _)| (t - ONE_MONTH).abs() < TENOR_EPSILON)
        {
            let argument = 1.0 + short_par_rate / 12.0;
            if argument <= 0.0 || !argument.is_finite() {
                return Err(CurveError::numeric_domain(ONE_MONTH, argument));
            }
            stripped.push((ONE_MONTH, 12.0 * argument.ln()));
        }

        log::debug!(
            "bootstrapped {} spot points from {} par model",
            stripped.len(),
            par_model.name()
        );

        let points = stripped
            .into_iter()
            .map(|(t, r)| YieldPoint::new(t, r, evaluation_date))
            .collect::<Result<Vec<_>, _>>()?;
        Curve::new(points, CurveKind::Spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nelson_siegel::NelsonSiegel;
    use crate::piecewise::PiecewiseLinear;
    use approx::assert_relative_eq;

    fn as_of() -> Date {
        Date::from_ymd(2025, 5, 15).unwrap()
    }

    #[test]
    fn test_steps() {
        assert_eq!(BootstrapConfig::default().steps().unwrap(), 60);
        assert_eq!(BootstrapConfig::new(10.0, 0.25).steps().unwrap(), 40);
        assert_eq!(BootstrapConfig::new(1.0, 0.1).steps().unwrap(), 10);
        assert!(BootstrapConfig::new(10.0, 0.0).steps().is_err());
        assert!(BootstrapConfig::new(0.25, 0.5).steps().is_err());
    }

    #[test]
    fn test_flat_par_strips_flat() {
        let y = 0.04;
        let model = PiecewiseLinear::new(vec![0.5, 30.0], vec![y, y]).unwrap();
        let spot = SpotCurveBootstrapper::default()
            .bootstrap_model(&model, y, as_of())
            .unwrap();

        assert_eq!(spot.len(), 61);
        let expected = 2.0 * (1.0 + y / 2.0f64).ln();
        for p in &spot.points()[1..] {
            assert_relative_eq!(p.rate, expected, epsilon = 1e-10);
        }
        assert_relative_eq!(spot.points()[0].maturity, ONE_MONTH);
        assert_relative_eq!(spot.points()[0].rate, 12.0 * (1.0 + y / 12.0f64).ln());
    }

    #[test]
    fn test_first_step_has_no_prior_coupons() {
        let ns = NelsonSiegel::new(0.045, -0.01, 0.005, 2.0).unwrap();
        let spot = SpotCurveBootstrapper::new(BootstrapConfig::new(1.0, 0.5))
            .bootstrap_model(&ns, 0.04, as_of())
            .unwrap();
        let c = ns.value(0.5) / 2.0;
        assert_relative_eq!(spot.points()[1].rate, (1.0 + c).ln() / 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_one_month_not_duplicated() {
        let model = PiecewiseLinear::new(vec![1.0], vec![0.03]).unwrap();
        let spot = SpotCurveBootstrapper::new(BootstrapConfig::new(1.0, ONE_MONTH))
            .bootstrap_model(&model, 0.03, as_of())
            .unwrap();
        assert_eq!(spot.len(), 12);
    }

    #[test]
    fn test_numeric_domain() {
        // The one-year coupon exceeds what the notional can repay
        let model = PiecewiseLinear::new(vec![0.5, 1.0], vec![0.0, 3.0]).unwrap();
        let err = SpotCurveBootstrapper::default()
            .bootstrap_model(&model, 0.04, as_of())
            .unwrap_err();
        assert!(matches!(err, CurveError::NumericDomain { .. }));
    }

    #[test]
    fn test_unfitted_par_curve_is_fitted() {
        let par = Curve::from_pairs(
            &[0.5, 1.0, 2.0, 5.0, 10.0, 30.0],
            &[0.043, 0.042, 0.040, 0.041, 0.044, 0.048],
            as_of(),
            CurveKind::Par,
        )
        .unwrap();
        let spot = SpotCurveBootstrapper::default().bootstrap(&par).unwrap();
        assert_eq!(spot.kind(), CurveKind::Spot);
        assert_eq!(spot.len(), 61);
        assert!(!spot.is_fitted());
    }
}
