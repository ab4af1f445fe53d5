//! Power-law SSVI slice parameterisation.
//!
//! With ATM total variance `θ = σ_atm² T` and `φ(θ) = η / (θ^γ (1 + θ)^(1-γ))`,
//! the total implied variance at log-moneyness `k` is
//!
//! ```text
//! w(k) = θ/2 * (1 + ρφk + sqrt((φk + ρ)² + 1 - ρ²))
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};

/// Total variance used when the formula yields a negative value.
const VARIANCE_FLOOR: f64 = 0.01;

/// Power-law SSVI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ssvi {
    gamma: f64,
    eta: f64,
    rho: f64,
}

impl Ssvi {
    /// Creates an SSVI parameter set.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::Validation` unless `0 < γ ≤ 0.5`, `|ρ| ≤ 1` and
    /// `η (1 + |ρ|) ≤ 2`.
    pub fn new(gamma: f64, eta: f64, rho: f64) -> OptionsResult<Self> {
        if !(gamma > 0.0 && gamma <= 0.5) {
            return Err(OptionsError::validation(format!(
                "SSVI gamma must lie in (0, 0.5], got {gamma}"
            )));
        }
        if !(rho.abs() <= 1.0) {
            return Err(OptionsError::validation(format!(
                "SSVI rho must lie in [-1, 1], got {rho}"
            )));
        }
        if !(eta.is_finite() && eta * (1.0 + rho.abs()) <= 2.0) {
            return Err(OptionsError::validation(format!(
                "SSVI eta(1 + |rho|) must not exceed 2, got eta={eta}, rho={rho}"
            )));
        }
        Ok(Self { gamma, eta, rho })
    }

    /// Curvature exponent.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Curvature level.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Skew correlation.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    fn phi(&self, theta: f64) -> f64 {
        self.eta / (theta.powf(self.gamma) * (1.0 + theta).powf(1.0 - self.gamma))
    }

    /// Total implied variance at log-moneyness `k` for ATM total variance `theta`.
    pub fn total_variance(&self, k: f64, theta: f64) -> f64 {
        let phi_k = self.phi(theta) * k;
        let w = theta / 2.0
            * (1.0
                + self.rho * phi_k
                + ((phi_k + self.rho).powi(2) + 1.0 - self.rho * self.rho).sqrt());
        if w < 0.0 {
            VARIANCE_FLOOR
        } else {
            w
        }
    }

    /// Implied volatility at log-moneyness `k` and maturity `t` given the ATM vol.
    pub fn implied_volatility(&self, k: f64, t: f64, atm_vol: f64) -> f64 {
        let theta = atm_vol * atm_vol * t;
        (self.total_variance(k, theta) / t).sqrt()
    }
}
