//! Cox-Ross-Rubinstein binomial tree for American options.
//!
//! The tree keeps one vector of node values and one of node spots. Stepping
//! back one level divides each stored spot by `u`:
//!
//! ```text
//! level i, node j:  S * u^(i-j) * d^j
//! ```

use strata_core::types::OptionType;

use super::{GreekBumps, OptionModel};
use crate::params::PricingParams;

/// American option pricer on an N-step CRR tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoxRossRubinstein {
    steps: usize,
    bumps: GreekBumps,
}

impl Default for CoxRossRubinstein {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl CoxRossRubinstein {
    /// Largest supported step count.
    pub const MAX_STEPS: usize = 100_000;

    /// Creates a tree with `steps` time steps, clamped to `1..=MAX_STEPS`.
    pub fn new(steps: usize) -> Self {
        Self {
            steps: steps.clamp(1, Self::MAX_STEPS),
            bumps: GreekBumps::default(),
        }
    }

    /// Sets the Greek bumps.
    #[must_use]
    pub fn with_bumps(mut self, bumps: GreekBumps) -> Self {
        self.bumps = bumps;
        self
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl OptionModel for CoxRossRubinstein {
    fn price(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let PricingParams {
            spot: s,
            strike: k,
            rate: r,
            maturity: t,
            volatility: sigma,
            dividend_yield: q,
        } = *params;

        if t <= 0.0 {
            return option_type.intrinsic(s, k);
        }
        if sigma <= 0.0 {
            let european = params.discount_factor() * option_type.intrinsic(params.forward(), k);
            return european.max(option_type.intrinsic(s, k));
        }

        let n = self.steps;
        let dt = t / n as f64;
        let u = (sigma * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = (((r - q) * dt).exp() - d) / (u - d);
        let df = (-r * dt).exp();

        // Terminal spots S * u^(n - 2j); n <= MAX_STEPS fits an i32 exponent
        let Ok(top) = i32::try_from(n) else {
            return f64::NAN;
        };
        let mut spots: Vec<f64> = (0..=top).map(|j| s * u.powi(top - 2 * j)).collect();
        let mut values: Vec<f64> = spots
            .iter()
            .map(|&st| option_type.intrinsic(st, k))
            .collect();

        for level in (0..n).rev() {
            for j in 0..=level {
                spots[j] /= u;
                let continuation = df * (p * values[j] + (1.0 - p) * values[j + 1]);
                values[j] = continuation.max(option_type.intrinsic(spots[j], k));
            }
        }

        values[0]
    }

    fn bumps(&self) -> GreekBumps {
        self.bumps
    }
}
