//! Implied volatility by bracketed root finding.

use serde::{Deserialize, Serialize};
use strata_core::types::OptionType;
use strata_math::solvers::{brent, SolverConfig};

use crate::params::PricingParams;
use crate::pricing::OptionModel;

/// Search settings for implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpliedVolConfig {
    /// Lower end of the default volatility bracket.
    pub lower_bound: f64,
    /// Upper end of the default volatility bracket.
    pub upper_bound: f64,
    /// Bracket around a guess starts at `guess * guess_lower_factor`.
    pub guess_lower_factor: f64,
    /// Bracket around a guess ends at `guess * guess_upper_factor`.
    pub guess_upper_factor: f64,
    /// Solver iteration cap.
    pub max_iterations: u32,
    /// Absolute tolerance on volatility.
    pub tolerance: f64,
    /// Relative tolerance on volatility.
    pub relative_tolerance: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower_bound: 0.01,
            upper_bound: 2.0,
            guess_lower_factor: 0.5,
            guess_upper_factor: 1.5,
            max_iterations: 20,
            tolerance: 1e-5,
            relative_tolerance: 1e-4,
        }
    }
}

impl ImpliedVolConfig {
    /// Sets the default bracket.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets absolute and relative tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerance: f64, relative_tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Bracket to search, narrowed around a usable guess.
    pub fn bracket(&self, initial_guess: Option<f64>) -> (f64, f64) {
        match initial_guess.filter(|g| g.is_finite() && *g > 0.0) {
            Some(guess) => (
                guess * self.guess_lower_factor,
                guess * self.guess_upper_factor,
            ),
            None => (self.lower_bound, self.upper_bound),
        }
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
            .with_relative_tolerance(self.relative_tolerance)
    }
}

/// Solves `model.price(σ) = market_price` for σ.
///
/// Returns `None` when the price is not finite, the bracket does not contain
/// a root, or the solver runs out of iterations.
pub(crate) fn solve<M>(
    model: &M,
    option_type: OptionType,
    market_price: f64,
    params: &PricingParams,
    initial_guess: Option<f64>,
    config: &ImpliedVolConfig,
) -> Option<f64>
where
    M: OptionModel + ?Sized,
{
    if !market_price.is_finite() {
        return None;
    }

    let (lower, upper) = config.bracket(initial_guess);
    let objective =
        |vol: f64| model.price(option_type, &params.with_volatility(vol)) - market_price;

    match brent(objective, lower, upper, &config.solver_config()) {
        Ok(result) => Some(result.root),
        Err(err) => {
            log::debug!(
                "no implied vol for {option_type} K={} T={:.4} price={market_price}: {err}",
                params.strike,
                params.maturity
            );
            None
        }
    }
}
