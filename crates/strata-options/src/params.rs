//! Pricing inputs.

use serde::{Deserialize, Serialize};

/// Market and contract inputs shared by every pricing operation.
///
/// Rates and yields are continuously compounded decimals; `maturity` is in
/// years. Greeks and solvers work on modified copies, never in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Underlying spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Time to expiry in years.
    pub maturity: f64,
    /// Volatility.
    pub volatility: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
}

impl PricingParams {
    /// Creates a parameter set.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        maturity: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            rate,
            maturity,
            volatility,
            dividend_yield,
        }
    }

    /// Copy with a different spot.
    #[must_use]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different rate.
    #[must_use]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    /// Copy with a different maturity.
    #[must_use]
    pub fn with_maturity(self, maturity: f64) -> Self {
        Self { maturity, ..self }
    }

    /// Copy with a different volatility.
    #[must_use]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a different dividend yield.
    #[must_use]
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    /// Forward price `S e^((r-q)T)`.
    pub fn forward(&self) -> f64 {
        self.spot * ((self.rate - self.dividend_yield) * self.maturity).exp()
    }

    /// Discount factor `e^(-rT)`.
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}
