//! Option pricers.
//!
//! Every pricer implements [`OptionModel`]: a required `price` plus
//! finite-difference Greeks and an implied-volatility solver built on top of
//! it. [`OptionPricer`] selects the implementation for an exercise style.

mod binomial;
mod black_scholes;

pub use binomial::CoxRossRubinstein;
pub use black_scholes::BlackScholesMerton;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strata_core::types::{ExerciseStyle, OptionType};

use crate::error::{OptionsError, OptionsResult};
use crate::implied_vol::{self, ImpliedVolConfig};
use crate::params::PricingParams;

fn default_bump() -> f64 {
    1e-4
}

/// Finite-difference bump sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekBumps {
    /// Absolute spot bump for delta and gamma.
    #[serde(default = "default_bump")]
    pub spot: f64,
    /// Absolute volatility bump for vega.
    #[serde(default = "default_bump")]
    pub volatility: f64,
    /// Absolute rate bump for rho.
    #[serde(default = "default_bump")]
    pub rate: f64,
    /// Time bump in years for theta.
    #[serde(default = "default_bump")]
    pub time: f64,
}

impl Default for GreekBumps {
    fn default() -> Self {
        Self {
            spot: default_bump(),
            volatility: default_bump(),
            rate: default_bump(),
            time: default_bump(),
        }
    }
}

/// First- and second-order sensitivities of one option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Option value.
    pub price: f64,
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// dV/dσ.
    pub vega: f64,
    /// Value change per year of elapsed time.
    pub theta: f64,
    /// dV/dr.
    pub rho: f64,
}

/// A pricing model for a single vanilla option.
pub trait OptionModel: Send + Sync {
    /// Option value.
    fn price(&self, option_type: OptionType, params: &PricingParams) -> f64;

    /// Bump sizes used by the Greeks.
    fn bumps(&self) -> GreekBumps {
        GreekBumps::default()
    }

    /// Symmetric difference in spot.
    fn delta(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let h = self.bumps().spot;
        let up = self.price(option_type, &params.with_spot(params.spot + h));
        let down = self.price(option_type, &params.with_spot(params.spot - h));
        (up - down) / (2.0 * h)
    }

    /// Second symmetric difference in spot.
    fn gamma(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let h = self.bumps().spot;
        let up = self.price(option_type, &params.with_spot(params.spot + h));
        let mid = self.price(option_type, params);
        let down = self.price(option_type, &params.with_spot(params.spot - h));
        (up - 2.0 * mid + down) / (h * h)
    }

    /// Symmetric difference in volatility.
    fn vega(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let h = self.bumps().volatility;
        let up = self.price(option_type, &params.with_volatility(params.volatility + h));
        let down = self.price(option_type, &params.with_volatility(params.volatility - h));
        (up - down) / (2.0 * h)
    }

    /// One-sided difference: value one bump closer to expiry minus value now.
    fn theta(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let h = self.bumps().time;
        let later = self.price(option_type, &params.with_maturity(params.maturity - h));
        let now = self.price(option_type, params);
        (later - now) / h
    }

    /// Symmetric difference in the risk-free rate.
    fn rho(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        let h = self.bumps().rate;
        let up = self.price(option_type, &params.with_rate(params.rate + h));
        let down = self.price(option_type, &params.with_rate(params.rate - h));
        (up - down) / (2.0 * h)
    }

    /// All Greeks at once.
    fn greeks(&self, option_type: OptionType, params: &PricingParams) -> Greeks {
        Greeks {
            price: self.price(option_type, params),
            delta: self.delta(option_type, params),
            gamma: self.gamma(option_type, params),
            vega: self.vega(option_type, params),
            theta: self.theta(option_type, params),
            rho: self.rho(option_type, params),
        }
    }

    /// Volatility that reproduces `market_price`; `None` if there is no root
    /// in the search interval or the solver does not converge.
    ///
    /// The volatility field of `params` is ignored.
    fn implied_volatility(
        &self,
        option_type: OptionType,
        market_price: f64,
        params: &PricingParams,
        initial_guess: Option<f64>,
        config: &ImpliedVolConfig,
    ) -> Option<f64> {
        implied_vol::solve(self, option_type, market_price, params, initial_guess, config)
    }
}

fn default_binomial_steps() -> usize {
    1000
}

/// Pricer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricerConfig {
    /// Steps of the American binomial tree.
    #[serde(default = "default_binomial_steps")]
    pub binomial_steps: usize,
    /// Finite-difference bumps for the Greeks.
    #[serde(default)]
    pub bumps: GreekBumps,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            binomial_steps: default_binomial_steps(),
            bumps: GreekBumps::default(),
        }
    }
}

impl PricerConfig {
    /// Sets the binomial step count.
    #[must_use]
    pub fn with_binomial_steps(mut self, steps: usize) -> Self {
        self.binomial_steps = steps;
        self
    }
}

/// Pricer chosen by exercise style.
///
/// # Example
///
/// ```rust
/// use strata_core::{ExerciseStyle, OptionType};
/// use strata_options::prelude::*;
///
/// let pricer = OptionPricer::for_style(ExerciseStyle::European, &PricerConfig::default());
/// let params = PricingParams::new(100.0, 100.0, 0.05, 1.0, 0.2, 0.0);
/// let call = pricer.price(OptionType::Call, &params);
/// assert!((call - 10.4506).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OptionPricer {
    /// Black-Scholes-Merton closed form.
    EuropeanClosedForm(BlackScholesMerton),
    /// Cox-Ross-Rubinstein tree with early exercise.
    AmericanBinomialTree(CoxRossRubinstein),
}

impl OptionPricer {
    /// Pricer for an exercise style.
    pub fn for_style(style: ExerciseStyle, config: &PricerConfig) -> Self {
        match style {
            ExerciseStyle::European => {
                Self::EuropeanClosedForm(BlackScholesMerton::new().with_bumps(config.bumps))
            }
            ExerciseStyle::American => Self::AmericanBinomialTree(
                CoxRossRubinstein::new(config.binomial_steps).with_bumps(config.bumps),
            ),
        }
    }

    /// Pricer for an exercise style given by name.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::Configuration` for an unknown style name.
    pub fn from_style_name(name: &str, config: &PricerConfig) -> OptionsResult<Self> {
        let style = ExerciseStyle::from_str(name)
            .map_err(|_| OptionsError::configuration(format!("unknown exercise style '{name}'")))?;
        Ok(Self::for_style(style, config))
    }

    /// Exercise style priced by this pricer.
    pub fn style(&self) -> ExerciseStyle {
        match self {
            Self::EuropeanClosedForm(_) => ExerciseStyle::European,
            Self::AmericanBinomialTree(_) => ExerciseStyle::American,
        }
    }
}

impl OptionModel for OptionPricer {
    fn price(&self, option_type: OptionType, params: &PricingParams) -> f64 {
        match self {
            Self::EuropeanClosedForm(m) => m.price(option_type, params),
            Self::AmericanBinomialTree(m) => m.price(option_type, params),
        }
    }

    fn bumps(&self) -> GreekBumps {
        match self {
            Self::EuropeanClosedForm(m) => m.bumps(),
            Self::AmericanBinomialTree(m) => m.bumps(),
        }
    }
}
