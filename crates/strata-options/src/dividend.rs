//! Implied dividend-yield term structure from ATM put/call pairs.
//!
//! For each expiry the call and put at the strike closest to the spot (in
//! log-moneyness) give a forward through put/call parity:
//!
//! ```text
//! F = (C - P) / DF + K,    q = r - ln(F / S) / T
//! ```
//!
//! European chains use that closed form once. American premiums break
//! parity, so American chains iterate: implied vols are solved on the tree,
//! converted back to European prices, and parity is reapplied until the
//! yield settles.

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, ExerciseStyle, OptionChain, OptionChains, OptionType, YieldPoint};
use strata_curves::{Curve, CurveError, CurveKind, CurveModel};

use crate::error::{OptionsError, OptionsResult};
use crate::implied_vol::ImpliedVolConfig;
use crate::parallel::{maybe_parallel_map, ParallelConfig};
use crate::params::PricingParams;
use crate::pricing::{BlackScholesMerton, CoxRossRubinstein, OptionModel, PricerConfig};

fn default_min_year_fraction() -> f64 {
    0.1
}

fn default_min_quote_price() -> f64 {
    1e-3
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_max_iterations() -> u32 {
    100
}

/// Settings of the dividend curve builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendCurveConfig {
    /// Expiries closer than this (in years) are skipped.
    #[serde(default = "default_min_year_fraction")]
    pub min_year_fraction: f64,
    /// ATM quotes with a smaller absolute last price are skipped.
    #[serde(default = "default_min_quote_price")]
    pub min_quote_price: f64,
    /// Fixed-point tolerance on the yield for American chains.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Fixed-point iteration cap for American chains.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for DividendCurveConfig {
    fn default() -> Self {
        Self {
            min_year_fraction: default_min_year_fraction(),
            min_quote_price: default_min_quote_price(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Implied dividend yield of one expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendEstimate {
    /// Expiry date.
    pub expiry: Date,
    /// Year fraction to expiry.
    pub maturity: f64,
    /// Strike of the ATM pair.
    pub strike: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Fixed-point iterations; zero for the European closed form.
    pub iterations: u32,
}

/// Dividend yield implied by European call and put prices.
///
/// Returns `None` when the implied forward is not positive.
pub fn european_dividend_yield(
    call: f64,
    put: f64,
    strike: f64,
    spot: f64,
    rate: f64,
    maturity: f64,
) -> Option<f64> {
    let df = (-rate * maturity).exp();
    let forward = (call - put) / df + strike;
    if !(forward.is_finite() && forward > 0.0) {
        return None;
    }
    Some(rate - (forward / spot).ln() / maturity)
}

/// Builds the dividend-yield curve from option chains.
#[derive(Debug, Clone, Default)]
pub struct DividendCurveBuilder {
    config: DividendCurveConfig,
    pricer: PricerConfig,
    implied_vol: ImpliedVolConfig,
    parallel: ParallelConfig,
    day_count: DayCountConvention,
}

impl DividendCurveBuilder {
    /// Creates a builder.
    pub fn new(config: DividendCurveConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sets the pricer settings used for American chains.
    #[must_use]
    pub fn with_pricer_config(mut self, pricer: PricerConfig) -> Self {
        self.pricer = pricer;
        self
    }

    /// Sets the implied volatility search.
    #[must_use]
    pub fn with_implied_vol(mut self, implied_vol: ImpliedVolConfig) -> Self {
        self.implied_vol = implied_vol;
        self
    }

    /// Sets when expiries are processed in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the year-fraction convention for expiries.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Builds the (unfitted) dividend curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the spot curve is unfitted or no expiry qualifies.
    pub fn build(&self, chains: &OptionChains, spot_curve: &Curve, as_of: Date) -> OptionsResult<Curve> {
        let estimates = self.estimates(chains, spot_curve, as_of)?;
        let points = estimates
            .iter()
            .map(|e| YieldPoint::new(e.maturity, e.dividend_yield, as_of))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "{} dividend points from {} expiries of {}",
            points.len(),
            chains.len(),
            chains.underlying()
        );
        Ok(Curve::new(points, CurveKind::Dividend)?)
    }

    /// Estimates per qualifying expiry, in expiry order.
    ///
    /// Expiries that fail the fixed point are logged and skipped.
    pub fn estimates(
        &self,
        chains: &OptionChains,
        spot_curve: &Curve,
        as_of: Date,
    ) -> OptionsResult<Vec<DividendEstimate>> {
        let rates = spot_curve.model().ok_or_else(|| CurveError::NotFitted {
            kind: spot_curve.kind().to_string(),
        })?;
        let spot = chains.spot();
        let style = chains.exercise_style();

        let results = maybe_parallel_map(chains.chains(), &self.parallel, |chain| {
            self.estimate_expiry(chain, spot, style, rates, as_of)
        });

        let mut estimates = Vec::with_capacity(results.len());
        for (chain, result) in chains.iter().zip(results) {
            match result {
                Ok(Some(estimate)) => estimates.push(estimate),
                Ok(None) => {}
                Err(err) => log::warn!(
                    "skipping {} expiry {}: {err}",
                    chains.underlying(),
                    chain.expiry()
                ),
            }
        }
        Ok(estimates)
    }

    /// Estimates one expiry; `Ok(None)` when the expiry does not qualify.
    pub fn estimate_expiry(
        &self,
        chain: &OptionChain,
        spot: f64,
        style: ExerciseStyle,
        rates: &dyn CurveModel,
        as_of: Date,
    ) -> OptionsResult<Option<DividendEstimate>> {
        let expiry = chain.expiry();
        let maturity = self.day_count.year_fraction(as_of, expiry);
        if maturity < self.config.min_year_fraction {
            log::debug!("expiry {expiry} too close ({maturity:.4}y)");
            return Ok(None);
        }

        let Some(pair) = chain.atm_pair(spot) else {
            log::debug!("expiry {expiry} has no ATM call/put pair");
            return Ok(None);
        };
        let (call, put) = (pair.call.last_price, pair.put.last_price);
        if call.abs() < self.config.min_quote_price || put.abs() < self.config.min_quote_price {
            log::debug!("expiry {expiry} ATM quotes too small ({call}, {put})");
            return Ok(None);
        }

        let rate = rates.value(maturity);
        let estimate = match style {
            ExerciseStyle::European => {
                european_dividend_yield(call, put, pair.strike, spot, rate, maturity).map(|q| {
                    DividendEstimate {
                        expiry,
                        maturity,
                        strike: pair.strike,
                        dividend_yield: q,
                        iterations: 0,
                    }
                })
            }
            ExerciseStyle::American => {
                let params = PricingParams::new(spot, pair.strike, rate, maturity, 0.0, 0.0);
                self.american_fixed_point(expiry, call, put, &params)?
            }
        };

        if estimate.is_none() {
            log::debug!("expiry {expiry} implies a non-positive forward");
        }
        Ok(estimate)
    }

    fn american_fixed_point(
        &self,
        expiry: Date,
        call: f64,
        put: f64,
        params: &PricingParams,
    ) -> OptionsResult<Option<DividendEstimate>> {
        let european = BlackScholesMerton::new().with_bumps(self.pricer.bumps);
        let american = CoxRossRubinstein::new(self.pricer.binomial_steps).with_bumps(self.pricer.bumps);
        let (strike, spot, rate, maturity) =
            (params.strike, params.spot, params.rate, params.maturity);

        let Some(mut q) = european_dividend_yield(call, put, strike, spot, rate, maturity) else {
            return Ok(None);
        };
        let mut last_change = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let p = params.with_dividend_yield(q);
            let no_solution = || OptionsError::dividend_non_convergence(expiry, iteration, last_change);

            let seed = european
                .implied_volatility(OptionType::Call, call, &p, None, &self.implied_vol)
                .ok_or_else(no_solution)?;
            let call_vol = american
                .implied_volatility(OptionType::Call, call, &p, Some(seed), &self.implied_vol)
                .ok_or_else(no_solution)?;
            let put_vol = american
                .implied_volatility(OptionType::Put, put, &p, Some(seed), &self.implied_vol)
                .ok_or_else(no_solution)?;

            let call_eu = european.price(OptionType::Call, &p.with_volatility(call_vol));
            let put_eu = european.price(OptionType::Put, &p.with_volatility(put_vol));
            let next = european_dividend_yield(call_eu, put_eu, strike, spot, rate, maturity)
                .ok_or_else(no_solution)?;

            last_change = (next - q).abs();
            q = next;
            if last_change < self.config.tolerance {
                return Ok(Some(DividendEstimate {
                    expiry,
                    maturity,
                    strike,
                    dividend_yield: q,
                    iterations: iteration,
                }));
            }
        }

        Err(OptionsError::dividend_non_convergence(
            expiry,
            self.config.max_iterations,
            last_change,
        ))
    }
}
