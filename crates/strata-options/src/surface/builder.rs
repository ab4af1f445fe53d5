//! Implied-volatility surface construction from option chains.

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, OptionChains, OptionQuote, OptionType};
use strata_curves::{Curve, CurveError, CurveModel};

use super::{IVPoint, IVSlice, IVSurface};
use crate::error::OptionsResult;
use crate::implied_vol::ImpliedVolConfig;
use crate::parallel::{maybe_parallel_filter_map, ParallelConfig};
use crate::params::PricingParams;
use crate::pricing::{OptionModel, OptionPricer, PricerConfig};

/// Quote filter applied before solving implied vols.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceFilter {
    /// Minimum traded volume.
    pub min_volume: u64,
    /// Minimum last price.
    pub min_last_price: f64,
    /// Oldest accepted last trade, in days before the snapshot.
    pub max_staleness_days: i64,
    /// Drop in-the-money quotes by forward moneyness.
    pub otm_only: bool,
}

impl Default for SurfaceFilter {
    fn default() -> Self {
        Self {
            min_volume: 10,
            min_last_price: 0.1,
            max_staleness_days: 1,
            otm_only: true,
        }
    }
}

impl SurfaceFilter {
    /// Volume, price and staleness checks. Quotes without a last trade are stale.
    pub fn accepts(&self, quote: &OptionQuote, as_of: Date) -> bool {
        let oldest = as_of.add_days(-self.max_staleness_days);
        quote.volume >= self.min_volume
            && quote.last_price >= self.min_last_price
            && quote.last_trade_date().is_some_and(|d| d >= oldest)
    }

    /// True if the quote is in the money with respect to the forward.
    pub fn is_in_the_money(option_type: OptionType, forward_moneyness: f64) -> bool {
        match option_type {
            OptionType::Call => forward_moneyness > 0.0,
            OptionType::Put => forward_moneyness < 0.0,
        }
    }
}

/// Builds implied-volatility surfaces.
#[derive(Debug, Clone, Default)]
pub struct VolatilitySurfaceBuilder {
    filter: SurfaceFilter,
    pricer: PricerConfig,
    implied_vol: ImpliedVolConfig,
    parallel: ParallelConfig,
    day_count: DayCountConvention,
}

impl VolatilitySurfaceBuilder {
    /// Creates a builder with the given quote filter.
    pub fn new(filter: SurfaceFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Sets the pricer settings.
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

    /// Sets when quotes are processed in parallel.
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

    /// Builds the surface from fitted spot and dividend curves.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotFitted` if either curve has no model.
    pub fn build(
        &self,
        chains: &OptionChains,
        spot_curve: &Curve,
        dividend_curve: &Curve,
        as_of: Date,
    ) -> OptionsResult<IVSurface> {
        let rates = fitted_model(spot_curve)?;
        let dividends = fitted_model(dividend_curve)?;
        Ok(self.build_with_models(chains, rates, dividends, as_of))
    }

    /// Builds the surface from rate and dividend models directly.
    pub fn build_with_models(
        &self,
        chains: &OptionChains,
        rates: &dyn CurveModel,
        dividends: &dyn CurveModel,
        as_of: Date,
    ) -> IVSurface {
        let pricer = OptionPricer::for_style(chains.exercise_style(), &self.pricer);
        let spot = chains.spot();

        let mut slices = Vec::new();
        for chain in chains {
            let maturity = self.day_count.year_fraction(as_of, chain.expiry());
            if maturity <= 0.0 {
                continue;
            }

            let rate = rates.value(maturity);
            let dividend_yield = dividends.value(maturity);
            let base = PricingParams::new(spot, 0.0, rate, maturity, 0.0, dividend_yield);
            let forward = base.forward();

            let points = maybe_parallel_filter_map(chain.quotes(), &self.parallel, |quote| {
                if !self.filter.accepts(quote, as_of) {
                    return None;
                }
                let forward_moneyness = (forward / quote.strike).ln();
                if self.filter.otm_only
                    && SurfaceFilter::is_in_the_money(quote.option_type, forward_moneyness)
                {
                    return None;
                }

                let params = PricingParams {
                    strike: quote.strike,
                    ..base
                };
                let implied_vol = pricer.implied_volatility(
                    quote.option_type,
                    quote.last_price,
                    &params,
                    None,
                    &self.implied_vol,
                )?;

                Some(IVPoint {
                    maturity,
                    strike: quote.strike,
                    option_type: quote.option_type,
                    spot_moneyness: (spot / quote.strike).ln(),
                    forward_moneyness,
                    implied_vol,
                })
            });

            if points.is_empty() {
                log::debug!("expiry {} has no usable quotes", chain.expiry());
                continue;
            }
            slices.push(IVSlice::new(chain.expiry(), maturity, points));
        }

        let surface = IVSurface::new(chains.underlying(), slices);
        log::debug!(
            "{} surface: {} slices, {} points",
            chains.underlying(),
            surface.len(),
            surface.point_count()
        );
        surface
    }
}

fn fitted_model(curve: &Curve) -> Result<&dyn CurveModel, CurveError> {
    curve
        .model()
        .map(|m| m as &dyn CurveModel)
        .ok_or_else(|| CurveError::NotFitted {
            kind: curve.kind().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn as_of() -> Date {
        Date::from_ymd(2025, 5, 15).unwrap()
    }

    fn traded(option_type: OptionType, strike: f64) -> OptionQuote {
        OptionQuote::new("SPY", option_type, strike, as_of().add_days(63))
            .unwrap()
            .with_last_price(2.0)
            .with_volume(100)
            .with_last_trade(Utc.with_ymd_and_hms(2025, 5, 15, 15, 30, 0).unwrap())
    }

    #[test]
    fn test_filter_accepts_fresh_liquid_quote() {
        let filter = SurfaceFilter::default();
        assert!(filter.accepts(&traded(OptionType::Call, 100.0), as_of()));
    }

    #[test]
    fn test_filter_volume_and_price() {
        let filter = SurfaceFilter::default();
        assert!(!filter.accepts(&traded(OptionType::Call, 100.0).with_volume(9), as_of()));
        assert!(filter.accepts(&traded(OptionType::Call, 100.0).with_volume(10), as_of()));
        assert!(!filter.accepts(&traded(OptionType::Call, 100.0).with_last_price(0.05), as_of()));
    }

    #[test]
    fn test_filter_staleness() {
        let filter = SurfaceFilter::default();
        let day_before = traded(OptionType::Put, 95.0)
            .with_last_trade(Utc.with_ymd_and_hms(2025, 5, 14, 20, 0, 0).unwrap());
        assert!(filter.accepts(&day_before, as_of()));

        let stale = traded(OptionType::Put, 95.0)
            .with_last_trade(Utc.with_ymd_and_hms(2025, 5, 13, 20, 0, 0).unwrap());
        assert!(!filter.accepts(&stale, as_of()));

        let mut never = traded(OptionType::Put, 95.0);
        never.last_trade = None;
        assert!(!filter.accepts(&never, as_of()));
    }

    #[test]
    fn test_in_the_money_by_forward() {
        assert!(SurfaceFilter::is_in_the_money(OptionType::Call, 0.05));
        assert!(!SurfaceFilter::is_in_the_money(OptionType::Call, -0.05));
        assert!(SurfaceFilter::is_in_the_money(OptionType::Put, -0.05));
        assert!(!SurfaceFilter::is_in_the_money(OptionType::Put, 0.0));
    }
}
