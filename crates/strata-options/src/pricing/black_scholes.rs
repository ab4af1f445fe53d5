//! Black-Scholes-Merton closed form for European options.

use strata_core::types::OptionType;
use strata_math::distributions::normal_cdf;

use super::{GreekBumps, OptionModel};
use crate::params::PricingParams;

/// Black-Scholes-Merton with a continuous dividend yield.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlackScholesMerton {
    bumps: GreekBumps,
}

impl BlackScholesMerton {
    /// Creates the model with default Greek bumps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Greek bumps.
    #[must_use]
    pub fn with_bumps(mut self, bumps: GreekBumps) -> Self {
        self.bumps = bumps;
        self
    }
}

impl OptionModel for BlackScholesMerton {
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

        let forward = params.forward();
        let df = params.discount_factor();

        let call = if sigma > 0.0 {
            let vol_sqrt_t = sigma * t.sqrt();
            let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
            let d2 = d1 - vol_sqrt_t;
            df * (forward * normal_cdf(d1) - k * normal_cdf(d2))
        } else {
            df * (forward - k).max(0.0)
        };

        match option_type {
            OptionType::Call => call,
            OptionType::Put => call - df * (forward - k),
        }
    }

    fn bumps(&self) -> GreekBumps {
        self.bumps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_price() {
        let params = PricingParams::new(100.0, 100.0, 0.05, 1.0, 0.2, 0.0);
        let model = BlackScholesMerton::new();
        let call = model.price(OptionType::Call, &params);
        let put = model.price(OptionType::Put, &params);

        assert_relative_eq!(call, 10.4506, epsilon = 1e-4);
        assert_relative_eq!(put, 5.5735, epsilon = 1e-4);
        assert_relative_eq!(
            put,
            call - params.discount_factor() * (params.forward() - 100.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_dividend_yield_lowers_call() {
        let model = BlackScholesMerton::new();
        let base = PricingParams::new(100.0, 100.0, 0.05, 1.0, 0.2, 0.0);
        let with_div = base.with_dividend_yield(0.03);
        assert!(model.price(OptionType::Call, &with_div) < model.price(OptionType::Call, &base));
        assert!(model.price(OptionType::Put, &with_div) > model.price(OptionType::Put, &base));
    }

    #[test]
    fn test_expired_is_intrinsic() {
        let model = BlackScholesMerton::new();
        let params = PricingParams::new(110.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        assert_eq!(model.price(OptionType::Call, &params), 10.0);
        assert_eq!(model.price(OptionType::Put, &params), 0.0);
        assert_eq!(model.price(OptionType::Put, &params.with_maturity(-0.5)), 0.0);
    }

    #[test]
    fn test_zero_volatility() {
        let model = BlackScholesMerton::new();
        let params = PricingParams::new(100.0, 90.0, 0.05, 1.0, 0.0, 0.0);
        let expected = params.discount_factor() * (params.forward() - 90.0);
        assert_relative_eq!(model.price(OptionType::Call, &params), expected, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 50.0..150.0f64,
            strike in 50.0..150.0f64,
            rate in 0.0..0.1f64,
            maturity in 0.05..3.0f64,
            vol in 0.05..1.0f64,
            q in 0.0..0.05f64,
        ) {
            let model = BlackScholesMerton::new();
            let p = PricingParams::new(spot, strike, rate, maturity, vol, q);
            let call = model.price(OptionType::Call, &p);
            let put = model.price(OptionType::Put, &p);
            let parity = p.discount_factor() * (p.forward() - strike);
            prop_assert!((call - put - parity).abs() < 1e-9);
            prop_assert!(call >= -1e-12);
        }
    }
}
