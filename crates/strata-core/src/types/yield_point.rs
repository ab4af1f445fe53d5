//! Observed or derived rate at a single maturity.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{StrataError, StrataResult};

/// A rate observed (or derived) at one maturity on one evaluation date.
///
/// Rates are decimals (`0.045` for 4.5%). Depending on the curve holding the
/// point the rate is a par yield, a continuously compounded spot rate or a
/// continuous dividend yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    /// Maturity in years from the evaluation date.
    pub maturity: f64,
    /// Rate as a decimal.
    pub rate: f64,
    /// Date the rate was observed or derived for.
    pub evaluation_date: Date,
}

impl YieldPoint {
    /// Creates a yield point.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Validation` if the maturity is negative or either
    /// value is not finite.
    pub fn new(maturity: f64, rate: f64, evaluation_date: Date) -> StrataResult<Self> {
        if !maturity.is_finite() || maturity < 0.0 {
            return Err(StrataError::validation(format!(
                "maturity must be finite and non-negative, got {maturity}"
            )));
        }
        if !rate.is_finite() {
            return Err(StrataError::validation(format!(
                "rate at maturity {maturity} is not finite"
            )));
        }

        Ok(Self {
            maturity,
            rate,
            evaluation_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> Date {
        Date::from_ymd(2025, 5, 15).unwrap()
    }

    #[test]
    fn test_valid_point() {
        let p = YieldPoint::new(0.5, 0.0432, as_of()).unwrap();
        assert_eq!(p.maturity, 0.5);
        assert_eq!(p.rate, 0.0432);
        assert_eq!(p.evaluation_date, as_of());
    }

    #[test]
    fn test_zero_maturity_allowed() {
        assert!(YieldPoint::new(0.0, 0.04, as_of()).is_ok());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(YieldPoint::new(-0.1, 0.04, as_of()).is_err());
        assert!(YieldPoint::new(1.0, f64::NAN, as_of()).is_err());
        assert!(YieldPoint::new(f64::INFINITY, 0.04, as_of()).is_err());
    }
}
