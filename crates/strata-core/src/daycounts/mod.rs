//! Day count conventions for year-fraction calculations.
//!
//! # Supported Conventions
//!
//! - [`TradingDays252`]: calendar days / 252, the basis used for listed
//!   option expiries throughout the pipeline
//! - [`Act365Fixed`]: Actual/365 Fixed
//!
//! # Usage
//!
//! ```rust
//! use strata_core::daycounts::{DayCount, TradingDays252};
//! use strata_core::types::Date;
//!
//! let as_of = Date::from_ymd(2025, 5, 15).unwrap();
//! let expiry = Date::from_ymd(2025, 6, 20).unwrap();
//!
//! assert_eq!(TradingDays252.day_count(as_of, expiry), 36);
//! let t = TradingDays252.year_fraction(as_of, expiry);
//! ```

mod act365;
mod trading;

pub use act365::Act365Fixed;
pub use trading::TradingDays252;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StrataError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end` precedes `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Calendar days over 252.
    #[default]
    #[serde(rename = "trading_days_252")]
    TradingDays252,
    /// Actual/365 Fixed.
    #[serde(rename = "act_365_fixed")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation for this convention.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            Self::TradingDays252 => Box::new(TradingDays252),
            Self::Act365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Year fraction under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            Self::TradingDays252 => TradingDays252.year_fraction(start, end),
            Self::Act365Fixed => Act365Fixed.year_fraction(start, end),
        }
    }

    /// Returns the name of this convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TradingDays252 => TradingDays252.name(),
            Self::Act365Fixed => Act365Fixed.name(),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "ACT/252" | "BUS/252" | "TRADINGDAYS252" | "TRADING_DAYS_252" => {
                Ok(Self::TradingDays252)
            }
            "ACT/365F" | "ACT/365FIXED" | "ACT365FIXED" | "ACT_365_FIXED" => Ok(Self::Act365Fixed),
            _ => Err(StrataError::configuration(format!(
                "unknown day count convention: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_dispatch() {
        let start = Date::from_ymd(2025, 5, 15).unwrap();
        let end = Date::from_ymd(2026, 5, 15).unwrap();

        let trading = DayCountConvention::TradingDays252;
        let act = DayCountConvention::Act365Fixed;

        assert_eq!(trading.year_fraction(start, end), 365.0 / 252.0);
        assert_eq!(act.year_fraction(start, end), 1.0);
        assert_eq!(
            trading.to_day_count().year_fraction(start, end),
            trading.year_fraction(start, end)
        );
    }

    #[test]
    fn test_parse_convention() {
        assert_eq!(
            "ACT/252".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::TradingDays252
        );
        assert_eq!(
            "act/365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DayCountConvention::TradingDays252).unwrap();
        assert_eq!(json, "\"trading_days_252\"");
    }
}
