//! Trading-day basis for listed option expiries.

use super::DayCount;
use crate::types::Date;

/// Calendar days between two dates over a 252-day year.
///
/// The numerator counts calendar days while the basis is the number of
/// trading sessions in a year. This is the convention the option pipeline
/// uses for every expiry year fraction; keep it consistent between dividend
/// extraction and surface construction.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{252}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingDays252;

impl TradingDays252 {
    /// Days in the year basis.
    pub const BASIS: f64 = 252.0;
}

impl DayCount for TradingDays252 {
    fn name(&self) -> &'static str {
        "ACT/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / Self::BASIS
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trading_days_year_fraction() {
        let dc = TradingDays252;
        let start = Date::from_ymd(2025, 5, 15).unwrap();
        let end = Date::from_ymd(2025, 6, 20).unwrap();

        assert_eq!(dc.day_count(start, end), 36);
        assert_relative_eq!(dc.year_fraction(start, end), 36.0 / 252.0);
    }

    #[test]
    fn test_negative_when_reversed() {
        let dc = TradingDays252;
        let start = Date::from_ymd(2025, 5, 15).unwrap();
        let end = Date::from_ymd(2025, 5, 1).unwrap();
        assert!(dc.year_fraction(start, end) < 0.0);
    }

    #[test]
    fn test_same_day_is_zero() {
        let d = Date::from_ymd(2025, 5, 15).unwrap();
        assert_eq!(TradingDays252.year_fraction(d, d), 0.0);
    }
}
