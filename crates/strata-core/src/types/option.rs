//! Listed option quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{StrataError, StrataResult};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Immediate exercise value at the given spot.
    #[must_use]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns true for calls.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "calls" | "c" => Ok(Self::Call),
            "put" | "puts" | "p" => Ok(Self::Put),
            other => Err(StrataError::validation(format!("unknown option type: {other}"))),
        }
    }
}

/// When an option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercise at expiry only.
    #[default]
    European,
    /// Exercise at any time up to expiry.
    American,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::European => write!(f, "european"),
            Self::American => write!(f, "american"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = StrataError;

    /// Parses an exercise style name.
    ///
    /// Unsupported styles (e.g. Bermudan) are a configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" => Ok(Self::European),
            "american" | "us" => Ok(Self::American),
            other => Err(StrataError::configuration(format!(
                "unsupported exercise style: {other}"
            ))),
        }
    }
}

/// A single listed option with its market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Underlying ticker.
    pub underlying: String,
    /// Strike price (> 0).
    pub strike: f64,
    /// Expiry date.
    pub expiry: Date,
    /// Call or put.
    pub option_type: OptionType,
    /// Exercise style.
    #[serde(default)]
    pub exercise_style: ExerciseStyle,
    /// Last traded price.
    pub last_price: f64,
    /// Best bid.
    #[serde(default)]
    pub bid: f64,
    /// Best ask.
    #[serde(default)]
    pub ask: f64,
    /// Contracts traded on the session.
    #[serde(default)]
    pub volume: u64,
    /// Open contracts.
    #[serde(default)]
    pub open_interest: u64,
    /// Timestamp of the last trade, if the contract traded at all.
    #[serde(default)]
    pub last_trade: Option<DateTime<Utc>>,
    /// In-the-money flag as reported by the venue.
    #[serde(default)]
    pub in_the_money: bool,
}

impl OptionQuote {
    /// Creates a quote with empty market fields.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Validation` if the strike is not strictly positive.
    pub fn new(
        underlying: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiry: Date,
    ) -> StrataResult<Self> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(StrataError::validation(format!(
                "strike must be positive, got {strike}"
            )));
        }

        Ok(Self {
            underlying: underlying.into(),
            strike,
            expiry,
            option_type,
            exercise_style: ExerciseStyle::default(),
            last_price: 0.0,
            bid: 0.0,
            ask: 0.0,
            volume: 0,
            open_interest: 0,
            last_trade: None,
            in_the_money: false,
        })
    }

    /// Sets the exercise style.
    pub fn with_exercise_style(mut self, style: ExerciseStyle) -> Self {
        self.exercise_style = style;
        self
    }

    /// Sets the last traded price.
    pub fn with_last_price(mut self, price: f64) -> Self {
        self.last_price = price;
        self
    }

    /// Sets bid and ask.
    pub fn with_bid_ask(mut self, bid: f64, ask: f64) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    /// Sets the traded volume.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the open interest.
    pub fn with_open_interest(mut self, open_interest: u64) -> Self {
        self.open_interest = open_interest;
        self
    }

    /// Sets the last trade timestamp.
    pub fn with_last_trade(mut self, at: DateTime<Utc>) -> Self {
        self.last_trade = Some(at);
        self
    }

    /// Sets the in-the-money flag.
    pub fn with_in_the_money(mut self, itm: bool) -> Self {
        self.in_the_money = itm;
        self
    }

    /// Mid of bid and ask, when both sides are quoted.
    pub fn mid_price(&self) -> Option<f64> {
        (self.bid > 0.0 && self.ask > 0.0).then(|| 0.5 * (self.bid + self.ask))
    }

    /// Calendar date of the last trade.
    pub fn last_trade_date(&self) -> Option<Date> {
        self.last_trade.map(|ts| Date::from(ts.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expiry() -> Date {
        Date::from_ymd(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_parse_option_type() {
        assert_eq!("calls".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("P".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_parse_exercise_style() {
        assert_eq!(
            "American".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
        let err = "bermudan".parse::<ExerciseStyle>().unwrap_err();
        assert!(matches!(err, StrataError::Configuration { .. }));
    }

    #[test]
    fn test_quote_builder() {
        let traded = Utc.with_ymd_and_hms(2025, 5, 15, 19, 59, 0).unwrap();
        let quote = OptionQuote::new("SPY", OptionType::Call, 590.0, expiry())
            .unwrap()
            .with_last_price(12.4)
            .with_bid_ask(12.25, 12.75)
            .with_volume(1_250)
            .with_open_interest(8_000)
            .with_last_trade(traded);

        assert_eq!(quote.mid_price(), Some(12.5));
        assert_eq!(
            quote.last_trade_date(),
            Some(Date::from_ymd(2025, 5, 15).unwrap())
        );
        assert_eq!(quote.exercise_style, ExerciseStyle::European);
    }

    #[test]
    fn test_mid_requires_two_sides() {
        let quote = OptionQuote::new("SPY", OptionType::Put, 500.0, expiry())
            .unwrap()
            .with_bid_ask(0.0, 0.05);
        assert_eq!(quote.mid_price(), None);
    }

    #[test]
    fn test_rejects_non_positive_strike() {
        assert!(OptionQuote::new("SPY", OptionType::Call, 0.0, expiry()).is_err());
        assert!(OptionQuote::new("SPY", OptionType::Call, -5.0, expiry()).is_err());
    }
}
