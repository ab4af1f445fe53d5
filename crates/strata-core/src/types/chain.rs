//! Option chains: quotes grouped by expiry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Date, ExerciseStyle, OptionQuote, OptionType};
use crate::error::{StrataError, StrataResult};

/// Call and put quoted at the same strike, closest to the money.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmPair<'a> {
    /// Shared strike.
    pub strike: f64,
    /// Call quote.
    pub call: &'a OptionQuote,
    /// Put quote.
    pub put: &'a OptionQuote,
}

/// All options of one underlying sharing one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    underlying: String,
    expiry: Date,
    quotes: Vec<OptionQuote>,
}

impl OptionChain {
    /// Creates a chain, checking that every quote matches the underlying and expiry.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Validation` on the first mismatching quote.
    pub fn new(
        underlying: impl Into<String>,
        expiry: Date,
        quotes: Vec<OptionQuote>,
    ) -> StrataResult<Self> {
        let underlying = underlying.into();
        for quote in &quotes {
            if quote.expiry != expiry {
                return Err(StrataError::validation(format!(
                    "quote {} {} expires {} but chain expires {expiry}",
                    quote.option_type, quote.strike, quote.expiry
                )));
            }
            if quote.underlying != underlying {
                return Err(StrataError::validation(format!(
                    "quote on {} in chain for {underlying}",
                    quote.underlying
                )));
            }
        }

        Ok(Self {
            underlying,
            expiry,
            quotes,
        })
    }

    /// Underlying ticker.
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Expiry shared by all quotes.
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// All quotes.
    pub fn quotes(&self) -> &[OptionQuote] {
        &self.quotes
    }

    /// Call quotes.
    pub fn calls(&self) -> impl Iterator<Item = &OptionQuote> {
        self.quotes.iter().filter(|q| q.option_type == OptionType::Call)
    }

    /// Put quotes.
    pub fn puts(&self) -> impl Iterator<Item = &OptionQuote> {
        self.quotes.iter().filter(|q| q.option_type == OptionType::Put)
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the chain holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Finds the call/put pair whose common strike minimises `|ln(S/K)|`.
    ///
    /// Returns `None` when the spot is not positive or no strike carries both
    /// a call and a put.
    pub fn atm_pair(&self, spot: f64) -> Option<AtmPair<'_>> {
        if !(spot.is_finite() && spot > 0.0) {
            return None;
        }

        let mut best: Option<(f64, AtmPair<'_>)> = None;
        for call in self.calls().filter(|c| c.strike > 0.0) {
            let Some(put) = self.puts().find(|p| p.strike == call.strike) else {
                continue;
            };
            let distance = (spot / call.strike).ln().abs();
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((
                    distance,
                    AtmPair {
                        strike: call.strike,
                        call,
                        put,
                    },
                ));
            }
        }

        best.map(|(_, pair)| pair)
    }
}

/// Every chain of one underlying for one snapshot, with the underlying spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChains {
    underlying: String,
    spot: f64,
    exercise_style: ExerciseStyle,
    chains: Vec<OptionChain>,
}

impl OptionChains {
    /// Creates the collection, ordering chains by expiry.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Validation` if the spot is not positive, a chain
    /// belongs to another underlying, a quote's exercise style differs from
    /// `exercise_style`, or two chains share an expiry.
    pub fn new(
        underlying: impl Into<String>,
        spot: f64,
        exercise_style: ExerciseStyle,
        mut chains: Vec<OptionChain>,
    ) -> StrataResult<Self> {
        let underlying = underlying.into();
        if !(spot.is_finite() && spot > 0.0) {
            return Err(StrataError::validation(format!(
                "underlying spot must be positive, got {spot}"
            )));
        }
        if let Some(chain) = chains.iter().find(|c| c.underlying != underlying) {
            return Err(StrataError::validation(format!(
                "chain for {} in collection for {underlying}",
                chain.underlying
            )));
        }

        if let Some(quote) = chains
            .iter()
            .flat_map(OptionChain::quotes)
            .find(|q| q.exercise_style != exercise_style)
        {
            return Err(StrataError::validation(format!(
                "{} {} {} {} is {} but the chains are {exercise_style}",
                quote.underlying,
                quote.expiry,
                quote.option_type,
                quote.strike,
                quote.exercise_style
            )));
        }

        chains.sort_by_key(OptionChain::expiry);
        if let Some(pair) = chains.windows(2).find(|w| w[0].expiry == w[1].expiry) {
            return Err(StrataError::validation(format!(
                "duplicate chain for expiry {}",
                pair[0].expiry
            )));
        }

        Ok(Self {
            underlying,
            spot,
            exercise_style,
            chains,
        })
    }

    /// Groups a flat list of quotes into per-expiry chains.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Validation` if the spot is not positive, a quote
    /// belongs to another underlying, or a quote's exercise style differs
    /// from `exercise_style`.
    pub fn from_quotes(
        underlying: impl Into<String>,
        spot: f64,
        exercise_style: ExerciseStyle,
        quotes: impl IntoIterator<Item = OptionQuote>,
    ) -> StrataResult<Self> {
        let underlying = underlying.into();
        let mut by_expiry: BTreeMap<Date, Vec<OptionQuote>> = BTreeMap::new();
        for quote in quotes {
            by_expiry.entry(quote.expiry).or_default().push(quote);
        }
        log::debug!(
            "grouped {} quotes for {underlying} into {} expiries",
            by_expiry.values().map(Vec::len).sum::<usize>(),
            by_expiry.len()
        );

        let chains = by_expiry
            .into_iter()
            .map(|(expiry, quotes)| OptionChain::new(underlying.clone(), expiry, quotes))
            .collect::<StrataResult<Vec<_>>>()?;

        Self::new(underlying, spot, exercise_style, chains)
    }

    /// Underlying ticker.
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Underlying spot price.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Exercise style of the listing.
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    /// Chains in ascending expiry order.
    pub fn chains(&self) -> &[OptionChain] {
        &self.chains
    }

    /// Iterates the chains in ascending expiry order.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionChain> {
        self.chains.iter()
    }

    /// Looks up the chain for an expiry.
    pub fn get(&self, expiry: Date) -> Option<&OptionChain> {
        self.chains
            .binary_search_by_key(&expiry, OptionChain::expiry)
            .ok()
            .map(|i| &self.chains[i])
    }

    /// Number of expiries.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if there are no chains.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<'a> IntoIterator for &'a OptionChains {
    type Item = &'a OptionChain;
    type IntoIter = std::slice::Iter<'a, OptionChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn quote(option_type: OptionType, strike: f64, expiry: Date) -> OptionQuote {
        OptionQuote::new("SPY", option_type, strike, expiry)
            .unwrap()
            .with_last_price(1.0)
    }

    fn american(option_type: OptionType, strike: f64, expiry: Date) -> OptionQuote {
        quote(option_type, strike, expiry).with_exercise_style(ExerciseStyle::American)
    }

    fn chain(strikes: &[(OptionType, f64)]) -> OptionChain {
        let expiry = date(2025, 6, 20);
        let quotes = strikes
            .iter()
            .map(|(t, k)| quote(*t, *k, expiry))
            .collect();
        OptionChain::new("SPY", expiry, quotes).unwrap()
    }

    // ============ ATM pair ============

    #[test]
    fn test_atm_pair_picks_closest_log_moneyness() {
        let chain = chain(&[
            (OptionType::Call, 95.0),
            (OptionType::Put, 95.0),
            (OptionType::Call, 100.0),
            (OptionType::Put, 100.0),
            (OptionType::Call, 105.0),
            (OptionType::Put, 105.0),
        ]);

        let pair = chain.atm_pair(101.0).unwrap();
        assert_eq!(pair.strike, 100.0);
        assert_eq!(pair.call.option_type, OptionType::Call);
        assert_eq!(pair.put.option_type, OptionType::Put);
    }

    #[test]
    fn test_atm_pair_requires_both_sides() {
        // The closest strike only has a call, so the pair falls back to 95.
        let chain = chain(&[
            (OptionType::Call, 95.0),
            (OptionType::Put, 95.0),
            (OptionType::Call, 100.0),
            (OptionType::Put, 110.0),
        ]);

        let pair = chain.atm_pair(100.0).unwrap();
        assert_eq!(pair.strike, 95.0);
    }

    #[test]
    fn test_atm_pair_none_without_match() {
        let chain = chain(&[(OptionType::Call, 100.0), (OptionType::Put, 105.0)]);
        assert!(chain.atm_pair(100.0).is_none());
    }

    #[test]
    fn test_atm_pair_none_for_bad_spot() {
        let chain = chain(&[(OptionType::Call, 100.0), (OptionType::Put, 100.0)]);
        assert!(chain.atm_pair(0.0).is_none());
        assert!(chain.atm_pair(-1.0).is_none());
    }

    // ============ Construction ============

    #[test]
    fn test_chain_rejects_mixed_expiry() {
        let quotes = vec![
            quote(OptionType::Call, 100.0, date(2025, 6, 20)),
            quote(OptionType::Put, 100.0, date(2025, 7, 18)),
        ];
        assert!(OptionChain::new("SPY", date(2025, 6, 20), quotes).is_err());
    }

    #[test]
    fn test_from_quotes_groups_and_sorts() {
        let quotes = vec![
            american(OptionType::Call, 100.0, date(2025, 9, 19)),
            american(OptionType::Call, 100.0, date(2025, 6, 20)),
            american(OptionType::Put, 100.0, date(2025, 9, 19)),
        ];
        let chains =
            OptionChains::from_quotes("SPY", 100.0, ExerciseStyle::American, quotes).unwrap();

        assert_eq!(chains.len(), 2);
        assert_eq!(chains.chains()[0].expiry(), date(2025, 6, 20));
        assert_eq!(chains.chains()[1].len(), 2);
        assert!(chains.get(date(2025, 9, 19)).is_some());
        assert!(chains.get(date(2025, 12, 19)).is_none());
        assert_eq!(chains.exercise_style(), ExerciseStyle::American);
    }

    #[test]
    fn test_chains_reject_bad_spot() {
        let err = OptionChains::new("SPY", 0.0, ExerciseStyle::European, vec![]);
        assert!(err.is_err());
    }

    #[test]
    fn test_chains_reject_other_underlying() {
        let qqq = OptionQuote::new("QQQ", OptionType::Call, 400.0, date(2025, 6, 20)).unwrap();
        let err = OptionChains::from_quotes("SPY", 500.0, ExerciseStyle::European, vec![qqq]);
        assert!(err.is_err());
    }

    #[test]
    fn test_chains_reject_mixed_exercise_style() {
        let expiry = date(2025, 6, 20);
        let quotes = vec![
            american(OptionType::Call, 100.0, expiry),
            american(OptionType::Put, 100.0, expiry),
        ];

        let err = OptionChains::from_quotes("SPY", 100.0, ExerciseStyle::European, quotes.clone())
            .unwrap_err();
        assert!(matches!(err, StrataError::Validation { .. }));
        assert!(err.to_string().contains("is american but the chains are european"));

        let mixed = vec![quotes[0].clone(), quote(OptionType::Put, 100.0, expiry)];
        let chain = OptionChain::new("SPY", expiry, mixed).unwrap();
        assert!(OptionChains::new("SPY", 100.0, ExerciseStyle::American, vec![chain]).is_err());
    }
}
