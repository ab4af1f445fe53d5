//! Domain types for option risk-factor construction.
//!
//! - [`Date`]: calendar date for snapshots and expiries
//! - [`YieldPoint`]: a rate at one maturity
//! - [`OptionQuote`], [`OptionChain`], [`OptionChains`]: listed option data

mod chain;
mod date;
mod option;
mod yield_point;

pub use chain::{AtmPair, OptionChain, OptionChains};
pub use date::Date;
pub use option::{ExerciseStyle, OptionQuote, OptionType};
pub use yield_point::YieldPoint;
