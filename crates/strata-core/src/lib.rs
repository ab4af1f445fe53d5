//! # Strata Core
//!
//! Core types shared by every crate of the Strata risk-factor library.
//!
//! This crate provides the foundational building blocks:
//!
//! - **Types**: `Date`, `YieldPoint`, option quotes and chains
//! - **Day Count Conventions**: year fractions, including the 252 trading-day
//!   basis used for listed option expiries
//! - **Errors**: the shared [`StrataError`] type
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let as_of = Date::from_ymd(2025, 5, 15).unwrap();
//! let expiry = Date::from_ymd(2025, 8, 15).unwrap();
//! let t = TradingDays252.year_fraction(as_of, expiry);
//! assert!((t - 92.0 / 252.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act365Fixed, DayCount, DayCountConvention, TradingDays252};
    pub use crate::error::{StrataError, StrataResult};
    pub use crate::types::{
        AtmPair, Date, ExerciseStyle, OptionChain, OptionChains, OptionQuote, OptionType,
        YieldPoint,
    };
}

// Re-export commonly used types at crate root
pub use error::{StrataError, StrataResult};
pub use types::{Date, ExerciseStyle, OptionType, YieldPoint};
