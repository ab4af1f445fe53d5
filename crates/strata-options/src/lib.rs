//! # Strata Options
//!
//! Option pricing and the option-derived risk factors of Strata.
//!
//! This crate provides:
//!
//! - **Pricers**: [`OptionModel`] with a Black-Scholes-Merton closed form and
//!   a Cox-Ross-Rubinstein American tree, selected by [`OptionPricer`]
//! - **Greeks and implied volatility**: finite differences and a Brent search
//!   on top of any pricer
//! - **Dividend curve**: [`DividendCurveBuilder`], implied yields from ATM
//!   put/call parity (fixed point for American chains)
//! - **Volatility surface**: [`VolatilitySurfaceBuilder`] and the
//!   [`IVSurface`] types, plus an SSVI slice model
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_core::OptionType;
//! use strata_options::prelude::*;
//!
//! let model = BlackScholesMerton::new();
//! let params = PricingParams::new(100.0, 100.0, 0.05, 1.0, 0.2, 0.0);
//!
//! let price = model.price(OptionType::Call, &params);
//! let iv = model
//!     .implied_volatility(OptionType::Call, price, &params, None, &ImpliedVolConfig::default())
//!     .unwrap();
//! assert!((iv - 0.2).abs() < 1e-4);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: process large chains with rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod dividend;
pub mod error;
pub mod implied_vol;
pub mod parallel;
pub mod params;
pub mod pricing;
pub mod surface;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dividend::{DividendCurveBuilder, DividendCurveConfig, DividendEstimate};
    pub use crate::error::{OptionsError, OptionsResult};
    pub use crate::implied_vol::ImpliedVolConfig;
    pub use crate::parallel::ParallelConfig;
    pub use crate::params::PricingParams;
    pub use crate::pricing::{
        BlackScholesMerton, CoxRossRubinstein, GreekBumps, Greeks, OptionModel, OptionPricer,
        PricerConfig,
    };
    pub use crate::surface::{
        IVPoint, IVSlice, IVSurface, Ssvi, SurfaceFilter, VolatilitySurfaceBuilder,
    };
}

pub use dividend::{DividendCurveBuilder, DividendCurveConfig, DividendEstimate};
pub use error::{OptionsError, OptionsResult};
pub use implied_vol::ImpliedVolConfig;
pub use parallel::ParallelConfig;
pub use params::PricingParams;
pub use pricing::{OptionModel, OptionPricer, PricerConfig};
pub use surface::{IVSurface, SurfaceFilter, VolatilitySurfaceBuilder};
