//! Strata Risk-Factor Engine
//!
//! Orchestrates the full construction of option risk factors for one
//! underlying and snapshot date:
//!
//! 1. Fit the par curve (Nelson-Siegel by default)
//! 2. Bootstrap the spot curve from the par model and fit it
//! 3. Imply the dividend yield term structure from the option chains
//! 4. Invert every eligible quote to an implied volatility surface
//!
//! Each stage can be run alone, or all of them through
//! [`RiskFactorEngine::run`]. Attaching a
//! [`SnapshotStore`](strata_store::SnapshotStore) makes every stage
//! load-or-build and records the input chains.
//!
//! # Example
//!
//! ```rust
//! use strata_config::EngineConfig;
//! use strata_core::Date;
//! use strata_curves::{Curve, CurveFitMethod, CurveKind};
//! use strata_engine::RiskFactorEngine;
//!
//! let mut config = EngineConfig::default();
//! config.curves.par_fit = CurveFitMethod::PiecewiseLinear;
//! let engine = RiskFactorEngine::new(config).unwrap();
//!
//! let date = Date::from_ymd(2025, 5, 15).unwrap();
//! let par = Curve::from_pairs(&[1.0, 5.0, 10.0], &[0.04, 0.04, 0.04], date, CurveKind::Par).unwrap();
//!
//! let spot = engine.build_spot_curve(&par).unwrap();
//! assert!(spot.is_fitted());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod error;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{RiskFactorEngine, RiskFactors};
    pub use crate::error::{EngineError, EngineResult};
}

pub use engine::{RiskFactorEngine, RiskFactors};
pub use error::{EngineError, EngineResult};
