//! # Strata Curves
//!
//! Curve models and curve construction for the Strata risk-factor library.
//!
//! This crate provides:
//!
//! - **Curve models**: the [`CurveModel`] trait with Nelson-Siegel and
//!   piecewise-linear implementations
//! - **Curves**: [`Curve`], a validated set of yield points with an optional
//!   fitted model
//! - **Bootstrap**: [`SpotCurveBootstrapper`], coupon stripping of a par
//!   curve into a continuously compounded spot curve
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_core::{Date, YieldPoint};
//! use strata_curves::prelude::*;
//!
//! let as_of = Date::from_ymd(2025, 5, 15).unwrap();
//! let par = [(1.0 / 12.0, 0.0436), (0.5, 0.0432), (1.0, 0.0412), (2.0, 0.0398),
//!            (5.0, 0.0410), (10.0, 0.0445), (30.0, 0.0489)];
//! let points = par
//!     .iter()
//!     .map(|&(t, r)| YieldPoint::new(t, r, as_of).unwrap())
//!     .collect();
//!
//! let par_curve = Curve::new(points, CurveKind::Par)
//!     .unwrap()
//!     .fit(&CurveFitMethod::PiecewiseLinear)
//!     .unwrap();
//!
//! let spot_curve = SpotCurveBootstrapper::default().bootstrap(&par_curve).unwrap();
//! assert_eq!(spot_curve.len(), 61);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod curve;
pub mod error;
pub mod model;
pub mod nelson_siegel;
pub mod piecewise;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapConfig, SpotCurveBootstrapper};
    pub use crate::curve::{Curve, CurveKind};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::model::{CurveFitMethod, CurveModel, FittedModel};
    pub use crate::nelson_siegel::{NelsonSiegel, NelsonSiegelFit};
    pub use crate::piecewise::PiecewiseLinear;
}

pub use bootstrap::{BootstrapConfig, SpotCurveBootstrapper};
pub use curve::{Curve, CurveKind};
pub use error::{CurveError, CurveResult};
pub use model::{CurveFitMethod, CurveModel, FittedModel};
