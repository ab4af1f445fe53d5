//! # Strata Math
//!
//! Numerical building blocks for the Strata risk-factor library.
//!
//! This crate provides:
//!
//! - **Solvers**: Brent's bracketed root finder with absolute and relative
//!   tolerances
//! - **Optimization**: bounded Nelder-Mead simplex minimisation for
//!   parametric curve fits
//! - **Distributions**: standard normal density and cumulative distribution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod optimization;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{nelder_mead, OptimizationConfig, OptimizationResult};
    pub use crate::solvers::{brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
