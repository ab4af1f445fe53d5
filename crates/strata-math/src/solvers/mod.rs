//! Root-finding algorithms.
//!
//! - [`brent`]: bracketed, derivative-free root finder combining bisection,
//!   secant and inverse quadratic steps
//!
//! Convergence is declared when half the bracket width falls below
//! `(tolerance + relative_tolerance * |x|) / 2`, so a solve can be bounded
//! in both absolute and relative terms.
//!
//! # Example
//!
//! ```rust
//! use strata_math::solvers::{brent, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let config = SolverConfig::new(1e-12, 50);
//! let result = brent(f, 1.0, 2.0, &config).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;

pub use brent::brent;

/// Default absolute tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default relative tolerance: four machine epsilons.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the root.
    pub tolerance: f64,
    /// Relative tolerance on the root.
    pub relative_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with the default relative tolerance.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> Self {
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_tolerance(1e-5)
            .with_relative_tolerance(1e-4)
            .with_max_iterations(20);

        assert_eq!(config.tolerance, 1e-5);
        assert_eq!(config.relative_tolerance, 1e-4);
        assert_eq!(config.max_iterations, 20);
    }

    #[test]
    fn test_new_keeps_default_relative_tolerance() {
        let config = SolverConfig::new(1e-8, 10);
        assert_eq!(config.relative_tolerance, DEFAULT_RELATIVE_TOLERANCE);
    }
}
