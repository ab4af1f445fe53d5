//! Optimization algorithms.
//!
//! This module provides derivative-free minimisation for parametric curve
//! fitting. Objectives are evaluated as `Fn(&[f64]) -> f64`; `NaN` values are
//! treated as `+inf` so a model that breaks down at some parameters simply
//! loses every comparison there.

mod nelder_mead;

pub use nelder_mead::nelder_mead;

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    /// Convergence threshold on the spread of objective values in the simplex.
    pub tolerance: f64,
    /// Convergence threshold on the spread of simplex vertices (per coordinate).
    pub parameter_tolerance: f64,
    /// Maximum number of iterations, summed over restarts.
    pub max_iterations: u32,
    /// Relative size of the initial simplex around a non-zero coordinate.
    pub initial_step: f64,
    /// Number of restarts from the best vertex after convergence.
    pub max_restarts: u32,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            parameter_tolerance: 1e-8,
            max_iterations: 5_000,
            initial_step: 0.05,
            max_restarts: 2,
        }
    }
}

impl OptimizationConfig {
    /// Sets the objective tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the parameter tolerance.
    #[must_use]
    pub fn with_parameter_tolerance(mut self, tolerance: f64) -> Self {
        self.parameter_tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the number of restarts.
    #[must_use]
    pub fn with_max_restarts(mut self, max_restarts: u32) -> Self {
        self.max_restarts = max_restarts;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}
