//! Conditional parallel iteration.
//!
//! Per-option and per-expiry work is independent once the curves are fitted.
//! With the `parallel` feature enabled, collections above the configured
//! threshold are processed with rayon; everything else runs sequentially.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_threshold() -> usize {
    64
}

/// When to switch to parallel iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Allow parallel processing (requires the `parallel` feature).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Minimum collection size that runs in parallel.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            threshold: default_threshold(),
        }
    }
}

impl ParallelConfig {
    /// Never parallelise.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            threshold: usize::MAX,
        }
    }

    /// Sets the size threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Whether a collection of `len` items should be processed in parallel.
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.enabled && len >= self.threshold
    }
}

/// Maps `f` over `items`, in parallel when the config allows it.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ParallelConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Filters and maps `items`, in parallel when the config allows it.
///
/// Output order follows input order in both modes.
#[allow(unused_variables)]
pub fn maybe_parallel_filter_map<T, U, F>(items: &[T], config: &ParallelConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Option<U> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().filter_map(f).collect();
        }
    }

    items.iter().filter_map(f).collect()
}
