//! Piecewise-linear curve model.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::model::CurveModel;

/// Linear interpolation through a set of control points, flat outside them.
///
/// # Example
///
/// ```rust
/// use strata_curves::prelude::*;
///
/// let pl = PiecewiseLinear::new(vec![1.0, 2.0, 5.0], vec![0.02, 0.03, 0.035]).unwrap();
/// assert!((pl.value(1.5) - 0.025).abs() < 1e-12);
/// assert_eq!(pl.value(0.1), 0.02);
/// assert_eq!(pl.value(10.0), 0.035);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPiecewiseLinear")]
pub struct PiecewiseLinear {
    tenors: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawPiecewiseLinear {
    tenors: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawPiecewiseLinear> for PiecewiseLinear {
    type Error = CurveError;

    fn try_from(raw: RawPiecewiseLinear) -> Result<Self, Self::Error> {
        Self::new(raw.tenors, raw.values)
    }
}

impl PiecewiseLinear {
    /// Creates a piecewise-linear model.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are empty, differ in length, or the
    /// tenors are not strictly increasing.
    pub fn new(tenors: Vec<f64>, values: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() != values.len() {
            return Err(CurveError::length_mismatch(tenors.len(), values.len()));
        }
        if tenors.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        if let Some(i) = tenors.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CurveError::non_monotonic_tenors(
                i + 1,
                tenors[i],
                tenors[i + 1],
            ));
        }
        Ok(Self { tenors, values })
    }

    /// Control-point tenors.
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Control-point values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl CurveModel for PiecewiseLinear {
    fn value(&self, t: f64) -> f64 {
        let n = self.tenors.len();
        if t <= self.tenors[0] {
            return self.values[0];
        }
        if t >= self.tenors[n - 1] {
            return self.values[n - 1];
        }

        // First index with tenor > t; 1 <= i <= n-1 here
        let i = self.tenors.partition_point(|&x| x <= t);
        let (t0, t1) = (self.tenors[i - 1], self.tenors[i]);
        let (v0, v1) = (self.values[i - 1], self.values[i]);
        v0 + (v1 - v0) * (t - t0) / (t1 - t0)
    }

    fn name(&self) -> &'static str {
        "piecewise_linear"
    }
}
