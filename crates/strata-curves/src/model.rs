//! The curve model seam.
//!
//! A [`CurveModel`] is a fitted function from maturity (in years) to rate.
//! The concrete models form a closed set, [`FittedModel`], so a fitted curve
//! serialises together with its model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::nelson_siegel::{NelsonSiegel, NelsonSiegelFit};
use crate::piecewise::PiecewiseLinear;

/// A fitted term-structure model.
pub trait CurveModel: Send + Sync + fmt::Debug {
    /// Returns the model rate at maturity `t` (years).
    fn value(&self, t: f64) -> f64;

    /// Short model name, used in logs.
    fn name(&self) -> &'static str;
}

/// A fitted model attached to a [`Curve`](crate::Curve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FittedModel {
    /// Nelson-Siegel parametric fit.
    NelsonSiegel(NelsonSiegel),
    /// Piecewise-linear interpolation through the curve points.
    PiecewiseLinear(PiecewiseLinear),
}

impl FittedModel {
    /// Root-mean-square fit error, if the model reports one.
    pub fn rmse(&self) -> Option<f64> {
        match self {
            Self::NelsonSiegel(ns) => ns.rmse(),
            Self::PiecewiseLinear(_) => None,
        }
    }
}

impl CurveModel for FittedModel {
    fn value(&self, t: f64) -> f64 {
        match self {
            Self::NelsonSiegel(ns) => ns.value(t),
            Self::PiecewiseLinear(pl) => pl.value(t),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::NelsonSiegel(ns) => ns.name(),
            Self::PiecewiseLinear(pl) => pl.name(),
        }
    }
}

/// How to fit a model to a set of curve points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CurveFitMethod {
    /// Least-squares Nelson-Siegel fit.
    NelsonSiegel(NelsonSiegelFit),
    /// Exact piecewise-linear interpolation.
    PiecewiseLinear,
}

impl Default for CurveFitMethod {
    fn default() -> Self {
        Self::NelsonSiegel(NelsonSiegelFit::default())
    }
}

impl CurveFitMethod {
    /// Fits a model to `(tenors, values)`.
    pub fn fit(&self, tenors: &[f64], values: &[f64]) -> CurveResult<FittedModel> {
        match self {
            Self::NelsonSiegel(settings) => {
                NelsonSiegel::fit(tenors, values, settings).map(FittedModel::NelsonSiegel)
            }
            Self::PiecewiseLinear => PiecewiseLinear::new(tenors.to_vec(), values.to_vec())
                .map(FittedModel::PiecewiseLinear),
        }
    }
}

impl fmt::Display for CurveFitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NelsonSiegel(_) => write!(f, "nelson_siegel"),
            Self::PiecewiseLinear => write!(f, "piecewise_linear"),
        }
    }
}
