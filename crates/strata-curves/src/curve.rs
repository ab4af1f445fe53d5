//! Validated curves of yield points.

use std::fmt;

use serde::{Deserialize, Serialize};
use strata_core::types::{Date, YieldPoint};

use crate::error::{CurveError, CurveResult};
use crate::model::{CurveFitMethod, CurveModel, FittedModel};

/// What the rates of a curve represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Par yields (semiannual coupon).
    Par,
    /// Continuously compounded zero-coupon rates.
    Spot,
    /// Continuous dividend yields.
    Dividend,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Par => "par",
            Self::Spot => "spot",
            Self::Dividend => "dividend",
        };
        write!(f, "{name}")
    }
}

/// An ordered set of yield points sharing one evaluation date, with an
/// optional fitted model.
///
/// Points are sorted by maturity on construction and maturities are unique.
/// A curve never changes once built: [`fit`](Curve::fit) returns a new curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct Curve {
    kind: CurveKind,
    evaluation_date: Date,
    points: Vec<YieldPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<FittedModel>,
}

#[derive(Deserialize)]
struct RawCurve {
    kind: CurveKind,
    points: Vec<YieldPoint>,
    #[serde(default)]
    model: Option<FittedModel>,
}

impl TryFrom<RawCurve> for Curve {
    type Error = CurveError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        let mut curve = Self::new(raw.points, raw.kind)?;
        curve.model = raw.model;
        Ok(curve)
    }
}

impl Curve {
    /// Builds a curve from yield points.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty, the points disagree on the
    /// evaluation date, a value is not finite, or two points share a maturity.
    pub fn new(mut points: Vec<YieldPoint>, kind: CurveKind) -> CurveResult<Self> {
        let Some(first) = points.first() else {
            return Err(CurveError::insufficient_points(1, 0));
        };
        let evaluation_date = first.evaluation_date;

        for p in &points {
            if p.evaluation_date != evaluation_date {
                return Err(CurveError::evaluation_date_mismatch(
                    evaluation_date,
                    p.evaluation_date,
                ));
            }
            if !p.maturity.is_finite() || !p.rate.is_finite() {
                return Err(CurveError::invalid_value(format!(
                    "{kind} curve point ({}, {}) is not finite",
                    p.maturity, p.rate
                )));
            }
        }

        points.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));
        if let Some(i) = points
            .windows(2)
            .position(|w| w[1].maturity <= w[0].maturity)
        {
            return Err(CurveError::non_monotonic_tenors(
                i + 1,
                points[i].maturity,
                points[i + 1].maturity,
            ));
        }

        Ok(Self {
            kind,
            evaluation_date,
            points,
            model: None,
        })
    }

    /// Builds a curve from parallel maturity and rate slices.
    pub fn from_pairs(
        maturities: &[f64],
        rates: &[f64],
        evaluation_date: Date,
        kind: CurveKind,
    ) -> CurveResult<Self> {
        if maturities.len() != rates.len() {
            return Err(CurveError::length_mismatch(maturities.len(), rates.len()));
        }
        let points = maturities
            .iter()
            .zip(rates)
            .map(|(&t, &r)| YieldPoint::new(t, r, evaluation_date))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points, kind)
    }

    /// Fits `method` to the curve points and returns the fitted curve.
    pub fn fit(&self, method: &CurveFitMethod) -> CurveResult<Self> {
        let model = method.fit(&self.tenors(), &self.values())?;
        log::debug!(
            "fitted {} curve ({} points) with {}",
            self.kind,
            self.points.len(),
            model.name()
        );
        Ok(Self {
            model: Some(model),
            ..self.clone()
        })
    }

    /// Attaches an already fitted model.
    #[must_use]
    pub fn with_model(mut self, model: FittedModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Evaluates the fitted model at maturity `t`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotFitted` if no model is attached.
    pub fn value(&self, t: f64) -> CurveResult<f64> {
        self.model
            .as_ref()
            .map(|m| m.value(t))
            .ok_or_else(|| CurveError::NotFitted {
                kind: self.kind.to_string(),
            })
    }

    /// Curve kind.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Evaluation date shared by all points.
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Points sorted by maturity.
    pub fn points(&self) -> &[YieldPoint] {
        &self.points
    }

    /// Maturities in ascending order.
    pub fn tenors(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.maturity).collect()
    }

    /// Rates in maturity order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve has at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The fitted model, if any.
    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    /// Whether a model is attached.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}
