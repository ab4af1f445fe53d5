//! Implied-volatility surface types and construction.

mod builder;
mod ssvi;

pub use builder::{SurfaceFilter, VolatilitySurfaceBuilder};
pub use ssvi::Ssvi;

use serde::{Deserialize, Serialize};
use strata_core::types::{Date, OptionType};

/// Implied volatility of one quoted option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVPoint {
    /// Year fraction to expiry.
    pub maturity: f64,
    /// Strike.
    pub strike: f64,
    /// Option type of the source quote.
    pub option_type: OptionType,
    /// `ln(S / K)`.
    pub spot_moneyness: f64,
    /// `ln(F / K)`.
    pub forward_moneyness: f64,
    /// Implied volatility.
    pub implied_vol: f64,
}

/// Implied vols sharing one expiry, ordered by forward log-moneyness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IVSlice {
    expiry: Date,
    maturity: f64,
    points: Vec<IVPoint>,
}

impl IVSlice {
    /// Creates a slice, sorting points by forward log-moneyness.
    pub fn new(expiry: Date, maturity: f64, mut points: Vec<IVPoint>) -> Self {
        points.sort_by(|a, b| a.forward_moneyness.total_cmp(&b.forward_moneyness));
        Self {
            expiry,
            maturity,
            points,
        }
    }

    /// Expiry date.
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Year fraction to expiry.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Points in moneyness order.
    pub fn points(&self) -> &[IVPoint] {
        &self.points
    }

    /// Forward log-moneyness of each point.
    pub fn moneyness_range(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.forward_moneyness).collect()
    }

    /// Implied vol of each point.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.implied_vol).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the slice has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vol at forward log-moneyness zero, interpolated linearly and held flat
    /// beyond the quoted range.
    pub fn atm_volatility(&self) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if first.forward_moneyness >= 0.0 {
            return Some(first.implied_vol);
        }
        if last.forward_moneyness <= 0.0 {
            return Some(last.implied_vol);
        }

        let i = self.points.partition_point(|p| p.forward_moneyness < 0.0);
        let (lo, hi) = (&self.points[i - 1], &self.points[i]);
        let span = hi.forward_moneyness - lo.forward_moneyness;
        if span <= 0.0 {
            return Some(hi.implied_vol);
        }
        let w = -lo.forward_moneyness / span;
        Some(lo.implied_vol + w * (hi.implied_vol - lo.implied_vol))
    }
}

/// Implied-volatility slices in ascending maturity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IVSurface {
    underlying: String,
    slices: Vec<IVSlice>,
}

impl IVSurface {
    /// Creates a surface, sorting slices by maturity.
    pub fn new(underlying: impl Into<String>, mut slices: Vec<IVSlice>) -> Self {
        slices.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));
        Self {
            underlying: underlying.into(),
            slices,
        }
    }

    /// Underlying ticker.
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Slices in maturity order.
    pub fn slices(&self) -> &[IVSlice] {
        &self.slices
    }

    /// Iterates the slices.
    pub fn iter(&self) -> std::slice::Iter<'_, IVSlice> {
        self.slices.iter()
    }

    /// Slice for an expiry.
    pub fn slice(&self, expiry: Date) -> Option<&IVSlice> {
        self.slices.iter().find(|s| s.expiry == expiry)
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// True if no slice survived.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Total number of points.
    pub fn point_count(&self) -> usize {
        self.slices.iter().map(IVSlice::len).sum()
    }

    /// ATM term structure as `(maturity, vol)` pairs.
    pub fn atm_term_structure(&self) -> Vec<(f64, f64)> {
        self.slices
            .iter()
            .filter_map(|s| s.atm_volatility().map(|v| (s.maturity, v)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a IVSurface {
    type Item = &'a IVSlice;
    type IntoIter = std::slice::Iter<'a, IVSlice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}
