//! Integration test: par Treasury curve to fitted spot curve.
//!
//! Market Data: May 15, 2025 (par yields, semiannual)
//!
//! | Tenor | Yield   |
//! |-------|---------|
//! | 1M    | 4.360%  |
//! | 3M    | 4.400%  |
//! | 6M    | 4.320%  |
//! | 1Y    | 4.120%  |
//! | 2Y    | 3.980%  |
//! | 3Y    | 3.960%  |
//! | 5Y    | 4.100%  |
//! | 7Y    | 4.280%  |
//! | 10Y   | 4.450%  |
//! | 20Y   | 4.930%  |
//! | 30Y   | 4.890%  |

use approx::assert_relative_eq;
use strata_core::{Date, YieldPoint};
use strata_curves::nelson_siegel::NelsonSiegelFit;
use strata_curves::prelude::*;

const PAR_CURVE: [(f64, f64); 11] = [
    (1.0 / 12.0, 0.0436),
    (0.25, 0.0440),
    (0.5, 0.0432),
    (1.0, 0.0412),
    (2.0, 0.0398),
    (3.0, 0.0396),
    (5.0, 0.0410),
    (7.0, 0.0428),
    (10.0, 0.0445),
    (20.0, 0.0493),
    (30.0, 0.0489),
];

fn as_of() -> Date {
    Date::from_ymd(2025, 5, 15).unwrap()
}

fn par_curve() -> Curve {
    let points = PAR_CURVE
        .iter()
        .map(|&(t, r)| YieldPoint::new(t, r, as_of()).unwrap())
        .collect();
    Curve::new(points, CurveKind::Par).unwrap()
}

#[test]
fn test_nelson_siegel_par_fit() {
    let fitted = par_curve()
        .fit(&CurveFitMethod::NelsonSiegel(NelsonSiegelFit::default()))
        .unwrap();

    let rmse = fitted.model().and_then(FittedModel::rmse).unwrap();
    assert!(rmse < 2e-3, "rmse {rmse}");
    // Long end level stays in a plausible range
    let long = fitted.value(30.0).unwrap();
    assert!(long > 0.04 && long < 0.055, "30y {long}");
}

#[test]
fn test_spot_curve_from_fitted_par() {
    let par = par_curve().fit(&CurveFitMethod::default()).unwrap();
    let spot = SpotCurveBootstrapper::default().bootstrap(&par).unwrap();

    assert_eq!(spot.len(), 61);
    assert_eq!(spot.kind(), CurveKind::Spot);
    assert_eq!(spot.evaluation_date(), as_of());

    let tenors = spot.tenors();
    assert!(tenors.windows(2).all(|w| w[0] < w[1]));
    assert_relative_eq!(tenors[0], 1.0 / 12.0);
    assert_relative_eq!(tenors[60], 30.0, epsilon = 1e-12);

    // One month comes straight from the first raw par quote
    assert_relative_eq!(
        spot.points()[0].rate,
        12.0 * (1.0 + 0.0436 / 12.0f64).ln(),
        epsilon = 1e-14
    );

    // Continuous spot rates sit close to the par level
    for p in spot.points() {
        assert!(p.rate > 0.03 && p.rate < 0.06, "{} -> {}", p.maturity, p.rate);
    }
}

#[test]
fn test_spot_curve_refit_piecewise() {
    let par = par_curve().fit(&CurveFitMethod::default()).unwrap();
    let spot = SpotCurveBootstrapper::default()
        .bootstrap(&par)
        .unwrap()
        .fit(&CurveFitMethod::PiecewiseLinear)
        .unwrap();

    for p in spot.points() {
        assert_eq!(spot.value(p.maturity).unwrap(), p.rate);
    }
    assert_eq!(spot.value(0.0).unwrap(), spot.points()[0].rate);
    assert_eq!(spot.value(50.0).unwrap(), spot.points()[60].rate);
}

#[test]
fn test_flat_par_curve_strips_flat() {
    let y = 0.05;
    let par = Curve::from_pairs(&[0.5, 5.0, 30.0], &[y, y, y], as_of(), CurveKind::Par)
        .unwrap()
        .fit(&CurveFitMethod::PiecewiseLinear)
        .unwrap();
    let spot = SpotCurveBootstrapper::new(BootstrapConfig::new(10.0, 0.5))
        .bootstrap(&par)
        .unwrap();

    assert_eq!(spot.len(), 21);
    let expected = 2.0 * (1.0 + y / 2.0f64).ln();
    for p in &spot.points()[1..] {
        assert_relative_eq!(p.rate, expected, epsilon = 1e-10);
    }
}
