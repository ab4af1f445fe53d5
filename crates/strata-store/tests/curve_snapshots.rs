//! Fitted curves survive a trip through the file store.

use std::sync::Arc;

use strata_core::Date;
use strata_curves::{Curve, CurveFitMethod, CurveKind};
use strata_store::{
    load_json, store_json, FileSnapshotStore, MemorySnapshotStore, SnapshotKey, SnapshotKind,
    SnapshotStore,
};

fn dividend_curve() -> Curve {
    let date = Date::from_ymd(2025, 5, 15).unwrap();
    Curve::from_pairs(
        &[0.25, 0.5, 1.0, 2.0],
        &[0.011, 0.0125, 0.014, 0.015],
        date,
        CurveKind::Dividend,
    )
    .unwrap()
    .fit(&CurveFitMethod::PiecewiseLinear)
    .unwrap()
}

#[test]
fn file_store_round_trips_fitted_curve() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    let curve = dividend_curve();
    let key = SnapshotKey::for_underlying(SnapshotKind::DividendCurve, "SPY", curve.evaluation_date());

    store_json(&store, &key, &curve).unwrap();
    assert!(dir.path().join("dividend_curve_SPY_2025-05-15.json").is_file());

    let loaded: Curve = load_json(&store, &key).unwrap().unwrap();
    assert_eq!(loaded, curve);
    assert_eq!(loaded.value(0.75).unwrap(), curve.value(0.75).unwrap());
}

#[test]
fn reopened_store_sees_earlier_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let curve = dividend_curve();
    let key = SnapshotKey::for_underlying(SnapshotKind::DividendCurve, "SPY", curve.evaluation_date());

    {
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        store_json(&store, &key, &curve).unwrap();
    }

    let reopened = FileSnapshotStore::new(dir.path()).unwrap();
    assert!(reopened.contains(&key).unwrap());
}

#[test]
fn stores_are_usable_as_trait_objects() {
    let dir = tempfile::tempdir().unwrap();
    let stores: Vec<Arc<dyn SnapshotStore>> = vec![
        Arc::new(MemorySnapshotStore::new()),
        Arc::new(FileSnapshotStore::new(dir.path()).unwrap()),
    ];
    let curve = dividend_curve();
    let key = SnapshotKey::for_underlying(SnapshotKind::DividendCurve, "QQQ", curve.evaluation_date());

    for store in &stores {
        store_json(store.as_ref(), &key, &curve).unwrap();
        let loaded: Option<Curve> = load_json(store.as_ref(), &key).unwrap();
        assert_eq!(loaded.as_ref(), Some(&curve), "backend {}", store.backend_name());
    }
}
