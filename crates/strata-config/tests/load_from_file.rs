//! Loading engine configuration from files on disk.

use std::io::Write;

use strata_config::{ConfigError, EngineConfig};
use strata_curves::CurveFitMethod;
use tempfile::Builder;

#[test]
fn test_load_toml_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[curves.par_fit]
method = "nelson_siegel"
max_iterations = 20000

[curves.spot_fit]
method = "piecewise_linear"

[pricer]
binomial_steps = 300

[parallel]
enabled = false
"#
    )
    .unwrap();

    let config = EngineConfig::from_path(file.path()).unwrap();
    match &config.curves.par_fit {
        CurveFitMethod::NelsonSiegel(fit) => {
            assert_eq!(fit.max_iterations, 20_000);
            assert_eq!(fit.initial_guess, [0.03, -0.02, 0.02, 2.0]);
        }
        CurveFitMethod::PiecewiseLinear => panic!("expected Nelson-Siegel"),
    }
    assert_eq!(config.pricer.binomial_steps, 300);
    assert!(!config.parallel.enabled);
}

#[test]
fn test_load_json_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"surface": {{"min_volume": 25}}}}"#).unwrap();

    let config = EngineConfig::from_path(file.path()).unwrap();
    assert_eq!(config.surface.min_volume, 25);
}

#[test]
fn test_unknown_extension() {
    let file = Builder::new().suffix(".yaml").tempfile().unwrap();
    let err = EngineConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
