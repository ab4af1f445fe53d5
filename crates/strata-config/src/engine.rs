//! Top-level configuration of the risk-factor engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCountConvention;
use strata_options::dividend::DividendCurveConfig;
use strata_options::implied_vol::ImpliedVolConfig;
use strata_options::parallel::ParallelConfig;
use strata_options::pricing::{CoxRossRubinstein, PricerConfig};
use strata_options::surface::SurfaceFilter;

use crate::curves::CurvesConfig;
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Every tunable of the pipeline. Missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use strata_config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(
///     r#"
///     [pricer]
///     binomial_steps = 500
///
///     [curves.spot_fit]
///     method = "nelson_siegel"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.pricer.binomial_steps, 500);
/// assert_eq!(config.surface.min_volume, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Curve fitting and bootstrap.
    #[serde(default)]
    pub curves: CurvesConfig,
    /// Option pricers.
    #[serde(default)]
    pub pricer: PricerConfig,
    /// Implied volatility search.
    #[serde(default)]
    pub implied_vol: ImpliedVolConfig,
    /// Dividend curve builder.
    #[serde(default)]
    pub dividend: DividendCurveConfig,
    /// Surface quote filter.
    #[serde(default)]
    pub surface: SurfaceFilter,
    /// Parallel processing of chains.
    #[serde(default)]
    pub parallel: ParallelConfig,
    /// Year fractions for option expiries.
    #[serde(default)]
    pub day_count: DayCountConvention,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.json` or `.toml` file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        log::debug!("loading engine configuration from {display}");
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&text),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text),
            _ => Err(ConfigError::UnsupportedFormat { path: display }),
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(self.curves.validate().into_iter().map(|e| e.within("curves")));
        errors.extend(self.pricer.validate().into_iter().map(|e| e.within("pricer")));
        errors.extend(
            self.implied_vol
                .validate()
                .into_iter()
                .map(|e| e.within("implied_vol")),
        );
        errors.extend(self.dividend.validate().into_iter().map(|e| e.within("dividend")));
        errors.extend(self.surface.validate().into_iter().map(|e| e.within("surface")));
        errors
    }
}

impl Validate for PricerConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(1..=CoxRossRubinstein::MAX_STEPS).contains(&self.binomial_steps) {
            errors.push(ValidationError::with_rule(
                "binomial_steps",
                format!(
                    "Binomial steps must be between 1 and {}",
                    CoxRossRubinstein::MAX_STEPS
                ),
                "valid_steps",
            ));
        }

        let b = &self.bumps;
        for (name, bump) in [
            ("bumps.spot", b.spot),
            ("bumps.volatility", b.volatility),
            ("bumps.rate", b.rate),
            ("bumps.time", b.time),
        ] {
            if !(bump > 0.0 && bump.is_finite()) {
                errors.push(ValidationError::with_rule(
                    name,
                    format!("Bump must be positive, got {bump}"),
                    "positive_bump",
                ));
            }
        }

        errors
    }
}

impl Validate for ImpliedVolConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.lower_bound > 0.0 && self.lower_bound < self.upper_bound) {
            errors.push(ValidationError::with_rule(
                "lower_bound",
                format!(
                    "Volatility bracket [{}, {}] must be positive and ordered",
                    self.lower_bound, self.upper_bound
                ),
                "valid_bracket",
            ));
        }

        if !(self.guess_lower_factor > 0.0 && self.guess_lower_factor < self.guess_upper_factor) {
            errors.push(ValidationError::with_rule(
                "guess_lower_factor",
                "Guess band factors must be positive and ordered",
                "valid_bracket",
            ));
        }

        if !(self.tolerance > 0.0) || self.relative_tolerance < 0.0 {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Tolerance must be positive",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be at least 1",
                "valid_iterations",
            ));
        }

        errors
    }
}

impl Validate for DividendCurveConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.min_year_fraction >= 0.0) {
            errors.push(ValidationError::new(
                "min_year_fraction",
                "Minimum year fraction cannot be negative",
            ));
        }

        if !(self.min_quote_price >= 0.0) {
            errors.push(ValidationError::new(
                "min_quote_price",
                "Minimum quote price cannot be negative",
            ));
        }

        if !(self.tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Tolerance must be positive",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be at least 1",
                "valid_iterations",
            ));
        }

        errors
    }
}

impl Validate for SurfaceFilter {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.min_last_price >= 0.0) {
            errors.push(ValidationError::new(
                "min_last_price",
                "Minimum last price cannot be negative",
            ));
        }

        if self.max_staleness_days < 0 {
            errors.push(ValidationError::new(
                "max_staleness_days",
                "Staleness window cannot be negative",
            ));
        }

        errors
    }
}
