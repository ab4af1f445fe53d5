//! Strata Configuration Layer
//!
//! Configuration for the Strata risk-factor pipeline. [`EngineConfig`]
//! aggregates every tunable (curve fits, bootstrap grid, pricer, implied
//! volatility search, dividend and surface builders, parallelism) with a
//! default for each field, so a configuration file only lists what it
//! changes.
//!
//! # Features
//!
//! - **JSON and TOML**: [`EngineConfig::from_json_str`],
//!   [`EngineConfig::from_toml_str`] and [`EngineConfig::from_path`]
//! - **Validation**: the [`Validate`] trait reports every problem with a
//!   dotted field path; loading fails on the first invalid configuration
//!
//! # Example
//!
//! ```rust
//! use strata_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_json_str(r#"{"dividend": {"max_iterations": 50}}"#).unwrap();
//! assert_eq!(config.dividend.max_iterations, 50);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod curves;
pub mod engine;
pub mod error;

pub use curves::CurvesConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
