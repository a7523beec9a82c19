//! Configuration for depview: relations, relation sets, matchers, filter
//! pipelines, models and analysis documents.
//!
//! Load an [`AnalysisConfig`] with [`ConfigDiscovery`] or
//! [`AnalysisConfig::from_toml_str`], then call [`AnalysisConfig::resolve`]
//! to validate it and build a [`ResolvedConfig`].

pub mod config;
pub mod discovery;
pub mod error;
pub mod resolve;
pub mod settings;
pub mod validation;

pub use config::*;
pub use error::*;
pub use resolve::ResolvedConfig;
pub use settings::Settings;

pub use discovery::{CONFIG_FILE, ConfigDiscovery, ENV_PREFIX, discover};
pub use validation::{ConfigValidator, SchemaValidator, validate_schema};
