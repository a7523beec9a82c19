//! File-based config discovery for CLI use
//!
//! Finds `depview.toml` and layers environment overrides on top of it.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};

use crate::config::AnalysisConfig;
use crate::error::{ConfigError, Result};

/// Conventional config file name.
pub const CONFIG_FILE: &str = "depview.toml";

/// Prefix of environment overrides; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "DEPVIEW_";

/// File-based configuration discovery
///
/// Environment variables such as `DEPVIEW_SETTINGS__LOG_LEVEL=debug`
/// override values from the file.
///
/// # Example
///
/// ```no_run
/// use depview_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    env_prefix: String,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The config file in the root directory, if present.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load the discovered config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the root has no config file.
    pub fn load(&self) -> Result<AnalysisConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        self.load_from(&path)
    }

    /// Load a specific file, still applying environment overrides.
    pub fn load_from(&self, path: &Path) -> Result<AnalysisConfig> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let config: AnalysisConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(&self.env_prefix).split("__"))
            .extract()?;

        tracing::debug!(
            path = %path.display(),
            relations = config.relations.len(),
            filters = config.filters.len(),
            "loaded configuration"
        );
        Ok(config)
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<AnalysisConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
