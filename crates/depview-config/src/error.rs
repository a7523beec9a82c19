//! Error types for configuration loading, validation and resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Discovery and loading
    #[error("no depview.toml found in {0}")]
    NotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("invalid config value for '{field}'")]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation (no graph construction)
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Reference resolution
    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    #[error("unknown relation set '{0}'")]
    UnknownRelationSet(String),

    #[error("unknown matcher '{0}'")]
    UnknownMatcher(String),

    #[error("invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Graph(#[from] depview_graph::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn schema(message: impl Into<String>, hint: impl Into<String>) -> Self {
        ConfigError::SchemaValidation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Suggested fix, when one is known.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { hint, .. } | ConfigError::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            ConfigError::NotFound(_) => Some("Create a depview.toml or pass --config <FILE>"),
            _ => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Load(error.to_string())
    }
}
