//! Error types for graph configuration and construction.
//!
//! Evaluation never fails: an unmatched model or an unknown relation is a
//! normal `false`. Only construction-time problems surface here.

use thiserror::Error;

/// Result type alias for depview-graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for depview-graph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed configuration or an attempt to overwrite a read-only value.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A relation identifier could not be resolved.
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    /// An edge or query referenced a node the graph does not hold.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// A dependency model with the same id is already registered.
    #[error("Dependency model already registered: {0}")]
    DuplicateModel(String),

    /// A persistence shape could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns `true` for errors raised while building configuration objects.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::Serialization(_))
    }

    pub(crate) fn read_only(key: &str) -> Self {
        Error::Configuration(format!("property '{key}' is read-only"))
    }
}
