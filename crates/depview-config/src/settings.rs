//! Global settings shared by every command.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default log filter when neither `RUST_LOG` nor a verbosity flag is set.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Evaluate filter pipelines on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}
