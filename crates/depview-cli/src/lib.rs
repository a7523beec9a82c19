//! depview CLI.
//!
//! - [`cli`] - clap argument definitions
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages on stderr
//! - `commands` - command implementations

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::Result;
use depview_config::{AnalysisConfig, ConfigError};

/// Run a parsed command line against an already loaded configuration.
///
/// Loading happens before logging is set up (the file may choose the log
/// level), so a load failure is passed in and reported here.
pub fn run(args: &cli::Cli, config: Result<AnalysisConfig>) -> Result<()> {
    let config = config?;
    match &args.command {
        cli::Command::Check(check) => commands::check::execute(check, &config),
        cli::Command::Select(select) => commands::select::execute(select, &config),
        cli::Command::Filter(filter) => commands::filter::execute(filter, &config),
        cli::Command::Reach(reach) => commands::reach::execute(reach, &config),
    }
}

/// Hint attached to the first configuration error in the chain, if any.
pub fn error_hint(error: &anyhow::Error) -> Option<&str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ConfigError>())
        .and_then(ConfigError::hint)
}
