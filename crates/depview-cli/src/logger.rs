//! Logging setup for the depview CLI.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//!
//! # Example
//!
//! ```rust,no_run
//! use depview_cli::logger::init_logger;
//!
//! init_logger(false, false, false, None);
//! tracing::info!("Loading configuration");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 3] = ["depview_graph", "depview_config", "depview_cli"];

/// Filter directive enabling `level` for every depview crate.
pub fn directive(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for depview crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. `settings.log_level` from the config file
/// 5. warn for depview crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, default_level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new(directive("debug"))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive(default_level.unwrap_or("warn"))))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
