//! Status messages on stderr.
//!
//! `--quiet` silences everything here except [`error`] and [`hint`].

use std::sync::atomic::{AtomicBool, Ordering};

use console::style;

static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", style("✓").green().bold(), message);
    }
}

pub fn info(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", style("ℹ").blue().bold(), message);
    }
}

pub fn warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
    }
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

pub fn hint(message: &str) {
    eprintln!("  {} {}", style("hint:").cyan(), message);
}

/// Apply the color decision to every `console::style` call.
pub fn init_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
