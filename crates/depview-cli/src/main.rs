//! depview - relation matching and node filtering for dependency graphs.

use std::process::ExitCode;

use clap::Parser;
use depview_cli::{cli, commands, error_hint, logger, ui};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let colors = !args.no_color && logger::should_use_colors();
    let config = commands::utils::load_config(args.config.as_deref());
    let default_level = config
        .as_ref()
        .ok()
        .and_then(|config| config.settings.log_level.as_deref());
    logger::init_logger(args.verbose, args.quiet, !colors, default_level);
    ui::init_colors(colors);
    ui::set_quiet(args.quiet);

    match depview_cli::run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(&format!("{err:#}"));
            if let Some(hint) = error_hint(&err) {
                ui::hint(hint);
            }
            ExitCode::FAILURE
        }
    }
}
