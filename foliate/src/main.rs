// foliate/src/main.rs
//! Foliate entry point.
//!
//! Parses the command line, sets up logging and dispatches to the subcommand.

use clap::Parser;
use log::info;
use std::process::ExitCode;

use foliate::cli::{Cli, Commands};
use foliate::commands::{self, rules, sanitize, scrub};
use foliate::logger;
use foliate::ui::theme::ThemeStyle;

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));
    info!("foliate started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme = ThemeStyle::default_theme_map();
    let result = match &args.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, args.quiet, &theme),
        Commands::Rules(cmd) => rules::run_rules(cmd, args.quiet, &theme),
        Commands::Scrub(cmd) => scrub::run_scrub(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::error_msg(format!("{:#}", e), &theme);
            ExitCode::FAILURE
        }
    }
}
