//! z - a git-centric note management system
//!
//! Main entry point for the `z` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};

use z_cli::cli::{Cli, CommandContext};
use z_cli::CliError;
use z_common_config::{ConfigSource, LoadOutcome};
use z_common_log::LogConfig;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Configuration is needed before logging: it carries the log settings
    let outcome = match cli.config_loader().and_then(|l| l.load().map_err(CliError::from)) {
        Ok(outcome) => outcome,
        Err(e) => return report(&e),
    };

    let color = cli.color_enabled(outcome.config.settings.color_enabled());
    init_logging(&cli, &outcome, color);
    log_config_source(&outcome);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to create async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    let ctx = CommandContext {
        config: outcome.config,
        config_path: outcome.path,
    };

    match runtime.block_on(cli.execute(ctx)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => report(&e),
    }
}

fn init_logging(cli: &Cli, outcome: &LoadOutcome, color: bool) {
    let config = LogConfig::from_settings(&outcome.config.settings.verbosity_level, color)
        .with_verbosity(cli.verbose, cli.quiet)
        .with_env_override();

    if let Err(e) = z_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}

fn log_config_source(outcome: &LoadOutcome) {
    let path = outcome.path.display();
    match &outcome.source {
        ConfigSource::Loaded => debug!(%path, "loaded config"),
        ConfigSource::Missing => {
            warn!(%path, "config file not found, using empty config (run `z init` to create one)")
        }
        ConfigSource::Unreadable(reason) => {
            warn!(%path, %reason, "could not read config file, using empty config")
        }
    }
}

/// Print an error with its hint and suggestions, returning the exit code
fn report(e: &CliError) -> ExitCode {
    eprintln!("error: {e}");
    if let Some(source) = std::error::Error::source(e) {
        let cause = source.to_string();
        if cause != e.to_string() {
            eprintln!("  caused by: {cause}");
        }
    }
    if let Some(hint) = e.hint() {
        eprintln!("hint: {hint}");
    }
    let suggestions = e.suggestions();
    if !suggestions.is_empty() {
        eprintln!("known: {}", suggestions.join(", "));
    }
    e.exit_code()
}
