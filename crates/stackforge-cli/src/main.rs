//! `stackforge`: draft a two-tier application from one sentence.
//!
//! Exit codes: 0 success (degraded files included), 1 filesystem or
//! internal failure, 2 bad arguments or cancelled, 4 configuration or
//! missing credential.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument, warn};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // The credential may live in .env; a missing file is not an error.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version come through here and are not failures.
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    let loaded = load_settings(&cli);

    if let Err(e) = logging::init_logging(&cli.global, loaded.as_ref().ok().map(|s| &s.config)) {
        eprintln!("stackforge: {e:#}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    let color = !logging::colour_disabled(&cli.global, loaded.as_ref().ok().map(|s| &s.config));
    match loaded.and_then(|settings| run(cli, settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, verbose, color),
    }
}

/// Effective config, plus why the config files were skipped, if they were.
struct Settings {
    config: AppConfig,
    fallback: Option<String>,
}

/// Config for the chosen command.
///
/// `completions` never reads it. `stacks` and `init` fall back to the
/// defaults when an implicit config file is broken, so `init --force` can
/// still repair it. A file named with `--config` must always load.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    if matches!(cli.command, Commands::Completions(_)) {
        return Ok(Settings {
            config: AppConfig::default(),
            fallback: None,
        });
    }

    match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => Ok(Settings {
            config,
            fallback: None,
        }),
        // Logging is not up yet; the fallback is reported in `run`.
        Err(e) if cli.global.config.is_none() && !cli.command.reads_config() => Ok(Settings {
            config: AppConfig::default(),
            fallback: Some(format!("{e:#}")),
        }),
        Err(e) => Err(CliError::Config {
            message: format!("{e:#}"),
            source: None,
        }),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, settings: Settings) -> CliResult<()> {
    let Settings { config, fallback } = settings;
    if let Some(reason) = fallback {
        warn!(%reason, "Ignoring unreadable configuration, using defaults");
    }
    debug!(?config, "Configuration loaded");

    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::Create(args) => commands::create::execute(args, &cli.global, &config, &output),
        Commands::Stacks(args) => commands::stacks::execute(args, &output),
        Commands::Init(args) => commands::init::execute(args, &output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, &output),
    }
}

fn report(err: &CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color && std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_cargo() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }
}
