//! Tracing subscriber setup for the `stackforge` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Everything goes to stderr so stdout carries results only.
//! `RUST_LOG`, when set, replaces the level chosen by `-v`/`-q`.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Targets that receive the level picked on the command line.
const TARGETS: &[&str] = &["stackforge", "stackforge_core", "stackforge_adapters"];

/// Install the global subscriber. Call once, before the first event.
///
/// `config` is `None` when the config files could not be read.
pub fn init_logging(args: &GlobalArgs, config: Option<&AppConfig>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(args.log_level())));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!colour_disabled(args, config) && std::io::stderr().is_terminal());

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match args.output_format {
        OutputFormat::Json => registry.with(layer.json()).try_init(),
        _ => registry.with(layer).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("cannot install tracing subscriber: {e}"))
}

/// `--no-color`, `NO_COLOR` or `output.no_color` turn off ANSI on stderr.
pub fn colour_disabled(args: &GlobalArgs, config: Option<&AppConfig>) -> bool {
    args.no_color || config.is_some_and(|c| c.output.no_color)
}

/// `target=level` pairs for every stackforge crate, comma separated.
fn directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            directives("info"),
            "stackforge=info,stackforge_core=info,stackforge_adapters=info"
        );
    }

    fn args(no_color: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn config_no_color_disables_log_colour() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(colour_disabled(&args(false), Some(&config)));
    }

    #[test]
    fn colour_stays_on_without_any_opt_out() {
        assert!(!colour_disabled(&args(false), Some(&AppConfig::default())));
        assert!(!colour_disabled(&args(false), None));
        assert!(colour_disabled(&args(true), None));
    }

    #[test]
    fn directives_parse_as_a_filter() {
        assert!(EnvFilter::try_new(directives("trace")).is_ok());
    }
}
