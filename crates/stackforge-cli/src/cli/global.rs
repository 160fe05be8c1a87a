//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable ANSI colours (also set by NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Extra TOML config file, layered above the default locations
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "STACKFORGE_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Log level for the stackforge crates. `--quiet` beats `-v`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped
    #[default]
    Auto,
    /// Coloured text
    Human,
    /// Text without colour or spinners
    Plain,
    /// JSON on stdout, JSON log lines on stderr
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(args(0, false).log_level(), "warn");
        assert_eq!(args(1, false).log_level(), "info");
        assert_eq!(args(2, false).log_level(), "debug");
        assert_eq!(args(3, false).log_level(), "trace");
        assert_eq!(args(9, false).log_level(), "trace");
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(args(0, true).log_level(), "error");
        assert_eq!(args(3, true).log_level(), "error");
    }
}
