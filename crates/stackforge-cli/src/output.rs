//! Everything the commands print on stdout goes through [`OutputManager`].
//!
//! Results go to stdout, diagnostics to stderr via `tracing`. In JSON mode
//! only [`OutputManager::json`] writes, so stdout stays one parseable
//! document.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed}]";

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins over `output.format`; `auto` picks
    /// human on a terminal and plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => parse_format(&config.output.format).unwrap_or_default(),
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', msg, Style::new().green().bold())
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', msg, Style::new().yellow().bold())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', msg, Style::new().blue().bold())
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.line(&text.style(Style::new().cyan().bold()).to_string())
        } else {
            self.line(text)
        }
    }

    /// Pretty JSON on stdout. Printed even with `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value)?;
        self.term.write_line(&text)?;
        Ok(())
    }

    /// Spinner on stderr while a long call runs. Hidden unless the output is
    /// human and stderr is a terminal.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.silent() || self.format != OutputFormat::Human || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn line(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(text)
    }

    fn marked(&self, mark: char, msg: &str, style: Style) -> io::Result<()> {
        if self.color {
            let mark = mark.to_string();
            self.line(&format!("{} {}", mark.style(style), msg.style(style)))
        } else {
            self.line(&format!("{mark} {msg}"))
        }
    }
}

fn parse_format(value: &str) -> Option<OutputFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(OutputFormat::Auto),
        "human" => Some(OutputFormat::Human),
        "plain" => Some(OutputFormat::Plain),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}
