//! Command-line surface of `stackforge`, declared with clap derive.
//!
//! Flag names, aliases and help text live here; the handlers in
//! `crate::commands` receive the parsed structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackforge",
    bin_name = "stackforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Draft a two-tier application from one sentence",
    long_about = "Stackforge asks a generative text service for a backend entry point, \
                  a data model and a frontend landing page, then writes them to a \
                  fresh directory tree.",
    after_help = "EXAMPLES:\n\
        \x20 stackforge create \"A recipe app\"\n\
        \x20 stackforge create \"A todo list\" --backend express --frontend vue -o ./out\n\
        \x20 stackforge stacks\n\
        \x20 stackforge completions bash > /usr/share/bash-completion/completions/stackforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate and write an application.
    #[command(
        visible_alias = "c",
        about = "Generate an application from a description",
        after_help = "EXAMPLES:\n\
            \x20 stackforge create \"A recipe app\"\n\
            \x20 stackforge create \"A recipe app\" -b FastAPI -f Next.js --yes\n\
            \x20 stackforge create \"A chat app\" -b axum -f svelte --dry-run"
    )]
    Create(CreateArgs),

    /// List supported stack profiles.
    #[command(
        visible_alias = "ls",
        about = "List supported backend and frontend stacks",
        after_help = "EXAMPLES:\n\
            \x20 stackforge stacks\n\
            \x20 stackforge stacks --format json"
    )]
    Stacks(StacksArgs),

    /// Initialise a stackforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stackforge init           # platform config directory\n\
            \x20 stackforge init --local   # .stackforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackforge completions bash > ~/.local/share/bash-completion/completions/stackforge\n\
            \x20 stackforge completions zsh  > ~/.zfunc/_stackforge\n\
            \x20 stackforge completions fish > ~/.config/fish/completions/stackforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackforge config get generation.model\n\
            \x20 stackforge config list\n\
            \x20 stackforge config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command's behaviour depends on the config files.
    pub fn reads_config(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Config(_))
    }
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Free-text description of the application.
    #[arg(value_name = "DESCRIPTION", help = "What the application should do")]
    pub description: String,

    /// Backend technology (default from config: FastAPI).
    #[arg(
        short = 'b',
        long = "backend",
        value_name = "TECH",
        help = "Backend technology, e.g. FastAPI, Express, Axum, Gin"
    )]
    pub backend: Option<String>,

    /// Frontend technology (default from config: Next.js).
    #[arg(
        short = 'f',
        long = "frontend",
        value_name = "TECH",
        help = "Frontend technology, e.g. Next.js, Vue, Svelte"
    )]
    pub frontend: Option<String>,

    /// Directory the app folder is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Model name sent to the generative endpoint.
    #[arg(long = "model", value_name = "MODEL", help = "Override generation.model")]
    pub model: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Replace existing output without asking"
    )]
    pub yes: bool,

    /// Show the planned files without calling the endpoint.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── stacks ────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge stacks`.
#[derive(Debug, Args)]
pub struct StacksArgs {
    /// Only show one tier.
    #[arg(long = "tier", value_enum, help = "Only list one tier")]
    pub tier: Option<TierFilter>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Which tier `stacks` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierFilter {
    Backend,
    Frontend,
}

/// Output format for the `stacks` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stackforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.model`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
