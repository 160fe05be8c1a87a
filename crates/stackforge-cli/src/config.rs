//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `STACKFORGE_<SECTION>__<KEY>`
//! 3. `--config FILE` (must exist when given)
//! 4. `.stackforge.toml` in the current directory
//! 5. `config.toml` in the platform config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stackforge_adapters::generator::gemini::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL,
};

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = ".stackforge.toml";

const ENV_PREFIX: &str = "STACKFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generative endpoint settings.
    pub generation: GenerationConfig,
    /// Default stacks for `create`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the credential.
    pub api_key_env: String,
    /// Pause after every generation call.
    pub pacing_ms: u64,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            pacing_ms: 2000,
            timeout_secs: 120,
        }
    }
}

impl GenerationConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub backend: String,
    pub frontend: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            backend: "FastAPI".into(),
            frontend: "Next.js".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the app folder is created in.
    pub dir: PathBuf,
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering files and environment over defaults.
    ///
    /// `config_file` is the path passed via `--config`; unlike the default
    /// locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to seed default configuration")?;

        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(toml_file(&Self::config_path()).required(false))
            .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(toml_file(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stackforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stackforge", "stackforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "generation.model" => self.generation.model.clone(),
            "generation.base_url" => self.generation.base_url.clone(),
            "generation.api_key_env" => self.generation.api_key_env.clone(),
            "generation.pacing_ms" => self.generation.pacing_ms.to_string(),
            "generation.timeout_secs" => self.generation.timeout_secs.to_string(),
            "defaults.backend" => self.defaults.backend.clone(),
            "defaults.frontend" => self.defaults.frontend.clone(),
            "output.dir" => self.output.dir.display().to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key [`Self::get`] understands.
    pub const KEYS: &'static [&'static str] = &[
        "generation.model",
        "generation.base_url",
        "generation.api_key_env",
        "generation.pacing_ms",
        "generation.timeout_secs",
        "defaults.backend",
        "defaults.frontend",
        "output.dir",
        "output.no_color",
        "output.format",
    ];
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
