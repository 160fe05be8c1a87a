//! `stackforge config`: show the configuration after all layers apply.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(config, &key)?;
            if output.is_json() {
                let mut entry = serde_json::Map::new();
                entry.insert(key, value.into());
                return output.json(&entry);
            }
            output.print(&value)?;
        }

        ConfigCommands::List if output.is_json() => return output.json(config),

        ConfigCommands::List => {
            let text = toml::to_string_pretty(config).map_err(|e| CliError::Config {
                message: "cannot render configuration as TOML".into(),
                source: Some(Box::new(e)),
            })?;
            output.header("Effective configuration")?;
            output.print(text.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    config
        .get(key)
        .ok_or_else(|| CliError::UnknownConfigKey { key: key.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_render_as_text() {
        let cfg = AppConfig::default();
        assert_eq!(lookup(&cfg, "defaults.backend").unwrap(), "FastAPI");
        assert_eq!(lookup(&cfg, "generation.pacing_ms").unwrap(), "2000");
        assert_eq!(lookup(&cfg, "output.dir").unwrap(), ".");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            lookup(&AppConfig::default(), "does.not.exist"),
            Err(CliError::UnknownConfigKey { key }) if key == "does.not.exist"
        ));
    }
}
