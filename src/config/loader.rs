//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::sources::{config_root_dir, read_config_text_with_sources, ConfigSource};
use super::Config;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text_with_sources(path_override, &read_file, &config_root)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            tracing::debug!(path = %path.display(), "loaded config file");
        }
        ConfigSource::Local => tracing::debug!("loaded ./toolbox.toml"),
        ConfigSource::BuiltInDefaults => tracing::debug!("no config file; using defaults"),
    }

    let mut config: Config = toml::from_str(&text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.permissions.program.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "permissions.program must not be empty".into(),
        ));
    }
    if config.tmux.program.trim().is_empty() {
        return Err(ConfigError::Invalid("tmux.program must not be empty".into()));
    }
    // tmux would otherwise fall back to the user's default server.
    if config.tmux.socket_label.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "tmux.socket_label must not be empty".into(),
        ));
    }
    Ok(())
}
