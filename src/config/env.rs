//! Environment overrides applied on top of the file config.

use crate::error::ConfigError;

use super::Config;

pub(super) const PERMISSIONS_BIN_VAR: &str = "TOOLBOX_PERMISSIONS_BIN";
pub(super) const TMUX_BIN_VAR: &str = "TOOLBOX_TMUX_BIN";
pub(super) const TMUX_SOCKET_VAR: &str = "TOOLBOX_TMUX_SOCKET";
pub(super) const SEND_KEYS_DELAY_VAR: &str = "TOOLBOX_SEND_KEYS_DELAY_MS";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(program) = non_empty(env_lookup, PERMISSIONS_BIN_VAR) {
        config.permissions.program = program;
    }
    if let Some(program) = non_empty(env_lookup, TMUX_BIN_VAR) {
        config.tmux.program = program;
    }
    if let Some(label) = non_empty(env_lookup, TMUX_SOCKET_VAR) {
        config.tmux.socket_label = label;
    }
    if let Some(raw) = non_empty(env_lookup, SEND_KEYS_DELAY_VAR) {
        config.tmux.send_keys_delay_ms = raw.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {SEND_KEYS_DELAY_VAR} value `{raw}`: expected non-negative integer milliseconds"
            ))
        })?;
    }
    Ok(())
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
