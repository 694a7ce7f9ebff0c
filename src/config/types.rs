//! Configuration data model.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    DEFAULT_PERMISSIONS_PROGRAM, DEFAULT_PERMISSIONS_SUBCOMMAND, DEFAULT_SEND_KEYS_DELAY_MS,
    DEFAULT_TMUX_CONFIG_FILE, DEFAULT_TMUX_PROGRAM, DEFAULT_TMUX_SOCKET_LABEL,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub permissions: PermissionsConfig,
    pub tmux: TmuxConfig,
}

/// Settings for the permission-management CLI adapter.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionsConfig {
    pub program: String,
    /// Arguments placed after the optional `--settings-file` flag and before
    /// the action's own subcommand.
    pub subcommand: Vec<String>,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PERMISSIONS_PROGRAM.to_string(),
            subcommand: DEFAULT_PERMISSIONS_SUBCOMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Settings for the tmux adapter and its isolated server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxConfig {
    pub program: String,
    pub socket_label: String,
    pub config_file: String,
    pub send_keys_delay_ms: u64,
}

impl TmuxConfig {
    pub fn send_keys_delay(&self) -> Duration {
        Duration::from_millis(self.send_keys_delay_ms)
    }
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TMUX_PROGRAM.to_string(),
            socket_label: DEFAULT_TMUX_SOCKET_LABEL.to_string(),
            config_file: DEFAULT_TMUX_CONFIG_FILE.to_string(),
            send_keys_delay_ms: DEFAULT_SEND_KEYS_DELAY_MS,
        }
    }
}
