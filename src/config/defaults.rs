//! Default configuration constants.

/// Permission-management CLI invoked by the permissions tool.
pub(super) const DEFAULT_PERMISSIONS_PROGRAM: &str = "amp";
/// Subcommand group placed before `list`/`test`/`add`/`edit`.
pub(super) const DEFAULT_PERMISSIONS_SUBCOMMAND: &[&str] = &["permissions"];
/// tmux binary invoked by the tmux tool.
pub(super) const DEFAULT_TMUX_PROGRAM: &str = "tmux";
/// `-L` socket label of the isolated tmux server.
pub(super) const DEFAULT_TMUX_SOCKET_LABEL: &str = "agent-toolbox";
/// `-f` config file for the isolated server; `/dev/null` skips the user's.
pub(super) const DEFAULT_TMUX_CONFIG_FILE: &str = "/dev/null";
/// Pause after each `send-keys` event.
pub(super) const DEFAULT_SEND_KEYS_DELAY_MS: u64 = 100;

/// Directory under the config root holding `toolbox.toml`.
pub(super) const CONFIG_DIR_NAME: &str = "toolbox";
/// Config file name, both in the working directory and the config root.
pub(super) const CONFIG_FILE_NAME: &str = "toolbox.toml";
