//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`TOOLBOX_PERMISSIONS_BIN`, `TOOLBOX_TMUX_BIN`,
//!    `TOOLBOX_TMUX_SOCKET`, `TOOLBOX_SEND_KEYS_DELAY_MS`)
//! 2. TOML file specified via `--config`
//! 3. `./toolbox.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/toolbox/toolbox.toml` (or `~/.config/toolbox/toolbox.toml`)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::load_config;
pub use sources::{config_root_dir, ConfigSource};
pub use types::{Config, PermissionsConfig, TmuxConfig};
