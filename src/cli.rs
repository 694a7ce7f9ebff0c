//! CLI argument parsing via clap, shared by both tool binaries.

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::build_info::CLI_VERSION;

/// Environment variable the host runtime uses to select the mode.
pub const MODE_ENV_VAR: &str = "TOOLBOX_ACTION";

/// Agent-runtime adapter. Prints its schema in `describe` mode; reads one
/// JSON request from stdin in `execute` mode.
#[derive(Debug, Parser)]
#[command(version = CLI_VERSION)]
pub struct Args {
    /// `describe` or `execute`. Defaults to the value of TOOLBOX_ACTION.
    #[arg(long = "mode", value_name = "MODE")]
    pub mode: Option<String>,

    /// Path to config file (default: ./toolbox.toml or ~/.config/toolbox/toolbox.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,
}

impl Args {
    /// Parse process arguments, reporting usage under `binary_name`.
    pub fn parse_for(binary_name: &'static str) -> Self {
        let matches = Self::command().name(binary_name).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}
