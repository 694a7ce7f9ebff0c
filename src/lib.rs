//! Toolbox adapters: expose command-line utilities as agent-runtime tools.
//!
//! Each adapter prints a JSON descriptor in describe mode and, in execute
//! mode, turns one JSON request into subprocess calls whose output is relayed
//! back to the caller. Two adapters ship with the crate:
//!
//! - [`tools::permissions::PermissionsTool`] wraps a permission-management CLI.
//! - [`tools::tmux::TmuxTool`] drives a private tmux server, one session per
//!   working directory.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use toolbox_adapters::app::{run, Mode};
//! use toolbox_adapters::config::TmuxConfig;
//! use toolbox_adapters::tools::execution::ProcessRunner;
//! use toolbox_adapters::tools::tmux::TmuxTool;
//!
//! # async fn example() {
//! let tool = TmuxTool::new(
//!     Arc::new(ProcessRunner),
//!     &TmuxConfig::default(),
//!     std::env::current_dir().unwrap(),
//! );
//! let outcome = run(&tool, Mode::Execute, r#"{"action":"list-windows"}"#).await;
//! print!("{}", outcome.stdout);
//! # }
//! ```

pub mod app;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod testsupport;
pub mod tmux;
pub mod tools;
pub mod types;
