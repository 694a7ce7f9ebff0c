//! `tmux-tool`: agent-runtime adapter for an isolated tmux server.

use std::process::ExitCode;
use toolbox_adapters::app::{main_for, ToolKind};

#[tokio::main]
async fn main() -> ExitCode {
    main_for(ToolKind::Tmux).await
}
