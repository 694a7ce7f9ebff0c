//! `permissions-tool`: agent-runtime adapter for the permission CLI.

use std::process::ExitCode;
use toolbox_adapters::app::{main_for, ToolKind};

#[tokio::main]
async fn main() -> ExitCode {
    main_for(ToolKind::Permissions).await
}
