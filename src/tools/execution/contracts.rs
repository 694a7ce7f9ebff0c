//! Runner seam between request dispatch and real subprocesses.

use crate::error::ToolError;
use async_trait::async_trait;

use super::types::{ExecOutput, Invocation};

/// Executes external commands on behalf of a tool.
///
/// `Err` is reserved for failures to start or wait on the process. A command
/// that ran and exited non-zero is an `Ok` with a non-zero `exit_code`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ExecOutput, ToolError>;
}
