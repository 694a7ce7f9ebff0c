//! Process execution helpers shared by both adapters.

use crate::error::ToolError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::contracts::CommandRunner;
use super::types::{ExecOutput, Invocation};

/// Runner that spawns real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExecOutput, ToolError> {
        run_process(invocation).await
    }
}

/// Spawn and wait for a process, optionally piping stdin.
pub async fn run_process(invocation: &Invocation) -> Result<ExecOutput, ToolError> {
    let program = invocation.program.as_str();
    tracing::debug!(
        command = %invocation.display(),
        piped_stdin = invocation.stdin.is_some(),
        "spawning subprocess"
    );

    let mut cmd = Command::new(program);
    // Killing the adapter should not leave children behind.
    cmd.kill_on_drop(true);
    cmd.args(&invocation.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }
    if invocation.stdin.is_some() {
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| ToolError::ExecutionFailed(format!("{program}: {e}")))?;

    // Feed stdin while output is being collected so a child that fills its
    // stdout pipe before draining stdin cannot stall the write.
    let child_stdin = child.stdin.take();
    let feed = async move {
        match (invocation.stdin.as_deref(), child_stdin) {
            (Some(input), Some(mut pipe)) => {
                let written = pipe.write_all(input.as_bytes()).await;
                // Dropping the handle closes the pipe so the child sees EOF.
                drop(pipe);
                written
            }
            _ => Ok(()),
        }
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output.map_err(|e| ToolError::ExecutionFailed(format!("{program}: {e}")))?;
    match fed {
        Ok(()) => {}
        // The child exited without reading all of its input; its exit status
        // and stderr say why.
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::debug!(program, "child closed stdin before reading all input");
        }
        Err(e) => return Err(ToolError::ExecutionFailed(format!("{program}: {e}"))),
    }

    let result = ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    tracing::debug!(program, exit_code = result.exit_code, "subprocess finished");
    Ok(result)
}

/// Convert non-zero command status into contextual execution errors.
pub fn ensure_success(output: ExecOutput, context: &str) -> Result<ExecOutput, ToolError> {
    if output.success() {
        return Ok(output);
    }

    let mut details = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };
    if details.is_empty() {
        details = format!("command exited with {}", output.exit_code);
    }

    Err(ToolError::ExecutionFailed(format!("{context}: {details}")))
}

/// Informational line appended when an external command exits non-zero but
/// the adapter still treats the request as handled.
pub fn exit_code_note(output: &ExecOutput) -> Option<String> {
    (!output.success()).then(|| format!("(command exited with code {})", output.exit_code))
}
