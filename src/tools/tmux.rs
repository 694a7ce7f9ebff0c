//! tmux adapter: long-lived shells and interactive programs in an isolated
//! tmux server, one session per working directory.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::execution::{ensure_success, exit_code_note, CommandRunner, ExecOutput};
use super::{require_args, Tool};
use crate::config::TmuxConfig;
use crate::error::ToolError;
use crate::tmux::{ensure_session, session_name_for, TmuxServer};
use crate::types::{ToolDescriptor, ToolOutput};

const DESCRIPTION: &str = "Run and observe long-running or interactive commands in tmux windows \
that persist between calls. All windows live in one session named after the current directory, \
on a private tmux server that does not touch the user's own sessions.

Rules:
1. Use run-shell to start a command in a new window; it returns the window index. Do not wait \
for it here; poll with capture-output.
2. Use capture-output with target \"<session>:<window>\" (as returned by run-shell) to read what \
a window currently shows. Without a target it captures the session's active pane.
3. Use send-keys to type into an interactive program. Each element of args is sent as one key \
event, in order: plain text is typed, and tmux key names such as Enter, C-c, Up, Escape are \
pressed. target is required.
4. Use list-windows to see the windows in the session and info to see how a human can attach.
5. run-raw-commands passes args straight to tmux on the private server; use it only when no other \
action fits.";

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Operations accepted in the `action` field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TmuxAction {
    Info,
    ListWindows,
    RunShell,
    CaptureOutput,
    SendKeys,
    RunRawCommands,
}

impl TmuxAction {
    pub const ALL: [TmuxAction; 6] = [
        Self::Info,
        Self::ListWindows,
        Self::RunShell,
        Self::CaptureOutput,
        Self::SendKeys,
        Self::RunRawCommands,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::ListWindows => "list-windows",
            Self::RunShell => "run-shell",
            Self::CaptureOutput => "capture-output",
            Self::SendKeys => "send-keys",
            Self::RunRawCommands => "run-raw-commands",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == raw)
            .ok_or_else(|| {
                let expected: Vec<_> = Self::ALL.iter().map(|a| a.as_str()).collect();
                ToolError::InvalidArguments(format!(
                    "unknown action `{raw}`; expected one of: {}",
                    expected.join(", ")
                ))
            })
    }
}

impl fmt::Display for TmuxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct Args {
    action: String,
    #[serde(default, deserialize_with = "super::args_or_empty")]
    args: Vec<String>,
    target: Option<String>,
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// Tool exposing the isolated tmux server to the agent.
pub struct TmuxTool {
    runner: Arc<dyn CommandRunner>,
    server: TmuxServer,
    cwd: PathBuf,
    session: String,
    key_delay: Duration,
}

impl TmuxTool {
    /// Build the tool for `cwd`; the default session is derived from it.
    pub fn new(runner: Arc<dyn CommandRunner>, config: &TmuxConfig, cwd: PathBuf) -> Self {
        let session = session_name_for(&cwd);
        Self {
            runner,
            server: TmuxServer::from_config(config),
            cwd,
            session,
            key_delay: config.send_keys_delay(),
        }
    }

    /// Name of the session this tool manages.
    pub fn session(&self) -> &str {
        &self.session
    }

    async fn ensure_session(&self) -> Result<(), ToolError> {
        ensure_session(self.runner.as_ref(), &self.server, &self.session, &self.cwd).await?;
        Ok(())
    }

    async fn info(&self) -> Result<ToolOutput, ToolError> {
        self.ensure_session().await?;
        let mut out = ToolOutput::default();
        out.line(format!(
            "tmux server: -L {} (private; not your default server)",
            self.server.socket_label()
        ));
        out.line(format!("session for this directory: {}", self.session));
        out.line(format!("attach with: {}", self.server.attach_hint(&self.session)));
        out.line("sessions:");
        let listed = self.runner.run(&self.server.list_sessions()).await?;
        relay(&mut out, &listed);
        Ok(out)
    }

    async fn list_windows(&self) -> Result<ToolOutput, ToolError> {
        self.ensure_session().await?;
        let listed = self
            .runner
            .run(&self.server.list_windows(&self.session))
            .await?;
        let mut out = ToolOutput::default();
        relay(&mut out, &listed);
        Ok(out)
    }

    async fn run_shell(&self, command: &str) -> Result<ToolOutput, ToolError> {
        self.ensure_session().await?;
        let created = self
            .runner
            .run(&self.server.new_window(&self.session, &self.cwd))
            .await?;
        let created = ensure_success(created, "failed to create tmux window")?;
        let index = created.stdout.trim();
        if index.is_empty() {
            return Err(ToolError::ExecutionFailed(
                "tmux did not report the new window index".into(),
            ));
        }
        let target = format!("{}:{index}", self.session);

        let typed = self
            .runner
            .run(&self.server.send_literal(&target, command))
            .await?;
        ensure_success(typed, "failed to send command to tmux window")?;
        let entered = self.runner.run(&self.server.send_key(&target, "Enter")).await?;
        ensure_success(entered, "failed to send Enter to tmux window")?;

        tracing::debug!(%target, "dispatched command to new window");
        let mut out = ToolOutput::default();
        out.line(format!("started in window {index} (target {target})"));
        out.line(format!(
            "use capture-output with target \"{target}\" to read its output"
        ));
        Ok(out)
    }

    async fn capture_output(&self, target: Option<&str>) -> Result<ToolOutput, ToolError> {
        let target = match target {
            Some(explicit) => explicit.to_string(),
            None => {
                self.ensure_session().await?;
                self.session.clone()
            }
        };
        let captured = self.runner.run(&self.server.capture_pane(&target)).await?;
        let mut out = ToolOutput::default();
        relay(&mut out, &captured);
        Ok(out)
    }

    async fn send_keys(&self, target: &str, keys: &[String]) -> Result<ToolOutput, ToolError> {
        for key in keys {
            let sent = self.runner.run(&self.server.send_key(target, key)).await?;
            ensure_success(sent, &format!("failed to send `{key}` to {target}"))?;
            // Give the receiving program's read loop a chance to consume each
            // event before the next one arrives.
            tokio::time::sleep(self.key_delay).await;
        }
        let mut out = ToolOutput::default();
        out.line(format!("sent {} key event(s) to {target}", keys.len()));
        Ok(out)
    }

    async fn run_raw(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        self.ensure_session().await?;
        let ran = self.runner.run(&self.server.raw(args)).await?;
        let mut out = ToolOutput::default();
        relay(&mut out, &ran);
        Ok(out)
    }
}

/// Relay a subprocess result, noting a non-zero exit on stdout.
fn relay(out: &mut ToolOutput, result: &ExecOutput) {
    out.relay_stdout(&result.stdout);
    out.relay_stderr(&result.stderr);
    if let Some(note) = exit_code_note(result) {
        out.line(note);
    }
}

#[async_trait]
impl Tool for TmuxTool {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn descriptor(&self) -> ToolDescriptor {
        let actions: Vec<_> = TmuxAction::ALL.iter().map(|a| a.as_str()).collect();
        ToolDescriptor {
            name: self.name().into(),
            description: DESCRIPTION.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": actions,
                        "description": "Operation to perform."
                    },
                    "target": {
                        "type": "string",
                        "description": "tmux target as session:window.pane. Used by capture-output (optional, defaults to the session) and send-keys (required)."
                    },
                    "args": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "run-shell: [command]. send-keys: keys or text, one event per element. run-raw-commands: tmux arguments."
                    }
                },
                "required": ["action"]
            }),
        }
    }

    async fn execute(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = serde_json::from_str(input)?;
        let action = TmuxAction::parse(&args.action)?;
        tracing::debug!(%action, session = %self.session, "dispatching tmux action");

        // Validate everything before the first subprocess call.
        match action {
            TmuxAction::Info => self.info().await,
            TmuxAction::ListWindows => self.list_windows().await,
            TmuxAction::RunShell => {
                let command = args
                    .args
                    .first()
                    .map(String::as_str)
                    .filter(|cmd| !cmd.trim().is_empty())
                    .ok_or_else(|| {
                        ToolError::InvalidArguments(
                            "run-shell requires the command string in args[0]".into(),
                        )
                    })?;
                self.run_shell(command).await
            }
            TmuxAction::CaptureOutput => self.capture_output(args.target.as_deref()).await,
            TmuxAction::SendKeys => {
                let target = args.target.as_deref().ok_or_else(|| {
                    ToolError::InvalidArguments("send-keys requires `target`".into())
                })?;
                require_args(action.as_str(), &args.args)?;
                self.send_keys(target, &args.args).await
            }
            TmuxAction::RunRawCommands => {
                require_args(action.as_str(), &args.args)?;
                self.run_raw(&args.args).await
            }
        }
    }
}
