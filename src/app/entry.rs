//! Single entry point shared by both binaries.
//!
//! [`run`] takes the mode as an explicit value and returns an [`Outcome`];
//! only [`main_for`] touches process state (argv, environment, stdin).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, MODE_ENV_VAR};
use crate::config::{load_config, Config};
use crate::error::AdapterError;
use crate::tools::execution::{CommandRunner, ProcessRunner};
use crate::tools::permissions::PermissionsTool;
use crate::tools::tmux::TmuxTool;
use crate::tools::Tool;

/// Env var holding the `tracing` filter for diagnostics on stderr.
pub const LOG_ENV_VAR: &str = "TOOLBOX_LOG";

// ---------------------------------------------------------------------------
// Mode / outcome
// ---------------------------------------------------------------------------

/// What the host runtime asked the adapter to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Print the tool descriptor as JSON.
    Describe,
    /// Read one JSON request and act on it.
    Execute,
}

impl FromStr for Mode {
    type Err = AdapterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "describe" => Ok(Self::Describe),
            "execute" => Ok(Self::Execute),
            other => Err(AdapterError::UnknownMode(other.to_string())),
        }
    }
}

/// Resolve the mode from the `--mode` flag, falling back to the env value.
pub fn resolve_mode(flag: Option<&str>, env_value: Option<&str>) -> Result<Mode, AdapterError> {
    flag.or(env_value)
        .ok_or(AdapterError::MissingMode)?
        .parse()
}

/// Everything one invocation writes, plus its exit status.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Outcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: u8,
}

impl Outcome {
    /// Failure outcome carrying `Error: <err>` on stderr.
    pub fn failure(err: &AdapterError) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Error: {err}\n"),
            exit_code: 1,
        }
    }

    /// Write both streams to the real process stdout/stderr. A host that
    /// closed its end early does not change the exit status.
    pub fn emit(&self) {
        if let Err(e) = write_stream(&mut std::io::stdout().lock(), &self.stdout) {
            tracing::warn!(error = %e, "failed writing tool output to stdout");
        }
        if let Err(e) = write_stream(&mut std::io::stderr().lock(), &self.stderr) {
            tracing::warn!(error = %e, "failed writing tool output to stderr");
        }
    }
}

/// Write and flush `text`, treating a closed pipe as success.
fn write_stream(out: &mut impl Write, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Run `tool` in `mode`. `input` is the raw request and is only read in
/// execute mode.
pub async fn run(tool: &dyn Tool, mode: Mode, input: &str) -> Outcome {
    match mode {
        Mode::Describe => match serde_json::to_string_pretty(&tool.descriptor()) {
            Ok(json) => Outcome {
                stdout: format!("{json}\n"),
                ..Outcome::default()
            },
            Err(e) => Outcome::failure(&AdapterError::Io(e.into())),
        },
        Mode::Execute => match tool.execute(input).await {
            Ok(output) => Outcome {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_code: 0,
            },
            Err(e) => {
                tracing::debug!(tool = tool.name(), error = %e, "request failed");
                Outcome::failure(&AdapterError::Tool(e))
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Binary wiring
// ---------------------------------------------------------------------------

/// Which adapter a binary hosts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToolKind {
    Permissions,
    Tmux,
}

impl ToolKind {
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Permissions => "permissions-tool",
            Self::Tmux => "tmux-tool",
        }
    }

    /// Build the adapter on top of `runner`.
    pub fn build(
        self,
        config: &Config,
        runner: Arc<dyn CommandRunner>,
        cwd: PathBuf,
    ) -> Box<dyn Tool> {
        match self {
            Self::Permissions => Box::new(PermissionsTool::new(
                runner,
                config.permissions.clone(),
                dirs::home_dir(),
            )),
            Self::Tmux => Box::new(TmuxTool::new(runner, &config.tmux, cwd)),
        }
    }
}

/// Process entry used by the tool binaries.
pub async fn main_for(kind: ToolKind) -> ExitCode {
    let args = Args::parse_for(kind.binary_name());
    init_tracing();

    let outcome = match prepare_and_run(kind, &args).await {
        Ok(outcome) => outcome,
        Err(e) => Outcome::failure(&e),
    };
    outcome.emit();
    ExitCode::from(outcome.exit_code)
}

async fn prepare_and_run(kind: ToolKind, args: &Args) -> Result<Outcome, AdapterError> {
    let env_mode = std::env::var(MODE_ENV_VAR).ok();
    let mode = resolve_mode(args.mode.as_deref(), env_mode.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let cwd = std::env::current_dir()?;
    let tool = kind.build(&config, Arc::new(ProcessRunner), cwd);

    let mut input = String::new();
    if mode == Mode::Execute {
        tokio::io::stdin().read_to_string(&mut input).await?;
    }
    Ok(run(tool.as_ref(), mode, &input).await)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Tool output owns stdout; diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
