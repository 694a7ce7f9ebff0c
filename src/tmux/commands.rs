//! Argument-vector builders for the isolated tmux server.
//!
//! Every command is prefixed with `-L <label> -f <config>` so it talks to the
//! adapter's own server and never to the user's default one.

use std::path::Path;

use crate::config::TmuxConfig;
use crate::tools::execution::Invocation;

/// Format string for `list-windows` output lines.
pub const WINDOW_LINE_FORMAT: &str = "#{window_index}: #{window_name}";

/// Handle on the isolated tmux server: binary plus the flags that select it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TmuxServer {
    program: String,
    socket_label: String,
    config_file: String,
}

impl TmuxServer {
    pub fn new(
        program: impl Into<String>,
        socket_label: impl Into<String>,
        config_file: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            socket_label: socket_label.into(),
            config_file: config_file.into(),
        }
    }

    pub fn from_config(config: &TmuxConfig) -> Self {
        Self::new(&config.program, &config.socket_label, &config.config_file)
    }

    pub fn socket_label(&self) -> &str {
        &self.socket_label
    }

    /// Base invocation with the server-selection flags, followed by `args`.
    pub fn command<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.program)
            .args(["-L", self.socket_label.as_str()])
            .args(["-f", self.config_file.as_str()])
            .args(args)
    }

    /// Exact-match existence probe; `=` stops tmux from prefix-matching
    /// another session.
    pub fn has_session(&self, session: &str) -> Invocation {
        self.command(["has-session", "-t"]).arg(format!("={session}"))
    }

    /// Create a detached session rooted at `cwd`.
    pub fn new_session(&self, session: &str, cwd: &Path) -> Invocation {
        self.command(["new-session", "-d", "-s", session, "-c"])
            .arg(cwd.display().to_string())
    }

    pub fn list_sessions(&self) -> Invocation {
        self.command(["list-sessions"])
    }

    pub fn list_windows(&self, session: &str) -> Invocation {
        self.command(["list-windows", "-t", session, "-F", WINDOW_LINE_FORMAT])
    }

    /// Create a background window in `session` and print its index.
    pub fn new_window(&self, session: &str, cwd: &Path) -> Invocation {
        self.command(["new-window", "-d", "-P", "-F", "#{window_index}", "-t"])
            .arg(format!("{session}:"))
            .arg("-c")
            .arg(cwd.display().to_string())
    }

    /// Type `text` literally into `target` (no key-name lookup).
    pub fn send_literal(&self, target: &str, text: &str) -> Invocation {
        self.command(["send-keys", "-t", target, "-l", "--", text])
    }

    /// Send one key or key name (`Enter`, `C-c`, ...) to `target`.
    pub fn send_key(&self, target: &str, key: &str) -> Invocation {
        self.command(["send-keys", "-t", target, "--", key])
    }

    pub fn capture_pane(&self, target: &str) -> Invocation {
        self.command(["capture-pane", "-p", "-t", target])
    }

    /// Pass-through command line for `run-raw-commands`.
    pub fn raw(&self, args: &[String]) -> Invocation {
        self.command(args.iter().cloned())
    }

    /// Shell command a human can paste to attach to `session`.
    pub fn attach_hint(&self, session: &str) -> String {
        format!(
            "{} -L {} attach -t {session}",
            self.program, self.socket_label
        )
    }
}
