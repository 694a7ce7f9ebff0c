//! Process-level harness for driving the tool binaries.
//!
//! Each scenario gets its own working directory and config root so nothing
//! from the developer's environment leaks into the run. External CLIs are
//! replaced by small `sh` scripts that log their argv (and stdin) to files.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Convenience result alias for harness operations.
pub type HarnessResult<T> = Result<T, String>;

/// Env vars that would otherwise change adapter behavior under test.
const SCRUBBED_VARS: &[&str] = &[
    "TOOLBOX_ACTION",
    "TOOLBOX_LOG",
    "TOOLBOX_PERMISSIONS_BIN",
    "TOOLBOX_TMUX_BIN",
    "TOOLBOX_TMUX_SOCKET",
    "TOOLBOX_SEND_KEYS_DELAY_MS",
];

/// Isolated directories for one scenario.
#[derive(Debug)]
pub struct Scenario {
    pub root: PathBuf,
    /// Working directory of the adapter process; its basename is the tmux
    /// session name.
    pub work_dir: PathBuf,
    /// Where fake CLIs write their logs.
    pub log_dir: PathBuf,
    pub config_home: PathBuf,
}

impl Scenario {
    pub fn create(name: &str) -> HarnessResult<Self> {
        let root = std::env::temp_dir().join(format!("toolbox-it-{name}-{}", unique_suffix()));
        let work_dir = root.join("workspace");
        let log_dir = root.join("log");
        let config_home = root.join("config");
        for dir in [&work_dir, &log_dir, &config_home] {
            fs::create_dir_all(dir).map_err(|e| format!("failed creating {}: {e}", dir.display()))?;
        }
        Ok(Self {
            root,
            work_dir,
            log_dir,
            config_home,
        })
    }

    /// Write an executable `sh` script into the scenario root.
    pub fn write_script(&self, name: &str, body: &str) -> HarnessResult<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}"))
            .map_err(|e| format!("failed writing script {name}: {e}"))?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Read a log file written by a fake CLI.
    pub fn read_log(&self, name: &str) -> HarnessResult<String> {
        fs::read_to_string(self.log_dir.join(name))
            .map_err(|e| format!("failed reading log {name}: {e}"))
    }

    pub fn has_log(&self, name: &str) -> bool {
        self.log_dir.join(name).exists()
    }

    /// Run `binary` with `mode`, extra env vars, and `stdin`.
    pub fn run_tool(
        &self,
        binary: &str,
        mode: &str,
        env: &[(&str, &str)],
        stdin: &str,
    ) -> HarnessResult<Output> {
        let mut cmd = Command::new(binary);
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.work_dir)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("FAKE_LOG", &self.log_dir)
            .env("TOOLBOX_ACTION", mode)
            .envs(env.iter().copied())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd
            .spawn()
            .map_err(|e| format!("failed spawning {binary}: {e}"))?;
        if let Some(mut input) = child.stdin.take() {
            // The adapter may exit before reading (describe mode, bad mode).
            match input.write_all(stdin.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(format!("failed writing stdin: {e}")),
            }
        }
        child
            .wait_with_output()
            .map_err(|e| format!("failed waiting for {binary}: {e}"))
    }

    pub fn session_name(&self) -> String {
        self.work_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Drop for Scenario {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(unix)]
fn make_executable(path: &Path) -> HarnessResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| format!("failed chmod {}: {e}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> HarnessResult<()> {
    Ok(())
}

fn unique_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!(
        "{}-{millis}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}
