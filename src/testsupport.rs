//! Shared test fixtures for dispatch, config, and entry-point tests.
//!
//! `RecordingRunner` stands in for real subprocesses: it answers each
//! invocation through a caller-supplied responder and keeps the full call log
//! so tests can assert on argv, stdin, ordering, and timing.

use crate::error::ToolError;
use crate::tools::execution::{CommandRunner, ExecOutput, Invocation};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

type Responder = dyn Fn(&Invocation) -> Result<ExecOutput, ToolError> + Send + Sync;

/// Scripted command runner that records every call.
pub struct RecordingRunner {
    responder: Box<Responder>,
    calls: Mutex<Vec<(Invocation, Instant)>>,
}

impl RecordingRunner {
    /// Runner whose responses come from `responder`.
    pub fn new(
        responder: impl Fn(&Invocation) -> Result<ExecOutput, ToolError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Runner where every command succeeds with the given stdout.
    pub fn succeeding(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::new(move |_| Ok(ok_output(&stdout)))
    }

    /// All invocations in call order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .expect("runner log poisoned")
            .iter()
            .map(|(inv, _)| inv.clone())
            .collect()
    }

    /// All invocations with the (tokio) instant they were made.
    pub fn timed_invocations(&self) -> Vec<(Invocation, Instant)> {
        self.calls.lock().expect("runner log poisoned").clone()
    }

    /// Number of invocations whose argv contains `needle`.
    pub fn count_with_arg(&self, needle: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|inv| inv.args.iter().any(|arg| arg == needle))
            .count()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExecOutput, ToolError> {
        self.calls
            .lock()
            .expect("runner log poisoned")
            .push((invocation.clone(), Instant::now()));
        (self.responder)(invocation)
    }
}

/// Successful output with the given stdout.
pub fn ok_output(stdout: &str) -> ExecOutput {
    ExecOutput {
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Output with explicit exit code and streams.
pub fn exec_output(exit_code: i32, stdout: &str, stderr: &str) -> ExecOutput {
    ExecOutput {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("toolbox-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_runner_logs_calls_in_order() {
        let runner = RecordingRunner::succeeding("ok");
        runner.run(&Invocation::new("a")).await.unwrap();
        runner.run(&Invocation::new("b").arg("x")).await.unwrap();
        let programs: Vec<_> = runner
            .invocations()
            .into_iter()
            .map(|inv| inv.program)
            .collect();
        assert_eq!(programs, vec!["a", "b"]);
        assert_eq!(runner.count_with_arg("x"), 1);
    }

    #[test]
    fn temp_dir_fixture_writes_nested_files() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }
}
