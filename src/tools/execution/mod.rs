//! Subprocess plumbing: invocation building, the runner seam, and the real
//! process-backed runner.

mod contracts;
mod process;
mod types;

pub use contracts::CommandRunner;
pub use process::{ensure_success, exit_code_note, run_process, ProcessRunner};
pub use types::{ExecOutput, Invocation};
