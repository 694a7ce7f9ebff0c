//! Default-session naming and the "session exists before any window
//! operation" guarantee.

use std::path::Path;

use crate::error::ToolError;
use crate::tools::execution::{ensure_success, CommandRunner};

use super::commands::TmuxServer;

/// Session name used when the working directory has no final segment.
const ROOT_SESSION_NAME: &str = "root";

/// Whether `ensure_session` found the session or had to create it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionStatus {
    Existing,
    Created,
}

/// Default session name for a working directory: its final path segment.
///
/// tmux rewrites `.` and `:` in session names to `_`, so the same rewrite is
/// applied here to keep `has-session` lookups consistent with what
/// `new-session` actually creates.
pub fn session_name_for(cwd: &Path) -> String {
    let segment = cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name: String = segment
        .chars()
        .map(|ch| if matches!(ch, '.' | ':') { '_' } else { ch })
        .collect();
    if name.trim().is_empty() {
        ROOT_SESSION_NAME.to_string()
    } else {
        name
    }
}

/// Make sure `session` exists on the isolated server, creating it detached
/// in `cwd` when absent.
///
/// A failed probe (no server running yet, or no such session) leads to a
/// create; a failed create is an error and callers must not continue with
/// the action.
pub async fn ensure_session(
    runner: &dyn CommandRunner,
    server: &TmuxServer,
    session: &str,
    cwd: &Path,
) -> Result<SessionStatus, ToolError> {
    let probe = runner.run(&server.has_session(session)).await?;
    if probe.success() {
        tracing::debug!(session, "reusing tmux session");
        return Ok(SessionStatus::Existing);
    }

    let created = runner.run(&server.new_session(session, cwd)).await?;
    ensure_success(created, &format!("failed to create tmux session `{session}`"))?;
    tracing::info!(
        session,
        socket = server.socket_label(),
        cwd = %cwd.display(),
        "created tmux session"
    );
    Ok(SessionStatus::Created)
}
