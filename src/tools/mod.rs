//! The two adapters and the trait they share.
//!
//! A tool describes itself with a static JSON schema and executes one JSON
//! request at a time by shelling out through a [`execution::CommandRunner`].

pub mod execution;
pub mod permissions;
pub mod tmux;

use crate::error::ToolError;
use crate::types::{ToolDescriptor, ToolOutput};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Tool trait
// ---------------------------------------------------------------------------

/// A command-line adapter exposed to the agent runtime.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name advertised in the descriptor.
    fn name(&self) -> &'static str;

    /// Schema emitted in describe mode. Must not touch the outside world.
    fn descriptor(&self) -> ToolDescriptor;

    /// Handle one raw JSON request read from stdin.
    async fn execute(&self, input: &str) -> Result<ToolOutput, ToolError>;
}

/// Reject an empty `args` list for actions that need at least one element.
pub(crate) fn require_args(action: &str, args: &[String]) -> Result<(), ToolError> {
    if args.is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "action `{action}` requires a non-empty `args` list"
        )));
    }
    Ok(())
}

/// `args` is optional: an absent field and an explicit `null` both mean no
/// arguments.
pub(crate) fn args_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
