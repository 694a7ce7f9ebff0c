//! Permissions adapter: inspect, test, and change the permission rules of
//! the external permission-management CLI.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::execution::{CommandRunner, ExecOutput, Invocation};
use super::{require_args, Tool};
use crate::config::PermissionsConfig;
use crate::error::ToolError;
use crate::types::{ToolDescriptor, ToolOutput};

const DESCRIPTION: &str = "Inspect and manage the permission rules that decide which tool calls \
are allowed, rejected, or need confirmation.

Rules:
1. Start with explain to see the current rules and the rule syntax.
2. Use test to check how a specific tool call would be treated before changing anything. A \
non-zero result from test is an answer, not an error.
3. Use add to append a single rule.
4. edit REPLACES ALL existing rules with the rules given in args (one rule per element). Run \
explain first and include every rule that should be kept.
5. Pass settingsFile only when working on a settings file other than the default one.";

/// Fixed guide printed after the current rules by `explain`.
pub const EXPLAIN_INSTRUCTIONS: &str = "\
How permission rules work:
  Each rule has the form: <action> <tool> [--<argument> <pattern>]...
  <action> is one of: allow, reject, ask, delegate --to <program>
  <tool> is a tool name or glob, for example Bash or mcp__*
  --<argument> <pattern> matches a named tool argument against a glob,
  for example --cmd 'git *' matches Bash commands starting with \"git \".
  Rules are checked from top to bottom and the first match decides.

Using this tool:
  test:  args = the tool and its arguments, e.g. [\"Bash\", \"--cmd\", \"rm -rf build\"]
  add:   args = one rule split into words, e.g. [\"allow\", \"Bash\", \"--cmd\", \"ls*\"]
  edit:  args = the complete new rule list, one rule per element.
         This replaces every existing rule; it does not merge.
  settingsFile: optional settings file to operate on (a leading ~ is expanded).";

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Operations accepted in the `action` field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PermissionsAction {
    Explain,
    Test,
    Add,
    Edit,
}

impl PermissionsAction {
    pub const ALL: [PermissionsAction; 4] = [Self::Explain, Self::Test, Self::Add, Self::Edit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Test => "test",
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }

    /// External subcommand run for this action.
    fn subcommand(self) -> &'static str {
        match self {
            Self::Explain => "list",
            Self::Test => "test",
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == raw)
            .ok_or_else(|| {
                ToolError::InvalidArguments(format!(
                    "unknown action `{raw}`; expected one of: explain, test, add, edit"
                ))
            })
    }
}

impl fmt::Display for PermissionsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Args {
    action: String,
    #[serde(default, deserialize_with = "super::args_or_empty")]
    args: Vec<String>,
    settings_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// Tool wrapping the permission-management CLI.
pub struct PermissionsTool {
    runner: Arc<dyn CommandRunner>,
    config: PermissionsConfig,
    home: Option<PathBuf>,
}

impl PermissionsTool {
    /// `home` is used to expand a leading `~` in `settingsFile`.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        config: PermissionsConfig,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            runner,
            config,
            home,
        }
    }

    /// `<program> [--settings-file <path>] <subcommand...> <sub> <args...>`
    fn invocation(
        &self,
        settings_file: Option<&str>,
        action: PermissionsAction,
        args: &[String],
    ) -> Result<Invocation, ToolError> {
        let mut inv = Invocation::new(&self.config.program);
        if let Some(raw) = settings_file {
            let path = expand_tilde(raw, self.home.as_deref())?;
            inv = inv.arg("--settings-file").arg(path.display().to_string());
        }
        Ok(inv
            .args(self.config.subcommand.iter().cloned())
            .arg(action.subcommand())
            .args(args.iter().cloned()))
    }

    async fn run(&self, invocation: &Invocation) -> Result<ExecOutput, ToolError> {
        self.runner.run(invocation).await
    }
}

#[async_trait]
impl Tool for PermissionsTool {
    fn name(&self) -> &'static str {
        "permissions"
    }

    fn descriptor(&self) -> ToolDescriptor {
        let actions: Vec<_> = PermissionsAction::ALL.iter().map(|a| a.as_str()).collect();
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
                    "settingsFile": {
                        "type": "string",
                        "description": "Optional settings file to read and modify instead of the default."
                    },
                    "args": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "test/add: command-line words. edit: one complete rule per element."
                    }
                },
                "required": ["action"]
            }),
        }
    }

    async fn execute(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let args: Args = serde_json::from_str(input)?;
        let action = PermissionsAction::parse(&args.action)?;
        if action != PermissionsAction::Explain {
            require_args(action.as_str(), &args.args)?;
        }
        let settings_file = args.settings_file.as_deref();
        tracing::debug!(%action, settings_file, "dispatching permissions action");

        let mut out = ToolOutput::default();
        match action {
            PermissionsAction::Explain => {
                let listed = self.run(&self.invocation(settings_file, action, &[])?).await?;
                out.relay_stdout(&listed.stdout);
                out.relay_stderr(&listed.stderr);
                if !out.stdout.is_empty() {
                    out.line("");
                }
                out.line(EXPLAIN_INSTRUCTIONS);
            }
            PermissionsAction::Test => {
                let tested = self
                    .run(&self.invocation(settings_file, action, &args.args)?)
                    .await?;
                out.relay_stdout(&tested.stdout);
                out.relay_stderr(&tested.stderr);
                if !tested.success() {
                    out.line(format!(
                        "Note: test exited with code {}; a non-zero code reports the decision and is not a tool failure.",
                        tested.exit_code
                    ));
                }
            }
            PermissionsAction::Add => {
                let added = self
                    .run(&self.invocation(settings_file, action, &args.args)?)
                    .await?;
                out.relay_stdout(&added.stdout);
                out.relay_stderr(&added.stderr);
            }
            PermissionsAction::Edit => {
                // Rules go through stdin so each one stays a single line
                // regardless of its quoting.
                let rules = args.args.join("\n");
                let inv = self.invocation(settings_file, action, &[])?.stdin(rules);
                out.line(format!(
                    "Replacing all permissions with {} rule(s)...",
                    args.args.len()
                ));
                let edited = self.run(&inv).await?;
                out.relay_stdout(&edited.stdout);
                out.relay_stderr(&edited.stderr);
            }
        }
        Ok(out)
    }
}

/// Expand `~` or a leading `~/` to `home`. Other paths (including `~user`)
/// are returned unchanged.
fn expand_tilde(raw: &str, home: Option<&Path>) -> Result<PathBuf, ToolError> {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(raw));
    };
    let home = home.ok_or_else(|| {
        ToolError::InvalidArguments(format!(
            "cannot expand `{raw}`: home directory is unknown"
        ))
    })?;
    Ok(if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    })
}
