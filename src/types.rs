//! Data model shared by both adapters: the schema descriptor emitted in
//! describe mode and the text a tool hands back after executing a request.

use serde::{Deserialize, Serialize};

/// Tool description printed in describe mode.
///
/// Serializes to `{ "name", "description", "inputSchema" }`, the shape the
/// host runtime expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON schema object with `type`, `properties`, and `required`.
    pub input_schema: serde_json::Value,
}

/// Text a tool produced for one request, split by destination stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Append one line to stdout.
    pub fn line(&mut self, text: impl AsRef<str>) {
        push_line(&mut self.stdout, text.as_ref());
    }

    /// Append captured subprocess text to stdout, keeping it verbatim apart
    /// from guaranteeing a trailing newline.
    pub fn relay_stdout(&mut self, text: &str) {
        if !text.is_empty() {
            push_line(&mut self.stdout, text);
        }
    }

    /// Append captured subprocess text to stderr when non-empty.
    pub fn relay_stderr(&mut self, text: &str) {
        if !text.is_empty() {
            push_line(&mut self.stderr, text);
        }
    }
}

fn push_line(buf: &mut String, text: &str) {
    buf.push_str(text);
    if !text.ends_with('\n') {
        buf.push('\n');
    }
}
