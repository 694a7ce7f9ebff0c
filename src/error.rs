//! Unified error types for both adapters.

use std::fmt;

// ---------------------------------------------------------------------------
// ToolError
// ---------------------------------------------------------------------------

/// Errors arising while a tool handles one request.
#[derive(Debug)]
pub enum ToolError {
    /// The request was malformed or failed validation. Raised before any
    /// subprocess is spawned.
    InvalidArguments(String),
    /// A subprocess could not be started, or a step the action depends on
    /// failed.
    ExecutionFailed(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            Self::ExecutionFailed(msg) => write!(f, "execution failed: {msg}"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidArguments(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// AdapterError
// ---------------------------------------------------------------------------

/// Top-level error for one adapter invocation.
#[derive(Debug)]
pub enum AdapterError {
    Config(ConfigError),
    Tool(ToolError),
    /// The mode selector held something other than `describe`/`execute`.
    UnknownMode(String),
    /// Neither `--mode` nor the mode environment variable was set.
    MissingMode,
    /// Reading the request or writing the schema failed.
    Io(std::io::Error),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Tool(e) => write!(f, "{e}"),
            Self::UnknownMode(mode) => write!(f, "unknown mode: {mode}"),
            Self::MissingMode => write!(f, "no mode given; expected `describe` or `execute`"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<ConfigError> for AdapterError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ToolError> for AdapterError {
    fn from(e: ToolError) -> Self {
        Self::Tool(e)
    }
}

impl From<std::io::Error> for AdapterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
