//! Application orchestration shared by the tool binaries.

pub mod entry;

pub use entry::{main_for, resolve_mode, run, Mode, Outcome, ToolKind};
