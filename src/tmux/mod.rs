//! Isolated tmux server addressing and session lifecycle helpers.

pub mod commands;
pub mod session;

pub use commands::TmuxServer;
pub use session::{ensure_session, session_name_for, SessionStatus};
