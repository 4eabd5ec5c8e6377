//! Terminal input module.
//!
//! Maps `crossterm` key events into the per-mode command enumerations of
//! [`crate::types`]. One key press yields at most one command; the session
//! decides whether the command applies.

pub mod map;

pub use tui_tilegrid_types as types;

pub use map::{fall_command, should_quit, slide_command};
