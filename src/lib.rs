//! TUI tile-grid puzzles (workspace facade crate).
//!
//! The game logic, input mapping and rendering live in dedicated crates under
//! `crates/`; this package re-exports them as `tui_tilegrid::{core,input,term,types}`
//! and adds the binary's configuration and save-file handling.

pub mod config;
pub mod save;

pub use tui_tilegrid_core as core;
pub use tui_tilegrid_input as input;
pub use tui_tilegrid_term as term;
pub use tui_tilegrid_types as types;
