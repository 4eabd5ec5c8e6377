//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. Views draw
//! a session into a plain framebuffer; [`TerminalRenderer`] flushes it to the
//! terminal with `crossterm`, emitting only the cells that changed.

pub mod fb;
pub mod renderer;
pub mod style;
pub mod view;

pub use tui_tilegrid_core as core;
pub use tui_tilegrid_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use style::{piece_token, resolve, tile_token, StyleToken};
pub use view::{AnchorY, GameView, Viewport};
