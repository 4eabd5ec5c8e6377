//! Session configuration.
//!
//! Defaults come from the constants in `tui-tilegrid-types`; callers override
//! individual fields with struct update syntax.

use crate::types::{
    FALL_HEIGHT, FALL_WIDTH, SLIDE_FOUR_PROBABILITY, SLIDE_HEIGHT, SLIDE_INITIAL_TILES,
    SLIDE_WIDTH, UPCOMING_LEN,
};

/// Parameters of a sliding-mode session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidingConfig {
    pub height: usize,
    pub width: usize,
    /// Tiles spawned by `NewGame`
    pub initial_tiles: usize,
    /// Chance that a spawned tile is a 4
    pub four_probability: f64,
}

impl Default for SlidingConfig {
    fn default() -> Self {
        Self {
            height: SLIDE_HEIGHT,
            width: SLIDE_WIDTH,
            initial_tiles: SLIDE_INITIAL_TILES,
            four_probability: SLIDE_FOUR_PROBABILITY,
        }
    }
}

/// Parameters of a falling-mode session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingConfig {
    pub height: usize,
    pub width: usize,
    /// Length of the upcoming-pieces preview
    pub upcoming_len: usize,
}

impl Default for FallingConfig {
    fn default() -> Self {
        Self {
            height: FALL_HEIGHT,
            width: FALL_WIDTH,
            upcoming_len: UPCOMING_LEN,
        }
    }
}
