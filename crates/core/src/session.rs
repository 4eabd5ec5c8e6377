//! Session plumbing shared by both game modes.

use crate::error::Result;
use crate::grid::Grid;

/// What one command did to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Whether the grid, piece or score changed
    pub changed: bool,
    /// Points added by this command
    pub score_delta: u32,
    /// Terminal flag after the command
    pub game_over: bool,
}

impl Transition {
    /// A command that left the session as it was
    pub fn unchanged(game_over: bool) -> Self {
        Self {
            changed: false,
            score_delta: 0,
            game_over,
        }
    }
}

/// The surface a front end drives, whichever puzzle it is running
///
/// Each mode has its own closed command enumeration, so a command of one mode
/// cannot be sent to the other.
pub trait GameSession {
    type Command: Copy + std::fmt::Debug;
    type Snapshot;

    /// Apply one command: transition, spawn, terminal check, high score
    fn apply_command(&mut self, command: Self::Command) -> Result<Transition>;

    /// Empty the grid, zero the score and perform the initial spawn
    fn new_game(&mut self) -> Result<()>;

    fn grid(&self) -> &Grid;

    fn score(&self) -> u32;

    fn high_score(&self) -> u32;

    fn game_over(&self) -> bool;

    fn snapshot(&self) -> Self::Snapshot;
}
