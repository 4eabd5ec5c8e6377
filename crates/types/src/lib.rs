//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both game modes.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, input mapping, terminal rendering).
//!
//! # Grid Dimensions
//!
//! | Mode | Width | Height |
//! |------|-------|--------|
//! | Sliding (merge puzzle) | 4 | 4 |
//! | Falling (block puzzle) | 10 | 19 |
//!
//! Coordinates are `(row, col)` with row 0 at the top and col 0 at the left.
//!
//! # Spawn Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SLIDE_INITIAL_TILES` | 2 | Tiles placed by a new sliding game |
//! | `SLIDE_FOUR_PROBABILITY` | 0.1 | Chance that a spawned tile is a 4 |
//! | `UPCOMING_LEN` | 5 | Length of the falling-mode preview queue |
//!
//! # Examples
//!
//! ```
//! use tui_tilegrid_types::{Direction, FallCommand, PieceKind, SlideCommand};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(PieceKind::from_cell_value(piece.cell_value()), Some(PieceKind::T));
//!
//! assert_eq!(Direction::Left.delta(), (0, -1));
//! assert_eq!(SlideCommand::Slide(Direction::Up).as_str(), "up");
//! assert_eq!(FallCommand::Drop.as_str(), "drop");
//! ```

/// Sliding-mode grid width (4 columns)
pub const SLIDE_WIDTH: usize = 4;

/// Sliding-mode grid height (4 rows)
pub const SLIDE_HEIGHT: usize = 4;

/// Number of tiles spawned by a fresh sliding game
pub const SLIDE_INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 4 instead of a 2
pub const SLIDE_FOUR_PROBABILITY: f64 = 0.1;

/// Falling-mode grid width (10 columns)
pub const FALL_WIDTH: usize = 10;

/// Falling-mode grid height (19 rows)
pub const FALL_HEIGHT: usize = 19;

/// Length of the upcoming-pieces preview queue
pub const UPCOMING_LEN: usize = 5;

/// Row clear scoring table (index = rows cleared by one lock)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row for a single `Down` step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a `Drop`.
pub const HARD_DROP_POINTS: u32 = 2;

/// Version tag written into every persisted snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A grid cell value. `0` is empty.
pub type CellValue = u32;

/// Value of an empty cell
pub const EMPTY: CellValue = 0;

/// The four slide directions of the merge puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the terminal detector probes them
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(d_row, d_col)` a tile takes when moving this way
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Commands accepted by a sliding-mode session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideCommand {
    /// Compact and merge every tile toward one edge
    Slide(Direction),
    /// Clear the grid and score, spawn the starting tiles
    NewGame,
}

impl SlideCommand {
    /// Name used in log events
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideCommand::Slide(direction) => direction.as_str(),
            SlideCommand::NewGame => "newGame",
        }
    }
}

/// Commands accepted by a falling-mode session
///
/// Kept separate from [`Direction`] so a falling command can never be fed
/// to the merge engine (or the other way round).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallCommand {
    /// Shift the active piece one column left
    Left,
    /// Shift the active piece one column right
    Right,
    /// Move the active piece one row down, locking it if blocked
    Down,
    /// Move the active piece down until blocked, then lock it
    Drop,
    /// Clear the grid and score, refill the queue and spawn a piece
    NewGame,
}

impl FallCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallCommand::Left => "left",
            FallCommand::Right => "right",
            FallCommand::Down => "down",
            FallCommand::Drop => "drop",
            FallCommand::NewGame => "newGame",
        }
    }
}

/// The seven falling piece kinds
///
/// The kind doubles as the piece's display attribute: locked cells store
/// [`PieceKind::cell_value`] so the renderer can pick a style per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// The fixed repertoire, in cell-value order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Non-zero value written into the grid when a piece of this kind locks
    pub fn cell_value(self) -> CellValue {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::cell_value`]; `None` for empty or unknown values
    pub fn from_cell_value(value: CellValue) -> Option<Self> {
        match value {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tilegrid_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}
