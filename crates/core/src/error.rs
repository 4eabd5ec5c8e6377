//! Error types for the simulation core.

use thiserror::Error;

/// Errors produced by the grid engines and sessions.
///
/// `OutOfBounds` marks a defect in the caller (an engine computed a coordinate
/// outside the grid) and is propagated. `InvalidCommand` never leaves a session:
/// `apply_command` turns it into an unchanged transition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
    #[error("command `{command}` is not applicable in the current state")]
    InvalidCommand { command: &'static str },
}

/// Reasons a persisted snapshot cannot be turned back into a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("snapshot grid is {found_height}x{found_width}, expected {height}x{width}")]
    Dimensions {
        found_height: usize,
        found_width: usize,
        height: usize,
        width: usize,
    },
    #[error("tile value {value} at ({row}, {col}) is not a power of two")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("cell value {value} at ({row}, {col}) does not name a piece kind")]
    InvalidCell { row: usize, col: usize, value: u32 },
    #[error("`{name}` is not a piece kind")]
    UnknownPiece { name: String },
    #[error("row {row} is full; locked rows are cleared before saving")]
    FullRow { row: usize },
    #[error("upcoming queue holds {found} pieces, expected {expected}")]
    QueueLength { found: usize, expected: usize },
    #[error("active piece overlaps locked cells or leaves the grid")]
    ActivePieceBlocked,
}

pub type Result<T> = std::result::Result<T, CoreError>;
