//! Snapshot module - versioned, named-field save payloads
//!
//! Snapshots are what an external save/load collaborator persists. They are
//! plain serde structs, independent of the in-memory session layout: the grid
//! is nested rows and piece kinds are their lowercase names.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::grid::Grid;
use crate::types::{CellValue, PieceKind, EMPTY, SNAPSHOT_VERSION};

/// Sliding-mode session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingSnapshot {
    pub version: u32,
    pub score: u32,
    pub high_score: u32,
    pub grid: Vec<Vec<CellValue>>,
    pub game_over: bool,
}

/// Position of the falling piece that had not locked yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: String,
    pub row: isize,
    pub col: isize,
}

/// Falling-mode session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallingSnapshot {
    pub version: u32,
    pub score: u32,
    pub high_score: u32,
    pub grid: Vec<Vec<CellValue>>,
    pub game_over: bool,
    pub active: Option<ActiveSnapshot>,
    pub upcoming: Vec<String>,
    #[serde(default)]
    pub rows_cleared: u32,
}

pub(crate) fn check_version(version: u32) -> Result<(), SnapshotError> {
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(())
}

/// Rebuild a grid, checking its dimensions and every cell value
pub(crate) fn restore_grid(
    rows: &[Vec<CellValue>],
    height: usize,
    width: usize,
    check_cell: impl Fn(usize, usize, CellValue) -> Result<(), SnapshotError>,
) -> Result<Grid, SnapshotError> {
    let found_width = rows.first().map_or(0, Vec::len);
    let dimension_error = SnapshotError::Dimensions {
        found_height: rows.len(),
        found_width,
        height,
        width,
    };
    let grid = Grid::from_rows(rows).ok_or_else(|| dimension_error.clone())?;
    if grid.height() != height || grid.width() != width {
        return Err(dimension_error);
    }
    for (row, cells) in rows.iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            check_cell(row, col, value)?;
        }
    }
    Ok(grid)
}

/// Sliding tiles are empty or a power of two no smaller than 2
pub(crate) fn check_tile(row: usize, col: usize, value: CellValue) -> Result<(), SnapshotError> {
    if value == EMPTY || (value >= 2 && value.is_power_of_two()) {
        Ok(())
    } else {
        Err(SnapshotError::InvalidTile { row, col, value })
    }
}

/// Falling cells are empty or a piece kind's cell value
pub(crate) fn check_piece_cell(
    row: usize,
    col: usize,
    value: CellValue,
) -> Result<(), SnapshotError> {
    if value == EMPTY || PieceKind::from_cell_value(value).is_some() {
        Ok(())
    } else {
        Err(SnapshotError::InvalidCell { row, col, value })
    }
}

pub(crate) fn parse_kind(name: &str) -> Result<PieceKind, SnapshotError> {
    PieceKind::from_str(name).ok_or_else(|| SnapshotError::UnknownPiece {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_grid_checks_dimensions() {
        let rows = vec![vec![0, 2], vec![4, 0]];
        assert!(restore_grid(&rows, 2, 2, check_tile).is_ok());
        assert_eq!(
            restore_grid(&rows, 4, 4, check_tile),
            Err(SnapshotError::Dimensions {
                found_height: 2,
                found_width: 2,
                height: 4,
                width: 4
            })
        );
        assert!(restore_grid(&[vec![0, 2], vec![4]], 2, 2, check_tile).is_err());
    }

    #[test]
    fn test_tile_values_must_be_powers_of_two() {
        assert!(check_tile(0, 0, 0).is_ok());
        assert!(check_tile(0, 0, 2048).is_ok());
        assert_eq!(
            check_tile(1, 2, 3),
            Err(SnapshotError::InvalidTile {
                row: 1,
                col: 2,
                value: 3
            })
        );
        assert!(check_tile(0, 0, 1).is_err());
    }

    #[test]
    fn test_piece_cells_and_kinds() {
        assert!(check_piece_cell(0, 0, 7).is_ok());
        assert!(check_piece_cell(0, 0, 8).is_err());
        assert_eq!(parse_kind("T"), Ok(PieceKind::T));
        assert!(matches!(
            parse_kind("x"),
            Err(SnapshotError::UnknownPiece { .. })
        ));
    }

    #[test]
    fn test_version_gate() {
        assert!(check_version(SNAPSHOT_VERSION).is_ok());
        assert!(check_version(SNAPSHOT_VERSION + 1).is_err());
    }
}
