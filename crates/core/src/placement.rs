//! Placement module - collision tests and locking for falling pieces
//!
//! The active piece is never written into the grid while it moves, so every
//! occupied cell the piece probes belongs to the locked stack. A move is legal
//! when each target cell is inside the grid and empty.

use crate::error::Result;
use crate::grid::Grid;
use crate::pieces::Piece;

/// Check whether every cell of `piece` is inside the grid and empty
pub fn can_place(grid: &Grid, piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(row, col)| grid.is_vacant(row, col))
}

/// Move the piece by (d_row, d_col) if the target position is free
///
/// Returns false and leaves the piece untouched when any target cell is out
/// of bounds or occupied. Never modifies the grid.
pub fn try_move(grid: &Grid, piece: &mut Piece, d_row: isize, d_col: isize) -> bool {
    let moved = piece.shifted(d_row, d_col);
    if !can_place(grid, &moved) {
        return false;
    }
    *piece = moved;
    true
}

/// Check if the piece is resting on the floor or on a locked cell
pub fn is_grounded(grid: &Grid, piece: &Piece) -> bool {
    !can_place(grid, &piece.shifted(1, 0))
}

/// Number of rows the piece can fall before it is grounded
pub fn drop_distance(grid: &Grid, piece: &Piece) -> usize {
    let mut distance = 0;
    while can_place(grid, &piece.shifted(distance as isize + 1, 0)) {
        distance += 1;
    }
    distance
}

/// Write the piece's cells into the grid as its kind's cell value
pub fn lock(grid: &mut Grid, piece: &Piece) -> Result<()> {
    let value = piece.kind.cell_value();
    let cells = piece.cells();
    // Negative coordinates wrap to huge values and are rejected by the accessors.
    for &(row, col) in &cells {
        grid.get(row as usize, col as usize)?;
    }
    for (row, col) in cells {
        grid.set(row as usize, col as usize, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::PieceKind;

    #[test]
    fn test_try_move_on_empty_grid() {
        let grid = Grid::new(19, 10);
        let mut piece = Piece::spawn(PieceKind::T, 10);

        assert!(try_move(&grid, &mut piece, 0, 1));
        assert_eq!(piece.col, 4);
        assert!(try_move(&grid, &mut piece, 1, 0));
        assert_eq!(piece.row, 1);
    }

    #[test]
    fn test_try_move_stops_at_walls() {
        let grid = Grid::new(19, 10);
        let mut piece = Piece::new(PieceKind::O, 0, 0);
        assert!(!try_move(&grid, &mut piece, 0, -1));
        assert!(!try_move(&grid, &mut piece, -1, 0));
        assert_eq!((piece.row, piece.col), (0, 0));

        let mut piece = Piece::new(PieceKind::O, 0, 8);
        assert!(!try_move(&grid, &mut piece, 0, 1));
    }

    #[test]
    fn test_try_move_collision_leaves_everything_unchanged() {
        let mut grid = Grid::new(19, 10);
        grid.set(2, 5, 7).unwrap();
        let before = grid.clone();

        let mut piece = Piece::new(PieceKind::O, 0, 4);
        assert!(!try_move(&grid, &mut piece, 1, 0));
        assert_eq!(piece, Piece::new(PieceKind::O, 0, 4));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_grounded_on_floor_and_stack() {
        let mut grid = Grid::new(5, 4);
        let piece = Piece::new(PieceKind::I, 4, 0);
        assert!(is_grounded(&grid, &piece));

        grid.set(3, 1, 1).unwrap();
        let piece = Piece::new(PieceKind::I, 2, 0);
        assert!(is_grounded(&grid, &piece));
        assert_eq!(drop_distance(&grid, &Piece::new(PieceKind::I, 0, 0)), 2);
    }

    #[test]
    fn test_lock_writes_cell_values() {
        let mut grid = Grid::new(4, 4);
        let piece = Piece::new(PieceKind::S, 2, 0);
        lock(&mut grid, &piece).unwrap();
        assert_eq!(
            grid.rows(),
            vec![vec![0, 0, 0, 0], vec![0, 0, 0, 0], vec![0, 4, 4, 0], vec![4, 4, 0, 0]]
        );
    }

    #[test]
    fn test_lock_outside_grid_is_out_of_bounds() {
        let mut grid = Grid::new(4, 4);
        let piece = Piece::new(PieceKind::I, 0, 2);
        assert!(matches!(
            lock(&mut grid, &piece),
            Err(CoreError::OutOfBounds { .. })
        ));
        // Nothing is written when any cell is outside.
        assert_eq!(grid.sum(), 0);
    }
}
