//! Pieces module - falling piece shapes and the active-piece value
//!
//! Shapes are stored in shape-local coordinates: `(row, col)` offsets whose
//! minimum row and minimum column are both 0. A [`Piece`] pairs a kind with an
//! absolute anchor on the grid, and [`Piece::cells`] is the single place where
//! shape-local offsets become grid coordinates.

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor, as (row, col)
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

/// Get the shape (cell offsets) for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
        PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
        PieceKind::T => [(0, 1), (1, 0), (1, 1), (1, 2)],
        PieceKind::S => [(0, 1), (0, 2), (1, 0), (1, 1)],
        PieceKind::Z => [(0, 0), (0, 1), (1, 1), (1, 2)],
        PieceKind::J => [(0, 0), (1, 0), (1, 1), (1, 2)],
        PieceKind::L => [(0, 2), (1, 0), (1, 1), (1, 2)],
    }
}

/// Bounding box of a shape as (height, width)
pub fn shape_extent(kind: PieceKind) -> (usize, usize) {
    let shape = get_shape(kind);
    let height = shape.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1;
    let width = shape.iter().map(|&(_, c)| c).max().unwrap_or(0) + 1;
    (height as usize, width as usize)
}

/// The active (not yet locked) falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Grid row of the shape's local origin
    pub row: isize,
    /// Grid column of the shape's local origin
    pub col: isize,
}

impl Piece {
    pub fn new(kind: PieceKind, row: isize, col: isize) -> Self {
        Self { kind, row, col }
    }

    /// Place a piece at the top row, horizontally centered
    ///
    /// Leftmost column is `(grid_width - piece_width) / 2`.
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let (_, width) = shape_extent(kind);
        let col = grid_width.saturating_sub(width) / 2;
        Self::new(kind, 0, col as isize)
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind)
    }

    /// Absolute grid coordinates of every cell, as (row, col)
    pub fn cells(&self) -> [(isize, isize); 4] {
        self.shape()
            .map(|(dr, dc)| (self.row + dr as isize, self.col + dc as isize))
    }

    /// The same piece moved by (d_row, d_col)
    pub fn shifted(&self, d_row: isize, d_col: isize) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }

    pub fn width(&self) -> usize {
        shape_extent(self.kind).1
    }

    pub fn height(&self) -> usize {
        shape_extent(self.kind).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_are_normalized() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert_eq!(shape.iter().map(|&(r, _)| r).min(), Some(0), "{:?}", kind);
            assert_eq!(shape.iter().map(|&(_, c)| c).min(), Some(0), "{:?}", kind);
        }
    }

    #[test]
    fn test_shape_extents() {
        assert_eq!(shape_extent(PieceKind::I), (1, 4));
        assert_eq!(shape_extent(PieceKind::O), (2, 2));
        assert_eq!(shape_extent(PieceKind::T), (2, 3));
    }

    #[test]
    fn test_spawn_centers_piece() {
        assert_eq!(Piece::spawn(PieceKind::I, 10).col, 3);
        assert_eq!(Piece::spawn(PieceKind::O, 10).col, 4);
        assert_eq!(Piece::spawn(PieceKind::T, 10).col, 3);
        assert_eq!(Piece::spawn(PieceKind::T, 10).row, 0);
        assert_eq!(Piece::spawn(PieceKind::I, 2).col, 0);
    }

    #[test]
    fn test_cells_are_anchor_plus_offsets() {
        let piece = Piece::new(PieceKind::J, 5, 2);
        assert_eq!(piece.cells(), [(5, 2), (6, 2), (6, 3), (6, 4)]);
        assert_eq!(piece.shifted(1, -1).cells()[0], (6, 1));
    }
}
