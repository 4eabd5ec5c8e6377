//! Grid module - fixed-size 2-D array of cell values
//!
//! Both game modes store their state in a `Grid`: tile values for the sliding
//! puzzle, piece cell values for the falling puzzle. Uses a flat row-major
//! vector for cache locality. Dimensions are fixed at construction.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.
//!
//! All reads and writes go through [`Grid::get`] and [`Grid::set`], which
//! reject coordinates outside the grid with [`CoreError::OutOfBounds`].

use arrayvec::ArrayVec;

use crate::error::{CoreError, Result};
use crate::types::{CellValue, EMPTY};

/// Upper bound on rows removed by one call to [`Grid::clear_full_rows`].
///
/// A falling piece spans at most four rows, so one lock can fill at most four.
pub const MAX_CLEARED_ROWS: usize = 4;

/// A fixed-dimension grid of unsigned cell values (0 = empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<CellValue>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![EMPTY; height * width],
        }
    }

    /// Build a grid from rows; `None` if the rows are empty or ragged.
    pub fn from_rows(rows: &[Vec<CellValue>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            height: rows.len(),
            width,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(CoreError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<CellValue> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Check whether signed coordinates fall inside the grid
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Check if position is within bounds and empty
    ///
    /// Takes signed coordinates so piece offsets can be probed past the
    /// left edge or above the top without wrapping.
    pub fn is_vacant(&self, row: isize, col: isize) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        matches!(self.get(row as usize, col as usize), Ok(EMPTY))
    }

    /// Coordinates of every empty cell, in row-major order
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &value)| value == EMPTY)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }

    /// Check if no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != EMPTY)
    }

    /// Sum of all cell values
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&value| u64::from(value)).sum()
    }

    /// Largest cell value (0 on an empty grid)
    pub fn max_value(&self) -> CellValue {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|&value| value != EMPTY)
    }

    /// Clear all full rows and return the row indices that were cleared (sorted top to bottom)
    ///
    /// Rows above each cleared row shift down. Uses a two-pointer pass with
    /// stack-only bookkeeping; at most [`MAX_CLEARED_ROWS`] rows are removed.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = self.width;
        let mut write_row = self.height;

        // Scan from bottom to top
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) && cleared_rows.try_push(read_row).is_ok() {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        // Vacated rows at the top
        self.cells[..write_row * width].fill(EMPTY);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Copy of the grid as nested rows (snapshot and rendering format)
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(19, 10);
        assert_eq!(grid.index(0, 0), Ok(0));
        assert_eq!(grid.index(0, 9), Ok(9));
        assert_eq!(grid.index(1, 0), Ok(10));
        assert_eq!(grid.index(18, 9), Ok(189));
        assert!(grid.index(19, 0).is_err());
        assert!(grid.index(0, 10).is_err());
    }

    #[test]
    fn test_out_of_bounds_reports_coordinates() {
        let mut grid = Grid::new(4, 4);
        assert_eq!(
            grid.get(4, 1),
            Err(CoreError::OutOfBounds {
                row: 4,
                col: 1,
                height: 4,
                width: 4
            })
        );
        assert!(grid.set(0, 7, 2).is_err());
        assert_eq!(grid.sum(), 0);
    }

    #[test]
    fn test_vacancy_with_signed_coordinates() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, 4).unwrap();
        assert!(grid.is_vacant(0, 0));
        assert!(!grid.is_vacant(1, 1));
        assert!(!grid.is_vacant(-1, 0));
        assert!(!grid.is_vacant(0, -1));
        assert!(!grid.is_vacant(3, 0));
    }

    #[test]
    fn test_clear_full_rows_shifts_rows_down() {
        let mut grid = Grid::from_rows(&[
            vec![0, 3, 0],
            vec![1, 1, 1],
            vec![2, 0, 2],
            vec![4, 4, 4],
        ])
        .unwrap();

        let cleared = grid.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[1, 3]);
        assert_eq!(
            grid.rows(),
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 3, 0], vec![2, 0, 2]]
        );
    }

    #[test]
    fn test_clear_full_rows_caps_at_four() {
        let mut grid = Grid::new(6, 2);
        for row in 0..6 {
            grid.set(row, 0, 1).unwrap();
            grid.set(row, 1, 1).unwrap();
        }

        let cleared = grid.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[2, 3, 4, 5]);
        let rows = grid.rows();
        assert!(rows[..4].iter().all(|row| row == &vec![0, 0]));
        assert!(rows[4..].iter().all(|row| row == &vec![1, 1]));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&[]).is_none());
        assert!(Grid::from_rows(&[vec![1, 2], vec![3]]).is_none());
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(grid.get(1, 0), Ok(3));
        assert_eq!(grid.max_value(), 4);
    }
}
