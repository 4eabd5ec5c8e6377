//! Slide module - directional compaction and merging for the sliding puzzle
//!
//! A slide moves every tile as far as it can toward one edge. Tiles are visited
//! nearest-edge first, so a tile that has already settled is never visited
//! again in the same slide:
//!
//! | Direction | Outer loop | Inner loop |
//! |-----------|------------|------------|
//! | Up | rows top to bottom | columns left to right |
//! | Down | rows bottom to top | columns left to right |
//! | Left | columns left to right | rows top to bottom |
//! | Right | columns right to left | rows top to bottom |
//!
//! Each tile probes toward the edge, skipping empty cells. At the first
//! occupied cell it merges if the values are equal and that cell has not
//! already received a merge in this slide; otherwise it settles just before
//! it. A tile that reaches the edge settles there. The fixed order makes every
//! slide deterministic.

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{CellValue, Direction, EMPTY};

/// Cells of the grid in the order a slide toward `direction` visits them
pub fn traversal_order(height: usize, width: usize, direction: Direction) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(height * width);
    match direction {
        Direction::Up => {
            for row in 0..height {
                order.extend((0..width).map(|col| (row, col)));
            }
        }
        Direction::Down => {
            for row in (0..height).rev() {
                order.extend((0..width).map(|col| (row, col)));
            }
        }
        Direction::Left => {
            for col in 0..width {
                order.extend((0..height).map(|row| (row, col)));
            }
        }
        Direction::Right => {
            for col in (0..width).rev() {
                order.extend((0..height).map(|row| (row, col)));
            }
        }
    }
    order
}

/// The neighbour of (row, col) one step toward `direction`, if inside the grid
fn step(grid: &Grid, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
    let (dr, dc) = direction.delta();
    let next_row = row as isize + dr;
    let next_col = col as isize + dc;
    grid.contains(next_row, next_col)
        .then_some((next_row as usize, next_col as usize))
}

/// Check whether sliding toward `direction` would move or merge any tile
///
/// True iff some tile has its neighbour toward `direction` empty or holding
/// the same value.
pub fn can_slide(grid: &Grid, direction: Direction) -> Result<bool> {
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let value = grid.get(row, col)?;
            if value == EMPTY {
                continue;
            }
            if let Some((nr, nc)) = step(grid, row, col, direction) {
                let neighbour = grid.get(nr, nc)?;
                if neighbour == EMPTY || neighbour == value {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// Where a single tile ends up during a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    /// Settle at this cell (possibly the cell it started in)
    Settle(usize, usize),
    /// Merge into the tile at this cell
    Merge(usize, usize),
}

fn probe(
    grid: &Grid,
    merged: &[bool],
    row: usize,
    col: usize,
    value: CellValue,
    direction: Direction,
) -> Result<Landing> {
    let (mut at_row, mut at_col) = (row, col);
    while let Some((nr, nc)) = step(grid, at_row, at_col, direction) {
        let next = grid.get(nr, nc)?;
        if next == EMPTY {
            at_row = nr;
            at_col = nc;
            continue;
        }
        if next == value && !merged[nr * grid.width() + nc] {
            return Ok(Landing::Merge(nr, nc));
        }
        break;
    }
    Ok(Landing::Settle(at_row, at_col))
}

/// Slide every tile toward `direction`, returning the points scored by merges
///
/// A merge doubles the destination, empties the source and scores the merged
/// value. No cell receives more than one merge per slide, so `[2, 2, 2, 2]`
/// slid left becomes `[4, 4, 0, 0]`. On a grid where [`can_slide`] is false
/// this leaves the grid untouched and returns 0.
pub fn slide(grid: &mut Grid, direction: Direction) -> Result<u32> {
    let mut merged = vec![false; grid.height() * grid.width()];
    let mut score_delta: u32 = 0;

    for (row, col) in traversal_order(grid.height(), grid.width(), direction) {
        let value = grid.get(row, col)?;
        if value == EMPTY {
            continue;
        }

        match probe(grid, &merged, row, col, value, direction)? {
            Landing::Merge(to_row, to_col) => {
                let doubled = value.saturating_mul(2);
                grid.set(to_row, to_col, doubled)?;
                grid.set(row, col, EMPTY)?;
                merged[to_row * grid.width() + to_col] = true;
                score_delta = score_delta.saturating_add(doubled);
            }
            Landing::Settle(to_row, to_col) if (to_row, to_col) != (row, col) => {
                grid.set(to_row, to_col, value)?;
                grid.set(row, col, EMPTY)?;
            }
            Landing::Settle(..) => {}
        }
    }

    Ok(score_delta)
}

/// Check whether no direction can change the grid
///
/// Only a full grid can be over. An empty cell either takes a tile on the
/// next slide or waits for a spawn, as on a grid with no tiles at all.
pub fn is_game_over(grid: &Grid) -> Result<bool> {
    if !grid.is_full() {
        return Ok(false);
    }
    for direction in Direction::ALL {
        if can_slide(grid, direction)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[[u32; 4]; 4]) -> Grid {
        let rows: Vec<Vec<u32>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    fn single_row(row: [u32; 4]) -> Grid {
        grid(&[row, [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let mut g = single_row([2, 2, 2, 2]);
        let score = slide(&mut g, Direction::Left).unwrap();
        assert_eq!(g.rows()[0], vec![4, 4, 0, 0]);
        assert_eq!(score, 8);
    }

    #[test]
    fn test_fresh_merge_does_not_merge_again() {
        let mut g = single_row([4, 2, 2, 0]);
        let score = slide(&mut g, Direction::Left).unwrap();
        assert_eq!(g.rows()[0], vec![4, 4, 0, 0]);
        assert_eq!(score, 4);
    }

    #[test]
    fn test_merge_prefers_tiles_nearest_the_edge() {
        let mut g = single_row([2, 2, 2, 0]);
        slide(&mut g, Direction::Right).unwrap();
        assert_eq!(g.rows()[0], vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_tiles_compact_past_gaps() {
        let mut g = single_row([0, 2, 0, 8]);
        let score = slide(&mut g, Direction::Left).unwrap();
        assert_eq!(g.rows()[0], vec![2, 8, 0, 0]);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_merge_across_gap() {
        let mut g = single_row([2, 0, 0, 2]);
        let score = slide(&mut g, Direction::Left).unwrap();
        assert_eq!(g.rows()[0], vec![4, 0, 0, 0]);
        assert_eq!(score, 4);
    }

    #[test]
    fn test_vertical_slides() {
        let mut g = grid(&[[2, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]]);
        let score = slide(&mut g, Direction::Down).unwrap();
        assert_eq!(g.rows(), vec![vec![0; 4], vec![0; 4], vec![4, 0, 0, 0], vec![4, 0, 0, 0]]);
        assert_eq!(score, 4);

        let score = slide(&mut g, Direction::Up).unwrap();
        assert_eq!(g.rows()[0], vec![8, 0, 0, 0]);
        assert_eq!(score, 8);
    }

    #[test]
    fn test_can_slide_ignores_empty_sources() {
        let g = single_row([2, 4, 8, 16]);
        assert!(!can_slide(&g, Direction::Left).unwrap());
        assert!(!can_slide(&g, Direction::Right).unwrap());
        assert!(can_slide(&g, Direction::Down).unwrap());
        assert!(!can_slide(&g, Direction::Up).unwrap());
        assert!(!can_slide(&Grid::new(4, 4), Direction::Left).unwrap());
    }

    #[test]
    fn test_blocked_slide_is_noop() {
        let mut g = single_row([2, 4, 8, 16]);
        let before = g.clone();
        assert_eq!(slide(&mut g, Direction::Left).unwrap(), 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_traversal_orders() {
        assert_eq!(traversal_order(2, 2, Direction::Up), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(traversal_order(2, 2, Direction::Down), vec![(1, 0), (1, 1), (0, 0), (0, 1)]);
        assert_eq!(traversal_order(2, 2, Direction::Left), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(traversal_order(2, 2, Direction::Right), vec![(0, 1), (1, 1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_game_over_on_checkerboard() {
        let g = grid(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_game_over(&g).unwrap());

        let mut open = g.clone();
        open.set(2, 2, 0).unwrap();
        assert!(!is_game_over(&open).unwrap());
    }

    #[test]
    fn test_empty_grid_is_not_game_over() {
        let g = Grid::new(4, 4);
        for direction in Direction::ALL {
            assert!(!can_slide(&g, direction).unwrap());
        }
        assert!(!is_game_over(&g).unwrap());
    }
}
