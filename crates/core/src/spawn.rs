//! Spawn module - inserting new content after a transition
//!
//! Sliding mode drops one tile into a uniformly chosen empty cell. Falling
//! mode takes the next kind from the preview queue and centers it at the top.

use rand::{Rng, RngCore};
use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::placement::can_place;
use crate::rng::UpcomingPieces;
use crate::types::CellValue;

/// Result of a sliding-mode tile spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A tile of `value` was written at (row, col)
    Placed {
        row: usize,
        col: usize,
        value: CellValue,
    },
    /// No empty cell was available; nothing was written
    GridFull,
}

/// Place a 2 (or, with `four_probability`, a 4) in a random empty cell
pub fn spawn_tile<R: RngCore + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    four_probability: f64,
) -> Result<SpawnOutcome> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        debug!("tile spawn skipped: grid full");
        return Ok(SpawnOutcome::GridFull);
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(four_probability.clamp(0.0, 1.0)) {
        4
    } else {
        2
    };
    grid.set(row, col, value)?;
    debug!(row, col, value, "tile spawned");

    Ok(SpawnOutcome::Placed { row, col, value })
}

/// Result of a falling-mode piece spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSpawn {
    /// The piece fits at its spawn position
    Placed(Piece),
    /// The spawn position overlaps locked cells; the game is over
    Blocked(Piece),
}

/// Pop the next kind from the queue and center it on the top row
///
/// The queue is refilled by one random kind either way, so its length is
/// unchanged.
pub fn spawn_piece<R: RngCore + ?Sized>(
    grid: &Grid,
    upcoming: &mut UpcomingPieces,
    rng: &mut R,
) -> PieceSpawn {
    let kind = upcoming.advance(rng);
    let piece = Piece::spawn(kind, grid.width());
    if can_place(grid, &piece) {
        debug!(kind = kind.as_str(), col = piece.col, "piece spawned");
        PieceSpawn::Placed(piece)
    } else {
        debug!(kind = kind.as_str(), "piece spawn blocked");
        PieceSpawn::Blocked(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::PieceKind;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_spawn_tile_fills_one_empty_cell() {
        let mut grid = Grid::new(4, 4);
        let mut rng = SimpleRng::new(42);

        let outcome = spawn_tile(&mut grid, &mut rng, 0.1).unwrap();

        let SpawnOutcome::Placed { row, col, value } = outcome else {
            panic!("expected a placed tile");
        };
        assert!(value == 2 || value == 4);
        assert_eq!(grid.get(row, col).unwrap(), value);
        assert_eq!(grid.empty_cells().len(), 15);
    }

    #[test]
    fn test_spawn_tile_on_full_grid() {
        let mut grid = Grid::from_rows(&[vec![2, 4], vec![8, 16]]).unwrap();
        let before = grid.clone();
        let mut rng = SimpleRng::new(42);

        assert_eq!(
            spawn_tile(&mut grid, &mut rng, 0.1).unwrap(),
            SpawnOutcome::GridFull
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_spawn_tile_only_uses_empty_cells() {
        let mut rng = SimpleRng::new(9);
        for _ in 0..50 {
            let mut grid = Grid::from_rows(&[vec![2, 0], vec![8, 16]]).unwrap();
            let outcome = spawn_tile(&mut grid, &mut rng, 0.1).unwrap();
            assert!(matches!(outcome, SpawnOutcome::Placed { row: 0, col: 1, .. }));
        }
    }

    #[test]
    fn test_spawn_value_probability_extremes() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..20 {
            let mut grid = Grid::new(2, 2);
            let SpawnOutcome::Placed { value, .. } = spawn_tile(&mut grid, &mut rng, 0.0).unwrap()
            else {
                panic!("expected a placed tile");
            };
            assert_eq!(value, 2);

            let SpawnOutcome::Placed { value, .. } = spawn_tile(&mut grid, &mut rng, 1.0).unwrap()
            else {
                panic!("expected a placed tile");
            };
            assert_eq!(value, 4);
        }
    }

    #[test]
    fn test_spawn_tile_is_roughly_ninety_ten() {
        let mut rng = SimpleRng::new(2024);
        let mut fours = 0;
        for _ in 0..2000 {
            let mut grid = Grid::new(4, 4);
            if let SpawnOutcome::Placed { value: 4, .. } =
                spawn_tile(&mut grid, &mut rng, 0.1).unwrap()
            {
                fours += 1;
            }
        }
        assert!((100..=300).contains(&fours), "fours = {}", fours);
    }

    #[test]
    fn test_zero_rng_picks_first_empty_cell() {
        let mut grid = Grid::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
        let mut rng = StepRng::new(0, 0);
        let outcome = spawn_tile(&mut grid, &mut rng, 0.1).unwrap();
        assert!(matches!(outcome, SpawnOutcome::Placed { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_spawn_piece_centers_and_refills() {
        let grid = Grid::new(19, 10);
        let mut rng = SimpleRng::new(1);
        let mut upcoming = UpcomingPieces::from_kinds([PieceKind::O, PieceKind::I]);

        let spawned = spawn_piece(&grid, &mut upcoming, &mut rng);

        assert_eq!(spawned, PieceSpawn::Placed(Piece::new(PieceKind::O, 0, 4)));
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming.peek(), Some(PieceKind::I));
    }

    #[test]
    fn test_spawn_piece_blocked() {
        let mut grid = Grid::new(19, 10);
        grid.set(0, 4, 1).unwrap();
        let mut rng = SimpleRng::new(1);
        let mut upcoming = UpcomingPieces::from_kinds([PieceKind::O]);

        assert!(matches!(
            spawn_piece(&grid, &mut upcoming, &mut rng),
            PieceSpawn::Blocked(_)
        ));
        assert_eq!(upcoming.len(), 1);
    }
}
