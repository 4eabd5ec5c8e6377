//! Falling session - the active piece, the locked stack and the preview queue
//!
//! The active piece lives outside the grid until it locks. Locking writes it
//! in, clears full rows, scores them and spawns the next piece from the
//! queue. A spawn that overlaps the stack ends the game.

use rand::RngCore;
use tracing::{debug, info};

use crate::config::FallingConfig;
use crate::error::{CoreError, Result, SnapshotError};
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::placement::{can_place, drop_distance, is_grounded, lock, try_move};
use crate::rng::{SimpleRng, UpcomingPieces};
use crate::scoring::{calculate_drop_score, calculate_line_score};
use crate::session::{GameSession, Transition};
use crate::snapshot::{
    check_piece_cell, check_version, parse_kind, restore_grid, ActiveSnapshot, FallingSnapshot,
};
use crate::spawn::{spawn_piece, PieceSpawn};
use crate::types::{FallCommand, SNAPSHOT_VERSION};

/// Complete falling-mode state
#[derive(Debug, Clone)]
pub struct FallingSession<R = SimpleRng> {
    config: FallingConfig,
    grid: Grid,
    score: u32,
    high_score: u32,
    game_over: bool,
    active: Option<Piece>,
    upcoming: UpcomingPieces,
    rows_cleared: u32,
    rng: R,
}

impl FallingSession<SimpleRng> {
    /// Default-sized game driven by a seeded [`SimpleRng`]
    pub fn with_seed(seed: u32) -> Result<Self> {
        Self::new(FallingConfig::default(), SimpleRng::new(seed))
    }
}

impl<R> FallingSession<R> {
    /// The piece under player control, if any
    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Preview of the kinds that will spawn next
    pub fn upcoming(&self) -> &UpcomingPieces {
        &self.upcoming
    }

    /// Rows removed since the current game started
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }
}

impl<R: RngCore> FallingSession<R> {
    /// Create a session and spawn its first piece
    pub fn new(config: FallingConfig, mut rng: R) -> Result<Self> {
        let upcoming = UpcomingPieces::new(config.upcoming_len, &mut rng);
        let mut session = Self {
            config,
            grid: Grid::new(config.height, config.width),
            score: 0,
            high_score: 0,
            game_over: false,
            active: None,
            upcoming,
            rows_cleared: 0,
            rng,
        };
        session.new_game()?;
        Ok(session)
    }

    /// Restore a persisted session using the default configuration
    pub fn from_snapshot(
        snapshot: &FallingSnapshot,
        rng: R,
    ) -> std::result::Result<Self, SnapshotError> {
        Self::from_snapshot_with(FallingConfig::default(), snapshot, rng)
    }

    /// Restore a persisted session, checking it against `config`
    ///
    /// A running game saved without an active piece gets one spawned from
    /// the restored queue.
    pub fn from_snapshot_with(
        config: FallingConfig,
        snapshot: &FallingSnapshot,
        rng: R,
    ) -> std::result::Result<Self, SnapshotError> {
        check_version(snapshot.version)?;
        let grid = restore_grid(&snapshot.grid, config.height, config.width, check_piece_cell)?;
        if let Some(row) = (0..grid.height()).find(|&row| grid.is_row_full(row)) {
            return Err(SnapshotError::FullRow { row });
        }

        let kinds = snapshot
            .upcoming
            .iter()
            .map(|name| parse_kind(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if kinds.len() != config.upcoming_len {
            return Err(SnapshotError::QueueLength {
                found: kinds.len(),
                expected: config.upcoming_len,
            });
        }

        let active = match &snapshot.active {
            Some(saved) => {
                let piece = Piece::new(parse_kind(&saved.kind)?, saved.row, saved.col);
                if !can_place(&grid, &piece) {
                    return Err(SnapshotError::ActivePieceBlocked);
                }
                Some(piece)
            }
            None => None,
        };

        let mut session = Self {
            config,
            grid,
            score: snapshot.score,
            high_score: snapshot.high_score.max(snapshot.score),
            game_over: snapshot.game_over,
            active,
            upcoming: UpcomingPieces::from_kinds(kinds),
            rows_cleared: snapshot.rows_cleared,
            rng,
        };
        if !session.game_over && session.active.is_none() {
            session.spawn();
        }
        Ok(session)
    }

    fn spawn(&mut self) {
        match spawn_piece(&self.grid, &mut self.upcoming, &mut self.rng) {
            PieceSpawn::Placed(piece) => self.active = Some(piece),
            PieceSpawn::Blocked(piece) => {
                self.active = None;
                self.game_over = true;
                info!(
                    kind = piece.kind.as_str(),
                    score = self.score,
                    rows_cleared = self.rows_cleared,
                    "falling game over"
                );
            }
        }
    }

    /// Write the piece into the grid, clear rows and bring in the next piece
    fn lock_and_spawn(&mut self, piece: Piece) -> Result<u32> {
        lock(&mut self.grid, &piece)?;
        self.active = None;

        let cleared = self.grid.clear_full_rows();
        if !cleared.is_empty() {
            debug!(rows = ?cleared.as_slice(), "rows cleared");
        }
        self.rows_cleared = self.rows_cleared.saturating_add(cleared.len() as u32);
        let line_score = calculate_line_score(cleared.len());

        self.spawn();
        Ok(line_score)
    }

    fn dispatch(&mut self, command: FallCommand) -> Result<Transition> {
        if command == FallCommand::NewGame {
            self.new_game()?;
            return Ok(Transition {
                changed: true,
                score_delta: 0,
                game_over: self.game_over,
            });
        }

        let piece = match self.active {
            Some(piece) if !self.game_over => piece,
            _ => {
                return Err(CoreError::InvalidCommand {
                    command: command.as_str(),
                })
            }
        };

        let score_delta = match command {
            FallCommand::Left | FallCommand::Right => {
                let d_col = if command == FallCommand::Left { -1 } else { 1 };
                let mut moved = piece;
                if !try_move(&self.grid, &mut moved, 0, d_col) {
                    return Ok(Transition::unchanged(self.game_over));
                }
                self.active = Some(moved);
                0
            }
            FallCommand::Down => {
                if is_grounded(&self.grid, &piece) {
                    self.lock_and_spawn(piece)?
                } else {
                    self.active = Some(piece.shifted(1, 0));
                    calculate_drop_score(1, false)
                }
            }
            FallCommand::Drop => {
                let distance = drop_distance(&self.grid, &piece);
                let landed = piece.shifted(distance as isize, 0);
                let drop_score = calculate_drop_score(distance as u32, true);
                drop_score.saturating_add(self.lock_and_spawn(landed)?)
            }
            FallCommand::NewGame => 0,
        };

        self.score = self.score.saturating_add(score_delta);
        Ok(Transition {
            changed: true,
            score_delta,
            game_over: self.game_over,
        })
    }
}

impl<R: RngCore> GameSession for FallingSession<R> {
    type Command = FallCommand;
    type Snapshot = FallingSnapshot;

    fn apply_command(&mut self, command: FallCommand) -> Result<Transition> {
        let transition = match self.dispatch(command) {
            Err(CoreError::InvalidCommand { command }) => {
                debug!(command, "command ignored");
                Transition::unchanged(self.game_over)
            }
            other => other?,
        };
        self.high_score = self.high_score.max(self.score);
        Ok(transition)
    }

    fn new_game(&mut self) -> Result<()> {
        self.grid.clear();
        self.score = 0;
        self.rows_cleared = 0;
        self.game_over = false;
        self.active = None;
        self.upcoming = UpcomingPieces::new(self.config.upcoming_len, &mut self.rng);
        self.spawn();
        debug!(high_score = self.high_score, "new falling game");
        Ok(())
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn game_over(&self) -> bool {
        self.game_over
    }

    fn snapshot(&self) -> FallingSnapshot {
        FallingSnapshot {
            version: SNAPSHOT_VERSION,
            score: self.score,
            high_score: self.high_score,
            grid: self.grid.rows(),
            game_over: self.game_over,
            active: self.active.map(|piece| ActiveSnapshot {
                kind: piece.kind.as_str().to_string(),
                row: piece.row,
                col: piece.col,
            }),
            upcoming: self
                .upcoming
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            rows_cleared: self.rows_cleared,
        }
    }
}
