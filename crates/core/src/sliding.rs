//! Sliding session - owns the merge-puzzle state and runs its commands
//!
//! One command runs to completion before the next: slide, spawn one tile,
//! re-evaluate the terminal flag, raise the high score.

use rand::RngCore;
use tracing::{debug, info};

use crate::config::SlidingConfig;
use crate::error::{CoreError, Result, SnapshotError};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::session::{GameSession, Transition};
use crate::slide::{can_slide, is_game_over, slide};
use crate::snapshot::{check_tile, check_version, restore_grid, SlidingSnapshot};
use crate::spawn::{spawn_tile, SpawnOutcome};
use crate::types::{Direction, SlideCommand, SNAPSHOT_VERSION};

/// Complete sliding-mode state
#[derive(Debug, Clone)]
pub struct SlidingSession<R = SimpleRng> {
    config: SlidingConfig,
    grid: Grid,
    score: u32,
    high_score: u32,
    game_over: bool,
    rng: R,
}

impl SlidingSession<SimpleRng> {
    /// Default-sized game driven by a seeded [`SimpleRng`]
    pub fn with_seed(seed: u32) -> Result<Self> {
        Self::new(SlidingConfig::default(), SimpleRng::new(seed))
    }
}

impl<R> SlidingSession<R> {
    /// Largest tile on the grid
    pub fn max_tile(&self) -> u32 {
        self.grid.max_value()
    }
}

impl<R: RngCore> SlidingSession<R> {
    /// Create a session and start its first game
    pub fn new(config: SlidingConfig, rng: R) -> Result<Self> {
        let mut session = Self {
            config,
            grid: Grid::new(config.height, config.width),
            score: 0,
            high_score: 0,
            game_over: false,
            rng,
        };
        session.new_game()?;
        Ok(session)
    }

    /// Wrap an existing grid (no initial spawn); dimensions come from the grid
    pub fn from_grid(grid: Grid, rng: R) -> Result<Self> {
        let config = SlidingConfig {
            height: grid.height(),
            width: grid.width(),
            ..SlidingConfig::default()
        };
        let game_over = is_game_over(&grid)?;
        Ok(Self {
            config,
            grid,
            score: 0,
            high_score: 0,
            game_over,
            rng,
        })
    }

    /// Restore a persisted session using the default configuration
    pub fn from_snapshot(snapshot: &SlidingSnapshot, rng: R) -> std::result::Result<Self, SnapshotError> {
        Self::from_snapshot_with(SlidingConfig::default(), snapshot, rng)
    }

    /// Restore a persisted session, checking it against `config`
    pub fn from_snapshot_with(
        config: SlidingConfig,
        snapshot: &SlidingSnapshot,
        rng: R,
    ) -> std::result::Result<Self, SnapshotError> {
        check_version(snapshot.version)?;
        let grid = restore_grid(&snapshot.grid, config.height, config.width, check_tile)?;
        // A restored grid is in bounds by construction, so detection cannot fail.
        let detected = is_game_over(&grid).unwrap_or(false);
        Ok(Self {
            config,
            grid,
            score: snapshot.score,
            high_score: snapshot.high_score.max(snapshot.score),
            game_over: snapshot.game_over || detected,
            rng,
        })
    }

    /// Check whether a slide toward `direction` would change the grid
    pub fn can_slide(&self, direction: Direction) -> Result<bool> {
        can_slide(&self.grid, direction)
    }

    /// Directions that would change the grid, in [`Direction::ALL`] order
    pub fn legal_directions(&self) -> Result<Vec<Direction>> {
        let mut legal = Vec::with_capacity(4);
        for direction in Direction::ALL {
            if can_slide(&self.grid, direction)? {
                legal.push(direction);
            }
        }
        Ok(legal)
    }

    fn dispatch(&mut self, command: SlideCommand) -> Result<Transition> {
        match command {
            SlideCommand::NewGame => {
                self.new_game()?;
                Ok(Transition {
                    changed: true,
                    score_delta: 0,
                    game_over: self.game_over,
                })
            }
            SlideCommand::Slide(_) if self.game_over => Err(CoreError::InvalidCommand {
                command: command.as_str(),
            }),
            SlideCommand::Slide(direction) => self.slide(direction),
        }
    }

    fn slide(&mut self, direction: Direction) -> Result<Transition> {
        if !can_slide(&self.grid, direction)? {
            return Ok(Transition::unchanged(self.game_over));
        }

        let score_delta = slide(&mut self.grid, direction)?;
        self.score = self.score.saturating_add(score_delta);

        if let SpawnOutcome::GridFull =
            spawn_tile(&mut self.grid, &mut self.rng, self.config.four_probability)?
        {
            debug!(direction = direction.as_str(), "no room to spawn after slide");
        }

        self.game_over = is_game_over(&self.grid)?;
        if self.game_over {
            info!(score = self.score, max_tile = self.max_tile(), "sliding game over");
        }

        Ok(Transition {
            changed: true,
            score_delta,
            game_over: self.game_over,
        })
    }
}

impl<R: RngCore> GameSession for SlidingSession<R> {
    type Command = SlideCommand;
    type Snapshot = SlidingSnapshot;

    /// Apply a command; commands that do not apply are ignored
    fn apply_command(&mut self, command: SlideCommand) -> Result<Transition> {
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
        self.game_over = false;
        for _ in 0..self.config.initial_tiles {
            spawn_tile(&mut self.grid, &mut self.rng, self.config.four_probability)?;
        }
        self.game_over = is_game_over(&self.grid)?;
        debug!(high_score = self.high_score, "new sliding game");
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

    fn snapshot(&self) -> SlidingSnapshot {
        SlidingSnapshot {
            version: SNAPSHOT_VERSION,
            score: self.score,
            high_score: self.high_score,
            grid: self.grid.rows(),
            game_over: self.game_over,
        }
    }
}
