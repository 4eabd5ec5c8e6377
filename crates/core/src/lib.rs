//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the grid mutation engines for both puzzles and the
//! sessions that drive them. It has no dependency on the terminal, the
//! keyboard or the filesystem; front ends send a command, then re-read state
//! to render it.
//!
//! - **Deterministic**: randomness comes from one injected [`rand::RngCore`],
//!   so the same seed and commands replay the same game
//! - **Testable**: engines are free functions over [`Grid`]
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell storage with checked accessors
//! - [`slide`]: directional compaction and merging (sliding mode)
//! - [`pieces`] / [`placement`]: piece shapes, collision and locking (falling mode)
//! - [`spawn`] / [`rng`]: tile and piece spawn policy, preview queue
//! - [`sliding`] / [`falling`]: the per-mode game sessions
//! - [`snapshot`]: versioned save payloads
//!
//! # Example
//!
//! ```
//! use tui_tilegrid_core::{GameSession, SlidingSession};
//! use tui_tilegrid_types::{Direction, SlideCommand};
//!
//! let mut game = SlidingSession::with_seed(12345).unwrap();
//! let before = game.grid().sum();
//!
//! let transition = game.apply_command(SlideCommand::Slide(Direction::Left)).unwrap();
//!
//! if transition.changed {
//!     // One new tile of value 2 or 4 appeared
//!     let spawned = game.grid().sum() - before;
//!     assert!(spawned == 2 || spawned == 4);
//! }
//! ```

pub mod config;
pub mod error;
pub mod falling;
pub mod grid;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod slide;
pub mod sliding;
pub mod snapshot;
pub mod spawn;

pub use tui_tilegrid_types as types;

// Re-export commonly used types for convenience
pub use config::{FallingConfig, SlidingConfig};
pub use error::{CoreError, Result, SnapshotError};
pub use falling::FallingSession;
pub use grid::Grid;
pub use pieces::{get_shape, Piece};
pub use rng::{SimpleRng, UpcomingPieces};
pub use session::{GameSession, Transition};
pub use sliding::SlidingSession;
pub use snapshot::{ActiveSnapshot, FallingSnapshot, SlidingSnapshot};
pub use spawn::{PieceSpawn, SpawnOutcome};
