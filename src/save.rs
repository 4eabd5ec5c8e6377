//! Save-file persistence for both modes.
//!
//! A save is the session's snapshot as pretty JSON at `<dir>/<mode>.json`.
//! Loading never fails the program: a missing file starts a new game, and an
//! unreadable or invalid one is logged and replaced on the next store.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{
    FallingConfig, FallingSession, FallingSnapshot, SimpleRng, SlidingConfig, SlidingSession,
    SlidingSnapshot,
};

/// Read and parse a snapshot; `Ok(None)` when no save exists yet.
pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
    };
    let snapshot =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(snapshot))
}

/// Write a snapshot, creating the directory if needed.
///
/// The file is written next to its destination and renamed into place, so an
/// interrupted write leaves the previous save intact.
pub fn store_snapshot<T: Serialize>(path: &Path, snapshot: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_vec_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    info!(path = %path.display(), "game saved");
    Ok(())
}

/// Restore the sliding game saved at `path`, or start a new one.
pub fn open_sliding(path: &Path, rng: SimpleRng) -> Result<SlidingSession> {
    match load_snapshot::<SlidingSnapshot>(path) {
        Ok(Some(snapshot)) => {
            match SlidingSession::from_snapshot(&snapshot, rng.clone()) {
                Ok(session) => {
                    info!(path = %path.display(), score = snapshot.score, "sliding game restored");
                    return Ok(session);
                }
                Err(err) => warn!(path = %path.display(), error = %err, "discarding invalid save"),
            }
        }
        Ok(None) => {}
        Err(err) => warn!(error = ?err, "discarding unreadable save"),
    }
    Ok(SlidingSession::new(SlidingConfig::default(), rng)?)
}

/// Restore the falling game saved at `path`, or start a new one.
pub fn open_falling(path: &Path, rng: SimpleRng) -> Result<FallingSession> {
    match load_snapshot::<FallingSnapshot>(path) {
        Ok(Some(snapshot)) => {
            match FallingSession::from_snapshot(&snapshot, rng.clone()) {
                Ok(session) => {
                    info!(path = %path.display(), score = snapshot.score, "falling game restored");
                    return Ok(session);
                }
                Err(err) => warn!(path = %path.display(), error = %err, "discarding invalid save"),
            }
        }
        Ok(None) => {}
        Err(err) => warn!(error = ?err, "discarding unreadable save"),
    }
    Ok(FallingSession::new(FallingConfig::default(), rng)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;
    use crate::types::{Direction, SlideCommand};
    use std::path::PathBuf;

    /// Fresh per-test directory under the system temp dir
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tui-tilegrid-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_save_is_none() {
        let dir = scratch_dir("missing");
        let loaded = load_snapshot::<SlidingSnapshot>(&dir.join("slide.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn store_then_open_restores_sliding_game() {
        let dir = scratch_dir("sliding");
        let path = dir.join("slide.json");
        let mut session = SlidingSession::with_seed(11).unwrap();
        for direction in Direction::ALL {
            session.apply_command(SlideCommand::Slide(direction)).unwrap();
        }

        store_snapshot(&path, &session.snapshot()).unwrap();
        let restored = open_sliding(&path, SimpleRng::new(1)).unwrap();

        assert_eq!(restored.grid(), session.grid());
        assert_eq!(restored.score(), session.score());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_save_starts_fresh_game() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("fall.json");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        let session = open_falling(&path, SimpleRng::new(1)).unwrap();

        assert_eq!(session.score(), 0);
        assert!(session.active().is_some());
        let _ = fs::remove_dir_all(&dir);
    }
}
