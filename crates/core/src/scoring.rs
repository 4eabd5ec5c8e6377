//! Scoring module - falling-mode points for row clears and drops
//!
//! Sliding mode scores the value of every merged tile (see [`crate::slide`]);
//! the tables here only apply to the falling puzzle.

use crate::types::{HARD_DROP_POINTS, LINE_SCORES, SOFT_DROP_POINTS};

/// Calculate row clear score
/// rows: number of rows cleared by one lock (0-4)
pub fn calculate_line_score(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}

/// Calculate drop score
/// soft drop: +1 per row
/// hard drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    rows.saturating_mul(per_row)
}
