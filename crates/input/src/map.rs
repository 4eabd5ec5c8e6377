//! Key mapping from terminal events to game commands.
//!
//! Arrow keys drive both modes, with vim (`hjkl`) and `wasd` aliases.
//! Ctrl-N starts a new game; Ctrl-C, Ctrl-Q and `q` quit. A key held with
//! any other modifier (Shift+arrow, Alt+h, ...) maps to nothing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Direction, FallCommand, SlideCommand};

/// Arrow-style direction of a key, ignoring modifiers
fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_new_game(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('n' | 'N')) && key.modifiers == KeyModifiers::CONTROL
}

/// Shift is how terminals report an uppercase letter; anything else is a combination
fn is_plain(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT).is_empty(),
        _ => key.modifiers.is_empty(),
    }
}

/// Releases arrive on terminals with the kitty protocol; only presses act
fn is_press(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Map keyboard input to a sliding-mode command.
pub fn slide_command(key: KeyEvent) -> Option<SlideCommand> {
    if !is_press(&key) {
        return None;
    }
    if is_new_game(&key) {
        return Some(SlideCommand::NewGame);
    }
    if !is_plain(&key) {
        return None;
    }
    key_direction(key.code).map(SlideCommand::Slide)
}

/// Map keyboard input to a falling-mode command.
///
/// Up (and its aliases) drops the piece; space is an extra drop key.
pub fn fall_command(key: KeyEvent) -> Option<FallCommand> {
    if !is_press(&key) {
        return None;
    }
    if is_new_game(&key) {
        return Some(FallCommand::NewGame);
    }
    if !is_plain(&key) {
        return None;
    }
    if key.code == KeyCode::Char(' ') {
        return Some(FallCommand::Drop);
    }
    key_direction(key.code).map(|direction| match direction {
        Direction::Up => FallCommand::Drop,
        Direction::Down => FallCommand::Down,
        Direction::Left => FallCommand::Left,
        Direction::Right => FallCommand::Right,
    })
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if !is_press(&key) {
        return false;
    }
    match key.code {
        KeyCode::Char('q' | 'Q') if is_plain(&key) => true,
        KeyCode::Char('c' | 'q') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Esc => true,
        _ => false,
    }
}
