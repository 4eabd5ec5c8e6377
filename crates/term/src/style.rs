//! Symbolic style tokens for grid cells.
//!
//! The core stores bare numbers; this module decides what they look like.
//! Sliding tiles are styled by their power of two, falling cells by the
//! piece kind encoded in the cell value.

use crate::fb::{CellStyle, Rgb};
use crate::types::{CellValue, PieceKind, EMPTY};

/// Board background shared by both modes.
pub const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// How a grid cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Empty,
    /// Sliding tile `2^rank`
    Tile { rank: u8 },
    Piece(PieceKind),
}

/// Tile backgrounds for 2, 4, 8, ... 32768; larger tiles reuse the last entry.
const TILE_PALETTE: [Rgb; 15] = [
    Rgb::new(170, 40, 40),
    Rgb::new(40, 140, 60),
    Rgb::new(170, 150, 30),
    Rgb::new(40, 70, 170),
    Rgb::new(140, 50, 150),
    Rgb::new(30, 140, 150),
    Rgb::new(200, 200, 200),
    Rgb::new(15, 15, 20),
    Rgb::new(235, 80, 80),
    Rgb::new(90, 220, 110),
    Rgb::new(240, 220, 80),
    Rgb::new(90, 130, 240),
    Rgb::new(220, 110, 230),
    Rgb::new(90, 220, 230),
    Rgb::new(245, 245, 245),
];

/// Token for a sliding-mode cell
pub fn tile_token(value: CellValue) -> StyleToken {
    if value == EMPTY {
        StyleToken::Empty
    } else {
        StyleToken::Tile {
            rank: value.trailing_zeros() as u8,
        }
    }
}

/// Token for a falling-mode cell; unknown values draw as empty
pub fn piece_token(value: CellValue) -> StyleToken {
    PieceKind::from_cell_value(value).map_or(StyleToken::Empty, StyleToken::Piece)
}

/// Resolve a token to concrete colors
pub fn resolve(token: StyleToken) -> CellStyle {
    match token {
        StyleToken::Empty => CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim(),
        StyleToken::Tile { rank } => {
            let index = usize::from(rank.max(1) - 1).min(TILE_PALETTE.len() - 1);
            let bg = TILE_PALETTE[index];
            // Light backgrounds get dark digits.
            let light = u16::from(bg.r) + u16::from(bg.g) + u16::from(bg.b) > 600;
            let fg = if light {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(255, 255, 255)
            };
            CellStyle::new(fg, bg).bold()
        }
        StyleToken::Piece(kind) => {
            let fg = match kind {
                PieceKind::I => Rgb::new(80, 220, 220),
                PieceKind::O => Rgb::new(240, 220, 80),
                PieceKind::T => Rgb::new(200, 120, 220),
                PieceKind::S => Rgb::new(100, 220, 120),
                PieceKind::Z => Rgb::new(220, 80, 80),
                PieceKind::J => Rgb::new(80, 120, 220),
                PieceKind::L => Rgb::new(255, 165, 0),
            };
            CellStyle::new(fg, BOARD_BG).bold()
        }
    }
}

/// Upper-case letter shown for a kind in the preview panel
pub fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_tokens_follow_powers_of_two() {
        assert_eq!(tile_token(0), StyleToken::Empty);
        assert_eq!(tile_token(2), StyleToken::Tile { rank: 1 });
        assert_eq!(tile_token(2048), StyleToken::Tile { rank: 11 });
    }

    #[test]
    fn distinct_small_tiles_get_distinct_colors() {
        let two = resolve(tile_token(2));
        let four = resolve(tile_token(4));
        assert_ne!(two.bg, four.bg);
    }

    #[test]
    fn huge_tiles_reuse_last_color() {
        let last = resolve(tile_token(32768));
        assert_eq!(resolve(tile_token(1 << 20)), last);
        assert_eq!(last.fg, Rgb::new(0, 0, 0));
    }

    #[test]
    fn piece_tokens_decode_cell_values() {
        assert_eq!(piece_token(1), StyleToken::Piece(PieceKind::I));
        assert_eq!(piece_token(7), StyleToken::Piece(PieceKind::L));
        assert_eq!(piece_token(0), StyleToken::Empty);
        assert_eq!(piece_token(42), StyleToken::Empty);
    }
}
