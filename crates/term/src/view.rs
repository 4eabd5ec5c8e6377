//! Views: map a game session into a terminal framebuffer.
//!
//! This module is pure (no I/O). Both modes share the frame, side panel and
//! overlay drawing; they differ in how one grid cell is painted.

use crate::core::{FallingSession, GameSession, Grid, SlidingSession};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::style::{piece_letter, piece_token, resolve, tile_token, StyleToken, BOARD_BG};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const HELP: &str = "arrows move  ctrl-n new  q quit";

/// Layout parameters for drawing one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

/// Screen position of the grid's top-left frame corner
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    /// Wide tiles with room for a centered number
    pub fn sliding() -> Self {
        Self::new(7, 3)
    }

    /// 2x1 cells compensate for the terminal glyph aspect ratio.
    pub fn falling() -> Self {
        Self::new(2, 1)
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a sliding session into an existing framebuffer.
    pub fn render_sliding_into<R>(
        &self,
        session: &SlidingSession<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) where
        SlidingSession<R>: GameSession,
    {
        let grid = session.grid();
        let frame = self.begin(grid, viewport, fb);

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let value = grid.get(row, col).unwrap_or_default();
                self.draw_tile(fb, frame, row as u16, col as u16, value);
            }
        }

        let mut panel = Panel::new(fb, viewport, frame);
        panel.number("SCORE", session.score());
        panel.number("BEST", session.high_score());
        panel.number("MAX", session.max_tile());

        self.finish(fb, viewport, frame, session.game_over());
    }

    /// Render a falling session into an existing framebuffer.
    pub fn render_falling_into<R>(
        &self,
        session: &FallingSession<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) where
        FallingSession<R>: GameSession,
    {
        let grid = session.grid();
        let frame = self.begin(grid, viewport, fb);

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let token = piece_token(grid.get(row, col).unwrap_or_default());
                self.draw_block(fb, frame, row as u16, col as u16, token);
            }
        }

        if let Some(active) = session.active() {
            for (row, col) in active.cells() {
                if grid.contains(row, col) {
                    let token = StyleToken::Piece(active.kind);
                    self.draw_block(fb, frame, row as u16, col as u16, token);
                }
            }
        }

        let mut panel = Panel::new(fb, viewport, frame);
        panel.number("SCORE", session.score());
        panel.number("BEST", session.high_score());
        panel.number("ROWS", session.rows_cleared());
        panel.label("NEXT");
        for kind in session.upcoming().iter() {
            panel.text(piece_letter(kind), resolve(StyleToken::Piece(kind)));
        }

        self.finish(fb, viewport, frame, session.game_over());
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render_sliding<R>(&self, session: &SlidingSession<R>, viewport: Viewport) -> FrameBuffer
    where
        SlidingSession<R>: GameSession,
    {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_sliding_into(session, viewport, &mut fb);
        fb
    }

    pub fn render_falling<R>(&self, session: &FallingSession<R>, viewport: Viewport) -> FrameBuffer
    where
        FallingSession<R>: GameSession,
    {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_falling_into(session, viewport, &mut fb);
        fb
    }

    /// Clear the buffer and draw the empty framed board
    fn begin(&self, grid: &Grid, viewport: Viewport, fb: &mut FrameBuffer) -> Frame {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = (grid.width() as u16).saturating_mul(self.cell_w);
        let board_h = (grid.height() as u16).saturating_mul(self.cell_h);
        let w = board_w.saturating_add(2);
        let h = board_h.saturating_add(2);

        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h + 1) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(x + 1, y + 1, board_w, board_h, ' ', bg);
        draw_border(fb, x, y, w, h, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        Frame { x, y, w, h }
    }

    fn finish(&self, fb: &mut FrameBuffer, viewport: Viewport, frame: Frame, game_over: bool) {
        let help_y = frame.y.saturating_add(frame.h);
        if help_y < viewport.height {
            let style = CellStyle::default().dim();
            let help_w = HELP.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(help_w) / 2);
            fb.put_str(x, help_y, HELP, style);
        }

        if game_over {
            let text = "GAME OVER";
            let mid_y = frame.y.saturating_add(frame.h / 2);
            let text_w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, mid_y, text, style);
        }
    }

    /// Sliding tile: solid block with the value on the middle line
    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Frame, row: u16, col: u16, value: u32) {
        let token = tile_token(value);
        let style = resolve(token);
        let (px, py) = self.cell_origin(frame, row, col);

        if token == StyleToken::Empty {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
            return;
        }

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        let digits = decimal_width(value);
        let x = px + self.cell_w.saturating_sub(digits) / 2;
        fb.put_u32(x, py + self.cell_h / 2, value, style);
    }

    /// Falling cell: a block glyph, or a dot when empty
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, row: u16, col: u16, token: StyleToken) {
        let ch = if token == StyleToken::Empty { '·' } else { '█' };
        let (px, py) = self.cell_origin(frame, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, resolve(token));
    }

    fn cell_origin(&self, frame: Frame, row: u16, col: u16) -> (u16, u16) {
        (
            frame.x + 1 + col * self.cell_w,
            frame.y + 1 + row * self.cell_h,
        )
    }
}

/// Vertical list of labelled values to the right of the frame
struct Panel<'a> {
    fb: &'a mut FrameBuffer,
    x: u16,
    y: u16,
    visible: bool,
}

impl<'a> Panel<'a> {
    fn new(fb: &'a mut FrameBuffer, viewport: Viewport, frame: Frame) -> Self {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        let visible = x < viewport.width && viewport.width - x >= 8;
        Self {
            fb,
            x,
            y: frame.y,
            visible,
        }
    }

    fn label(&mut self, label: &str) {
        if self.visible {
            let style = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
            self.fb.put_str(self.x, self.y, label, style);
        }
        self.y = self.y.saturating_add(1);
    }

    fn text(&mut self, text: &str, style: CellStyle) {
        if self.visible {
            self.fb.put_str(self.x, self.y, text, style);
        }
        self.y = self.y.saturating_add(1);
    }

    fn number(&mut self, label: &str, value: u32) {
        self.label(label);
        if self.visible {
            let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
            self.fb.put_u32(self.x, self.y, value, style);
        }
        self.y = self.y.saturating_add(2);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn decimal_width(value: u32) -> u16 {
    value.checked_ilog10().map_or(1, |digits| digits as u16 + 1)
}
