//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! clears the screen and paints every row; later frames only paint runs of
//! cells that differ from the previous frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    entered: bool,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // A panic must not leave the terminal in raw mode.
        let _ = self.exit();
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            entered: false,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.entered = true;
        self.last = None;
        Ok(())
    }

    /// Restore the terminal; a no-op unless [`TerminalRenderer::enter`] ran.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Paint `fb`, then keep it as the frame the next draw is compared with.
    ///
    /// On return `fb` holds stale cells from an earlier frame; views redraw
    /// every cell, so the caller can reuse it without clearing.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) => {
                prev.resize(fb.width(), fb.height());
                std::mem::swap(prev, fb);
            }
            None => {
                let spare = FrameBuffer::new(fb.width(), fb.height());
                self.last = Some(std::mem::replace(fb, spare));
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queue the commands that turn the screen showing `prev` into `next`.
///
/// Without a previous frame of the same size the screen is cleared first.
fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());

    match prev {
        Some(prev) => for_each_dirty_run(prev, next, |x, y, cells| pen.paint(out, x, y, cells))?,
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for (y, row) in rows(next).enumerate() {
                pen.paint(out, 0, y as u16, row)?;
            }
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    fb.cells().chunks(usize::from(fb.width()).max(1))
}

/// Call `f(x, y, cells)` for every maximal run of cells in `next` that
/// differ from the same position in `prev`. Both frames have the same size.
fn for_each_dirty_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, &[Cell]) -> Result<()>,
) -> Result<()> {
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        let mut start = None;
        for x in 0..=new.len() {
            let dirty = x < new.len() && old[x] != new[x];
            match (start, dirty) {
                (None, true) => start = Some(x),
                (Some(s), false) => {
                    f(s as u16, y as u16, &new[s..x])?;
                    start = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Tracks the terminal's current style so runs only emit style changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn paint(&mut self, out: &mut Vec<u8>, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                set_style(out, cell.style)?;
                self.style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }
}

/// SGR reset also clears colors, so it goes first.
fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
