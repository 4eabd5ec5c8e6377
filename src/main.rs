//! Terminal tile-grid runner (default binary).
//!
//! Runs one puzzle per process: `tui-tilegrid slide` (default) or
//! `tui-tilegrid fall`. Input is read with crossterm and drawn through the
//! framebuffer renderer. There is no gravity timer, so the loop blocks on the
//! next terminal event. The game is saved on quit.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_tilegrid::config::{AppConfig, Mode, USAGE};
use tui_tilegrid::core::{FallingSession, GameSession, SimpleRng, SlidingSession};
use tui_tilegrid::input::{fall_command, should_quit, slide_command};
use tui_tilegrid::save::{open_falling, open_sliding, store_snapshot};
use tui_tilegrid::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    if config.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logging(&config)?;

    let rng = match config.seed {
        Some(seed) => SimpleRng::new(seed),
        None => SimpleRng::from_time(),
    };
    info!(mode = config.mode.as_str(), seed = rng.state(), "starting");

    let path = config.save_path();
    let mut term = TerminalRenderer::new();

    match config.mode {
        Mode::Slide => {
            let mut session = if config.fresh {
                SlidingSession::new(Default::default(), rng)?
            } else {
                open_sliding(&path, rng)?
            };
            let view = GameView::sliding();
            term.enter()?;
            let result = run(&mut term, &mut session, slide_command, |s, vp, fb| {
                view.render_sliding_into(s, vp, fb)
            });
            // Always try to restore terminal state.
            let _ = term.exit();
            result?;
            store_snapshot(&path, &session.snapshot())
        }
        Mode::Fall => {
            let mut session = if config.fresh {
                FallingSession::new(Default::default(), rng)?
            } else {
                open_falling(&path, rng)?
            };
            let view = GameView::falling();
            term.enter()?;
            let result = run(&mut term, &mut session, fall_command, |s, vp, fb| {
                view.render_falling_into(s, vp, fb)
            });
            let _ = term.exit();
            result?;
            store_snapshot(&path, &session.snapshot())
        }
    }
}

/// Log to the file named by `TUI_TILEGRID_LOG`; stdout belongs to the game.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Draw, wait for a key, apply its command; until a quit key arrives.
fn run<S: GameSession>(
    term: &mut TerminalRenderer,
    session: &mut S,
    keymap: fn(KeyEvent) -> Option<S::Command>,
    draw: impl Fn(&S, Viewport, &mut FrameBuffer),
) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        draw(session, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    debug!(score = session.score(), "quit");
                    return Ok(());
                }
                if let Some(command) = keymap(key) {
                    let transition = session.apply_command(command)?;
                    debug!(
                        ?command,
                        changed = transition.changed,
                        score_delta = transition.score_delta,
                        game_over = transition.game_over,
                        "command applied"
                    );
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
