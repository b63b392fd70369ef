//! Terminal Hexa Stack runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `hexa_stack::term`.
//!
//! Environment:
//! - `HEXA_SEED`: board seed (default 1)
//! - `HEXA_LOG_PATH`: write `RUST_LOG`-filtered logs to this file
//! - `HEXA_CONFIG` and `HEXA_*`: see `BoardConfig::from_env`

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use hexa_stack::core::{Board, BoardConfig};
use hexa_stack::engine::{BoardObserver, DragController, Session};
use hexa_stack::input::{handle_key_event, should_quit};
use hexa_stack::term::{BoardView, DragView, FrameBuffer, TerminalRenderer, Viewport};
use hexa_stack::types::{SlotId, TICK_MS};

/// Logs the hooks the playable ad wired to its score widget and call-to-action.
struct Hooks;

impl BoardObserver for Hooks {
    fn on_player_move(&mut self, moves: u32) {
        log::debug!("player move #{}", moves);
    }

    fn on_merge(&mut self, slot: SlotId, merges: u32, score: u32) {
        log::debug!("merge in {}: {} merges, score {}", slot, merges, score);
    }

    fn on_game_ended(&mut self, merges: u32, score: u32) {
        log::info!("showing call to action ({} merges, score {})", merges, score);
    }
}

fn init_logging() -> Result<()> {
    // stderr would corrupt the alternate screen; log to a file or not at all.
    let Ok(path) = std::env::var("HEXA_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let config = BoardConfig::from_env().context("loading board config")?;
    let seed = match std::env::var("HEXA_SEED") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid HEXA_SEED: {:?}", raw))?,
        Err(_) => 1,
    };
    let board = Board::new(config, seed)?;
    log::info!("starting board with seed {}", seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, Session::new(board));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = BoardView::new(session.board().config().hex_radius);
    let mut drag = DragController::new(session.board());
    let mut hooks = Hooks;
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let overlay = DragView {
            cursor: drag.cursor(),
            held: drag.held(),
        };
        view.render_into(&session.board().snapshot(), &overlay, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(outcome) = drag.apply(session.board_mut(), action) {
                            log::debug!("drop: {:?}", outcome);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS, &mut hooks);
        }
    }
}
