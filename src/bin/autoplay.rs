//! Headless autoplay runner.
//!
//! Drives a board with the placement planner and prints every board event as a
//! JSON line on stdout, followed by the final snapshot.
//!
//! Usage: `autoplay [--seed N] [--config PATH] [--max-ticks N]`
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};

use hexa_stack::core::{Board, BoardConfig, MoveRejected};
use hexa_stack::engine::{apply_placement, BoardObserver, Session};
use hexa_stack::types::{BoardEvent, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AutoplayArgs {
    seed: u32,
    config: Option<String>,
    max_ticks: u32,
}

impl Default for AutoplayArgs {
    fn default() -> Self {
        Self {
            seed: 1,
            config: None,
            max_ticks: 100_000,
        }
    }
}

fn parse_args(args: &[String]) -> Result<AutoplayArgs> {
    let mut parsed = AutoplayArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" | "--config" | "--max-ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))?;
                match flag {
                    "--seed" => {
                        parsed.seed = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("autoplay: invalid --seed value: {}", v))?;
                    }
                    "--max-ticks" => {
                        parsed.max_ticks = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("autoplay: invalid --max-ticks value: {}", v))?;
                    }
                    _ => parsed.config = Some(v.clone()),
                }
            }
            other => {
                return Err(anyhow!("autoplay: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(parsed)
}

/// Streams events to stdout as JSON lines.
struct JsonLines<W: Write> {
    out: W,
    failed: Option<io::Error>,
}

impl<W: Write> BoardObserver for JsonLines<W> {
    fn on_game_ended(&mut self, merges: u32, score: u32) {
        log::info!("game ended: {} merges, score {}", merges, score);
    }

    fn on_event(&mut self, event: &BoardEvent) {
        if self.failed.is_some() {
            return;
        }
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                self.failed = Some(io::Error::other(e));
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.failed = Some(e);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = match &args.config {
        Some(path) => BoardConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => BoardConfig::from_env().context("loading board config")?,
    };
    let mut session = Session::new(Board::new(config, args.seed)?);
    let mut observer = JsonLines {
        out: io::stdout().lock(),
        failed: None,
    };

    let mut ticks = 0u32;
    while ticks < args.max_ticks && !session.board().is_ended() {
        if !session.board().is_input_locked() {
            match apply_placement(session.board_mut()) {
                Ok(placement) => {
                    log::debug!("placed {} into {}", placement.dock, placement.slot);
                }
                Err(MoveRejected::SlotOccupied) if session.scheduled_len() == 0 => {
                    log::warn!("no empty slot left for the dock, stopping");
                    break;
                }
                Err(e) => log::trace!("no placement this tick: {}", e),
            }
        }
        session.tick(TICK_MS, &mut observer);
        ticks += 1;

        if let Some(e) = observer.failed.take() {
            return Err(e).context("writing events");
        }
    }

    let board = session.board();
    log::info!(
        "stopped after {} ticks: {} merges, {} moves, score {}",
        ticks,
        board.merge_count(),
        board.move_count(),
        board.score()
    );
    let snapshot = serde_json::to_string(&board.snapshot())?;
    writeln!(observer.out, "{}", snapshot)?;
    Ok(())
}
