//! Session - maps the board's pipeline onto wall-clock delays
//!
//! The board only knows *what* comes next; the session decides *when*. Each
//! call to [`Session::tick`] advances, in order:
//!
//! 1. follow-ups scheduled on earlier ticks (re-check sweeps, dock refills)
//! 2. the pending pipeline step (`settleMs`, then `mergeClearMs`)
//! 3. follow-ups the board queued during this tick, with their delays
//! 4. the periodic auto-merge sweep (`autoMergeIntervalMs`)
//!
//! and then dispatches queued board events to a [`BoardObserver`].

use hexa_stack_core::{Board, FollowUp, Step};
use hexa_stack_types::{BoardEvent, SlotId};

/// Hooks invoked as board events are dispatched. All methods default to no-ops.
pub trait BoardObserver {
    /// Once per accepted player move, with the running move count
    fn on_player_move(&mut self, _moves: u32) {}

    fn on_merge(&mut self, _slot: SlotId, _merges: u32, _score: u32) {}

    /// Once, when the board reaches `Ended`
    fn on_game_ended(&mut self, _merges: u32, _score: u32) {}

    /// Every event, before the specific hook
    fn on_event(&mut self, _event: &BoardEvent) {}
}

impl BoardObserver for () {}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    follow_up: FollowUp,
    remaining_ms: u32,
}

#[derive(Debug)]
pub struct Session {
    board: Board,
    step_elapsed_ms: u32,
    sweep_elapsed_ms: u32,
    scheduled: Vec<Scheduled>,
}

impl Session {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            step_elapsed_ms: 0,
            sweep_elapsed_ms: 0,
            scheduled: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for player input (drag and drop).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Follow-ups waiting on their delay
    pub fn scheduled_len(&self) -> usize {
        self.scheduled.len()
    }

    /// Advance by `elapsed_ms`. Returns whether board state changed.
    pub fn tick(&mut self, elapsed_ms: u32, observer: &mut impl BoardObserver) -> bool {
        let mut changed = false;

        if !self.board.is_ended() {
            changed |= self.run_due_follow_ups(elapsed_ms);
            changed |= self.advance_step(elapsed_ms);
            self.schedule_follow_ups();
            changed |= self.advance_sweep(elapsed_ms);
        }
        if self.board.is_ended() {
            self.scheduled.clear();
        }

        self.dispatch(observer);
        changed
    }

    fn run_due_follow_ups(&mut self, elapsed_ms: u32) -> bool {
        for s in &mut self.scheduled {
            s.remaining_ms = s.remaining_ms.saturating_sub(elapsed_ms);
        }
        let (due, waiting): (Vec<Scheduled>, Vec<Scheduled>) = self
            .scheduled
            .drain(..)
            .partition(|s| s.remaining_ms == 0);
        self.scheduled = waiting;

        let mut changed = false;
        for s in due {
            log::trace!("running follow-up {:?}", s.follow_up);
            changed |= self.board.run_follow_up(s.follow_up);
        }
        changed
    }

    fn advance_step(&mut self, elapsed_ms: u32) -> bool {
        let Some(step) = self.board.pending_step() else {
            self.step_elapsed_ms = 0;
            return false;
        };
        let config = self.board.config();
        let needed = match step {
            Step::Settle { .. } => config.settle_ms,
            Step::ClearMerge { .. } => config.merge_clear_ms,
        };

        self.step_elapsed_ms = self.step_elapsed_ms.saturating_add(elapsed_ms);
        if self.step_elapsed_ms < needed {
            return false;
        }
        self.step_elapsed_ms = 0;
        let outcome = self.board.complete_step();
        log::debug!("completed {:?}: {:?}", step, outcome);
        outcome.is_some()
    }

    fn schedule_follow_ups(&mut self) {
        let config = self.board.config();
        let (recheck, refill) = (config.recheck_delay_ms, config.dock_refill_delay_ms);
        for follow_up in self.board.take_follow_ups() {
            let remaining_ms = match follow_up {
                FollowUp::Sweep => recheck,
                FollowUp::RefillDock => refill,
            };
            self.scheduled.push(Scheduled {
                follow_up,
                remaining_ms,
            });
        }
    }

    fn advance_sweep(&mut self, elapsed_ms: u32) -> bool {
        let interval = self.board.config().auto_merge_interval_ms;
        self.sweep_elapsed_ms = self.sweep_elapsed_ms.saturating_add(elapsed_ms);
        if self.sweep_elapsed_ms < interval {
            return false;
        }
        self.sweep_elapsed_ms %= interval;
        self.board.sweep().is_some()
    }

    fn dispatch(&mut self, observer: &mut impl BoardObserver) {
        for event in self.board.drain_events() {
            observer.on_event(&event);
            match event {
                BoardEvent::PlayerMoved { moves } => observer.on_player_move(moves),
                BoardEvent::Merged {
                    slot, merges, score, ..
                } => observer.on_merge(slot, merges, score),
                BoardEvent::GameEnded { merges, score } => observer.on_game_ended(merges, score),
                BoardEvent::Moved { .. }
                | BoardEvent::Placed { .. }
                | BoardEvent::DockRefilled { .. } => {}
            }
        }
    }
}
