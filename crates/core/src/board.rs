//! Board controller - slot occupancy, moves, merges and the auto-merge sweep
//!
//! The controller is a three-phase state machine:
//!
//! - **Idle**: player moves, placements and sweeps are accepted
//! - **Locked**: exactly one [`Step`] is pending; everything else is rejected
//! - **Ended**: terminal, nothing is accepted
//!
//! An accepted move (player, placement, or auto-merge) mutates the slots at
//! once and leaves the board `Locked` on a `Settle` step. The owner of the clock
//! calls [`Board::complete_step`] when the step's delay elapses; the board never
//! looks at time itself. Returning to `Idle` queues a [`FollowUp::Sweep`] so
//! chain reactions resolve without waiting for the periodic sweep.
//!
//! ```
//! use hexa_stack_core::{Board, BoardConfig};
//! use hexa_stack_core::types::{Color, SlotId};
//!
//! let mut board = Board::empty(BoardConfig::default()).unwrap();
//! board.seed_stack(SlotId(0), &[Color::Red, Color::Red]).unwrap();
//! board.seed_stack(SlotId(1), &[Color::Red]).unwrap();
//!
//! // Slot 1's red joins the uniform stack in slot 0 ...
//! assert!(board.sweep().is_some());
//! assert!(board.is_input_locked());
//!
//! // ... and the three reds merge once the pipeline runs.
//! board.settle();
//! assert_eq!(board.merge_count(), 1);
//! assert!(board.stack(SlotId(0)).is_empty());
//! ```

use std::collections::{HashMap, VecDeque};

use crate::config::{BoardConfig, ConfigError};
use crate::dock::Dock;
use crate::error::MoveRejected;
use crate::grid::SlotGrid;
use crate::merge::{check_drop, is_uniform, qualifies_for_merge, top_group};
use crate::rng::StackGenerator;
use crate::scoring::Scoreboard;
use crate::snapshot::BoardSnapshot;
use crate::tile::Tile;
use crate::types::{
    BoardEvent, BoardPhase, Color, DockId, MoveOrigin, Owner, SlotId, TileId, WorldPos,
};

/// Opening stack heights
const OPENING_HEIGHTS: std::ops::RangeInclusive<usize> = 2..=4;
/// Dock stack heights
const DOCK_HEIGHTS: std::ops::RangeInclusive<usize> = 3..=5;

/// Copyable description of a top group, taken before a mutable move call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub source: SlotId,
    pub color: Color,
    pub len: usize,
}

/// The single in-flight transition while the board is locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Tiles just landed on `target`; merge evaluation is next
    Settle { target: SlotId, origin: MoveOrigin },
    /// `slot` was cleared by a merge; the limit check is next
    ClearMerge { slot: SlotId },
}

/// Work the board wants done after some delay, outside the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Re-check auto-merge after a transition settled
    Sweep,
    /// Generate new pending stacks once the dock ran empty
    RefillDock,
}

/// Result of [`Board::complete_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Merge evaluation cleared this slot; a `ClearMerge` step is now pending
    Merging(SlotId),
    /// Back to `Idle`
    Unlocked,
    /// Merge limit reached
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged,
    NotMerged,
}

/// Move chosen by the auto-merge scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoMove {
    pub source: SlotId,
    pub target: SlotId,
    pub count: usize,
}

#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    grid: SlotGrid,
    dock: Dock,
    phase: BoardPhase,
    step: Option<Step>,
    follow_ups: VecDeque<FollowUp>,
    scoreboard: Scoreboard,
    /// Presentation handle -> logical owner
    owners: HashMap<TileId, Owner>,
    events: Vec<BoardEvent>,
    generator: StackGenerator,
    next_tile_id: u32,
}

impl Board {
    /// Validated board with the opening stacks and a full dock.
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = Self::build(config, seed);

        let last = board.grid.len() - 1;
        let mut opening = vec![SlotId(0), SlotId(last / 2), SlotId(last)];
        opening.dedup();
        for slot in opening {
            let colors = board.opening_colors();
            let tiles = board.mint_tiles(&colors);
            board.put_on_slot(slot, tiles);
        }
        board.refill_dock();
        board.events.clear();

        log::debug!(
            "board ready: {} slots, {} pending stacks, seed {}",
            board.grid.len(),
            board.dock.len(),
            seed
        );
        Ok(board)
    }

    /// Validated board with no tiles and an empty dock.
    pub fn empty(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, 0))
    }

    fn build(config: BoardConfig, seed: u32) -> Self {
        let grid = SlotGrid::hex_layout(&config);
        let dock = Dock::layout(config.dock_count as usize, grid.max_z());
        let generator = StackGenerator::new(seed, config.color_count);
        Self {
            config,
            grid,
            dock,
            phase: BoardPhase::Idle,
            step: None,
            follow_ups: VecDeque::new(),
            scoreboard: Scoreboard::new(),
            owners: HashMap::new(),
            events: Vec::new(),
            generator,
            next_tile_id: 0,
        }
    }

    /// Opening colors, never a stack that would merge on its own
    fn opening_colors(&mut self) -> Vec<Color> {
        let mut colors = self
            .generator
            .generate(OPENING_HEIGHTS, self.config.max_height());
        let uniform = colors.windows(2).all(|w| w[0] == w[1]);
        if uniform && colors.len() >= self.config.threshold() && self.config.color_count > 1 {
            let next = (colors[0].index() + 1) % self.config.color_count as usize;
            colors[0] = Color::from_index(next).unwrap_or(Color::Red);
        }
        colors
    }

    fn mint_tiles(&mut self, colors: &[Color]) -> Vec<Tile> {
        colors
            .iter()
            .map(|&color| {
                let id = TileId(self.next_tile_id);
                self.next_tile_id += 1;
                Tile::new(id, color)
            })
            .collect()
    }

    fn put_on_slot(&mut self, slot: SlotId, tiles: Vec<Tile>) {
        for tile in &tiles {
            self.owners.insert(tile.id(), Owner::BoardSlotTile(slot));
        }
        if let Some(s) = self.grid.slot_mut(slot) {
            s.stack_mut().append(tiles);
        }
    }

    fn ensure_idle(&self) -> Result<(), MoveRejected> {
        match self.phase {
            BoardPhase::Idle => Ok(()),
            BoardPhase::Locked => Err(MoveRejected::Locked),
            BoardPhase::Ended => Err(MoveRejected::Ended),
        }
    }

    // ---------------------------------------------------------------------
    // Setup
    // ---------------------------------------------------------------------

    /// Stack `colors` (bottom to top) onto `slot` without evaluating merges.
    pub fn seed_stack(&mut self, slot: SlotId, colors: &[Color]) -> Result<(), MoveRejected> {
        self.ensure_idle()?;
        let target = self.grid.slot(slot).ok_or(MoveRejected::UnknownSlot)?;
        if colors.is_empty() {
            return Err(MoveRejected::EmptyGroup);
        }
        if target.tiles().len() + colors.len() > target.max_height() {
            return Err(MoveRejected::CapacityExceeded);
        }
        let tiles = self.mint_tiles(colors);
        self.put_on_slot(slot, tiles);
        Ok(())
    }

    /// Stage a new pending stack in the lowest free dock berth.
    pub fn add_pending_stack(&mut self, colors: &[Color]) -> Result<DockId, MoveRejected> {
        self.ensure_idle()?;
        if colors.is_empty() {
            return Err(MoveRejected::EmptyGroup);
        }
        if colors.len() > self.config.max_height() {
            return Err(MoveRejected::CapacityExceeded);
        }
        if !self.dock.has_room() {
            return Err(MoveRejected::DockFull);
        }
        let tiles = self.mint_tiles(colors);
        self.stage(tiles).ok_or(MoveRejected::DockFull)
    }

    fn stage(&mut self, tiles: Vec<Tile>) -> Option<DockId> {
        let ids: Vec<TileId> = tiles.iter().map(Tile::id).collect();
        let dock = self.dock.insert(tiles)?;
        for id in ids {
            self.owners.insert(id, Owner::PendingExternalStack(dock));
        }
        Some(dock)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Top group of a slot's stack; empty for empty or unknown slots.
    pub fn selectable_group(&self, slot: SlotId) -> &[Tile] {
        self.grid.slot(slot).map_or(&[], |s| top_group(s.tiles()))
    }

    pub fn group_at(&self, slot: SlotId) -> Option<Group> {
        let group = self.selectable_group(slot);
        let first = group.first()?;
        Some(Group {
            source: slot,
            color: first.color(),
            len: group.len(),
        })
    }

    pub fn can_drop_group(&self, target: SlotId, group: &[Tile]) -> bool {
        self.grid
            .slot(target)
            .is_some_and(|s| check_drop(s.tiles(), s.max_height(), group).is_ok())
    }

    /// Nearest empty slot strictly within the capture radius of `pos`.
    pub fn slot_at(&self, pos: WorldPos) -> Option<SlotId> {
        self.grid.nearest_empty(pos, self.config.capture_radius())
    }

    pub fn owner_of(&self, tile: TileId) -> Option<Owner> {
        self.owners.get(&tile).copied()
    }

    /// Only tiles of pending dock stacks can be dragged.
    pub fn is_draggable(&self, tile: TileId) -> bool {
        matches!(self.owner_of(tile), Some(Owner::PendingExternalStack(_)))
    }

    /// Pending stack that owns `tile`, if it is draggable.
    pub fn extract_draggable_stack(&self, tile: TileId) -> Option<DockId> {
        match self.owner_of(tile)? {
            Owner::PendingExternalStack(dock) => Some(dock),
            Owner::BoardSlotTile(_) => None,
        }
    }

    pub fn stack(&self, slot: SlotId) -> &[Tile] {
        self.grid.slot(slot).map_or(&[], |s| s.tiles())
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn is_input_locked(&self) -> bool {
        self.phase != BoardPhase::Idle
    }

    pub fn is_ended(&self) -> bool {
        self.phase == BoardPhase::Ended
    }

    /// The only way to end is reaching the merge limit, so ended means won.
    pub fn is_won(&self) -> bool {
        self.is_ended() && self.scoreboard.limit_reached(self.config.merge_limit)
    }

    pub fn merge_count(&self) -> u32 {
        self.scoreboard.merges()
    }

    pub fn move_count(&self) -> u32 {
        self.scoreboard.moves()
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn pending_step(&self) -> Option<Step> {
        self.step
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self)
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------------------------------------------------------------
    // Moves
    // ---------------------------------------------------------------------

    /// Player move of the top group of `source` onto `target`.
    pub fn execute_move(
        &mut self,
        source: SlotId,
        target: SlotId,
        group: Group,
    ) -> Result<(), MoveRejected> {
        self.move_group(source, target, group, MoveOrigin::Player)
    }

    fn move_group(
        &mut self,
        source: SlotId,
        target: SlotId,
        group: Group,
        origin: MoveOrigin,
    ) -> Result<(), MoveRejected> {
        self.ensure_idle()?;
        let (Some(src), Some(dst)) = (self.grid.slot(source), self.grid.slot(target)) else {
            return Err(MoveRejected::UnknownSlot);
        };
        if source == target {
            return Err(MoveRejected::SameSlot);
        }
        if group.len == 0 {
            return Err(MoveRejected::EmptyGroup);
        }

        let current = top_group(src.tiles());
        let matches_source = group.source == source
            && current.len() == group.len
            && current.first().map(Tile::color) == Some(group.color);
        if !matches_source {
            return Err(MoveRejected::StaleGroup);
        }
        check_drop(dst.tiles(), dst.max_height(), current)?;

        let moved = self.grid.transfer(source, target, group.len);
        for id in &moved {
            self.owners.insert(*id, Owner::BoardSlotTile(target));
        }
        log::debug!(
            "{:?} move: {} {} tile(s) {} -> {}",
            origin,
            moved.len(),
            group.color,
            source,
            target
        );

        self.events.push(BoardEvent::Moved {
            source,
            target,
            count: moved.len(),
            origin,
        });
        if origin == MoveOrigin::Player {
            self.note_player_move();
        }
        self.lock(Step::Settle { target, origin });
        Ok(())
    }

    /// Place a pending dock stack into an empty slot.
    pub fn place_pending_stack(&mut self, dock: DockId, slot: SlotId) -> Result<(), MoveRejected> {
        self.ensure_idle()?;
        let pending = self.dock.get(dock).ok_or(MoveRejected::UnknownDock)?;
        let target = self.grid.slot(slot).ok_or(MoveRejected::UnknownSlot)?;
        if !target.is_empty() {
            return Err(MoveRejected::SlotOccupied);
        }
        check_drop(target.tiles(), target.max_height(), pending.tiles())?;

        let pending = self.dock.take(dock).ok_or(MoveRejected::UnknownDock)?;
        let count = pending.len();
        self.put_on_slot(slot, pending.into_tiles());
        log::debug!("placed {} ({} tiles) into {}", dock, count, slot);

        self.events.push(BoardEvent::Placed {
            dock,
            target: slot,
            count,
        });
        self.note_player_move();
        self.lock(Step::Settle {
            target: slot,
            origin: MoveOrigin::Player,
        });

        if self.dock.is_empty() {
            self.follow_ups.push_back(FollowUp::RefillDock);
        }
        Ok(())
    }

    fn note_player_move(&mut self) {
        let moves = self.scoreboard.record_player_move();
        self.events.push(BoardEvent::PlayerMoved { moves });
    }

    // ---------------------------------------------------------------------
    // Pipeline
    // ---------------------------------------------------------------------

    fn lock(&mut self, step: Step) {
        self.phase = BoardPhase::Locked;
        self.step = Some(step);
    }

    fn unlock(&mut self) {
        self.phase = BoardPhase::Idle;
        self.step = None;
        if !self.follow_ups.contains(&FollowUp::Sweep) {
            self.follow_ups.push_back(FollowUp::Sweep);
        }
    }

    fn end_game(&mut self) {
        if self.phase == BoardPhase::Ended {
            return;
        }
        self.phase = BoardPhase::Ended;
        self.step = None;
        self.follow_ups.clear();
        log::info!(
            "game ended after {} merges, score {}",
            self.scoreboard.merges(),
            self.scoreboard.score()
        );
        self.events.push(BoardEvent::GameEnded {
            merges: self.scoreboard.merges(),
            score: self.scoreboard.score(),
        });
    }

    /// Apply the pending step. `None` when nothing is pending.
    pub fn complete_step(&mut self) -> Option<StepOutcome> {
        if self.phase != BoardPhase::Locked {
            return None;
        }
        let Some(step) = self.step.take() else {
            self.unlock();
            return Some(StepOutcome::Unlocked);
        };

        match step {
            Step::Settle { target, .. } => match self.merge_slot(target) {
                MergeOutcome::Merged => {
                    self.step = Some(Step::ClearMerge { slot: target });
                    Some(StepOutcome::Merging(target))
                }
                MergeOutcome::NotMerged => {
                    self.unlock();
                    Some(StepOutcome::Unlocked)
                }
            },
            Step::ClearMerge { .. } => {
                if self.scoreboard.limit_reached(self.config.merge_limit) {
                    self.end_game();
                    Some(StepOutcome::Ended)
                } else {
                    self.unlock();
                    Some(StepOutcome::Unlocked)
                }
            }
        }
    }

    /// Clear `slot` if its stack qualifies, crediting the merge reward.
    ///
    /// Only accepted on an idle board; reaching the merge limit ends the game
    /// at once. The pipeline evaluates settled moves itself.
    pub fn evaluate_merge(&mut self, slot: SlotId) -> MergeOutcome {
        if self.phase != BoardPhase::Idle {
            return MergeOutcome::NotMerged;
        }
        let outcome = self.merge_slot(slot);
        if outcome == MergeOutcome::Merged
            && self.scoreboard.limit_reached(self.config.merge_limit)
        {
            self.end_game();
        }
        outcome
    }

    /// Merge step of the pipeline. The limit check belongs to `ClearMerge`.
    fn merge_slot(&mut self, slot: SlotId) -> MergeOutcome {
        let Some(s) = self.grid.slot_mut(slot) else {
            return MergeOutcome::NotMerged;
        };
        if !qualifies_for_merge(s.tiles(), self.config.threshold()) {
            return MergeOutcome::NotMerged;
        }

        let cleared = s.stack_mut().take_all();
        let color = cleared[0].color();
        for tile in &cleared {
            self.owners.remove(&tile.id());
        }
        self.scoreboard.record_merge(self.config.merge_reward);
        log::info!(
            "merged {} {} tiles in {} (merges {}, score {})",
            cleared.len(),
            color,
            slot,
            self.scoreboard.merges(),
            self.scoreboard.score()
        );
        self.events.push(BoardEvent::Merged {
            slot,
            color,
            tiles: cleared.len(),
            merges: self.scoreboard.merges(),
            score: self.scoreboard.score(),
        });
        MergeOutcome::Merged
    }

    // ---------------------------------------------------------------------
    // Auto-merge
    // ---------------------------------------------------------------------

    /// First neighbor pair (slot-index order) whose top groups share a color
    /// and whose preferred move passes the validator.
    pub fn find_auto_move(&self) -> Option<AutoMove> {
        for s in self.grid.slots() {
            let s_group = top_group(s.tiles());
            if s_group.is_empty() {
                continue;
            }
            let s_uniform = is_uniform(s.tiles());

            for &n_id in self.grid.neighbors(s.id()) {
                let Some(n) = self.grid.slot(n_id) else {
                    continue;
                };
                let n_group = top_group(n.tiles());
                if n_group.is_empty() || n_group[0].color() != s_group[0].color() {
                    continue;
                }
                let n_uniform = is_uniform(n.tiles());

                // Uniform stacks attract; otherwise the smaller group travels.
                let (from, to, group) = if s_uniform {
                    (n, s, n_group)
                } else if n_uniform || s_group.len() <= n_group.len() {
                    (s, n, s_group)
                } else {
                    (n, s, n_group)
                };

                if check_drop(to.tiles(), to.max_height(), group).is_ok() {
                    return Some(AutoMove {
                        source: from.id(),
                        target: to.id(),
                        count: group.len(),
                    });
                }
            }
        }
        None
    }

    /// Execute at most one auto-merge move. No-op unless idle.
    pub fn sweep(&mut self) -> Option<AutoMove> {
        if self.phase != BoardPhase::Idle {
            return None;
        }
        let mv = self.find_auto_move()?;
        let group = self.group_at(mv.source)?;
        match self.move_group(mv.source, mv.target, group, MoveOrigin::AutoMerge) {
            Ok(()) => Some(mv),
            Err(reason) => {
                log::debug!("auto-merge {:?} rejected: {}", mv, reason);
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Dock and follow-ups
    // ---------------------------------------------------------------------

    /// Fill every dock berth with a fresh stack. Returns the number generated.
    ///
    /// No-op once ended or while any pending stack remains.
    pub fn refill_dock(&mut self) -> usize {
        if self.phase == BoardPhase::Ended || !self.dock.is_empty() {
            return 0;
        }
        let mut generated = 0;
        while self.dock.has_room() {
            let colors = self.generator.generate(DOCK_HEIGHTS, self.config.max_height());
            let tiles = self.mint_tiles(&colors);
            if self.stage(tiles).is_none() {
                break;
            }
            generated += 1;
        }
        log::debug!("dock refilled with {} stacks", generated);
        self.events.push(BoardEvent::DockRefilled { stacks: generated });
        generated
    }

    /// Hand queued follow-ups to whoever owns the clock.
    pub fn take_follow_ups(&mut self) -> Vec<FollowUp> {
        self.follow_ups.drain(..).collect()
    }

    /// Run one follow-up. Returns whether the board changed.
    pub fn run_follow_up(&mut self, follow_up: FollowUp) -> bool {
        match follow_up {
            FollowUp::Sweep => self.sweep().is_some(),
            FollowUp::RefillDock => self.refill_dock() > 0,
        }
    }

    /// Run the pipeline and all follow-ups until nothing is left to do.
    pub fn settle(&mut self) {
        loop {
            if self.complete_step().is_some() {
                continue;
            }
            match self.follow_ups.pop_front() {
                Some(follow_up) => {
                    self.run_follow_up(follow_up);
                }
                None => break,
            }
        }
    }
}
