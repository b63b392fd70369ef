//! Dock - pending external stacks waiting in front of the board
//!
//! The dock has a fixed number of berths. Each berth holds at most one pending
//! stack; a stack keeps its berth until it is placed on the board.

use crate::tile::Tile;
use crate::types::{DockId, WorldPos};

/// Distance in front of the board's front edge
const DOCK_GAP: f32 = 1.4;
/// Horizontal spacing between berths
const BERTH_SPACING: f32 = 2.0;

/// Stack of tiles not yet on the board
#[derive(Debug)]
pub struct PendingStack {
    id: DockId,
    berth: usize,
    tiles: Vec<Tile>,
}

impl PendingStack {
    pub fn id(&self) -> DockId {
        self.id
    }

    pub fn berth(&self) -> usize {
        self.berth
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }
}

#[derive(Debug)]
pub struct Dock {
    berths: Vec<WorldPos>,
    stacks: Vec<PendingStack>,
    next_id: u32,
}

impl Dock {
    /// Lay out `count` berths centered on x = 0, just past `front_z`.
    pub fn layout(count: usize, front_z: f32) -> Self {
        let mid = (count as f32 - 1.0) / 2.0;
        let berths = (0..count)
            .map(|i| WorldPos::new((i as f32 - mid) * BERTH_SPACING, front_z + DOCK_GAP))
            .collect();
        Self {
            berths,
            stacks: Vec::with_capacity(count),
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.berths.len()
    }

    pub fn berths(&self) -> &[WorldPos] {
        &self.berths
    }

    pub fn berth_position(&self, berth: usize) -> Option<WorldPos> {
        self.berths.get(berth).copied()
    }

    pub fn has_room(&self) -> bool {
        self.stacks.len() < self.berths.len()
    }

    /// Put `tiles` into the lowest free berth. `None` when every berth is taken.
    pub fn insert(&mut self, tiles: Vec<Tile>) -> Option<DockId> {
        if !self.has_room() {
            return None;
        }
        // `stacks` is sorted by berth, so the first gap is the lowest free berth.
        let berth = self
            .stacks
            .iter()
            .enumerate()
            .find(|(i, s)| s.berth != *i)
            .map_or(self.stacks.len(), |(i, _)| i);
        let id = DockId(self.next_id);
        self.next_id += 1;
        self.stacks.insert(berth, PendingStack { id, berth, tiles });
        Some(id)
    }

    pub fn get(&self, id: DockId) -> Option<&PendingStack> {
        self.stacks.iter().find(|s| s.id == id)
    }

    pub fn take(&mut self, id: DockId) -> Option<PendingStack> {
        let idx = self.stacks.iter().position(|s| s.id == id)?;
        Some(self.stacks.remove(idx))
    }

    /// Pending stacks ordered by berth
    pub fn stacks(&self) -> std::slice::Iter<'_, PendingStack> {
        self.stacks.iter()
    }

    pub fn position_of(&self, id: DockId) -> Option<WorldPos> {
        self.get(id).and_then(|s| self.berth_position(s.berth))
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
