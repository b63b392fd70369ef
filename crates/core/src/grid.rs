//! Grid module - hex slot layout and adjacency
//!
//! Slots are laid out column-major on a flat-top hex grid: odd columns are
//! shifted half a hex down. Slot ids are row-major (`row * cols + col`).
//! Adjacency is computed once from center distances and never changes.

use arrayvec::ArrayVec;

use crate::config::BoardConfig;
use crate::tile::{Stack, Tile};
use crate::types::{SlotId, TileId, WorldPos};

/// A hex has at most six neighbors
pub const MAX_NEIGHBORS: usize = 6;

/// One board slot: fixed position, fixed capacity, one stack
#[derive(Debug)]
pub struct Slot {
    id: SlotId,
    position: WorldPos,
    max_height: usize,
    stack: Stack,
}

impl Slot {
    pub fn new(id: SlotId, position: WorldPos, max_height: usize) -> Self {
        Self {
            id,
            position,
            max_height,
            stack: Stack::new(),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn tiles(&self) -> &[Tile] {
        self.stack.tiles()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// The set of slots plus precomputed neighbor lists
#[derive(Debug)]
pub struct SlotGrid {
    slots: Vec<Slot>,
    neighbors: Vec<ArrayVec<SlotId, MAX_NEIGHBORS>>,
}

impl SlotGrid {
    /// Build the hex layout described by `config`.
    pub fn hex_layout(config: &BoardConfig) -> Self {
        let rows = config.grid_rows as usize;
        let cols = config.grid_cols as usize;
        let r = config.hex_radius;
        let hex_height = r * 3f32.sqrt();
        let col_step = r * 2.0 * 0.75;
        let mid_col = (cols as f32 - 1.0) / 2.0;
        let mid_row = (rows as f32 - 1.0) / 2.0;

        let mut slots = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let x = (col as f32 - mid_col) * col_step;
                let z = (row as f32 - mid_row) * hex_height + (col % 2) as f32 * hex_height / 2.0;
                let id = SlotId(row * cols + col);
                slots.push(Slot::new(id, WorldPos::new(x, z), config.max_height()));
            }
        }

        let neighbors = compute_neighbors(&slots, config.neighbor_band());
        Self { slots, neighbors }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(id.index())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        id.index() < self.slots.len()
    }

    /// Neighbor ids in ascending order; empty for unknown slots.
    pub fn neighbors(&self, id: SlotId) -> &[SlotId] {
        self.neighbors.get(id.index()).map_or(&[], |n| n.as_slice())
    }

    pub fn are_neighbors(&self, a: SlotId, b: SlotId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Nearest empty slot whose center lies strictly within `radius` of `pos`.
    ///
    /// Ties go to the lowest slot id.
    pub fn nearest_empty(&self, pos: WorldPos, radius: f32) -> Option<SlotId> {
        let mut best: Option<(SlotId, f32)> = None;
        for slot in self.slots.iter().filter(|s| s.is_empty()) {
            let d = slot.position.distance_to(pos);
            if d >= radius {
                continue;
            }
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((slot.id, d)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Largest z among slot centers (front edge of the board)
    pub fn max_z(&self) -> f32 {
        self.slots
            .iter()
            .map(|s| s.position.z)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Move the top `count` tiles of `source` onto `target`.
    ///
    /// Returns the ids of the moved tiles (bottom to top). The caller has
    /// already validated the move; unknown ids move nothing.
    pub fn transfer(&mut self, source: SlotId, target: SlotId, count: usize) -> Vec<TileId> {
        if source == target || !self.contains(source) || !self.contains(target) {
            return Vec::new();
        }
        let moved = self.slots[source.index()].stack.split_top(count);
        let ids = moved.iter().map(Tile::id).collect();
        self.slots[target.index()].stack.append(moved);
        ids
    }
}

fn compute_neighbors(slots: &[Slot], (min, max): (f32, f32)) -> Vec<ArrayVec<SlotId, MAX_NEIGHBORS>> {
    slots
        .iter()
        .map(|slot| {
            let mut list = ArrayVec::new();
            for other in slots {
                if other.id == slot.id {
                    continue;
                }
                let d = slot.position.distance_to(other.position);
                if d > min && d < max && !list.is_full() {
                    list.push(other.id);
                }
            }
            list
        })
        .collect()
}
