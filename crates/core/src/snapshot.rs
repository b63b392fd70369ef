//! Serializable view of a board
//!
//! Used by front ends that only need to draw, and by the autoplay binary for
//! JSON output. Colors are listed bottom to top.

use serde::Serialize;

use crate::board::Board;
use crate::types::{BoardPhase, Color, DockId, SlotId, WorldPos};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    pub id: SlotId,
    pub position: WorldPos,
    pub max_height: usize,
    pub colors: Vec<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockSnapshot {
    pub id: DockId,
    pub berth: usize,
    pub position: WorldPos,
    pub colors: Vec<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub slots: Vec<SlotSnapshot>,
    pub dock: Vec<DockSnapshot>,
    pub phase: BoardPhase,
    pub merges: u32,
    pub merge_limit: u32,
    pub moves: u32,
    pub score: u32,
}

impl BoardSnapshot {
    /// Input would currently be accepted
    pub fn playable(&self) -> bool {
        self.phase == BoardPhase::Idle
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotSnapshot> {
        self.slots.get(id.index())
    }

    /// Total tiles on the board (dock excluded)
    pub fn tiles_on_board(&self) -> usize {
        self.slots.iter().map(|s| s.colors.len()).sum()
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let slots = board
            .grid()
            .slots()
            .iter()
            .map(|slot| SlotSnapshot {
                id: slot.id(),
                position: slot.position(),
                max_height: slot.max_height(),
                colors: slot.stack().colors().collect(),
            })
            .collect();

        let dock = board
            .dock()
            .stacks()
            .map(|pending| DockSnapshot {
                id: pending.id(),
                berth: pending.berth(),
                position: board
                    .dock()
                    .berth_position(pending.berth())
                    .unwrap_or_default(),
                colors: pending.tiles().iter().map(|t| t.color()).collect(),
            })
            .collect();

        Self {
            slots,
            dock,
            phase: board.phase(),
            merges: board.merge_count(),
            merge_limit: board.config().merge_limit,
            moves: board.move_count(),
            score: board.score(),
        }
    }
}
