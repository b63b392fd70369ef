//! Rejection reasons for board operations
//!
//! Illegal operations are never fatal: they come back as a [`MoveRejected`]
//! and leave the board untouched.

/// Why a move, placement or setup call was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejected {
    #[error("a move or merge is already in flight")]
    Locked,
    #[error("the game has ended")]
    Ended,
    #[error("no such slot")]
    UnknownSlot,
    #[error("no such pending stack")]
    UnknownDock,
    #[error("source and target are the same slot")]
    SameSlot,
    #[error("group is empty")]
    EmptyGroup,
    #[error("group no longer matches the top of its source stack")]
    StaleGroup,
    #[error("target stack would exceed its capacity")]
    CapacityExceeded,
    #[error("target top color does not match the group color")]
    ColorMismatch,
    #[error("target slot is not empty")]
    SlotOccupied,
    #[error("every dock position is taken")]
    DockFull,
}

impl MoveRejected {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            MoveRejected::Locked => "locked",
            MoveRejected::Ended => "ended",
            MoveRejected::UnknownSlot => "unknown_slot",
            MoveRejected::UnknownDock => "unknown_dock",
            MoveRejected::SameSlot => "same_slot",
            MoveRejected::EmptyGroup => "empty_group",
            MoveRejected::StaleGroup => "stale_group",
            MoveRejected::CapacityExceeded => "capacity_exceeded",
            MoveRejected::ColorMismatch => "color_mismatch",
            MoveRejected::SlotOccupied => "slot_occupied",
            MoveRejected::DockFull => "dock_full",
        }
    }

    /// True for rejections caused by board state rather than by the request
    pub fn is_transient(self) -> bool {
        matches!(self, MoveRejected::Locked)
    }
}
