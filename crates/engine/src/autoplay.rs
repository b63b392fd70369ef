//! Autoplay planner - picks a dock stack and an empty slot to drop it on
//!
//! The planner favors empty slots next to stacks whose top color matches the
//! pending stack's top color, so the auto-merge sweep has something to work
//! with after the drop. Ties go to the earliest dock berth, then the lowest
//! slot id.

use hexa_stack_core::merge::is_uniform;
use hexa_stack_core::{Board, MoveRejected};
use hexa_stack_types::{DockId, SlotId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub dock: DockId,
    pub slot: SlotId,
}

/// Best placement for the current board, or `None` if nothing can be placed.
pub fn plan_placement(board: &Board) -> Option<Placement> {
    if board.is_input_locked() {
        return None;
    }

    let grid = board.grid();
    let mut best: Option<(u32, Placement)> = None;

    for pending in board.dock().stacks() {
        let Some(color) = pending.tiles().last().map(|t| t.color()) else {
            continue;
        };
        for slot in grid.slots().iter().filter(|s| s.is_empty()) {
            if pending.len() > slot.max_height() {
                continue;
            }
            let affinity: u32 = grid
                .neighbors(slot.id())
                .iter()
                .filter_map(|&n| grid.slot(n))
                .filter(|n| n.stack().top_color() == Some(color))
                .map(|n| if is_uniform(n.tiles()) { 2 } else { 1 })
                .sum();

            let candidate = Placement {
                dock: pending.id(),
                slot: slot.id(),
            };
            match best {
                Some((score, _)) if affinity <= score => {}
                _ => best = Some((affinity, candidate)),
            }
        }
    }

    best.map(|(_, placement)| placement)
}

/// Plan and place in one go.
pub fn apply_placement(board: &mut Board) -> Result<Placement, MoveRejected> {
    if board.is_ended() {
        return Err(MoveRejected::Ended);
    }
    let Some(placement) = plan_placement(board) else {
        return Err(if board.is_input_locked() {
            MoveRejected::Locked
        } else if board.dock().is_empty() {
            MoveRejected::UnknownDock
        } else {
            MoveRejected::SlotOccupied
        });
    };
    board.place_pending_stack(placement.dock, placement.slot)?;
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexa_stack_core::BoardConfig;
    use hexa_stack_types::Color;

    fn board() -> Board {
        Board::empty(BoardConfig::default()).unwrap()
    }

    #[test]
    fn plan_prefers_slot_next_to_matching_color() {
        let mut board = board();
        board.seed_stack(SlotId(12), &[Color::Blue, Color::Red]).unwrap();
        let dock = board.add_pending_stack(&[Color::Green, Color::Red]).unwrap();

        let plan = plan_placement(&board).unwrap();
        assert_eq!(plan.dock, dock);
        assert!(board.grid().are_neighbors(plan.slot, SlotId(12)));
        // Lowest neighbor id of the center slot.
        assert_eq!(plan.slot, SlotId(6));
    }

    #[test]
    fn plan_prefers_uniform_neighbors() {
        let mut board = board();
        board.seed_stack(SlotId(0), &[Color::Blue, Color::Red]).unwrap();
        board.seed_stack(SlotId(24), &[Color::Red, Color::Red]).unwrap();
        board.add_pending_stack(&[Color::Red]).unwrap();

        let plan = plan_placement(&board).unwrap();
        assert!(board.grid().are_neighbors(plan.slot, SlotId(24)));
    }

    #[test]
    fn plan_falls_back_to_lowest_empty_slot() {
        let mut board = board();
        board.add_pending_stack(&[Color::Green]).unwrap();
        assert_eq!(plan_placement(&board).unwrap().slot, SlotId(0));
    }

    #[test]
    fn plan_is_none_without_pending_stacks() {
        let board = board();
        assert_eq!(plan_placement(&board), None);
    }

    #[test]
    fn apply_rejected_when_not_playable() {
        let mut board = board();
        assert_eq!(apply_placement(&mut board), Err(MoveRejected::UnknownDock));

        board.add_pending_stack(&[Color::Green]).unwrap();
        board.add_pending_stack(&[Color::Blue]).unwrap();
        apply_placement(&mut board).unwrap();
        assert_eq!(apply_placement(&mut board), Err(MoveRejected::Locked));
    }
}
