//! Drag controller - the input collaborator for placing dock stacks
//!
//! A cursor moves on the ground plane. Grabbing resolves the tile under the
//! cursor and asks the board whether it belongs to a pending stack; releasing
//! asks the board for the nearest empty slot and tries the placement. Anything
//! that is not placed simply stays in its dock berth.

use hexa_stack_core::{Board, MoveRejected};
use hexa_stack_types::{DockId, PlayerAction, SlotId, TileId, WorldPos};

/// Result of letting go of a held stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(SlotId),
    /// No empty slot under the cursor
    Returned,
    Rejected(MoveRejected),
}

#[derive(Debug, Clone)]
pub struct DragController {
    cursor: WorldPos,
    held: Option<DockId>,
    step_x: f32,
    step_z: f32,
}

impl DragController {
    /// Cursor starts at the board center.
    pub fn new(board: &Board) -> Self {
        let r = board.config().hex_radius;
        Self {
            cursor: WorldPos::default(),
            held: None,
            step_x: r * 1.5,
            step_z: r * 3f32.sqrt() / 2.0,
        }
    }

    pub fn cursor(&self) -> WorldPos {
        self.cursor
    }

    pub fn held(&self) -> Option<DockId> {
        self.held
    }

    pub fn set_cursor(&mut self, pos: WorldPos) {
        self.cursor = pos;
    }

    pub fn move_cursor(&mut self, dx: f32, dz: f32) {
        self.cursor = self.cursor.offset(dx, dz);
    }

    /// Top tile of the slot or dock stack closest to `pos`, within one hex radius.
    pub fn hit_test(board: &Board, pos: WorldPos) -> Option<TileId> {
        let radius = board.config().hex_radius;
        let slots = board
            .grid()
            .slots()
            .iter()
            .filter_map(|s| Some((s.position(), s.tiles().last()?.id())));
        let dock = board.dock().stacks().filter_map(|p| {
            let berth = board.dock().berth_position(p.berth())?;
            Some((berth, p.tiles().last()?.id()))
        });

        slots
            .chain(dock)
            .map(|(center, tile)| (center.distance_to(pos), tile))
            .filter(|(d, _)| *d < radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, tile)| tile)
    }

    /// Pick up the pending stack under the cursor.
    pub fn grab(&mut self, board: &Board) -> bool {
        if self.held.is_some() || board.is_input_locked() {
            return false;
        }
        let Some(tile) = Self::hit_test(board, self.cursor) else {
            return false;
        };
        match board.extract_draggable_stack(tile) {
            Some(dock) => {
                log::debug!("grabbed {}", dock);
                self.held = Some(dock);
                true
            }
            None => false,
        }
    }

    /// Jump to the `index`-th dock stack (berth order) and grab it.
    pub fn select_dock(&mut self, board: &Board, index: usize) -> bool {
        let Some(pending) = board.dock().stacks().nth(index) else {
            return false;
        };
        let Some(pos) = board.dock().berth_position(pending.berth()) else {
            return false;
        };
        self.held = None;
        self.cursor = pos;
        self.grab(board)
    }

    /// Drop the held stack at the cursor.
    pub fn release(&mut self, board: &mut Board) -> Option<DropOutcome> {
        let dock = self.held.take()?;
        let Some(slot) = board.slot_at(self.cursor) else {
            return Some(DropOutcome::Returned);
        };
        match board.place_pending_stack(dock, slot) {
            Ok(()) => Some(DropOutcome::Placed(slot)),
            Err(reason) => {
                log::debug!("drop of {} on {} rejected: {}", dock, slot, reason);
                Some(DropOutcome::Rejected(reason))
            }
        }
    }

    pub fn cancel(&mut self) {
        self.held = None;
    }

    /// Apply one player action. Returns the drop outcome when a release happened.
    pub fn apply(&mut self, board: &mut Board, action: PlayerAction) -> Option<DropOutcome> {
        match action {
            PlayerAction::CursorLeft => self.move_cursor(-self.step_x, 0.0),
            PlayerAction::CursorRight => self.move_cursor(self.step_x, 0.0),
            PlayerAction::CursorUp => self.move_cursor(0.0, -self.step_z),
            PlayerAction::CursorDown => self.move_cursor(0.0, self.step_z),
            PlayerAction::SelectDock(n) => {
                self.select_dock(board, n as usize);
            }
            PlayerAction::Grab => {
                if self.held.is_some() {
                    return self.release(board);
                }
                self.grab(board);
            }
            PlayerAction::Cancel => self.cancel(),
        }
        None
    }
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
    fn test_board_tiles_are_not_grabbable() {
        let mut board = board();
        board.seed_stack(SlotId(12), &[Color::Red]).unwrap();
        let mut drag = DragController::new(&board);

        assert!(DragController::hit_test(&board, drag.cursor()).is_some());
        assert!(!drag.grab(&board));
        assert_eq!(drag.held(), None);
    }

    #[test]
    fn test_grab_and_place_on_empty_slot() {
        let mut board = board();
        let dock = board.add_pending_stack(&[Color::Blue, Color::Red]).unwrap();
        let mut drag = DragController::new(&board);

        assert!(drag.select_dock(&board, 0));
        assert_eq!(drag.held(), Some(dock));

        drag.set_cursor(WorldPos::default());
        assert_eq!(drag.release(&mut board), Some(DropOutcome::Placed(SlotId(12))));
        assert_eq!(board.stack(SlotId(12)).len(), 2);
        assert_eq!(drag.held(), None);
    }

    #[test]
    fn test_release_off_board_returns_stack() {
        let mut board = board();
        let dock = board.add_pending_stack(&[Color::Red]).unwrap();
        let mut drag = DragController::new(&board);

        drag.select_dock(&board, 0);
        drag.set_cursor(WorldPos::new(20.0, 20.0));
        assert_eq!(drag.release(&mut board), Some(DropOutcome::Returned));
        assert!(board.dock().get(dock).is_some());
        assert_eq!(drag.release(&mut board), None);
    }

    #[test]
    fn test_grab_refused_while_settling() {
        let mut board = board();
        board.add_pending_stack(&[Color::Red]).unwrap();
        board.add_pending_stack(&[Color::Blue]).unwrap();
        let mut drag = DragController::new(&board);

        drag.select_dock(&board, 0);
        drag.set_cursor(WorldPos::default());
        drag.release(&mut board);

        // Board is settling; grabbing is refused.
        assert!(!drag.select_dock(&board, 0));
        assert!(board.is_input_locked());
    }

    #[test]
    fn test_actions_drive_cursor_and_drop() {
        let mut board = board();
        board.add_pending_stack(&[Color::Green]).unwrap();
        let mut drag = DragController::new(&board);

        drag.apply(&mut board, PlayerAction::CursorRight);
        assert!((drag.cursor().x - 0.9).abs() < 1e-5);
        drag.apply(&mut board, PlayerAction::CursorLeft);
        drag.apply(&mut board, PlayerAction::CursorDown);
        drag.apply(&mut board, PlayerAction::CursorUp);
        assert!(drag.cursor().x.abs() < 1e-5 && drag.cursor().z.abs() < 1e-5);

        drag.apply(&mut board, PlayerAction::SelectDock(0));
        assert!(drag.held().is_some());
        drag.apply(&mut board, PlayerAction::Cancel);
        assert!(drag.held().is_none());

        drag.apply(&mut board, PlayerAction::SelectDock(0));
        drag.set_cursor(WorldPos::default());
        assert_eq!(
            drag.apply(&mut board, PlayerAction::Grab),
            Some(DropOutcome::Placed(SlotId(12)))
        );
    }
}
