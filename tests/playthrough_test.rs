//! Session-driven playthroughs: drag input, timed pipeline, autoplay.

use hexa_stack::core::{Board, BoardConfig};
use hexa_stack::engine::{apply_placement, BoardObserver, DragController, DropOutcome, Session};
use hexa_stack::types::{BoardEvent, Color, Owner, PlayerAction, SlotId, TICK_MS};

#[derive(Default)]
struct Recorder {
    moves: Vec<u32>,
    merges: Vec<(SlotId, u32, u32)>,
    ended: Vec<(u32, u32)>,
    events: Vec<BoardEvent>,
}

impl BoardObserver for Recorder {
    fn on_player_move(&mut self, moves: u32) {
        self.moves.push(moves);
    }

    fn on_merge(&mut self, slot: SlotId, merges: u32, score: u32) {
        self.merges.push((slot, merges, score));
    }

    fn on_game_ended(&mut self, merges: u32, score: u32) {
        self.ended.push((merges, score));
    }

    fn on_event(&mut self, event: &BoardEvent) {
        self.events.push(event.clone());
    }
}

fn tick_until_idle(session: &mut Session, recorder: &mut Recorder) {
    for _ in 0..1_000 {
        session.tick(TICK_MS, recorder);
        if !session.board().is_input_locked() && session.scheduled_len() == 0 {
            return;
        }
    }
    panic!("board never went idle");
}

/// Every tile on the board or in the dock is owned by where it sits.
fn assert_ownership(board: &Board) {
    for slot in board.grid().slots() {
        assert!(slot.tiles().len() <= slot.max_height());
        for tile in slot.tiles() {
            assert_eq!(board.owner_of(tile.id()), Some(Owner::BoardSlotTile(slot.id())));
            assert!(!board.is_draggable(tile.id()));
        }
    }
    for pending in board.dock().stacks() {
        for tile in pending.tiles() {
            assert_eq!(
                board.owner_of(tile.id()),
                Some(Owner::PendingExternalStack(pending.id()))
            );
            assert_eq!(board.extract_draggable_stack(tile.id()), Some(pending.id()));
        }
    }
}

#[test]
fn drag_and_drop_merges_through_the_session() {
    let mut board = Board::empty(BoardConfig::default()).unwrap();
    board.add_pending_stack(&[Color::Red; 3]).unwrap();
    let target = board.grid().slot(SlotId(0)).unwrap().position();

    let mut session = Session::new(board);
    let mut drag = DragController::new(session.board());
    let mut recorder = Recorder::default();

    assert_eq!(drag.apply(session.board_mut(), PlayerAction::SelectDock(0)), None);
    assert!(drag.held().is_some());
    drag.set_cursor(target);
    assert_eq!(
        drag.apply(session.board_mut(), PlayerAction::Grab),
        Some(DropOutcome::Placed(SlotId(0)))
    );
    assert!(session.board().is_input_locked());

    tick_until_idle(&mut session, &mut recorder);

    assert_eq!(recorder.moves, vec![1]);
    assert_eq!(recorder.merges, vec![(SlotId(0), 1, 100)]);
    assert!(recorder.ended.is_empty());
    // The emptied dock was refilled after its delay.
    assert_eq!(session.board().dock().len(), 3);
    assert!(recorder
        .events
        .iter()
        .any(|e| matches!(e, BoardEvent::DockRefilled { stacks: 3 })));
    assert_ownership(session.board());
}

#[test]
fn drop_off_the_board_returns_the_stack() {
    let mut board = Board::empty(BoardConfig::default()).unwrap();
    let dock = board.add_pending_stack(&[Color::Blue]).unwrap();
    let mut drag = DragController::new(&board);

    assert!(drag.select_dock(&board, 0));
    // Still over the dock berth: no empty slot in capture range.
    assert_eq!(drag.release(&mut board), Some(DropOutcome::Returned));
    assert!(board.dock().get(dock).is_some());
    assert!(!board.is_input_locked());
}

#[test]
fn game_end_hook_fires_once() {
    let config = BoardConfig {
        merge_limit: 1,
        ..BoardConfig::default()
    };
    let mut board = Board::empty(config).unwrap();
    let dock = board.add_pending_stack(&[Color::Green; 4]).unwrap();
    board.place_pending_stack(dock, SlotId(12)).unwrap();

    let mut session = Session::new(board);
    let mut recorder = Recorder::default();
    for _ in 0..500 {
        session.tick(TICK_MS, &mut recorder);
    }

    assert!(session.board().is_ended());
    assert!(session.board().is_won());
    assert_eq!(recorder.ended, vec![(1, 100)]);
    assert_eq!(session.scheduled_len(), 0);
    // Ending cancels the pending dock refill.
    assert!(session.board().dock().is_empty());
}

#[test]
fn autoplay_keeps_board_invariants() {
    let mut session = Session::new(Board::new(BoardConfig::default(), 7).unwrap());
    let mut recorder = Recorder::default();
    assert_ownership(session.board());

    for _ in 0..20_000 {
        if session.board().is_ended() {
            break;
        }
        if !session.board().is_input_locked() {
            let _ = apply_placement(session.board_mut());
        }

        let seen = recorder.events.len();
        session.tick(TICK_MS, &mut recorder);
        let moved = recorder.events[seen..]
            .iter()
            .filter(|e| matches!(e, BoardEvent::Moved { .. }))
            .count();
        assert!(moved <= 1, "more than one move in a single tick");
        assert_ownership(session.board());
    }

    let board = session.board();
    assert!(recorder.ended.len() <= 1);
    if board.is_ended() {
        assert!(board.merge_count() >= board.config().merge_limit);
    }
    assert_eq!(recorder.moves.len() as u32, board.move_count());
    assert_eq!(board.score(), board.merge_count() * board.config().merge_reward);
}

#[test]
fn same_seed_same_game() {
    let run = |seed| {
        let mut session = Session::new(Board::new(BoardConfig::default(), seed).unwrap());
        let mut recorder = Recorder::default();
        for _ in 0..3_000 {
            if !session.board().is_input_locked() {
                let _ = apply_placement(session.board_mut());
            }
            session.tick(TICK_MS, &mut recorder);
        }
        (session.board().snapshot(), recorder.events)
    };

    assert_eq!(run(42), run(42));
}
