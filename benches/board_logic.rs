use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexa_stack::core::{Board, BoardConfig, SlotGrid};
use hexa_stack::engine::{apply_placement, plan_placement, Session};
use hexa_stack::types::{Color, SlotId, WorldPos};

fn crowded_board() -> Board {
    let mut board = Board::empty(BoardConfig::default()).unwrap();
    let palette = [Color::Red, Color::Blue, Color::Green, Color::Yellow];
    for id in 0..board.grid().len() {
        let a = palette[id % palette.len()];
        let b = palette[(id + 1) % palette.len()];
        board.seed_stack(SlotId(id), &[a, b]).unwrap();
    }
    board
}

fn bench_find_auto_move(c: &mut Criterion) {
    // Two-tile mixed stacks on every slot.
    let board = crowded_board();

    c.bench_function("find_auto_move_full_scan", |b| {
        b.iter(|| black_box(board.find_auto_move()))
    });
}

fn bench_move_and_settle(c: &mut Criterion) {
    c.bench_function("sweep_and_settle", |b| {
        b.iter(|| {
            let mut board = Board::empty(BoardConfig::default()).unwrap();
            board.seed_stack(SlotId(0), &[Color::Red, Color::Red]).unwrap();
            board.seed_stack(SlotId(1), &[Color::Red]).unwrap();
            board.sweep();
            board.settle();
            black_box(board.merge_count())
        })
    });
}

fn bench_hex_layout(c: &mut Criterion) {
    let config = BoardConfig::default();

    c.bench_function("hex_layout_5x5", |b| {
        b.iter(|| black_box(SlotGrid::hex_layout(black_box(&config))))
    });
}

fn bench_slot_at(c: &mut Criterion) {
    let board = Board::empty(BoardConfig::default()).unwrap();

    c.bench_function("slot_at", |b| {
        b.iter(|| board.slot_at(black_box(WorldPos::new(0.3, -0.2))))
    });
}

fn bench_plan_placement(c: &mut Criterion) {
    let board = Board::new(BoardConfig::default(), 12345).unwrap();

    c.bench_function("plan_placement", |b| {
        b.iter(|| black_box(plan_placement(&board)))
    });
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = Session::new(Board::new(BoardConfig::default(), 12345).unwrap());

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if !session.board().is_input_locked() {
                let _ = apply_placement(session.board_mut());
            }
            session.tick(black_box(16), &mut ());
        })
    });
}

criterion_group!(
    benches,
    bench_find_auto_move,
    bench_move_and_settle,
    bench_hex_layout,
    bench_slot_at,
    bench_plan_placement,
    bench_session_tick
);
criterion_main!(benches);
