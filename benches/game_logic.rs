use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexic::core::fixture::{self, board_from_grid, tricolor};
use hexic::core::matching::{board_has_match, find_one_simple_cluster};
use hexic::core::rotation::shift_faces;
use hexic::core::scratch::ScratchArena;
use hexic::core::{Cursor, GameSnapshot, GameState, HexCoord, Layout};
use hexic::types::{GameAction, HexType, Spin, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345, 1);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_find_cluster(c: &mut Criterion) {
    let mut board = board_from_grid(&tricolor(), Layout::standard());
    for coord in [HexCoord::new(6, 6), HexCoord::new(7, 6), HexCoord::new(7, 7)] {
        board.tile_at_mut(coord).kind = HexType::Green;
    }
    let mut scratch = ScratchArena::new();
    let mut out = Vec::with_capacity(90);

    c.bench_function("find_one_simple_cluster", |b| {
        b.iter(|| find_one_simple_cluster(black_box(&board), &mut scratch, &mut out, true))
    });
}

fn bench_board_has_match(c: &mut Criterion) {
    let text = fixture::builtin("six-black-pearls").unwrap();
    let board = fixture::load(text, Layout::standard()).unwrap();

    c.bench_function("board_has_match", |b| {
        b.iter(|| board_has_match(black_box(&board), true))
    });
}

fn bench_shift_faces(c: &mut Criterion) {
    let mut board = board_from_grid(&tricolor(), Layout::standard());
    let selection = Cursor::new().selection(&board).unwrap();

    c.bench_function("shift_faces", |b| {
        b.iter(|| shift_faces(&mut board, black_box(&selection.tiles), Spin::Clockwise))
    });
}

fn bench_rotation_chain(c: &mut Criterion) {
    c.bench_function("trio_rotation_chain", |b| {
        b.iter(|| {
            let mut state =
                GameState::from_board(board_from_grid(&tricolor(), Layout::standard()), 1, 1);
            state.apply_action(GameAction::RotateCw);
            while !state.is_quiescent() {
                state.tick(TICK_MS);
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = GameState::new(12345, 1);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| state.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_find_cluster,
    bench_board_has_match,
    bench_shift_faces,
    bench_rotation_chain,
    bench_snapshot
);
criterion_main!(benches);
