use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_crush::core::{find_matches, Board, CascadeConfig, CascadeEngine, GameSession, SimpleRng};
use tui_crush::types::{Difficulty, GameMode};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(GameMode::Classic, Difficulty::Normal, 12345);
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(16));
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("board_generate", |b| {
        b.iter(|| {
            let mut rng = SimpleRng::new(black_box(12345));
            Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic)
        })
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic);

    c.bench_function("find_matches", |b| {
        b.iter(|| find_matches(black_box(&board)))
    });
}

fn bench_find_first_move(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic);

    c.bench_function("find_first_move", |b| {
        b.iter(|| black_box(&board).find_first_move())
    });
}

fn bench_cascade_step(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic);

    c.bench_function("cascade_resolve_step", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut rng = SimpleRng::new(67890);
            let mut cascade = CascadeEngine::new(CascadeConfig::default());
            cascade.begin();
            cascade.resolve_step(&mut board, &mut rng)
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_generate,
    bench_find_matches,
    bench_find_first_move,
    bench_cascade_step
);
criterion_main!(benches);
