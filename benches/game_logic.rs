use criterion::{black_box, criterion_group, criterion_main, Criterion};
use raindrop::core::{GameConfig, GameSession};
use raindrop::engine::{NoNavigation, RaindropGame};
use raindrop::store::MemoryStore;
use raindrop::types::Operator;

fn busy_session() -> GameSession {
    let mut session = GameSession::new(GameConfig::default(), 12345);
    session.start(0);
    for i in 0..32 {
        session.push_problem(Operator::Add, i % 10 + 1, 3, false);
    }
    session
}

fn bench_physics_tick(c: &mut Criterion) {
    c.bench_function("physics_tick_32_problems", |b| {
        b.iter_batched(
            busy_session,
            |mut session| {
                session.physics_tick(black_box(500));
                session
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_spawn_tick(c: &mut Criterion) {
    let mut session = GameSession::new(GameConfig::default(), 12345);
    session.start(0);

    c.bench_function("spawn_tick", |b| {
        b.iter(|| {
            if session.active_problems().len() > 64 {
                session.restart(0);
            }
            session.spawn_tick();
        })
    });
}

fn bench_submit(c: &mut Criterion) {
    c.bench_function("submit_miss_32_problems", |b| {
        let mut session = busy_session();
        b.iter(|| session.submit_answer(black_box("9999")))
    });
}

fn bench_advance(c: &mut Criterion) {
    c.bench_function("advance_full_game", |b| {
        b.iter(|| {
            let mut game =
                RaindropGame::new(GameConfig::default(), 7, MemoryStore::new(), NoNavigation);
            game.start();
            while game.is_running() {
                game.advance(black_box(500));
            }
            game.result()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = busy_session();
    let mut snap = raindrop::core::GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            session.snapshot_into(black_box(1_000), &mut snap);
        })
    });
}

criterion_group!(
    benches,
    bench_physics_tick,
    bench_spawn_tick,
    bench_submit,
    bench_advance,
    bench_snapshot
);
criterion_main!(benches);
