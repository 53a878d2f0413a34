//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying simulation counts
//! - Searches reusing a warm table versus a fresh one
//! - Typed games versus registry-built erased games
//! - Game comparison (Nim vs Ledge)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{create_game, ErasedGame, GameParams};
use games_ledge::Ledge;
use games_nim::Nim;
use mcts::{Mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn nim() -> Nim {
    Nim::new(21, 3, 1, true).unwrap()
}

fn ledge() -> Ledge {
    Ledge::new(vec![0, 1, 0, 0, 1, 0, 2, 0, 1, 0, 1], true).unwrap()
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_simulations");

    for sims in [100, 500, 1000, 5000] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::new("nim", sims), &sims, |b, &sims| {
            let game = nim();
            b.iter(|| {
                let mut mcts = Mcts::new(MctsConfig::default());
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(mcts.search(&game, sims, &mut rng).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_warm_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_table");
    let game = nim();

    group.bench_function("fresh", |b| {
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig::default());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(mcts.search(&game, 500, &mut rng).unwrap())
        });
    });

    group.bench_function("warm", |b| {
        let mut mcts = Mcts::new(MctsConfig::default());
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        mcts.search(&game, 5000, &mut rng).unwrap();
        b.iter(|| black_box(mcts.search(&game, 500, &mut rng).unwrap()));
    });

    group.finish();
}

fn bench_erased_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("erased_overhead");
    engine_games::register_all_games();

    group.bench_function("typed", |b| {
        let game = nim();
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig::default());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(mcts.search(&game, 500, &mut rng).unwrap())
        });
    });

    group.bench_function("erased", |b| {
        let mut params = GameParams::new();
        params.insert("stones".into(), toml::Value::Integer(21));
        let game: Box<dyn ErasedGame> =
            create_game("nim", &params, &mut ChaCha20Rng::seed_from_u64(0)).unwrap();
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig::default());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(mcts.search(&game, 500, &mut rng).unwrap())
        });
    });

    group.finish();
}

fn bench_game_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_comparison");
    let sims = 1000;
    group.throughput(Throughput::Elements(sims as u64));

    group.bench_function("nim", |b| {
        let game = nim();
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig::default());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(mcts.search(&game, sims, &mut rng).unwrap())
        });
    });

    group.bench_function("ledge", |b| {
        let game = ledge();
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig::default());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(mcts.search(&game, sims, &mut rng).unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_simulations,
    bench_warm_table,
    bench_erased_overhead,
    bench_game_comparison,
);
criterion_main!(benches);
