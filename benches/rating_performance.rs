//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elo_ladder::config::RatingSettings;
use elo_ladder::rating::{replay, PairwiseElo, RatingEngine};
use elo_ladder::types::{Game, Snapshot};

fn engine() -> PairwiseElo {
    PairwiseElo::new(RatingSettings::default()).unwrap()
}

/// A snapshot of `n` players spread across the rating scale
fn spread_snapshot(n: usize) -> Snapshot {
    (0..n)
        .map(|i| (format!("player_{}", i), 1200 + (i as i32 * 50)))
        .collect()
}

fn game_of(n: usize, round: usize) -> Game {
    // Rotate the finishing order so every player wins sometimes
    Game::new(
        (0..n)
            .map(|i| format!("player_{}", (i + round) % n))
            .collect(),
    )
}

fn bench_compute_deltas(c: &mut Criterion) {
    let engine = engine();

    let snapshot4 = spread_snapshot(4);
    let game4 = game_of(4, 0);
    c.bench_function("compute_deltas_4_players", |b| {
        b.iter(|| black_box(engine.compute_deltas(&snapshot4, &game4)))
    });

    let snapshot8 = spread_snapshot(8);
    let game8 = game_of(8, 0);
    c.bench_function("compute_deltas_8_players", |b| {
        b.iter(|| black_box(engine.compute_deltas(&snapshot8, &game8)))
    });
}

fn bench_replay_history(c: &mut Criterion) {
    let engine = engine();

    // 500 four-player games over a 16-player pool
    let games: Vec<Game> = (0..500)
        .map(|round| {
            Game::new(
                (0..4)
                    .map(|i| format!("player_{}", (i * 5 + round) % 16))
                    .collect(),
            )
        })
        .collect();

    c.bench_function("replay_500_games", |b| {
        b.iter(|| black_box(replay(&games, &engine, None)))
    });

    c.bench_function("replay_500_games_window_100", |b| {
        b.iter(|| black_box(replay(&games, &engine, Some(100))))
    });
}

criterion_group!(benches, bench_compute_deltas, bench_replay_history);
criterion_main!(benches);
