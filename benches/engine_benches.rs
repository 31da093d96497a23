//! Benchmarks for move generation, evaluation, and search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use woodpusher::engine::eval::evaluate;
use woodpusher::{Board, Engine, EngineConfig};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = Board::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    let mut kiwipete = Board::from_fen(KIWIPETE);
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let mut startpos = Board::new();
    group.bench_function("startpos", |b| b.iter(|| evaluate(black_box(&mut startpos))));

    let mut kiwipete = Board::from_fen(KIWIPETE);
    group.bench_function("kiwipete", |b| b.iter(|| evaluate(black_box(&mut kiwipete))));

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let config = EngineConfig {
        max_depth: 3,
        time_limit_ms: 0,
        randomness: 0.0,
        quiescence_enabled: true,
        max_quiescence_depth: 4,
    };

    group.bench_function("startpos_depth3", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut engine = Engine::new();
            engine.find_best_move(black_box(&mut board), &config)
        })
    });

    group.bench_function("kiwipete_depth3", |b| {
        b.iter(|| {
            let mut board = Board::from_fen(KIWIPETE);
            let mut engine = Engine::new();
            engine.find_best_move(black_box(&mut board), &config)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_evaluate, bench_search);
criterion_main!(benches);
