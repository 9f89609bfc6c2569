//! Criterion benchmarks for whole-grid stepping.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use deluge_bench::{reference_profile, terraced_profile};
use deluge_engine::{FloodWorld, UpdateOrder};

fn bench_reference_run(c: &mut Criterion) {
    for (name, order) in [
        ("reference_run_in_place", UpdateOrder::InPlace),
        ("reference_run_buffered", UpdateOrder::Buffered),
    ] {
        let config = reference_profile(order);
        c.bench_function(name, |b| {
            b.iter_batched(
                || FloodWorld::new(config.clone()).unwrap(),
                |mut world| black_box(world.run()),
                BatchSize::SmallInput,
            );
        });
    }
}

/// Ten steps of a 100x100 terraced flood, starting from the seeded state.
fn bench_ten_steps_10k(c: &mut Criterion) {
    for (name, order) in [
        ("ten_steps_10k_in_place", UpdateOrder::InPlace),
        ("ten_steps_10k_buffered", UpdateOrder::Buffered),
    ] {
        let config = terraced_profile(100, 5_000.0, order);
        c.bench_function(name, |b| {
            b.iter_batched(
                || FloodWorld::new(config.clone()).unwrap(),
                |mut world| {
                    for _ in 0..10 {
                        black_box(world.step());
                    }
                    world
                },
                BatchSize::LargeInput,
            );
        });
    }
}

criterion_group!(benches, bench_reference_run, bench_ten_steps_10k);
criterion_main!(benches);
