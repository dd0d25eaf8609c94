//! Criterion benchmarks for the reverb engine
//!
//! Run with: cargo bench -p gverb
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gverb::{ReverbEngine, ReverbParameters, SharedParameters, Topology};
use gverb_core::Effect;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion, name: &str, mut engine: ReverbEngine) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0; block_size];
                let mut right = vec![0.0; block_size];
                b.iter(|| {
                    engine.process_block(black_box(&input), &mut left, &mut right);
                    black_box((left[0], right[0]))
                })
            },
        );
    }

    group.finish();
}

fn bench_defaults(c: &mut Criterion) {
    bench_engine(c, "Gverb/defaults", ReverbEngine::new(SAMPLE_RATE));
}

fn bench_large_hall(c: &mut Criterion) {
    let engine = ReverbEngine::with_parameters(
        SAMPLE_RATE,
        ReverbParameters {
            roomsize: 300.0,
            revtime: 30.0,
            spread: 100.0,
            ..Default::default()
        },
    );
    bench_engine(c, "Gverb/large_hall", engine);
}

/// Every block retargets the room size, so topology is recomputed while
/// the smoother glides.
fn bench_roomsize_automation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gverb/roomsize_automation");
    let shared = SharedParameters::default();

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut engine = ReverbEngine::new(SAMPLE_RATE);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0; block_size];
                let mut right = vec![0.0; block_size];
                let mut step = 0u32;
                b.iter(|| {
                    step = step.wrapping_add(1);
                    shared.set(gverb::params::ROOMSIZE, 10.0 + (step % 200) as f32);
                    engine.sync(&shared);
                    engine.process_block(black_box(&input), &mut left, &mut right);
                    black_box((left[0], right[0]))
                })
            },
        );
    }

    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    c.bench_function("Gverb/topology_compute", |b| {
        b.iter(|| {
            Topology::compute(
                black_box(75.0),
                black_box(23.0),
                black_box(11.0),
                black_box(SAMPLE_RATE),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_defaults,
    bench_large_hall,
    bench_roomsize_automation,
    bench_topology,
);

criterion_main!(benches);
