use core::hint::black_box;
use std::io;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use distparade::distribution::sample;
use distparade::render::render;
use distparade::{DelayPool, DistributionSpec, Histogram, NoPause, RenderConfig, Typewriter};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn normal_data(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    sample(&DistributionSpec::normal(0.0, 1.0), n, &mut rng).unwrap()
}

fn bench_histogram_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_build");
    for n in [1_000, 10_000, 100_000] {
        let data = normal_data(n);
        group.bench_with_input(BenchmarkId::new("samples", n), &data, |b, data| {
            b.iter(|| Histogram::build(black_box(data), 20).unwrap());
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mixture = DistributionSpec::mixture(
        vec![0.3, 0.7],
        vec![
            DistributionSpec::normal(-1.0, 1.0),
            DistributionSpec::normal(1.0, 0.5),
        ],
    );
    let mut group = c.benchmark_group("sample_1000");
    for (name, spec) in [
        ("normal", DistributionSpec::normal(0.0, 1.0)),
        ("gamma", DistributionSpec::gamma(2.0, 1.0)),
        ("mixture", mixture),
    ] {
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_function(name, |b| {
            b.iter(|| sample(black_box(&spec), 1000, &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_render_instant(c: &mut Criterion) {
    let histogram = Histogram::build(&normal_data(1000), 20).unwrap();
    let pool = DelayPool::from_delays(vec![0.0]).unwrap();
    let config = RenderConfig::new();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("render_instant", |b| {
        b.iter(|| {
            let mut tw = Typewriter::new(io::sink(), NoPause);
            render(black_box(&histogram), &pool, &config, &mut tw, &mut rng).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_histogram_build,
    bench_sample,
    bench_render_instant
);
criterion_main!(benches);
