//! # Model benchmarks
//!
//! Steinhart-Hart evaluation in both directions and coefficient fitting.
//!
//! Run: `cargo bench --bench model_bench`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use thermistor::{BetaPoint, Datapoint, Steinhart, kelvin};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let typical = Steinhart::new(1.4e-3, 2.37e-4, 9.9e-8);
    let beta = Steinhart::from_beta(&Datapoint::new(25.0, 10000.0), 3950.0).unwrap();

    group.bench_function("calculate_temp", |b| {
        b.iter(|| black_box(typical.calculate_temp(black_box(3833.3))))
    });

    group.bench_function("calculate_res_cubic", |b| {
        b.iter(|| black_box(typical.calculate_res(black_box(kelvin(20.0)))))
    });

    group.bench_function("calculate_res_beta", |b| {
        b.iter(|| black_box(beta.calculate_res(black_box(kelvin(20.0)))))
    });

    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");

    let nominal = Datapoint::new(25.0, 470000.0);
    let low = BetaPoint::new(50.0, 4700.0);
    let high = BetaPoint::new(85.0, 4750.0);

    group.bench_function("from_beta", |b| {
        b.iter(|| black_box(Steinhart::from_beta(black_box(&nominal), 4700.0).unwrap()))
    });

    group.bench_function("from_betas", |b| {
        b.iter(|| black_box(Steinhart::from_betas(black_box(&nominal), &low, &high).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_fit);
criterion_main!(benches);
