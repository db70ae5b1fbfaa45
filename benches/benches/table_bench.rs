//! # Lookup table benchmarks
//!
//! Measures table construction for different sizes and circuits, and the
//! cost of converting a reading back into temperature.
//!
//! Run: `cargo bench --bench table_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use thermistor::{Adc, Datapoint, HalfBridge, Ntc, Steinhart, TempRange};

fn equation() -> Steinhart {
    Steinhart::from_beta(&Datapoint::new(25.0, 10000.0), 3950.0).unwrap()
}

/// Benchmark table construction
fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");

    let eq = equation();
    let range = TempRange::new(-40.0, 125.0).unwrap();
    let bridge = HalfBridge::new(Adc::new(16, 3.3).unwrap(), 3.3, 10000.0).unwrap();

    for datapoints in [34usize, 166, 331] {
        group.bench_with_input(
            BenchmarkId::new("direct_f64", datapoints),
            &datapoints,
            |b, &n| b.iter(|| black_box(Ntc::<f64>::new(&eq, range, n).unwrap())),
        );

        group.bench_with_input(
            BenchmarkId::new("half_bridge_u16", datapoints),
            &datapoints,
            |b, &n| {
                b.iter(|| black_box(Ntc::<u16>::with_circuit(&eq, range, n, &bridge).unwrap()))
            },
        );
    }

    group.finish();
}

/// Benchmark reading to temperature conversion
fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    let eq = equation();
    let range = TempRange::new(-40.0, 125.0).unwrap();
    let bridge = HalfBridge::new(Adc::new(16, 3.3).unwrap(), 3.3, 10000.0).unwrap();
    let lut = Ntc::<u16>::with_circuit(&eq, range, 166, &bridge).unwrap();

    let middle = lut[83];
    let below = lut[lut.len() - 1] - 1;

    group.bench_function("in_range", |b| {
        b.iter(|| black_box(lut.interpolate(black_box(middle))))
    });

    group.bench_function("saturated", |b| {
        b.iter(|| black_box(lut.interpolate(black_box(below))))
    });

    group.bench_function("sweep_all_entries", |b| {
        b.iter(|| {
            for value in &lut {
                black_box(lut.interpolate(*value));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_table_build, bench_interpolate);
criterion_main!(benches);
