//! Criterion micro-benchmarks for scalar token and timestamp parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meas_core::TimeInstant;
use meas_wire::token::{format_double, parse_double, parse_duration, split_list};

/// Benchmark: Parse a 10K-token double list.
fn bench_parse_double_list(c: &mut Criterion) {
    let text: Vec<String> = (0..10_000).map(|i| format_double(i as f64 * 0.37)).collect();
    let text = text.join(" ");

    c.bench_function("parse_double_list_10k", |b| {
        b.iter(|| {
            let sum: f64 = split_list(black_box(&text))
                .map(|t| parse_double(t).unwrap())
                .sum();
            black_box(sum);
        });
    });
}

/// Benchmark: Parse explicit-zone and zone-less timestamps.
fn bench_parse_time_instant(c: &mut Criterion) {
    c.bench_function("parse_time_instant_utc", |b| {
        b.iter(|| black_box(TimeInstant::parse(black_box("2019-07-05T11:30:00.250+03:00")).unwrap()));
    });
    c.bench_function("parse_time_instant_local", |b| {
        b.iter(|| black_box(TimeInstant::parse(black_box("2019-07-05T08:30:00.250")).unwrap()));
    });
}

/// Benchmark: Parse a duration with every component.
fn bench_parse_duration(c: &mut Criterion) {
    c.bench_function("parse_duration", |b| {
        b.iter(|| black_box(parse_duration(black_box("P1Y2M3DT4H5M6.5S")).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_parse_double_list,
    bench_parse_time_instant,
    bench_parse_duration
);
criterion_main!(benches);
