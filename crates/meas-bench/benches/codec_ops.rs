//! Criterion micro-benchmarks for result encode and decode.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meas_bench::{long_series, nested_record, wide_array};
use meas_core::{decode, encode, Item, ResultOptions};

/// Benchmark: Encode a 1K-row array.
fn bench_encode_array_1k(c: &mut Criterion) {
    let item = Item::Array(wide_array(1_000));
    let options = ResultOptions::default();

    c.bench_function("encode_array_1k", |b| {
        b.iter(|| {
            let encoded = encode(black_box(&item), &options).unwrap();
            black_box(encoded);
        });
    });
}

/// Benchmark: Decode a 1K-row array.
fn bench_decode_array_1k(c: &mut Criterion) {
    let encoded = encode(&Item::Array(wide_array(1_000)), &ResultOptions::default()).unwrap();

    c.bench_function("decode_array_1k", |b| {
        b.iter(|| {
            let item = decode(encoded.tag, black_box(&encoded.payload)).unwrap();
            black_box(item);
        });
    });
}

/// Benchmark: Round-trip a record 4 levels deep with 25 fields per level.
fn bench_round_trip_nested_record(c: &mut Criterion) {
    let item = Item::DataRecord(nested_record(4, 25));
    let options = ResultOptions::default();

    c.bench_function("round_trip_nested_record", |b| {
        b.iter(|| {
            let encoded = encode(black_box(&item), &options).unwrap();
            let back = decode(encoded.tag, &encoded.payload).unwrap();
            black_box(back);
        });
    });
}

/// Benchmark: Decode a 10K-sample constant series.
fn bench_decode_series_10k(c: &mut Criterion) {
    let encoded = encode(
        &Item::TimeSeriesConstant(long_series(10_000)),
        &ResultOptions::default(),
    )
    .unwrap();

    c.bench_function("decode_series_10k", |b| {
        b.iter(|| {
            let item = decode(encoded.tag, black_box(&encoded.payload)).unwrap();
            black_box(item);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_array_1k,
    bench_decode_array_1k,
    bench_round_trip_nested_record,
    bench_decode_series_10k
);
criterion_main!(benches);
