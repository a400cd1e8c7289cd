//! Benchmark profiles for the meas result codec.
//!
//! Provides payload builders sized for benchmarking:
//!
//! - [`wide_array`]: the five-kind sample schema repeated over many rows
//! - [`nested_record`]: records nested `depth` levels, `width` fields each
//! - [`long_series`]: a constant series with many samples

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use meas_core::{Array, Cell, ConstantTimeSeries, DataQuality, DataRecord, Item, Measurement};
use meas_test_utils::{instant, sample_array, sample_constant_series};

/// The sample array schema with `rows` rows.
pub fn wide_array(rows: usize) -> Array {
    let template = sample_array();
    let mut array = Array::new(template.columns().to_vec()).expect("bench fixture");
    let when = instant("2018-02-06T09:58:44Z");
    for i in 0..rows {
        let note = if i % 3 == 0 { None } else { Some(Cell::from(format!("row {i}"))) };
        array
            .add_row([
                Some(Cell::from(i % 2 == 0)),
                Some(Cell::from(when)),
                Some(Cell::from(i as i64)),
                Some(Cell::from(i as f64 * 0.01)),
                note,
            ])
            .expect("bench fixture");
    }
    array
}

/// A record tree `depth` levels deep with `width` measurement fields per
/// level, every fifth of bad quality.
pub fn nested_record(depth: usize, width: usize) -> DataRecord {
    let mut record = DataRecord::new();
    for i in 0..width {
        let item = Item::Measurement(Measurement::new("Cel", i as f64));
        let name = format!("m{i}");
        let added = if i % 5 == 4 {
            record.add_field_with_quality(name, item, DataQuality::bad())
        } else {
            record.add_field(name, item)
        };
        added.expect("bench fixture");
    }
    if depth > 1 {
        record
            .add_field("child", Item::DataRecord(nested_record(depth - 1, width)))
            .expect("bench fixture");
    }
    record
}

/// A constant series with `samples` values.
pub fn long_series(samples: usize) -> ConstantTimeSeries {
    sample_constant_series(samples)
}
