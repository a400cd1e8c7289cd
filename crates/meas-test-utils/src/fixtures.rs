//! Item fixtures.

use chrono::TimeDelta;
use meas_core::{
    Array, ArrayColumn, Cell, ColumnKind, ConstantTimeSeries, DataQuality, DataRecord,
    FlexibleTimeSeries, Item, Measurement, TimeInstant, TimeRange,
};

/// Parse a timestamp, panicking on malformed fixture text.
pub fn instant(text: &str) -> TimeInstant {
    TimeInstant::parse(text).unwrap_or_else(|e| panic!("bad fixture timestamp {text:?}: {e}"))
}

/// Columns `[Bool, TimeInstant, Count, Measurement(cm), Text]` with rows
/// `[true, 09:58:44Z, 3, -0.12, "abc"]` and `[false, 09:58:45Z, -5, 14, empty]`.
pub fn sample_array() -> Array {
    let mut array = Array::new(vec![
        ArrayColumn::new("ok", ColumnKind::Boolean),
        ArrayColumn::new("when", ColumnKind::TimeInstant),
        ArrayColumn::new("count", ColumnKind::Count),
        ArrayColumn::new("length", ColumnKind::Measurement).with_unit("cm"),
        ArrayColumn::new("note", ColumnKind::Text),
    ])
    .unwrap();
    array
        .add_row([
            Some(Cell::from(true)),
            Some(Cell::from(instant("2018-02-06T09:58:44Z"))),
            Some(Cell::from(3_i64)),
            Some(Cell::from(-0.12)),
            Some(Cell::from("abc")),
        ])
        .unwrap();
    array
        .add_row([
            Some(Cell::from(false)),
            Some(Cell::from(instant("2018-02-06T09:58:45Z"))),
            Some(Cell::from(-5_i64)),
            Some(Cell::from(14.0)),
            None,
        ])
        .unwrap();
    array
}

/// A record with simple fields, qualities, a nested record and an array.
pub fn sample_record() -> DataRecord {
    let mut nested = DataRecord::new();
    nested
        .add_field("period", Item::TimeRange(sample_range()))
        .unwrap();
    nested
        .add_field("batch", Item::Category("cocop/copper/fsf/batch".into()))
        .unwrap();

    let mut record = DataRecord::new();
    record.set_description("furnace state");
    record
        .add_field_with_quality(
            "temperature",
            Item::Measurement(Measurement::new("Cel", 1210.5)),
            DataQuality::bad_with_reason("thermocouple"),
        )
        .unwrap();
    record.add_field("running", Item::Boolean(true)).unwrap();
    record.add_field("charges", Item::Count(17)).unwrap();
    record.add_field("operator", Item::Text("shift B".into())).unwrap();
    record
        .add_field("sampled", Item::TimeInstant(instant("2019-07-05T08:30:00")))
        .unwrap();
    record.add_field("meta", Item::DataRecord(nested)).unwrap();
    record.add_field("profile", Item::Array(sample_array())).unwrap();
    record
}

pub fn sample_range() -> TimeRange {
    TimeRange::new(
        instant("2019-07-05T08:00:00Z"),
        instant("2019-07-05T09:00:00Z"),
    )
    .unwrap()
}

/// Constant series with `n` samples, every seventh of bad quality.
pub fn sample_constant_series(n: usize) -> ConstantTimeSeries {
    let mut series = ConstantTimeSeries::new(
        "t/h",
        instant("2019-07-05T08:00:00Z"),
        TimeDelta::seconds(10),
    );
    series.series_mut().set_description("feed rate");
    for i in 0..n {
        let quality = if i % 7 == 6 {
            DataQuality::bad_with_reason("spike")
        } else {
            DataQuality::good()
        };
        series.add_value(i as f64 * 0.5, quality);
    }
    series
}

/// Flexible series with `n` samples at irregular offsets.
pub fn sample_flexible_series(n: usize) -> FlexibleTimeSeries {
    let base = instant("2019-07-05T08:00:00Z");
    let mut series = FlexibleTimeSeries::new("Cel");
    let mut offset_ms = 0_i64;
    for i in 0..n {
        offset_ms += 250 + (i as i64 % 4) * 1_000;
        let timestamp = base
            .checked_add(TimeDelta::milliseconds(offset_ms))
            .unwrap_or(base);
        series.add_good_value(timestamp, 20.0 + i as f64);
    }
    series
}

/// One item of every variant.
pub fn all_variants() -> Vec<Item> {
    vec![
        Item::Boolean(true),
        Item::Category("cocop/somefeature".into()),
        Item::Count(i64::MIN),
        Item::Measurement(Measurement::new("t", 2.5)),
        Item::Text("Hello, observation".into()),
        Item::TimeInstant(instant("2019-07-05T11:30:00+03:00")),
        Item::TimeRange(sample_range()),
        Item::DataRecord(sample_record()),
        Item::Array(sample_array()),
        Item::TimeSeriesConstant(sample_constant_series(5)),
        Item::TimeSeriesFlexible(sample_flexible_series(5)),
    ]
}
