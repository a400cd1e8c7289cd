//! Observation result values and their tag-driven codec.
//!
//! An observation result is an [`Item`]: a boolean, category, count,
//! measurement, text, time instant or range, a [`DataRecord`] of named
//! fields, a typed [`Array`], or one of two time series shapes. Each item
//! knows its type tag and how to encode itself as an `om:result` element;
//! [`decode`] recovers the item from a tag and a payload.
//!
//! ```
//! use meas_core::{decode, encode, DataRecord, Item, Measurement, ResultOptions};
//!
//! let mut record = DataRecord::new();
//! record.add_field("temp", Item::Measurement(Measurement::new("Cel", 21.5))).unwrap();
//! let item = Item::DataRecord(record);
//!
//! let encoded = encode(&item, &ResultOptions::default()).unwrap();
//! assert_eq!(decode(encoded.tag, &encoded.payload).unwrap(), item);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod dispatch;
pub mod error;
pub mod item;
pub mod options;
pub mod quality;
pub mod record;
pub mod result_type;
pub mod series;
pub mod time;

pub use array::{Array, ArrayColumn, Cell, ColumnKind, Row};
pub use dispatch::{decode, encode, EncodedResult};
pub use error::ItemError;
pub use item::{Item, Measurement};
pub use options::ResultOptions;
pub use quality::DataQuality;
pub use record::{DataRecord, EMPTY_RECORD_PLACEHOLDER};
pub use result_type::{
    ResultType, TAG_CATEGORY, TAG_COMPLEX, TAG_COUNT, TAG_MEASUREMENT, TAG_TEMPORAL, TAG_TEXT,
    TAG_TIMESERIES_CONSTANT, TAG_TIMESERIES_FLEXIBLE, TAG_TRUTH,
};
pub use series::{ConstantTimeSeries, FlexibleTimeSeries, TimeSeries};
pub use time::{TimeInstant, TimeRange};

pub use meas_wire::CalendarDuration;
