//! Meas: observation result values and their wire codec.
//!
//! This is the facade crate re-exporting the public API of the `meas`
//! sub-crates. For most users, adding `meas` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use chrono::TimeDelta;
//! use meas::prelude::*;
//!
//! // A regular series of furnace temperatures, sampled every minute.
//! let base = TimeInstant::parse("2019-07-05T08:00:00Z").unwrap();
//! let mut series = ConstantTimeSeries::new("Cel", base, TimeDelta::minutes(1));
//! series.add_value(1210.0, DataQuality::good());
//! series.add_value(1214.5, DataQuality::bad_with_reason("thermocouple"));
//!
//! // Encode for an observation with the identifier "Obs1".
//! let item = Item::TimeSeriesConstant(series);
//! let options = ResultOptions::for_observation("Obs1").unwrap();
//! let encoded = encode(&item, &options).unwrap();
//! assert_eq!(encoded.tag, TAG_TIMESERIES_CONSTANT);
//!
//! // The receiver recovers the same item from the tag and payload.
//! let decoded = decode(encoded.tag, &encoded.payload).unwrap();
//! assert_eq!(decoded, item);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `meas-core` | Items, qualities, tags, the dispatcher |
//! | [`wire`] | `meas-wire` | Element tree, qualified names, token codecs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Result items, qualities, tags and the dispatcher (`meas-core`).
///
/// Start with [`types::Item`] and the [`types::decode`] and
/// [`types::encode`] functions.
pub use meas_core as types;

/// Element tree, qualified names and token codecs (`meas-wire`).
///
/// [`wire::Element`] is the payload type handed to and returned by the
/// codec; [`wire::Document`] adds namespace declarations for printing.
pub use meas_wire as wire;

/// Common imports for typical usage.
///
/// ```rust
/// use meas::prelude::*;
/// ```
pub mod prelude {
    // Items
    pub use meas_core::{
        Array, ArrayColumn, CalendarDuration, Cell, ColumnKind, ConstantTimeSeries, DataQuality,
        DataRecord, FlexibleTimeSeries, Item, Measurement, TimeInstant, TimeRange,
    };

    // Codec
    pub use meas_core::{decode, encode, EncodedResult, ResultOptions, ResultType};

    // Tags
    pub use meas_core::{
        TAG_CATEGORY, TAG_COMPLEX, TAG_COUNT, TAG_MEASUREMENT, TAG_TEMPORAL, TAG_TEXT,
        TAG_TIMESERIES_CONSTANT, TAG_TIMESERIES_FLEXIBLE, TAG_TRUTH,
    };

    // Errors
    pub use meas_core::ItemError;
    pub use meas_wire::WireError;

    // Wire
    pub use meas_wire::{Document, Element};
}
