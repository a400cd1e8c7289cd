//! Shared fixtures for meas tests and benchmarks.
//!
//! Builders for representative items of every variant, so integration tests
//! and benches exercise the same shapes:
//!
//! - [`sample_array`]: the five-kind array with a trailing empty cell,
//! - [`sample_record`]: a nested record with qualities,
//! - [`sample_constant_series`] and [`sample_flexible_series`],
//! - [`all_variants`]: one item of each variant.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
