//! Wire-level building blocks for observation documents.
//!
//! The result codec in `meas-core` never touches bytes directly. It reads and
//! writes an owned [`Element`] tree whose element and attribute names are the
//! prefixed qualified names of the external vocabulary (`swe:Quantity`,
//! `gml:TimeInstant`, `xlink:title`, ...). This crate provides:
//!
//! - [`Element`], the tree node, with builder-style constructors and
//!   lookup helpers that report missing children or attributes as
//!   [`WireError`]s,
//! - [`names`], the qualified names used by the codec,
//! - [`token`], the scalar token codecs (booleans, integers, doubles,
//!   calendar durations, whitespace-separated lists),
//! - [`Document`], a root element stamped with namespace declarations taken
//!   from the process-wide [`namespaces`] table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod document;
pub mod element;
pub mod error;
pub mod names;
pub mod token;

pub use document::{namespace_uri, namespaces, Document};
pub use element::Element;
pub use error::WireError;
pub use token::CalendarDuration;
