//! Tag-driven result dispatch.
//!
//! [`decode`] turns a `(tag, payload)` pair into an [`Item`]; [`encode`] is
//! its converse. Tags shared by two variants (complex, temporal) are resolved
//! from the shape of the payload's child element.

use meas_wire::names::{
    ATTR_UOM, GML_TIME_INSTANT, GML_TIME_PERIOD, SWE_DATA_ARRAY, SWE_DATA_RECORD, TSML_TIMESERIES,
    XLINK_TITLE,
};
use meas_wire::token::{parse_boolean, parse_double, parse_long};
use meas_wire::{Document, Element, WireError};

use crate::array::Array;
use crate::error::ItemError;
use crate::item::{Item, Measurement};
use crate::options::ResultOptions;
use crate::record::DataRecord;
use crate::result_type::ResultType;
use crate::series::{ConstantTimeSeries, FlexibleTimeSeries};
use crate::time::{TimeInstant, TimeRange};

/// An encoded result: the type tag and the `om:result` payload.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedResult {
    /// Type tag of the result.
    pub tag: &'static str,
    /// The `om:result` element.
    pub payload: Element,
}

impl EncodedResult {
    /// Wrap the payload as a standalone document with namespace
    /// declarations.
    pub fn into_document(self) -> Result<Document, WireError> {
        Document::new(self.payload)
    }
}

/// Decode the payload of a result tagged `tag`.
///
/// Fails with [`ItemError::UnsupportedType`] for an unknown tag and with
/// [`ItemError::InvalidMessage`] when the payload does not have a shape the
/// tag allows.
///
/// ```
/// use meas_core::{decode, encode, Item, ResultOptions};
///
/// let encoded = encode(&Item::Count(42), &ResultOptions::default()).unwrap();
/// assert_eq!(decode(encoded.tag, &encoded.payload).unwrap(), Item::Count(42));
/// ```
pub fn decode(tag: &str, payload: &Element) -> Result<Item, ItemError> {
    let Some(result_type) = ResultType::from_tag(tag) else {
        return Err(ItemError::UnsupportedType {
            tag: tag.to_string(),
        });
    };
    tracing::trace!(?result_type, "decoding result");

    let item = match result_type {
        ResultType::Truth => Item::Boolean(parse_boolean(payload.text_or_empty())?),
        ResultType::Category => Item::Category(payload.require_attr(XLINK_TITLE)?.to_string()),
        ResultType::Count => Item::Count(parse_long(payload.text_or_empty())?),
        ResultType::Measurement => Item::Measurement(Measurement::new(
            payload.require_attr(ATTR_UOM)?,
            parse_double(payload.text_or_empty())?,
        )),
        ResultType::Text => Item::Text(payload.text_or_empty().to_string()),
        ResultType::Complex => {
            let inner = payload.first_child();
            match inner {
                Some(el) if el.name() == SWE_DATA_RECORD => Item::DataRecord(DataRecord::from_wire(el)?),
                Some(el) if el.name() == SWE_DATA_ARRAY => Item::Array(Array::from_wire(el)?),
                _ => return Err(unexpected_shape("complex", inner)),
            }
        }
        ResultType::Temporal => {
            let inner = payload.first_child();
            match inner {
                Some(el) if el.name() == GML_TIME_INSTANT => {
                    Item::TimeInstant(TimeInstant::from_result_payload(el)?)
                }
                Some(el) if el.name() == GML_TIME_PERIOD => {
                    Item::TimeRange(TimeRange::from_result_payload(el)?)
                }
                _ => return Err(unexpected_shape("temporal", inner)),
            }
        }
        ResultType::TimeSeriesConstant => Item::TimeSeriesConstant(ConstantTimeSeries::from_wire(
            payload.require_child(TSML_TIMESERIES)?,
        )?),
        ResultType::TimeSeriesFlexible => Item::TimeSeriesFlexible(FlexibleTimeSeries::from_wire(
            payload.require_child(TSML_TIMESERIES)?,
        )?),
    };
    Ok(item)
}

/// Encode `item` with its tag after validating `options`.
pub fn encode(item: &Item, options: &ResultOptions) -> Result<EncodedResult, ItemError> {
    options.validate()?;
    tracing::trace!(result_type = ?item.result_type(), "encoding result");
    Ok(EncodedResult {
        tag: item.tag(),
        payload: item.encode_as_result(options),
    })
}

fn unexpected_shape(kind: &str, inner: Option<&Element>) -> ItemError {
    let found = inner.map(Element::name).unwrap_or("nothing");
    ItemError::invalid_message(format!(
        "Unexpected result type in {kind} observation: {found}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result_type::{TAG_COMPLEX, TAG_COUNT, TAG_TEMPORAL};
    use meas_wire::names::OM_RESULT;

    #[test]
    fn unknown_tag_is_unsupported() {
        let payload = Element::new(OM_RESULT);
        match decode("http://example.org/Nope", &payload) {
            Err(ItemError::UnsupportedType { tag }) => assert_eq!(tag, "http://example.org/Nope"),
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn complex_tag_with_wrong_payload_is_invalid_message() {
        let payload = Element::new(OM_RESULT).with_child(Element::new("swe:Vector"));
        match decode(TAG_COMPLEX, &payload) {
            Err(ItemError::InvalidMessage { detail }) => {
                assert!(detail.contains("Unexpected result type in complex"), "{detail}")
            }
            other => panic!("expected InvalidMessage, got {other:?}"),
        }
        assert!(decode(TAG_TEMPORAL, &Element::new(OM_RESULT))
            .unwrap_err()
            .is_invalid_message());
    }

    #[test]
    fn count_overflow_is_out_of_range() {
        let payload = Element::new(OM_RESULT).with_text("9223372036854775808");
        assert!(matches!(
            decode(TAG_COUNT, &payload),
            Err(ItemError::OutOfRange { .. })
        ));
    }

    #[test]
    fn encode_rejects_invalid_options() {
        let options = ResultOptions {
            id_prefix: "not valid".into(),
        };
        assert!(matches!(
            encode(&Item::Boolean(true), &options),
            Err(ItemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn encoded_result_becomes_document() {
        let encoded = encode(&Item::Category("cocop/somefeature".into()), &ResultOptions::default())
            .unwrap();
        let doc = encoded.into_document().unwrap();
        assert_eq!(doc.root().attr("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
        assert_eq!(doc.root().attr(XLINK_TITLE), Some("cocop/somefeature"));
    }
}
