//! The result item variants and their two encodings.
//!
//! Every item can be written as a standalone observation result (an
//! `om:result` element). All variants except the time series can also be
//! written as a component inside a data record field. The two shapes differ:
//! results carry `xsi:type` hints and document-unique identifiers, field
//! components use the SWE Common simple component elements.

use meas_wire::names::{
    ATTR_CODE, ATTR_UOM, OM_RESULT, SWE_BOOLEAN, SWE_CATEGORY, SWE_COUNT, SWE_DATA_ARRAY,
    SWE_DATA_RECORD, SWE_QUALITY, SWE_QUANTITY, SWE_TEXT, SWE_TIME, SWE_TIME_RANGE, SWE_UOM,
    SWE_VALUE, XLINK_TITLE, XSI_TYPE,
};
use meas_wire::token::{format_boolean, format_double, format_long, parse_boolean, parse_double, parse_long};
use meas_wire::Element;

use crate::array::Array;
use crate::error::ItemError;
use crate::options::ResultOptions;
use crate::quality::DataQuality;
use crate::record::DataRecord;
use crate::result_type::ResultType;
use crate::series::{ConstantTimeSeries, FlexibleTimeSeries};
use crate::time::{TimeInstant, TimeRange};

/// A value with a unit of measure.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Unit of measure code, e.g. `Cel` or `t/h`.
    pub unit: String,
    /// The measured value.
    pub value: f64,
}

impl Measurement {
    /// Create a measurement.
    pub fn new(unit: impl Into<String>, value: f64) -> Self {
        Self {
            unit: unit.into(),
            value,
        }
    }
}

/// An observation result.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// Truth value.
    Boolean(bool),
    /// Reference to a category, typically a URI.
    Category(String),
    /// Exact integer.
    Count(i64),
    /// Value with a unit of measure.
    Measurement(Measurement),
    /// Free text.
    Text(String),
    /// Point in time.
    TimeInstant(TimeInstant),
    /// Interval of time.
    TimeRange(TimeRange),
    /// Named fields, possibly nested.
    DataRecord(DataRecord),
    /// Typed table.
    Array(Array),
    /// Series with constant spacing.
    TimeSeriesConstant(ConstantTimeSeries),
    /// Series with a timestamp per sample.
    TimeSeriesFlexible(FlexibleTimeSeries),
}

impl Item {
    /// Result type of this item.
    pub fn result_type(&self) -> ResultType {
        match self {
            Self::Boolean(_) => ResultType::Truth,
            Self::Category(_) => ResultType::Category,
            Self::Count(_) => ResultType::Count,
            Self::Measurement(_) => ResultType::Measurement,
            Self::Text(_) => ResultType::Text,
            Self::TimeInstant(_) | Self::TimeRange(_) => ResultType::Temporal,
            Self::DataRecord(_) | Self::Array(_) => ResultType::Complex,
            Self::TimeSeriesConstant(_) => ResultType::TimeSeriesConstant,
            Self::TimeSeriesFlexible(_) => ResultType::TimeSeriesFlexible,
        }
    }

    /// Type tag written next to the result payload.
    pub fn tag(&self) -> &'static str {
        self.result_type().tag()
    }

    /// Whether a quality annotation can be attached when this item is a
    /// record field.
    pub fn supports_field_quality(&self) -> bool {
        !matches!(
            self,
            Self::DataRecord(_)
                | Self::Array(_)
                | Self::TimeSeriesConstant(_)
                | Self::TimeSeriesFlexible(_)
        )
    }

    /// Whether this item can be stored in a record field.
    pub fn is_valid_field(&self) -> bool {
        !matches!(
            self,
            Self::TimeSeriesConstant(_) | Self::TimeSeriesFlexible(_)
        )
    }

    // ── Result shape ────────────────────────────────────────────

    /// Encode as an `om:result` element.
    pub fn encode_as_result(&self, options: &ResultOptions) -> Element {
        match self {
            Self::Boolean(v) => result("xs:boolean").with_text(format_boolean(*v)),
            Self::Category(reference) => {
                result("gml:ReferenceType").with_attr(XLINK_TITLE, reference.as_str())
            }
            Self::Count(v) => result("xs:integer").with_text(format_long(*v)),
            Self::Measurement(m) => result("gml:MeasureType")
                .with_attr(ATTR_UOM, m.unit.as_str())
                .with_text(format_double(m.value)),
            Self::Text(text) => result("xs:string").with_text(text.as_str()),
            Self::TimeInstant(t) => result("gml:TimeInstantPropertyType")
                .with_child(t.to_result_payload(options.id("TimeInst"))),
            Self::TimeRange(r) => result("gml:TimePeriodPropertyType")
                .with_child(r.to_result_payload(options.id("TimeRange"))),
            Self::DataRecord(record) => {
                result("swe:DataRecordPropertyType").with_child(record.to_wire())
            }
            Self::Array(array) => result("swe:DataArrayPropertyType").with_child(array.to_wire()),
            Self::TimeSeriesConstant(series) => result("tsml:TimeseriesDomainRangePropertyType")
                .with_child(series.to_wire(&options.id("TimeSer"))),
            Self::TimeSeriesFlexible(series) => result("tsml:TimeseriesDomainRangePropertyType")
                .with_child(series.to_wire(&options.id("TimeSer"))),
        }
    }

    // ── Field shape ─────────────────────────────────────────────

    /// Encode as a record field component, or `None` for time series.
    ///
    /// `quality` is written only for simple components and only when it is
    /// not good.
    pub fn to_field_component(&self, quality: Option<&DataQuality>) -> Option<Element> {
        let simple = |name: &str| {
            let mut el = Element::new(name);
            if let Some(q) = quality.filter(|q| !q.is_good()) {
                el.push_child(Element::new(SWE_QUALITY).with_attr(XLINK_TITLE, q.encoded_value()));
            }
            el
        };
        let value = |text: String| Element::new(SWE_VALUE).with_text(text);

        let component = match self {
            Self::Boolean(v) => simple(SWE_BOOLEAN).with_child(value(format_boolean(*v).into())),
            Self::Category(c) => simple(SWE_CATEGORY).with_child(value(c.clone())),
            Self::Count(v) => simple(SWE_COUNT).with_child(value(format_long(*v))),
            Self::Measurement(m) => simple(SWE_QUANTITY)
                .with_child(Element::new(SWE_UOM).with_attr(ATTR_CODE, m.unit.as_str()))
                .with_child(value(format_double(m.value))),
            Self::Text(t) => simple(SWE_TEXT).with_child(value(t.clone())),
            Self::TimeInstant(t) => simple(SWE_TIME)
                .with_child(Element::new(SWE_UOM))
                .with_child(value(t.to_string())),
            Self::TimeRange(r) => simple(SWE_TIME_RANGE)
                .with_child(Element::new(SWE_UOM))
                .with_child(value(r.to_field_text())),
            Self::DataRecord(record) => record.to_wire(),
            Self::Array(array) => array.to_wire(),
            Self::TimeSeriesConstant(_) | Self::TimeSeriesFlexible(_) => return None,
        };
        Some(component)
    }

    /// Decode a record field component, selecting the variant by element
    /// name.
    ///
    /// Returns `Ok(None)` for shapes that have no field form here (unknown
    /// components, time series). The quality is read only from simple
    /// components.
    pub fn from_field_component(
        component: &Element,
    ) -> Result<Option<(Item, Option<DataQuality>)>, ItemError> {
        let item = match component.name() {
            SWE_BOOLEAN => Self::Boolean(parse_boolean(field_value(component)?)?),
            SWE_CATEGORY => Self::Category(field_value(component)?.to_string()),
            SWE_COUNT => Self::Count(parse_long(field_value(component)?)?),
            SWE_QUANTITY => {
                let unit = component
                    .require_child(SWE_UOM)?
                    .attr(ATTR_CODE)
                    .unwrap_or_default();
                Self::Measurement(Measurement::new(unit, parse_double(field_value(component)?)?))
            }
            SWE_TEXT => Self::Text(field_value(component)?.to_string()),
            SWE_TIME => Self::TimeInstant(TimeInstant::from_wire_text(field_value(component)?)?),
            SWE_TIME_RANGE => Self::TimeRange(TimeRange::from_field_text(field_value(component)?)?),
            SWE_DATA_RECORD => return Ok(Some((Self::DataRecord(DataRecord::from_wire(component)?), None))),
            SWE_DATA_ARRAY => return Ok(Some((Self::Array(Array::from_wire(component)?), None))),
            _ => return Ok(None),
        };

        let quality = match component.child(SWE_QUALITY) {
            Some(q) => Some(DataQuality::from_wire(q.require_attr(XLINK_TITLE)?)?),
            None => None,
        };
        Ok(Some((item, quality)))
    }
}

impl From<bool> for Item {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Item {
    fn from(v: i64) -> Self {
        Self::Count(v)
    }
}

impl From<Measurement> for Item {
    fn from(v: Measurement) -> Self {
        Self::Measurement(v)
    }
}

impl From<TimeInstant> for Item {
    fn from(v: TimeInstant) -> Self {
        Self::TimeInstant(v)
    }
}

impl From<TimeRange> for Item {
    fn from(v: TimeRange) -> Self {
        Self::TimeRange(v)
    }
}

impl From<DataRecord> for Item {
    fn from(v: DataRecord) -> Self {
        Self::DataRecord(v)
    }
}

impl From<Array> for Item {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<ConstantTimeSeries> for Item {
    fn from(v: ConstantTimeSeries) -> Self {
        Self::TimeSeriesConstant(v)
    }
}

impl From<FlexibleTimeSeries> for Item {
    fn from(v: FlexibleTimeSeries) -> Self {
        Self::TimeSeriesFlexible(v)
    }
}

fn result(type_hint: &str) -> Element {
    Element::new(OM_RESULT).with_attr(XSI_TYPE, type_hint)
}

fn field_value(component: &Element) -> Result<&str, ItemError> {
    Ok(component.require_child(SWE_VALUE)?.text_or_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_result_types() {
        assert_eq!(Item::Boolean(true).tag(), crate::TAG_TRUTH);
        assert_eq!(Item::Text("x".into()).tag(), crate::TAG_TEXT);
        assert_eq!(
            Item::DataRecord(DataRecord::new()).tag(),
            Item::Array(Array::new(Vec::new()).unwrap()).tag()
        );
    }

    #[test]
    fn quality_support() {
        assert!(Item::Count(1).supports_field_quality());
        assert!(Item::Measurement(Measurement::new("m", 1.0)).supports_field_quality());
        assert!(!Item::DataRecord(DataRecord::new()).supports_field_quality());
        assert!(!Item::Array(Array::new(Vec::new()).unwrap()).supports_field_quality());
    }

    #[test]
    fn measurement_result_carries_unit_attribute() {
        let el = Item::Measurement(Measurement::new("t/h", 22.4))
            .encode_as_result(&ResultOptions::default());
        assert_eq!(el.name(), OM_RESULT);
        assert_eq!(el.attr(ATTR_UOM), Some("t/h"));
        assert_eq!(el.text(), Some("22.4"));
    }

    #[test]
    fn time_instant_result_uses_prefixed_id() {
        let t = TimeInstant::parse("2019-07-05T08:30:00Z").unwrap();
        let opts = ResultOptions::new("Obs_").unwrap();
        let el = Item::TimeInstant(t).encode_as_result(&opts);
        let payload = el.first_child().unwrap();
        assert_eq!(payload.attr("gml:id"), Some("Obs_TimeInst"));
    }

    #[test]
    fn good_quality_is_not_written() {
        let good = Item::Count(3)
            .to_field_component(Some(&DataQuality::good()))
            .unwrap();
        assert!(good.child(SWE_QUALITY).is_none());

        let bad = Item::Count(3)
            .to_field_component(Some(&DataQuality::bad()))
            .unwrap();
        assert_eq!(
            bad.child(SWE_QUALITY).and_then(|q| q.attr(XLINK_TITLE)),
            Some("bad")
        );
    }

    #[test]
    fn field_component_round_trip_with_quality() {
        let cases = [
            Item::Boolean(false),
            Item::Category("http://example.org/cat".into()),
            Item::Count(-9),
            Item::Measurement(Measurement::new("Cel", -3.5)),
            Item::Text(String::new()),
            Item::TimeInstant(TimeInstant::parse("2019-07-05T08:30:00").unwrap()),
        ];
        let quality = DataQuality::bad_with_reason("drift");
        for item in cases {
            let el = item.to_field_component(Some(&quality)).unwrap();
            let (back, q) = Item::from_field_component(&el).unwrap().unwrap();
            assert_eq!(back, item);
            assert_eq!(q, Some(quality.clone()));
        }
    }

    #[test]
    fn unknown_component_is_skipped() {
        let el = Element::new("swe:Vector");
        assert_eq!(Item::from_field_component(&el).unwrap(), None);
    }

    #[test]
    fn count_overflow_in_field_is_out_of_range() {
        let el = Element::new(SWE_COUNT)
            .with_child(Element::new(SWE_VALUE).with_text("18446744073709551616"));
        assert!(matches!(
            Item::from_field_component(&el),
            Err(ItemError::OutOfRange { .. })
        ));
    }
}
