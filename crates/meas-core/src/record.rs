//! Data records: named fields of nested items.

use indexmap::IndexMap;
use meas_wire::names::{ATTR_NAME, SWE_DATA_RECORD, SWE_DESCRIPTION, SWE_FIELD};
use meas_wire::Element;

use crate::error::ItemError;
use crate::item::Item;
use crate::quality::DataQuality;

/// Field name written for a record without fields, which the wire grammar
/// cannot express. Dropped again on decode.
pub const EMPTY_RECORD_PLACEHOLDER: &str = "__cocop-empty-value";

/// A set of named fields, kept in insertion order.
///
/// Fields holding simple values may carry a [`DataQuality`]; records and
/// arrays may be nested as fields but cannot carry quality. Time series
/// cannot be fields.
///
/// ```
/// use meas_core::{DataQuality, DataRecord, Item, Measurement};
///
/// let mut record = DataRecord::new();
/// record.add_field("batch", Item::Text("B-17".into())).unwrap();
/// record
///     .add_field_with_quality(
///         "mass",
///         Item::Measurement(Measurement::new("t", 12.4)),
///         DataQuality::bad_with_reason("scale drift"),
///     )
///     .unwrap();
///
/// assert_eq!(record.quality("batch"), Some(DataQuality::good()));
/// assert!(!record.quality("mass").unwrap().is_good());
/// assert!(record.add_field("batch", Item::Count(1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DataRecord {
    fields: IndexMap<String, Item>,
    qualities: IndexMap<String, DataQuality>,
    description: Option<String>,
}

impl DataRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field without quality information.
    ///
    /// Fails with [`ItemError::InvalidArgument`] if the name is taken or
    /// reserved, or if `item` is a time series.
    pub fn add_field(&mut self, name: impl Into<String>, item: Item) -> Result<(), ItemError> {
        let name = name.into();
        if name == EMPTY_RECORD_PLACEHOLDER {
            return Err(ItemError::invalid_argument(format!(
                "field name \"{name}\" is reserved"
            )));
        }
        if self.fields.contains_key(&name) {
            return Err(ItemError::invalid_argument(format!(
                "record already has a field named \"{name}\""
            )));
        }
        if !item.is_valid_field() {
            return Err(ItemError::invalid_argument(format!(
                "field \"{name}\": time series cannot be record fields"
            )));
        }
        self.fields.insert(name, item);
        Ok(())
    }

    /// Add a field with quality information.
    ///
    /// Fails with [`ItemError::InvalidArgument`] if `item` cannot carry
    /// quality (records and arrays), in addition to the checks of
    /// [`add_field`](Self::add_field). Nothing is stored on failure.
    pub fn add_field_with_quality(
        &mut self,
        name: impl Into<String>,
        item: Item,
        quality: DataQuality,
    ) -> Result<(), ItemError> {
        let name = name.into();
        if item.is_valid_field() && !item.supports_field_quality() {
            return Err(ItemError::invalid_argument(format!(
                "field \"{name}\": this item type does not support data quality in data records"
            )));
        }
        self.add_field(name.clone(), item)?;
        self.qualities.insert(name, quality);
        Ok(())
    }

    /// Item stored under `name`.
    pub fn field(&self, name: &str) -> Option<&Item> {
        self.fields.get(name)
    }

    /// Quality of the field `name`: the stored quality, or good when none was
    /// given.
    ///
    /// `None` if there is no such field or the field cannot carry quality.
    pub fn quality(&self, name: &str) -> Option<DataQuality> {
        let item = self.fields.get(name)?;
        if !item.supports_field_quality() {
            return None;
        }
        Some(self.qualities.get(name).cloned().unwrap_or_default())
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replace the description. An empty string clears it.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
    }

    // ── Wire form ───────────────────────────────────────────────

    /// Encode as `swe:DataRecord`.
    pub fn to_wire(&self) -> Element {
        let mut el = Element::new(SWE_DATA_RECORD);
        if let Some(description) = &self.description {
            el.push_child(Element::new(SWE_DESCRIPTION).with_text(description.as_str()));
        }

        if self.fields.is_empty() {
            let placeholder = Item::Text(String::new());
            if let Some(component) = placeholder.to_field_component(None) {
                el.push_child(field_element(EMPTY_RECORD_PLACEHOLDER, component));
            }
            return el;
        }

        for (name, item) in &self.fields {
            match item.to_field_component(self.qualities.get(name)) {
                Some(component) => {
                    el.push_child(field_element(name, component));
                }
                None => tracing::debug!(field = %name, "field has no component form"),
            }
        }
        el
    }

    /// Decode from `swe:DataRecord`.
    ///
    /// Fields of an unknown component shape are skipped. Any other failure
    /// inside a field is reported as [`ItemError::InvalidMessage`] naming the
    /// field.
    pub fn from_wire(el: &Element) -> Result<Self, ItemError> {
        let mut record = Self::new();
        if let Some(description) = el.child_text(SWE_DESCRIPTION) {
            record.set_description(description);
        }

        for field in el.children_named(SWE_FIELD) {
            let name = field.require_attr(ATTR_NAME)?;
            if name == EMPTY_RECORD_PLACEHOLDER {
                continue;
            }
            let context = format!("Failed to process field \"{name}\"");
            let component = field
                .first_child()
                .ok_or_else(|| ItemError::invalid_message(format!("{context}: no component")))?;

            let decoded = Item::from_field_component(component).map_err(|e| e.in_context(&context))?;
            let Some((item, quality)) = decoded else {
                tracing::debug!(field = name, component = component.name(), "skipping field of unsupported shape");
                continue;
            };
            let added = match quality {
                Some(quality) => record.add_field_with_quality(name, item, quality),
                None => record.add_field(name, item),
            };
            added.map_err(|e| e.in_context(&context))?;
        }
        Ok(record)
    }
}

impl PartialEq for DataRecord {
    /// Records are equal when their fields, field order, effective qualities
    /// and descriptions match. A field stored with good quality equals one
    /// stored without quality.
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|((a_name, a), (b_name, b))| {
                    a_name == b_name && a == b && self.quality(a_name) == other.quality(b_name)
                })
    }
}

fn field_element(name: &str, component: Element) -> Element {
    Element::new(SWE_FIELD)
        .with_attr(ATTR_NAME, name)
        .with_child(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Array, ArrayColumn, ColumnKind};
    use crate::item::Measurement;
    use crate::series::ConstantTimeSeries;
    use crate::time::TimeInstant;
    use chrono::TimeDelta;
    use meas_wire::names::{SWE_QUALITY, SWE_TEXT};

    #[test]
    fn empty_record_writes_one_placeholder() {
        let el = DataRecord::new().to_wire();
        let fields: Vec<_> = el.children_named(SWE_FIELD).collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].attr(ATTR_NAME), Some(EMPTY_RECORD_PLACEHOLDER));
        assert_eq!(fields[0].first_child().map(Element::name), Some(SWE_TEXT));

        let back = DataRecord::from_wire(&el).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.field_names().count(), 0);
    }

    #[test]
    fn placeholder_name_is_reserved() {
        let mut record = DataRecord::new();
        assert!(matches!(
            record.add_field(EMPTY_RECORD_PLACEHOLDER, Item::Count(1)),
            Err(ItemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn quality_defaults_to_good() {
        let mut record = DataRecord::new();
        record.add_field("f", Item::Boolean(true)).unwrap();
        assert_eq!(record.quality("f"), Some(DataQuality::good()));
        assert_eq!(record.quality("missing"), None);
    }

    #[test]
    fn composite_fields_reject_quality() {
        let mut record = DataRecord::new();
        let err = record
            .add_field_with_quality("r", Item::DataRecord(DataRecord::new()), DataQuality::bad())
            .unwrap_err();
        assert!(matches!(err, ItemError::InvalidArgument { .. }));
        let err = record
            .add_field_with_quality(
                "a",
                Item::Array(Array::new(Vec::new()).unwrap()),
                DataQuality::good(),
            )
            .unwrap_err();
        assert!(matches!(err, ItemError::InvalidArgument { .. }));
        assert!(record.is_empty());
    }

    #[test]
    fn time_series_are_not_fields() {
        let base = TimeInstant::parse("2019-07-05T08:30:00Z").unwrap();
        let series = ConstantTimeSeries::new("Cel", base, TimeDelta::seconds(1));
        let mut record = DataRecord::new();
        assert!(matches!(
            record.add_field("s", Item::TimeSeriesConstant(series)),
            Err(ItemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn nested_round_trip_keeps_order_and_quality() {
        let mut inner = DataRecord::new();
        inner.add_field("x", Item::Count(1)).unwrap();
        let mut array = Array::new(vec![ArrayColumn::new("c", ColumnKind::Text)]).unwrap();
        array.add_row([Some("v".into())]).unwrap();

        let mut record = DataRecord::new();
        record.set_description("process values");
        record
            .add_field_with_quality(
                "z",
                Item::Measurement(Measurement::new("m", 2.0)),
                DataQuality::bad(),
            )
            .unwrap();
        record.add_field("a", Item::DataRecord(inner)).unwrap();
        record.add_field("m", Item::Array(array)).unwrap();
        record
            .add_field_with_quality("g", Item::Count(5), DataQuality::good())
            .unwrap();

        let el = record.to_wire();
        // Good quality is the unmarked default.
        let g = el
            .children_named(SWE_FIELD)
            .find(|f| f.attr(ATTR_NAME) == Some("g"))
            .unwrap();
        assert!(g.first_child().unwrap().child(SWE_QUALITY).is_none());

        let back = DataRecord::from_wire(&el).unwrap();
        assert_eq!(back, record);
        let names: Vec<_> = back.field_names().collect();
        assert_eq!(names, vec!["z", "a", "m", "g"]);
        assert_eq!(back.quality("z"), Some(DataQuality::bad()));
        assert_eq!(back.quality("a"), None);
        assert_eq!(back.description(), Some("process values"));
    }

    #[test]
    fn unknown_field_shapes_are_skipped() {
        let el = Element::new(SWE_DATA_RECORD)
            .with_child(field_element("v", Element::new("swe:Vector")))
            .with_child(field_element("ts", Element::new("tsml:TimeseriesDomainRange")))
            .with_child(field_element(
                "n",
                Item::Count(4).to_field_component(None).unwrap(),
            ));
        let record = DataRecord::from_wire(&el).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.field("n"), Some(&Item::Count(4)));
    }

    #[test]
    fn field_errors_name_the_field() {
        let bad_count = Element::new("swe:Count")
            .with_child(Element::new("swe:value").with_text("99999999999999999999"));
        let el = Element::new(SWE_DATA_RECORD).with_child(field_element("counter", bad_count));
        match DataRecord::from_wire(&el) {
            Err(ItemError::InvalidMessage { detail }) => {
                assert!(detail.contains("Failed to process field \"counter\""), "{detail}");
            }
            other => panic!("expected InvalidMessage, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_wire_fields_are_invalid_messages() {
        let component = Item::Count(4).to_field_component(None).unwrap();
        let el = Element::new(SWE_DATA_RECORD)
            .with_child(field_element("n", component.clone()))
            .with_child(field_element("n", component));
        assert!(DataRecord::from_wire(&el).unwrap_err().is_invalid_message());
    }
}
