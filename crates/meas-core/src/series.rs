//! Time series.
//!
//! Both shapes share a [`TimeSeries`] base holding the unit, description,
//! values and per-value qualities. They differ in how samples are
//! timestamped:
//!
//! - [`ConstantTimeSeries`]: base time plus fixed spacing,
//! - [`FlexibleTimeSeries`]: one explicit timestamp per sample.
//!
//! Encoding is two-phase. The base writes the shared
//! `tsml:TimeseriesDomainRange` scaffold, then the shape extends that same
//! element in place. Shapes only add nodes; they never replace nodes the
//! base created.

use meas_wire::names::{
    ATTR_CODE_SPACE, ATTR_UOM, GML_CATEGORY_LIST, GML_DESCRIPTION, GML_DOMAIN_SET, GML_ID,
    GML_QUANTITY_LIST, GML_RANGE_SET, GMLCOV_RANGE_TYPE, TSML_ANNOTATION,
    TSML_ANNOTATION_COVERAGE, TSML_BASE_TIME, TSML_METADATA, TSML_METADATA_EXTENSION,
    TSML_SPACING, TSML_TIMESERIES, TSML_TIMESERIES_METADATA, TSML_TIMESERIES_METADATA_PROPERTY,
    TSML_TIME_POSITION_LIST,
};
use meas_wire::token::{
    escape_list_item, format_double, format_duration, join_list, parse_double, parse_duration,
    split_list, unescape_list_item,
};
use meas_wire::{CalendarDuration, Element};

use crate::error::ItemError;
use crate::quality::DataQuality;
use crate::time::TimeInstant;

/// Code space of the quality codes list.
const QUALITY_CODE_SPACE: &str = "http://cocop";

/// Path from the series element to the quality annotation coverage.
const QUALITY_COVERAGE_PATH: [&str; 4] = [
    TSML_METADATA,
    TSML_METADATA_EXTENSION,
    TSML_ANNOTATION,
    TSML_ANNOTATION_COVERAGE,
];

// ── Base ────────────────────────────────────────────────────────

/// Values and qualities shared by both series shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    unit: String,
    description: Option<String>,
    values: Vec<f64>,
    qualities: Vec<DataQuality>,
}

impl TimeSeries {
    fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            ..Self::default()
        }
    }

    /// Unit of measure of the values.
    pub fn unit(&self) -> &str {
        &self.unit
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

    /// Sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Quality of each sample, parallel to [`values`](Self::values).
    pub fn qualities(&self) -> &[DataQuality] {
        &self.qualities
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn add_value(&mut self, value: f64, quality: DataQuality) {
        self.values.push(value);
        self.qualities.push(quality);
    }

    /// Build the shared scaffold.
    fn scaffold(&self, id: &str) -> Element {
        let mut el = Element::new(TSML_TIMESERIES).with_attr(GML_ID, id);
        if let Some(description) = &self.description {
            el.push_child(Element::new(GML_DESCRIPTION).with_text(description.as_str()));
        }
        el.push_child(Element::new(GML_DOMAIN_SET));
        el.push_child(Element::new(GML_RANGE_SET).with_child(
            Element::new(GML_QUANTITY_LIST)
                .with_attr(ATTR_UOM, self.unit.as_str())
                .with_text(join_list(self.values.iter().map(|v| format_double(*v)))),
        ));
        el.push_child(Element::new(GMLCOV_RANGE_TYPE));

        let coverage = el
            .child_or_insert(TSML_METADATA)
            .child_or_insert(TSML_METADATA_EXTENSION)
            .child_or_insert(TSML_ANNOTATION)
            .child_or_insert(TSML_ANNOTATION_COVERAGE);
        coverage.set_attr(GML_ID, format!("{id}_qualCov"));
        coverage.push_child(Element::new(GML_DOMAIN_SET));
        coverage.push_child(Element::new(GML_RANGE_SET).with_child(
            Element::new(GML_CATEGORY_LIST)
                .with_attr(ATTR_CODE_SPACE, QUALITY_CODE_SPACE)
                .with_text(join_list(
                    self.qualities
                        .iter()
                        .map(|q| escape_list_item(q.encoded_value())),
                )),
        ));
        coverage.push_child(Element::new(GMLCOV_RANGE_TYPE));
        el
    }

    fn from_wire(el: &Element) -> Result<Self, ItemError> {
        let value_list = el
            .descend(&[GML_RANGE_SET, GML_QUANTITY_LIST])
            .ok_or_else(|| ItemError::invalid_message("time series has no values list"))?;
        let values = split_list(value_list.text_or_empty())
            .map(|token| {
                parse_double(token).map_err(|_| {
                    ItemError::invalid_message(format!(
                        "failed to parse time series value \"{token}\""
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quality_list = el
            .descend(&QUALITY_COVERAGE_PATH)
            .and_then(|c| c.descend(&[GML_RANGE_SET, GML_CATEGORY_LIST]))
            .ok_or_else(|| ItemError::invalid_message("time series has no quality list"))?;
        let qualities = split_list(quality_list.text_or_empty())
            .map(|token| {
                unescape_list_item(token)
                    .map_err(ItemError::from)
                    .and_then(|code| DataQuality::from_wire(&code))
                    .map_err(|e| e.in_context("failed to read time series quality"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != qualities.len() {
            return Err(ItemError::invalid_message(format!(
                "time series has {} values but {} qualities",
                values.len(),
                qualities.len()
            )));
        }

        let mut series = Self::new(value_list.attr(ATTR_UOM).unwrap_or_default());
        if let Some(description) = el.child_text(GML_DESCRIPTION) {
            series.set_description(description);
        }
        series.values = values;
        series.qualities = qualities;
        Ok(series)
    }
}

/// Shape-specific part of a series encoding.
trait SeriesDomain {
    fn base(&self) -> &TimeSeries;

    /// Add the shape's timing information to the scaffold built by the base.
    fn extend_scaffold(&self, scaffold: &mut Element, id: &str);

    fn encode(&self, id: &str) -> Element {
        let mut el = self.base().scaffold(id);
        self.extend_scaffold(&mut el, id);
        el
    }
}

// ── Constant spacing ────────────────────────────────────────────

/// A series whose sample `i` is taken at `base_time + i * spacing`.
///
/// The spacing may have a calendar part, so monthly and yearly series are
/// expressible; see [`CalendarDuration`].
///
/// ```
/// use chrono::TimeDelta;
/// use meas_core::{ConstantTimeSeries, DataQuality, TimeInstant};
///
/// let base = TimeInstant::parse("2019-07-05T08:00:00Z").unwrap();
/// let mut series = ConstantTimeSeries::new("Cel", base, TimeDelta::minutes(10));
/// series.add_value(21.5, DataQuality::good());
/// series.add_value(21.7, DataQuality::bad());
///
/// assert_eq!(series.series().len(), 2);
/// assert_eq!(series.timestamp(1).unwrap().to_string(), "2019-07-05T08:10:00.000Z");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantTimeSeries {
    series: TimeSeries,
    base_time: TimeInstant,
    spacing: CalendarDuration,
}

impl ConstantTimeSeries {
    /// Create an empty series. `spacing` is a [`CalendarDuration`] or an
    /// exact `TimeDelta`.
    pub fn new(
        unit: impl Into<String>,
        base_time: TimeInstant,
        spacing: impl Into<CalendarDuration>,
    ) -> Self {
        Self {
            series: TimeSeries::new(unit),
            base_time,
            spacing: spacing.into(),
        }
    }

    /// Values, qualities, unit and description.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Mutable access to the shared part, for the description.
    pub fn series_mut(&mut self) -> &mut TimeSeries {
        &mut self.series
    }

    /// Time of the first sample.
    pub fn base_time(&self) -> TimeInstant {
        self.base_time
    }

    /// Interval between samples.
    pub fn spacing(&self) -> CalendarDuration {
        self.spacing
    }

    /// Append a sample.
    pub fn add_value(&mut self, value: f64, quality: DataQuality) {
        self.series.add_value(value, quality);
    }

    /// Append a sample of good quality.
    pub fn add_good_value(&mut self, value: f64) {
        self.add_value(value, DataQuality::good());
    }

    /// Timestamp of sample `index`. `None` if the index is out of bounds or
    /// the time overflows.
    pub fn timestamp(&self, index: usize) -> Option<TimeInstant> {
        if index >= self.series.len() {
            return None;
        }
        let steps = i32::try_from(index).ok()?;
        self.base_time
            .checked_add_duration(self.spacing.checked_mul(steps)?)
    }

    /// Encode as `tsml:TimeseriesDomainRange` with the given `gml:id`.
    pub fn to_wire(&self, id: &str) -> Element {
        self.encode(id)
    }

    /// Decode from `tsml:TimeseriesDomainRange`.
    pub fn from_wire(el: &Element) -> Result<Self, ItemError> {
        let series = TimeSeries::from_wire(el)?;
        let metadata = el
            .descend(&[
                TSML_METADATA,
                TSML_METADATA_EXTENSION,
                TSML_TIMESERIES_METADATA_PROPERTY,
                TSML_TIMESERIES_METADATA,
            ])
            .ok_or_else(|| ItemError::invalid_message("constant time series has no timing metadata"))?;

        let base_time = metadata
            .child_text(TSML_BASE_TIME)
            .ok_or_else(|| ItemError::invalid_message("constant time series has no base time"))?;
        let spacing = metadata
            .child_text(TSML_SPACING)
            .ok_or_else(|| ItemError::invalid_message("constant time series has no spacing"))?;

        Ok(Self {
            series,
            base_time: TimeInstant::from_wire_text(base_time)?,
            spacing: parse_duration(spacing).map_err(|_| {
                ItemError::invalid_message(format!("failed to parse spacing \"{spacing}\""))
            })?,
        })
    }
}

impl SeriesDomain for ConstantTimeSeries {
    fn base(&self) -> &TimeSeries {
        &self.series
    }

    fn extend_scaffold(&self, scaffold: &mut Element, _id: &str) {
        let metadata = scaffold
            .child_or_insert(TSML_METADATA)
            .child_or_insert(TSML_METADATA_EXTENSION)
            .child_or_insert(TSML_TIMESERIES_METADATA_PROPERTY)
            .child_or_insert(TSML_TIMESERIES_METADATA);
        metadata.push_child(Element::new(TSML_BASE_TIME).with_text(self.base_time.to_string()));
        metadata.push_child(Element::new(TSML_SPACING).with_text(format_duration(self.spacing)));
    }
}

// ── Explicit timestamps ─────────────────────────────────────────

/// A series with an explicit timestamp for every sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlexibleTimeSeries {
    series: TimeSeries,
    timestamps: Vec<TimeInstant>,
}

impl FlexibleTimeSeries {
    /// Create an empty series.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            series: TimeSeries::new(unit),
            timestamps: Vec::new(),
        }
    }

    /// Values, qualities, unit and description.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Mutable access to the shared part, for the description.
    pub fn series_mut(&mut self) -> &mut TimeSeries {
        &mut self.series
    }

    /// Timestamps, parallel to the values.
    pub fn timestamps(&self) -> &[TimeInstant] {
        &self.timestamps
    }

    /// Append a sample.
    pub fn add_value(&mut self, timestamp: TimeInstant, value: f64, quality: DataQuality) {
        self.timestamps.push(timestamp);
        self.series.add_value(value, quality);
    }

    /// Append a sample of good quality.
    pub fn add_good_value(&mut self, timestamp: TimeInstant, value: f64) {
        self.add_value(timestamp, value, DataQuality::good());
    }

    /// Encode as `tsml:TimeseriesDomainRange` with the given `gml:id`.
    pub fn to_wire(&self, id: &str) -> Element {
        self.encode(id)
    }

    /// Decode from `tsml:TimeseriesDomainRange`.
    pub fn from_wire(el: &Element) -> Result<Self, ItemError> {
        let series = TimeSeries::from_wire(el)?;
        let list = el
            .descend(&[GML_DOMAIN_SET, TSML_TIME_POSITION_LIST])
            .ok_or_else(|| ItemError::invalid_message("flexible time series has no timestamps"))?;
        let timestamps = split_list(list.text_or_empty())
            .map(TimeInstant::from_wire_text)
            .collect::<Result<Vec<_>, _>>()?;

        if timestamps.len() != series.len() {
            return Err(ItemError::invalid_message(format!(
                "flexible time series has {} timestamps but {} values",
                timestamps.len(),
                series.len()
            )));
        }
        Ok(Self { series, timestamps })
    }
}

impl SeriesDomain for FlexibleTimeSeries {
    fn base(&self) -> &TimeSeries {
        &self.series
    }

    fn extend_scaffold(&self, scaffold: &mut Element, id: &str) {
        let positions = join_list(self.timestamps.iter().map(TimeInstant::to_string));
        scaffold.child_or_insert(GML_DOMAIN_SET).push_child(
            Element::new(TSML_TIME_POSITION_LIST)
                .with_attr(GML_ID, format!("{id}_timestamps"))
                .with_text(positions),
        );
    }
}
