//! Qualified element and attribute names of the observation vocabulary.
//!
//! Prefixes map to namespaces through [`namespaces`](crate::namespaces).

// ── Observations & Measurements ─────────────────────────────────

/// Result container of an observation.
pub const OM_RESULT: &str = "om:result";

// ── Instance and linking attributes ─────────────────────────────

/// Runtime type hint on the result container.
pub const XSI_TYPE: &str = "xsi:type";
/// Title attribute carrying category references and quality codes.
pub const XLINK_TITLE: &str = "xlink:title";

// ── GML ─────────────────────────────────────────────────────────

/// Document-unique identifier attribute.
pub const GML_ID: &str = "gml:id";
/// Free-text description.
pub const GML_DESCRIPTION: &str = "gml:description";
/// Time instant.
pub const GML_TIME_INSTANT: &str = "gml:TimeInstant";
/// Position of a time instant.
pub const GML_TIME_POSITION: &str = "gml:timePosition";
/// Time period.
pub const GML_TIME_PERIOD: &str = "gml:TimePeriod";
/// Start of a time period.
pub const GML_BEGIN_POSITION: &str = "gml:beginPosition";
/// End of a time period.
pub const GML_END_POSITION: &str = "gml:endPosition";
/// Coverage domain.
pub const GML_DOMAIN_SET: &str = "gml:domainSet";
/// Coverage range values.
pub const GML_RANGE_SET: &str = "gml:rangeSet";
/// Whitespace-separated list of doubles.
pub const GML_QUANTITY_LIST: &str = "gml:QuantityList";
/// Whitespace-separated list of category codes.
pub const GML_CATEGORY_LIST: &str = "gml:CategoryList";

// ── GML coverage ────────────────────────────────────────────────

/// Coverage range type.
pub const GMLCOV_RANGE_TYPE: &str = "gmlcov:rangeType";

// ── SWE Common ──────────────────────────────────────────────────

/// Record of named fields.
pub const SWE_DATA_RECORD: &str = "swe:DataRecord";
/// A named field of a record.
pub const SWE_FIELD: &str = "swe:field";
/// Label of a component.
pub const SWE_LABEL: &str = "swe:label";
/// Description of a component.
pub const SWE_DESCRIPTION: &str = "swe:description";
/// Quality marker of a simple component.
pub const SWE_QUALITY: &str = "swe:quality";
/// Value of a simple component.
pub const SWE_VALUE: &str = "swe:value";
/// Unit of measure of a simple component.
pub const SWE_UOM: &str = "swe:uom";
/// Boolean component.
pub const SWE_BOOLEAN: &str = "swe:Boolean";
/// Category component.
pub const SWE_CATEGORY: &str = "swe:Category";
/// Count component.
pub const SWE_COUNT: &str = "swe:Count";
/// Quantity component.
pub const SWE_QUANTITY: &str = "swe:Quantity";
/// Text component.
pub const SWE_TEXT: &str = "swe:Text";
/// Time component.
pub const SWE_TIME: &str = "swe:Time";
/// Time range component.
pub const SWE_TIME_RANGE: &str = "swe:TimeRange";
/// Data array.
pub const SWE_DATA_ARRAY: &str = "swe:DataArray";
/// Element count of a data array.
pub const SWE_ELEMENT_COUNT: &str = "swe:elementCount";
/// Element type of a data array.
pub const SWE_ELEMENT_TYPE: &str = "swe:elementType";
/// Encoded values of a data array.
pub const SWE_VALUES: &str = "swe:values";

// ── TimeseriesML ────────────────────────────────────────────────

/// Time series in domain-range form.
pub const TSML_TIMESERIES: &str = "tsml:TimeseriesDomainRange";
/// Metadata container of a time series.
pub const TSML_METADATA: &str = "tsml:metadata";
/// Metadata extension of a time series.
pub const TSML_METADATA_EXTENSION: &str = "tsml:TimeseriesMetadataExtension";
/// Annotation container.
pub const TSML_ANNOTATION: &str = "tsml:annotation";
/// Coverage annotating each sample.
pub const TSML_ANNOTATION_COVERAGE: &str = "tsml:AnnotationCoverage";
/// Timing metadata container.
pub const TSML_TIMESERIES_METADATA_PROPERTY: &str = "tsml:timeseriesMetadata";
/// Timing metadata.
pub const TSML_TIMESERIES_METADATA: &str = "tsml:TimeseriesMetadata";
/// Time of the first sample of a regular series.
pub const TSML_BASE_TIME: &str = "tsml:baseTime";
/// Interval between samples of a regular series.
pub const TSML_SPACING: &str = "tsml:spacing";
/// Whitespace-separated list of sample timestamps.
pub const TSML_TIME_POSITION_LIST: &str = "tsml:TimePositionList";

// ── Custom array encoding ───────────────────────────────────────

/// Row container of an encoded array.
pub const COCOP_ARRAY: &str = "cocop:Array";
/// A row of an encoded array.
pub const COCOP_ROW: &str = "cocop:Row";
/// A cell of an encoded row.
pub const COCOP_CELL: &str = "cocop:I";

// ── Unprefixed attributes ───────────────────────────────────────

/// Field name attribute.
pub const ATTR_NAME: &str = "name";
/// Unit code attribute.
pub const ATTR_CODE: &str = "code";
/// Unit attribute of measures and quantity lists.
pub const ATTR_UOM: &str = "uom";
/// Code space attribute of category lists.
pub const ATTR_CODE_SPACE: &str = "codeSpace";
