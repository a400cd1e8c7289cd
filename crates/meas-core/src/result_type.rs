//! Result type tags.
//!
//! Every result carries one of these tags next to its payload. Observation
//! types defined by O&M 2.0 use the OGC URIs; the three custom types use the
//! `cocop/observationType/` namespace.

use std::fmt;

macro_rules! om_tag {
    ($name:literal) => {
        concat!(
            "http://www.opengis.net/def/observationType/OGC-OM/2.0/",
            $name
        )
    };
}

macro_rules! custom_tag {
    ($name:literal) => {
        concat!("cocop/observationType/", $name)
    };
}

/// Tag of boolean results.
pub const TAG_TRUTH: &str = om_tag!("OM_TruthObservation");
/// Tag of category results.
pub const TAG_CATEGORY: &str = om_tag!("OM_CategoryObservation");
/// Tag of data record and array results.
pub const TAG_COMPLEX: &str = om_tag!("OM_ComplexObservation");
/// Tag of count results.
pub const TAG_COUNT: &str = om_tag!("OM_CountObservation");
/// Tag of measurement results.
pub const TAG_MEASUREMENT: &str = om_tag!("OM_Measurement");
/// Tag of time instant and time range results.
pub const TAG_TEMPORAL: &str = om_tag!("OM_TemporalObservation");
/// Tag of text results.
pub const TAG_TEXT: &str = custom_tag!("Text");
/// Tag of time series with explicit timestamps.
pub const TAG_TIMESERIES_FLEXIBLE: &str = custom_tag!("TimeSeriesFlexible");
/// Tag of time series with constant spacing.
pub const TAG_TIMESERIES_CONSTANT: &str = custom_tag!("TimeSeriesRegular");

/// The closed set of result type tags.
///
/// Complex and temporal tags each cover two item variants, told apart by the
/// payload shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultType {
    /// Boolean.
    Truth,
    /// Category reference.
    Category,
    /// Data record or array.
    Complex,
    /// Exact integer.
    Count,
    /// Value with unit of measure.
    Measurement,
    /// Time instant or time range.
    Temporal,
    /// Free text.
    Text,
    /// Time series with explicit timestamps.
    TimeSeriesFlexible,
    /// Time series with constant spacing.
    TimeSeriesConstant,
}

impl ResultType {
    /// Every result type, in tag-table order.
    pub const ALL: [ResultType; 9] = [
        Self::Truth,
        Self::Category,
        Self::Complex,
        Self::Count,
        Self::Measurement,
        Self::Temporal,
        Self::Text,
        Self::TimeSeriesFlexible,
        Self::TimeSeriesConstant,
    ];

    /// Tag string of this type.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Truth => TAG_TRUTH,
            Self::Category => TAG_CATEGORY,
            Self::Complex => TAG_COMPLEX,
            Self::Count => TAG_COUNT,
            Self::Measurement => TAG_MEASUREMENT,
            Self::Temporal => TAG_TEMPORAL,
            Self::Text => TAG_TEXT,
            Self::TimeSeriesFlexible => TAG_TIMESERIES_FLEXIBLE,
            Self::TimeSeriesConstant => TAG_TIMESERIES_CONSTANT,
        }
    }

    /// Look up the type of a tag string. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_distinct_and_resolve() {
        for t in ResultType::ALL {
            assert_eq!(ResultType::from_tag(t.tag()), Some(t));
        }
        let mut tags: Vec<_> = ResultType::ALL.iter().map(|t| t.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ResultType::ALL.len());
    }

    #[test]
    fn tag_strings() {
        assert_eq!(
            TAG_MEASUREMENT,
            "http://www.opengis.net/def/observationType/OGC-OM/2.0/OM_Measurement"
        );
        assert_eq!(TAG_TIMESERIES_CONSTANT, "cocop/observationType/TimeSeriesRegular");
        assert_eq!(ResultType::from_tag("OM_Measurement"), None);
    }
}
