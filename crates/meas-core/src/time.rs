//! Time instants and ranges.

use std::fmt;

use chrono::{DateTime, FixedOffset, Months, NaiveDateTime, TimeDelta, Timelike, Utc};
use meas_wire::names::{
    GML_BEGIN_POSITION, GML_END_POSITION, GML_ID, GML_TIME_INSTANT, GML_TIME_PERIOD,
    GML_TIME_POSITION,
};
use meas_wire::token::{join_list, split_list};
use meas_wire::{CalendarDuration, Element};

use crate::error::ItemError;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// ── TimeInstant ─────────────────────────────────────────────────

/// A point in time, remembering whether its source carried a UTC offset.
///
/// Instants with an explicit offset are normalised to UTC. Instants parsed
/// without one keep their wall-clock value and are printed without a zone.
///
/// ```
/// use meas_core::TimeInstant;
///
/// let t = TimeInstant::parse("2019-07-05T11:30:00+03:00").unwrap();
/// assert!(t.has_explicit_utc_offset());
/// assert_eq!(t.to_string(), "2019-07-05T08:30:00.000Z");
///
/// let local = TimeInstant::parse("2019-07-05T08:30:00").unwrap();
/// assert!(!local.has_explicit_utc_offset());
/// assert_eq!(local.to_string(), "2019-07-05T08:30:00.000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeInstant {
    value: NaiveDateTime,
    explicit_utc_offset: bool,
}

impl TimeInstant {
    /// Parse `date 'T' time [zone]`.
    ///
    /// The zone counts as explicit if the time part ends in `Z` or contains a
    /// sign. Parsing follows the XML Schema `dateTime` lexical form strictly:
    /// seconds are required (`T08:30Z` is rejected) and offsets need a colon
    /// (`+03:00`, not `+0300`). Fails with [`ItemError::InvalidFormat`] on
    /// malformed input.
    pub fn parse(text: &str) -> Result<Self, ItemError> {
        let invalid = || ItemError::InvalidFormat {
            kind: "time instant",
            input: text.to_string(),
        };
        let trimmed = text.trim();
        let mut parts = trimmed.split('T');
        let (Some(_), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        if time.ends_with('Z') || time.contains('+') || time.contains('-') {
            let parsed = DateTime::parse_from_rfc3339(trimmed).map_err(|_| invalid())?;
            Ok(Self {
                value: parsed.with_timezone(&Utc).naive_utc(),
                explicit_utc_offset: true,
            })
        } else {
            let parsed =
                NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT).map_err(|_| invalid())?;
            Ok(Self {
                value: parsed,
                explicit_utc_offset: false,
            })
        }
    }

    /// Wall-clock value. In UTC when the offset is explicit.
    pub fn naive(&self) -> NaiveDateTime {
        self.value
    }

    /// Whether the instant is anchored to UTC.
    pub fn has_explicit_utc_offset(&self) -> bool {
        self.explicit_utc_offset
    }

    /// The instant in UTC, or `None` if its zone is unknown.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.explicit_utc_offset.then(|| self.value.and_utc())
    }

    /// Shift by `delta`, keeping the zone flag. `None` on overflow.
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        Some(Self {
            value: self.value.checked_add_signed(delta)?,
            explicit_utc_offset: self.explicit_utc_offset,
        })
    }

    /// Shift by a calendar duration: months first, then the exact part.
    /// Month ends are clamped, so January 31 plus one month is the last day
    /// of February. `None` on overflow.
    pub fn checked_add_duration(self, duration: CalendarDuration) -> Option<Self> {
        let months = Months::new(duration.months().unsigned_abs());
        let shifted = if duration.months() < 0 {
            self.value.checked_sub_months(months)?
        } else {
            self.value.checked_add_months(months)?
        };
        Some(Self {
            value: shifted.checked_add_signed(duration.delta())?,
            explicit_utc_offset: self.explicit_utc_offset,
        })
    }

    /// Parse text taken from a decoded payload.
    pub(crate) fn from_wire_text(text: &str) -> Result<Self, ItemError> {
        Self::parse(text)
            .map_err(|_| ItemError::invalid_message(format!("failed to parse time instant \"{text}\"")))
    }

    /// Result payload: `gml:TimeInstant[gml:id]/gml:timePosition`.
    pub(crate) fn to_result_payload(self, id: String) -> Element {
        Element::new(GML_TIME_INSTANT)
            .with_attr(GML_ID, id)
            .with_child(Element::new(GML_TIME_POSITION).with_text(self.to_string()))
    }

    pub(crate) fn from_result_payload(el: &Element) -> Result<Self, ItemError> {
        let position = el.require_child(GML_TIME_POSITION)?;
        Self::from_wire_text(position.text_or_empty())
    }
}

impl From<DateTime<Utc>> for TimeInstant {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            value: value.naive_utc(),
            explicit_utc_offset: true,
        }
    }
}

impl TryFrom<DateTime<FixedOffset>> for TimeInstant {
    type Error = ItemError;

    /// Accepts only a zero offset.
    fn try_from(value: DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        if value.offset().local_minus_utc() != 0 {
            return Err(ItemError::invalid_argument(format!(
                "time instant must be in UTC, got offset {}",
                value.offset()
            )));
        }
        Ok(value.with_timezone(&Utc).into())
    }
}

impl fmt::Display for TimeInstant {
    /// Milliseconds are always printed, finer digits only when present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = if self.value.nanosecond() % 1_000_000 == 0 {
            "%Y-%m-%dT%H:%M:%S%.3f"
        } else {
            NAIVE_FORMAT
        };
        write!(f, "{}", self.value.format(pattern))?;
        if self.explicit_utc_offset {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

// ── TimeRange ───────────────────────────────────────────────────

/// A closed interval between two instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: TimeInstant,
    end: TimeInstant,
}

impl TimeRange {
    /// Create a range. Fails with [`ItemError::InvalidArgument`] if `end`
    /// precedes `start`.
    pub fn new(start: TimeInstant, end: TimeInstant) -> Result<Self, ItemError> {
        if end.value < start.value {
            return Err(ItemError::invalid_argument(format!(
                "time range end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Start of the range.
    pub fn start(&self) -> TimeInstant {
        self.start
    }

    /// End of the range.
    pub fn end(&self) -> TimeInstant {
        self.end
    }

    /// Result payload: `gml:TimePeriod[gml:id]` with begin and end positions.
    pub(crate) fn to_result_payload(self, id: String) -> Element {
        Element::new(GML_TIME_PERIOD)
            .with_attr(GML_ID, id)
            .with_child(Element::new(GML_BEGIN_POSITION).with_text(self.start.to_string()))
            .with_child(Element::new(GML_END_POSITION).with_text(self.end.to_string()))
    }

    // Decoded ranges are taken as given; only `new` checks the ordering.
    pub(crate) fn from_result_payload(el: &Element) -> Result<Self, ItemError> {
        let start = TimeInstant::from_wire_text(el.require_child(GML_BEGIN_POSITION)?.text_or_empty())?;
        let end = TimeInstant::from_wire_text(el.require_child(GML_END_POSITION)?.text_or_empty())?;
        Ok(Self { start, end })
    }

    /// Field value: both instants, space separated.
    pub(crate) fn to_field_text(self) -> String {
        join_list([self.start.to_string(), self.end.to_string()])
    }

    pub(crate) fn from_field_text(text: &str) -> Result<Self, ItemError> {
        let tokens: Vec<&str> = split_list(text).collect();
        let [start, end] = tokens.as_slice() else {
            return Err(ItemError::invalid_message(format!(
                "time range needs two instants, got \"{text}\""
            )));
        };
        Ok(Self {
            start: TimeInstant::from_wire_text(start)?,
            end: TimeInstant::from_wire_text(end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn naive(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 7, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parse_without_zone_keeps_wall_clock() {
        let t = TimeInstant::parse("2019-07-05T08:30:00").unwrap();
        assert!(!t.has_explicit_utc_offset());
        assert_eq!(t.naive(), naive(8, 30, 0));
        assert_eq!(t.to_utc(), None);
    }

    #[test]
    fn parse_with_zone_normalises_to_utc() {
        let z = TimeInstant::parse("2019-07-05T08:30:00Z").unwrap();
        assert!(z.has_explicit_utc_offset());
        assert_eq!(z.to_utc(), Some(Utc.from_utc_datetime(&naive(8, 30, 0))));

        let plus = TimeInstant::parse("2019-07-05T11:30:00+03:00").unwrap();
        assert_eq!(plus, z);

        let minus = TimeInstant::parse("2019-07-05T03:30:00-05:00").unwrap();
        assert_eq!(minus, z);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for text in ["", "  ", " T ", "2019-07-05S11:30:00+03:00", "2019-07-05T25:00:00", "2019-07-05T08:30:00TZ"] {
            match TimeInstant::parse(text) {
                Err(ItemError::InvalidFormat { kind, .. }) => assert_eq!(kind, "time instant"),
                other => panic!("expected InvalidFormat for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn format_always_prints_milliseconds() {
        let t: TimeInstant = Utc.from_utc_datetime(&naive(8, 39, 2)).into();
        assert_eq!(t.to_string(), "2019-07-05T08:39:02.000Z");
        let fine = TimeInstant::parse("2019-07-05T08:39:02.123456Z").unwrap();
        assert_eq!(fine.to_string(), "2019-07-05T08:39:02.123456Z");
        assert_eq!(TimeInstant::parse(&fine.to_string()).unwrap(), fine);
    }

    #[test]
    fn strict_lexical_forms_are_required() {
        for text in ["2019-07-05T08:30Z", "2019-07-05T11:30:00+0300"] {
            assert!(TimeInstant::parse(text).is_err(), "{text}");
        }
    }

    #[test]
    fn calendar_shift_clamps_month_ends() {
        let jan31 = TimeInstant::parse("2019-01-31T12:00:00Z").unwrap();
        let feb = jan31
            .checked_add_duration(CalendarDuration::months_only(1))
            .unwrap();
        assert_eq!(feb, TimeInstant::parse("2019-02-28T12:00:00Z").unwrap());

        let back = jan31
            .checked_add_duration(CalendarDuration::new(-13, -TimeDelta::hours(12)).unwrap())
            .unwrap();
        assert_eq!(back, TimeInstant::parse("2017-12-31T00:00:00Z").unwrap());
        assert!(back.has_explicit_utc_offset());
    }

    #[test]
    fn programmatic_construction_requires_utc() {
        let helsinki = FixedOffset::east_opt(3 * 3600).unwrap();
        let local = helsinki.from_local_datetime(&naive(11, 30, 0)).unwrap();
        assert!(matches!(
            TimeInstant::try_from(local),
            Err(ItemError::InvalidArgument { .. })
        ));

        let utc = FixedOffset::east_opt(0).unwrap();
        let t = TimeInstant::try_from(utc.from_local_datetime(&naive(8, 30, 0)).unwrap()).unwrap();
        assert!(t.has_explicit_utc_offset());
        assert_eq!(t.naive(), naive(8, 30, 0));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let a = TimeInstant::parse("2019-07-05T08:30:00Z").unwrap();
        let b = TimeInstant::parse("2019-07-05T09:30:00Z").unwrap();
        assert!(TimeRange::new(a, b).is_ok());
        assert!(TimeRange::new(a, a).is_ok());
        assert!(matches!(
            TimeRange::new(b, a),
            Err(ItemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn decoded_range_is_not_reordered_or_checked() {
        let payload = Element::new(GML_TIME_PERIOD)
            .with_child(Element::new(GML_BEGIN_POSITION).with_text("2019-07-05T09:30:00Z"))
            .with_child(Element::new(GML_END_POSITION).with_text("2019-07-05T08:30:00Z"));
        let range = TimeRange::from_result_payload(&payload).unwrap();
        assert!(range.end().naive() < range.start().naive());
    }

    #[test]
    fn field_text_needs_two_instants() {
        let err = TimeRange::from_field_text("2019-07-05T09:30:00Z").unwrap_err();
        assert!(err.is_invalid_message());
        let ok = TimeRange::from_field_text("2019-07-05T08:30:00Z 2019-07-05T09:30:00").unwrap();
        assert!(ok.start().has_explicit_utc_offset());
        assert!(!ok.end().has_explicit_utc_offset());
    }
}
