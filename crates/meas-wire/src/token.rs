//! Scalar token codecs.
//!
//! Lexical forms follow the XML Schema datatypes the vocabulary is built on:
//! `boolean`, `long`, `double` and `duration`, plus whitespace-separated
//! lists of those. List items that may contain whitespace go through
//! [`escape_list_item`] and [`unescape_list_item`].

use std::borrow::Cow;

use chrono::TimeDelta;

use crate::error::WireError;

const MONTHS_PER_YEAR: i64 = 12;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

// ── Booleans ────────────────────────────────────────────────────

/// Parse `true`, `false`, `1` or `0`, ignoring surrounding whitespace.
pub fn parse_boolean(token: &str) -> Result<bool, WireError> {
    match token.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid("boolean", token)),
    }
}

/// Canonical form of a boolean.
pub fn format_boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// ── Integers ────────────────────────────────────────────────────

/// Parse a signed 64-bit integer.
///
/// A well-formed integer that does not fit in an `i64` is reported as
/// [`WireError::OutOfRange`] rather than [`WireError::InvalidToken`].
pub fn parse_long(token: &str) -> Result<i64, WireError> {
    use std::num::IntErrorKind;

    token.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => WireError::OutOfRange {
            kind: "long",
            token: token.to_string(),
        },
        _ => invalid("long", token),
    })
}

/// Canonical form of an integer.
pub fn format_long(value: i64) -> String {
    value.to_string()
}

// ── Doubles ─────────────────────────────────────────────────────

/// Parse a double, accepting `INF`, `+INF`, `-INF` and `NaN`.
pub fn parse_double(token: &str) -> Result<f64, WireError> {
    let trimmed = token.trim();
    match trimmed {
        "INF" | "+INF" => return Ok(f64::INFINITY),
        "-INF" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }
    // Rust also accepts "inf" and "nan" spellings which the lexical space does not.
    let lexical = !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !lexical {
        return Err(invalid("double", token));
    }
    trimmed.parse::<f64>().map_err(|_| invalid("double", token))
}

/// Shortest form of a double that parses back to the same value.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

// ── Durations ───────────────────────────────────────────────────

/// An ISO 8601 duration: a calendar part counted in months and an exact
/// part.
///
/// Years are stored as twelve months. Days are exact (24 hours), since the
/// timestamps it is applied to carry no daylight-saving rules. Both parts
/// share one sign, as the lexical form has a single leading `-`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDuration {
    months: i32,
    delta: TimeDelta,
}

impl CalendarDuration {
    /// Combine a month count and an exact part.
    ///
    /// `None` if the parts have opposite signs.
    pub fn new(months: i32, delta: TimeDelta) -> Option<Self> {
        let zero = TimeDelta::zero();
        if (months > 0 && delta < zero) || (months < 0 && delta > zero) {
            return None;
        }
        Some(Self { months, delta })
    }

    /// A duration of whole months.
    pub fn months_only(months: i32) -> Self {
        Self {
            months,
            delta: TimeDelta::zero(),
        }
    }

    /// Calendar part in months.
    pub fn months(&self) -> i32 {
        self.months
    }

    /// Exact part.
    pub fn delta(&self) -> TimeDelta {
        self.delta
    }

    /// Whether both parts are zero.
    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.delta.is_zero()
    }

    /// Multiply both parts by `factor`. `None` on overflow.
    pub fn checked_mul(&self, factor: i32) -> Option<Self> {
        Some(Self {
            months: self.months.checked_mul(factor)?,
            delta: self.delta.checked_mul(factor)?,
        })
    }

    fn is_negative(&self) -> bool {
        self.months < 0 || self.delta < TimeDelta::zero()
    }
}

impl Default for CalendarDuration {
    fn default() -> Self {
        Self::months_only(0)
    }
}

impl From<TimeDelta> for CalendarDuration {
    fn from(delta: TimeDelta) -> Self {
        Self { months: 0, delta }
    }
}

/// Parse an ISO 8601 duration such as `P1M`, `PT1H30M` or `-P1Y2DT0.5S`.
pub fn parse_duration(token: &str) -> Result<CalendarDuration, WireError> {
    let trimmed = token.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest
        .strip_prefix('P')
        .ok_or_else(|| invalid("duration", token))?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return Err(invalid("duration", token));
            }
            (date, time)
        }
        None => (rest, ""),
    };
    if date_part.is_empty() && time_part.is_empty() {
        return Err(invalid("duration", token));
    }

    let mut months = 0_i32;
    let mut total = TimeDelta::zero();
    for (designator, number) in components(date_part, &['Y', 'M', 'D'], token)? {
        let count = whole_number(number, token)?;
        match designator {
            'Y' => {
                let added = count
                    .checked_mul(MONTHS_PER_YEAR)
                    .and_then(|m| i32::try_from(m).ok())
                    .ok_or_else(|| out_of_range("duration", token))?;
                months = months
                    .checked_add(added)
                    .ok_or_else(|| out_of_range("duration", token))?;
            }
            'M' => {
                let added = i32::try_from(count).map_err(|_| out_of_range("duration", token))?;
                months = months
                    .checked_add(added)
                    .ok_or_else(|| out_of_range("duration", token))?;
            }
            _ => total = add_checked(total, TimeDelta::try_days(count), token)?,
        }
    }
    for (designator, number) in components(time_part, &['H', 'M', 'S'], token)? {
        let delta = match designator {
            'H' => TimeDelta::try_seconds(
                whole_number(number, token)?
                    .checked_mul(SECONDS_PER_HOUR)
                    .ok_or_else(|| out_of_range("duration", token))?,
            ),
            'M' => TimeDelta::try_seconds(
                whole_number(number, token)?
                    .checked_mul(SECONDS_PER_MINUTE)
                    .ok_or_else(|| out_of_range("duration", token))?,
            ),
            _ => Some(fractional_seconds(number, token)?),
        };
        total = add_checked(total, delta, token)?;
    }

    Ok(if negative {
        CalendarDuration {
            months: -months,
            delta: -total,
        }
    } else {
        CalendarDuration {
            months,
            delta: total,
        }
    })
}

/// Canonical duration form (`P1Y2M3DT4H5M6.5S`), omitting zero components;
/// `PT0S` for zero.
pub fn format_duration(value: CalendarDuration) -> String {
    if value.is_zero() {
        return "PT0S".to_string();
    }
    let months = value.months.unsigned_abs();
    let years = months / 12;
    let months = months % 12;
    let magnitude = value.delta.abs();
    let total_seconds = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    let mut out = String::new();
    if value.is_negative() {
        out.push('-');
    }
    out.push('P');
    if years > 0 {
        out.push_str(&format!("{years}Y"));
    }
    if months > 0 {
        out.push_str(&format!("{months}M"));
    }
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
        return out;
    }
    out.push('T');
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
    } else if seconds > 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Split `part` into `(designator, number)` pairs, requiring designators to
/// appear at most once and in the order given by `allowed`.
fn components<'a>(
    part: &'a str,
    allowed: &[char],
    token: &str,
) -> Result<Vec<(char, &'a str)>, WireError> {
    let mut out = Vec::new();
    let mut next_allowed = 0;
    let mut start = 0;
    for (idx, ch) in part.char_indices() {
        if ch.is_ascii_digit() || ch == '.' {
            continue;
        }
        let position = allowed[next_allowed..]
            .iter()
            .position(|&d| d == ch)
            .ok_or_else(|| invalid("duration", token))?;
        let number = &part[start..idx];
        if number.is_empty() {
            return Err(invalid("duration", token));
        }
        out.push((ch, number));
        next_allowed += position + 1;
        start = idx + ch.len_utf8();
    }
    if start != part.len() {
        // Trailing digits without a designator.
        return Err(invalid("duration", token));
    }
    Ok(out)
}

fn whole_number(number: &str, token: &str) -> Result<i64, WireError> {
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("duration", token));
    }
    number.parse().map_err(|_| out_of_range("duration", token))
}

fn fractional_seconds(number: &str, token: &str) -> Result<TimeDelta, WireError> {
    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) if !w.is_empty() && !f.is_empty() => (w, f),
        Some(_) => return Err(invalid("duration", token)),
        None => (number, ""),
    };
    let seconds = whole_number(whole, token)?;
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("duration", token));
    }
    // Precision beyond nanoseconds is truncated.
    let digits: String = fraction.chars().take(9).collect();
    let nanos: i64 = if digits.is_empty() {
        0
    } else {
        format!("{digits:0<9}")
            .parse()
            .map_err(|_| invalid("duration", token))?
    };
    TimeDelta::try_seconds(seconds)
        .and_then(|s| s.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(|| out_of_range("duration", token))
}

fn add_checked(
    total: TimeDelta,
    delta: Option<TimeDelta>,
    token: &str,
) -> Result<TimeDelta, WireError> {
    delta
        .and_then(|d| total.checked_add(&d))
        .ok_or_else(|| out_of_range("duration", token))
}

// ── Lists ───────────────────────────────────────────────────────

/// Split a whitespace-separated list into its tokens.
pub fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Join tokens with single spaces.
pub fn join_list<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (idx, token) in tokens.into_iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(token.as_ref());
    }
    out
}

/// Make `item` safe to place in a whitespace-separated list.
///
/// Items containing whitespace or `%` are percent-encoded; any other item is
/// returned unchanged.
pub fn escape_list_item(item: &str) -> Cow<'_, str> {
    if item.chars().any(|c| c.is_whitespace() || c == '%') {
        urlencoding::encode(item)
    } else {
        Cow::Borrowed(item)
    }
}

/// Reverse [`escape_list_item`]. Items without `%` are returned unchanged.
pub fn unescape_list_item(item: &str) -> Result<Cow<'_, str>, WireError> {
    if !item.contains('%') {
        return Ok(Cow::Borrowed(item));
    }
    urlencoding::decode(item).map_err(|_| invalid("list item", item))
}

// ── Names ───────────────────────────────────────────────────────

/// Whether `name` is a non-colonised XML name, the form required for
/// identifiers.
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn invalid(kind: &'static str, token: &str) -> WireError {
    WireError::InvalidToken {
        kind,
        token: token.to_string(),
    }
}

fn out_of_range(kind: &'static str, token: &str) -> WireError {
    WireError::OutOfRange {
        kind,
        token: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boolean_accepts_numeric_forms() {
        assert_eq!(parse_boolean("1"), Ok(true));
        assert_eq!(parse_boolean(" false "), Ok(false));
        assert!(matches!(
            parse_boolean("yes"),
            Err(WireError::InvalidToken { kind: "boolean", .. })
        ));
    }

    #[test]
    fn long_overflow_is_out_of_range() {
        assert_eq!(parse_long("-42"), Ok(-42));
        assert_eq!(parse_long("+7"), Ok(7));
        assert!(matches!(
            parse_long("9223372036854775808"),
            Err(WireError::OutOfRange { kind: "long", .. })
        ));
        assert!(matches!(
            parse_long("4.5"),
            Err(WireError::InvalidToken { kind: "long", .. })
        ));
    }

    #[test]
    fn double_special_values() {
        assert_eq!(parse_double("INF"), Ok(f64::INFINITY));
        assert_eq!(parse_double("-INF"), Ok(f64::NEG_INFINITY));
        assert!(parse_double("NaN").unwrap().is_nan());
        assert!(parse_double("inf").is_err());
        assert!(parse_double("nan").is_err());
        assert!(parse_double("").is_err());
        assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_double(-0.12), "-0.12");
        assert_eq!(parse_double("1.5e3"), Ok(1500.0));
    }

    #[test]
    fn duration_forms() {
        assert_eq!(parse_duration("PT2S"), Ok(TimeDelta::seconds(2).into()));
        assert_eq!(parse_duration("P1DT1H"), Ok(TimeDelta::hours(25).into()));
        assert_eq!(
            parse_duration("-PT0.25S"),
            Ok((-TimeDelta::milliseconds(250)).into())
        );
        assert_eq!(format_duration(TimeDelta::hours(25).into()), "P1DT1H");
        assert_eq!(format_duration(CalendarDuration::default()), "PT0S");
        assert_eq!(
            format_duration((TimeDelta::minutes(1) + TimeDelta::milliseconds(500)).into()),
            "PT1M0.5S"
        );
        assert_eq!(format_duration((-TimeDelta::seconds(90)).into()), "-PT1M30S");
    }

    #[test]
    fn calendar_components_are_kept_as_months() {
        let monthly = parse_duration("P1M").unwrap();
        assert_eq!(monthly, CalendarDuration::months_only(1));
        assert_eq!(format_duration(monthly), "P1M");

        let mixed = parse_duration("P1Y2DT3H").unwrap();
        assert_eq!(mixed.months(), 12);
        assert_eq!(mixed.delta(), TimeDelta::days(2) + TimeDelta::hours(3));
        assert_eq!(format_duration(mixed), "P1Y2DT3H");

        let back = parse_duration("-P2Y3M").unwrap();
        assert_eq!(back.months(), -27);
        assert_eq!(format_duration(back), "-P2Y3M");
    }

    #[test]
    fn calendar_duration_parts_share_a_sign() {
        assert!(CalendarDuration::new(1, -TimeDelta::seconds(1)).is_none());
        assert!(CalendarDuration::new(-1, TimeDelta::seconds(1)).is_none());
        assert!(CalendarDuration::new(-1, -TimeDelta::seconds(1)).is_some());
        assert_eq!(
            CalendarDuration::months_only(2).checked_mul(3),
            Some(CalendarDuration::months_only(6))
        );
        assert_eq!(CalendarDuration::months_only(i32::MAX).checked_mul(2), None);
    }

    #[test]
    fn duration_rejects_malformed_forms() {
        for bad in [
            "PT", "P", "1S", "PTS", "PT1S1M", "PT1H1H", "PT1", "PT.5S", "P1D1Y", "P1.5M", "P1W",
        ] {
            assert!(
                matches!(parse_duration(bad), Err(WireError::InvalidToken { .. })),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            parse_duration("P9999999999M"),
            Err(WireError::OutOfRange { .. })
        ));
    }

    #[test]
    fn list_items_with_whitespace_are_escaped() {
        assert_eq!(escape_list_item("bad/drift"), "bad/drift");
        let escaped = escape_list_item("bad/sensor offline");
        assert!(!escaped.chars().any(char::is_whitespace), "{escaped}");
        assert_eq!(unescape_list_item(&escaped).unwrap(), "bad/sensor offline");
        assert_eq!(
            unescape_list_item(&escape_list_item("bad/50%")).unwrap(),
            "bad/50%"
        );
        assert_eq!(unescape_list_item("good").unwrap(), "good");
    }

    #[test]
    fn lists_split_on_any_whitespace() {
        let tokens: Vec<_> = split_list(" 1.5\n2  3\t").collect();
        assert_eq!(tokens, vec!["1.5", "2", "3"]);
        assert_eq!(join_list(["a", "b"]), "a b");
        assert_eq!(join_list(Vec::<String>::new()), "");
    }

    #[test]
    fn ncname_rules() {
        assert!(is_ncname("obs_1.result-"));
        assert!(is_ncname("_x"));
        assert!(!is_ncname(""));
        assert!(!is_ncname("1abc"));
        assert!(!is_ncname("a:b"));
        assert!(!is_ncname("a b"));
    }

    proptest! {
        #[test]
        fn long_round_trips(v in any::<i64>()) {
            prop_assert_eq!(parse_long(&format_long(v)), Ok(v));
        }

        #[test]
        fn finite_double_round_trips(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            prop_assert_eq!(parse_double(&format_double(v)), Ok(v));
        }

        #[test]
        fn duration_round_trips(
            months in 0i32..2_400,
            ms in 0i64..10_000_000_000i64,
            negative in any::<bool>(),
        ) {
            let sign = if negative { -1 } else { 1 };
            let d = CalendarDuration::new(sign * months, TimeDelta::milliseconds(sign as i64 * ms))
                .unwrap();
            prop_assert_eq!(parse_duration(&format_duration(d)), Ok(d));
        }
    }
}
