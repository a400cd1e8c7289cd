//! Data quality annotations.

use std::fmt;
use std::str::FromStr;

use crate::error::ItemError;

const GOOD: &str = "good";
const BAD: &str = "bad";
const REASON_SEPARATOR: char = '/';

/// Good/bad annotation of a value, optionally carrying a reason for bad
/// quality.
///
/// Equality is by encoded value. Missing quality information means good.
///
/// ```
/// use meas_core::DataQuality;
///
/// let q = DataQuality::bad_with_reason("sensor offline");
/// assert!(!q.is_good());
/// assert_eq!(q.encoded_value(), "bad/sensor offline");
/// assert_eq!(DataQuality::from_wire("bad/sensor offline").unwrap(), q);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataQuality {
    value: String,
}

impl DataQuality {
    /// Good quality.
    pub fn good() -> Self {
        Self {
            value: GOOD.to_string(),
        }
    }

    /// Bad quality without a reason.
    pub fn bad() -> Self {
        Self {
            value: BAD.to_string(),
        }
    }

    /// Bad quality with a free-text reason.
    pub fn bad_with_reason(reason: &str) -> Self {
        Self {
            value: format!("{BAD}{REASON_SEPARATOR}{reason}"),
        }
    }

    /// Read a quality code as it appears on the wire.
    ///
    /// The code must start with `good` or `bad`.
    pub fn from_wire(text: &str) -> Result<Self, ItemError> {
        if text.starts_with(GOOD) || text.starts_with(BAD) {
            Ok(Self {
                value: text.to_string(),
            })
        } else {
            Err(ItemError::InvalidFormat {
                kind: "data quality",
                input: text.to_string(),
            })
        }
    }

    /// Whether this is good quality.
    pub fn is_good(&self) -> bool {
        self.value.starts_with(GOOD)
    }

    /// The code written to the wire.
    pub fn encoded_value(&self) -> &str {
        &self.value
    }
}

impl Default for DataQuality {
    fn default() -> Self {
        Self::good()
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for DataQuality {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}
