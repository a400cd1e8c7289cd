//! Encoding options for result payloads.

use meas_wire::token::is_ncname;

use crate::error::ItemError;

/// Options applied when encoding an item as an observation result.
///
/// Temporal and time series payloads carry `gml:id` attributes that must be
/// unique within the enclosing document. They are built by appending a fixed
/// suffix (`TimeInst`, `TimeRange`, `TimeSer`) to [`id_prefix`](Self::id_prefix).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultOptions {
    /// Prefix of generated identifiers. Must be a valid NCName. Default: `obs_`.
    pub id_prefix: String,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            id_prefix: "obs_".to_string(),
        }
    }
}

impl ResultOptions {
    /// Options with a custom, validated identifier prefix.
    pub fn new(id_prefix: impl Into<String>) -> Result<Self, ItemError> {
        let options = Self {
            id_prefix: id_prefix.into(),
        };
        options.validate()?;
        Ok(options)
    }

    /// Options for the result of the observation identified by `uid`.
    ///
    /// Produces the prefix `<uid>_result_`.
    pub fn for_observation(uid: &str) -> Result<Self, ItemError> {
        Self::new(format!("{uid}_result_"))
    }

    /// Check that the prefix yields valid identifiers.
    pub fn validate(&self) -> Result<(), ItemError> {
        if is_ncname(&self.id_prefix) {
            Ok(())
        } else {
            Err(ItemError::invalid_argument(format!(
                "identifier prefix \"{}\" is not a valid NCName",
                self.id_prefix
            )))
        }
    }

    /// Identifier of the element with the given suffix.
    pub(crate) fn id(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.id_prefix)
    }
}
