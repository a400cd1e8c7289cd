//! Error types for item construction and decoding.

use std::fmt;

use meas_wire::WireError;

/// Errors raised while building, encoding or decoding result items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemError {
    /// A caller-supplied value violates a local invariant (bad column name,
    /// duplicate field, non-UTC instant, inverted range, ...).
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },
    /// Text handed directly to a parser is not in the expected format.
    InvalidFormat {
        /// What was being parsed (`"time instant"`, `"data quality"`).
        kind: &'static str,
        /// The rejected text.
        input: String,
    },
    /// An integer token is well formed but does not fit in an `i64`.
    OutOfRange {
        /// The rejected token.
        token: String,
    },
    /// A decoded payload is structurally invalid.
    InvalidMessage {
        /// Context locating the fault (field, column or raw token).
        detail: String,
    },
    /// A result type tag is outside the supported set.
    UnsupportedType {
        /// The unrecognized tag.
        tag: String,
    },
}

impl ItemError {
    /// Shorthand for [`ItemError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ItemError::InvalidMessage`].
    pub fn invalid_message(detail: impl Into<String>) -> Self {
        Self::InvalidMessage {
            detail: detail.into(),
        }
    }

    /// Whether this error describes an invalid incoming message.
    ///
    /// An unsupported type tag counts as an invalid message.
    pub fn is_invalid_message(&self) -> bool {
        matches!(self, Self::InvalidMessage { .. } | Self::UnsupportedType { .. })
    }

    /// Rewrap as [`ItemError::InvalidMessage`] prefixed with `context`.
    pub fn in_context(self, context: &str) -> Self {
        Self::InvalidMessage {
            detail: format!("{context}: {self}"),
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::InvalidFormat { kind, input } => {
                write!(f, "invalid {kind} format: \"{input}\"")
            }
            Self::OutOfRange { token } => {
                write!(f, "integer \"{token}\" does not fit in 64 bits")
            }
            Self::InvalidMessage { detail } => write!(f, "invalid message: {detail}"),
            Self::UnsupportedType { tag } => write!(f, "unsupported result type \"{tag}\""),
        }
    }
}

impl std::error::Error for ItemError {}

impl From<WireError> for ItemError {
    fn from(e: WireError) -> Self {
        match e {
            WireError::OutOfRange { token, .. } => Self::OutOfRange { token },
            other => Self::InvalidMessage {
                detail: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_overflow_maps_to_out_of_range() {
        let err: ItemError = WireError::OutOfRange {
            kind: "long",
            token: "99999999999999999999".into(),
        }
        .into();
        assert_eq!(
            err,
            ItemError::OutOfRange {
                token: "99999999999999999999".into()
            }
        );
        assert!(!err.is_invalid_message());
    }

    #[test]
    fn other_wire_errors_are_invalid_messages() {
        let err: ItemError = WireError::MissingElement {
            parent: "swe:Quantity".into(),
            child: "swe:value".into(),
        }
        .into();
        match err {
            ItemError::InvalidMessage { detail } => {
                assert!(detail.contains("swe:value"), "detail: {detail}");
            }
            other => panic!("expected InvalidMessage, got {other:?}"),
        }
    }

    #[test]
    fn in_context_keeps_original_text() {
        let err = ItemError::OutOfRange { token: "1e99".into() }.in_context("field \"n\"");
        assert!(err.is_invalid_message());
        let text = err.to_string();
        assert!(text.contains("field \"n\""));
        assert!(text.contains("1e99"));
    }

    #[test]
    fn unsupported_type_counts_as_invalid_message() {
        let err = ItemError::UnsupportedType { tag: "x".into() };
        assert!(err.is_invalid_message());
        assert_eq!(err.to_string(), "unsupported result type \"x\"");
    }
}
