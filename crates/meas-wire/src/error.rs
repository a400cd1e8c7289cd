//! Error types for wire-level lookups and token parsing.

use std::fmt;

/// Errors produced while reading an [`Element`](crate::Element) tree or
/// parsing a scalar token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireError {
    /// A token does not match the lexical form of its datatype.
    InvalidToken {
        /// Datatype that was expected (`"boolean"`, `"long"`, ...).
        kind: &'static str,
        /// The offending text.
        token: String,
    },
    /// A token is lexically valid but its value does not fit the target type.
    OutOfRange {
        /// Datatype that was expected.
        kind: &'static str,
        /// The offending text.
        token: String,
    },
    /// A required child element is absent.
    MissingElement {
        /// Qualified name of the parent element.
        parent: String,
        /// Qualified name of the missing child.
        child: String,
    },
    /// A required attribute is absent.
    MissingAttribute {
        /// Qualified name of the element.
        element: String,
        /// Qualified name of the missing attribute.
        attribute: String,
    },
    /// A qualified name uses a prefix with no registered namespace.
    UnknownPrefix {
        /// The unregistered prefix.
        prefix: String,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { kind, token } => {
                write!(f, "invalid {kind} token \"{token}\"")
            }
            Self::OutOfRange { kind, token } => {
                write!(f, "{kind} value \"{token}\" is out of range")
            }
            Self::MissingElement { parent, child } => {
                write!(f, "element {parent} has no {child} child")
            }
            Self::MissingAttribute { element, attribute } => {
                write!(f, "element {element} has no {attribute} attribute")
            }
            Self::UnknownPrefix { prefix } => {
                write!(f, "no namespace registered for prefix \"{prefix}\"")
            }
        }
    }
}

impl std::error::Error for WireError {}
