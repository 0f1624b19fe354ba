//! Error types for PList parsing and lookups.

use crate::value::ValueKind;
use thiserror::Error;

/// Result type for PList parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => String::new(),
        }
    }
}

/// Error type for PList parsing.
///
/// Every variant is fatal to the document being built; the builder never
/// attempts to recover a partial tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nesting-rule violation: wrong parent, duplicate `plist` root, content
    /// before `<plist>`, unmatched end tag.
    #[error("{reason} (<{tag}> at depth {depth}){location}")]
    Structural {
        tag: String,
        depth: usize,
        reason: String,
        location: String,
    },

    /// Leaf text that does not parse as its declared type.
    #[error("Invalid <{tag}> text \"{text}\": {reason}{location}")]
    Conversion {
        tag: &'static str,
        text: String,
        reason: String,
        location: String,
    },

    /// The XML event source rejected the input.
    #[error("Malformed XML: {message}{location}")]
    Xml { message: String, location: String },
}

impl ParseError {
    pub(crate) fn structural(tag: impl Into<String>, depth: usize, reason: impl Into<String>) -> Self {
        ParseError::Structural {
            tag: tag.into(),
            depth,
            reason: reason.into(),
            location: String::new(),
        }
    }

    pub(crate) fn conversion(tag: &'static str, text: &str, reason: impl ToString) -> Self {
        ParseError::Conversion {
            tag,
            text: text.to_string(),
            reason: reason.to_string(),
            location: String::new(),
        }
    }

    pub(crate) fn xml(message: impl ToString) -> Self {
        ParseError::Xml {
            message: message.to_string(),
            location: String::new(),
        }
    }

    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::Structural {
                tag, depth, reason, ..
            } => ParseError::Structural {
                tag,
                depth,
                reason,
                location: suffix,
            },
            ParseError::Conversion {
                tag, text, reason, ..
            } => ParseError::Conversion {
                tag,
                text,
                reason,
                location: suffix,
            },
            ParseError::Xml { message, .. } => ParseError::Xml {
                message,
                location: suffix,
            },
        }
    }

    /// Returns `true` for nesting-rule violations.
    pub fn is_structural(&self) -> bool {
        matches!(self, ParseError::Structural { .. })
    }

    /// Returns `true` for leaf text conversion failures.
    pub fn is_conversion(&self) -> bool {
        matches!(self, ParseError::Conversion { .. })
    }
}

/// Error type for typed lookups into a parsed tree.
///
/// "Not found" is never an error; it surfaces as `None` or as the caller's
/// default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The value at `path` exists but has a different type.
    #[error("Expected {expected} at \"{path}\", found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: ValueKind,
    },

    /// Array index past the end.
    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
