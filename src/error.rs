//! Error types for parsing, encoding and decoding.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed TOML text, with a 1-indexed source [`Span`]
//! - **Type mismatches**: a node of one kind where the target needs another
//! - **Missing keys**: a required struct field absent from its table
//! - **Invalid enum values**: a string that names none of an enum's variants
//! - **Encoding errors**: a Rust value with no TOML representation
//!
//! Every bridge error carries the [`KeyPath`] of the node it concerns, so a
//! failure deep inside a document reads like `expected integer, found string
//! at servers[2].port`.
//!
//! ## Examples
//!
//! ```rust
//! use tomlkit::{from_str, Error};
//!
//! #[derive(serde::Deserialize, Debug)]
//! struct Config { port: u16 }
//!
//! let err = from_str::<Config>("name = 'x'").unwrap_err();
//! assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "port"));
//! ```

use crate::path::{KeyPath, PathSegment};
use std::fmt;
use thiserror::Error;

/// A 1-indexed line/column position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locates a byte offset in `text`. Columns count characters, not bytes.
    pub(crate) fn locate(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = text.get(..offset).unwrap_or(text);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Position { line, column }
    }
}

/// The begin and end of the text a [`ParseError`] refers to. Both ends are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    /// Converts a byte range into a line/column span.
    pub(crate) fn from_range(text: &str, range: std::ops::Range<usize>) -> Self {
        let begin = Position::locate(text, range.start);
        let end = if range.end > range.start {
            // last byte of the range, snapped back to a char boundary
            let mut last = range.end - 1;
            while last > range.start && !text.is_char_boundary(last) {
                last -= 1;
            }
            Position::locate(text, last)
        } else {
            begin
        };
        Span { begin, end }
    }
}

/// Malformed TOML text. No tree is produced when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("TOML parse error at line {}, column {}: {message}", .span.begin.line, .span.begin.column)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Represents all possible errors that can occur while converting between
/// text, value trees and Rust types.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The input text is not valid TOML.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A node has a different kind than the target type needs.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: KeyPath,
        expected: String,
        found: String,
    },

    /// A required field is absent from its table.
    #[error("missing key `{key}` in table at {path}")]
    MissingKey { path: KeyPath, key: String },

    /// A string matches none of an enum's variants.
    #[error("invalid enum value `{value}` at {path}, expected one of: {expected}")]
    InvalidEnumValue {
        path: KeyPath,
        value: String,
        expected: String,
    },

    /// A Rust value cannot be represented in a TOML tree.
    #[error("cannot encode value at {path}: {reason}")]
    Encoding { path: KeyPath, reason: String },

    /// `None` appeared where TOML has no way to leave a value out (an array
    /// element or the document itself). Absent struct fields are skipped.
    #[error("cannot encode a missing value at {path}")]
    UnsupportedNone { path: KeyPath },

    /// Any other message raised by a `Serialize`/`Deserialize` impl.
    #[error("{msg} at {path}")]
    Custom { path: KeyPath, msg: String },
}

impl Error {
    /// Creates a type mismatch error at the current node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlkit::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer, found string"));
    /// ```
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            path: KeyPath::new(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an encoding error for a value with no TOML representation.
    pub fn encoding(reason: impl Into<String>) -> Self {
        Error::Encoding {
            path: KeyPath::new(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_none() -> Self {
        Error::UnsupportedNone {
            path: KeyPath::new(),
        }
    }

    /// The key path of the node this error concerns. `None` for parse errors.
    #[must_use]
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Error::Parse(_) => None,
            Error::TypeMismatch { path, .. }
            | Error::MissingKey { path, .. }
            | Error::InvalidEnumValue { path, .. }
            | Error::Encoding { path, .. }
            | Error::UnsupportedNone { path }
            | Error::Custom { path, .. } => Some(path),
        }
    }

    /// `true` for an absent value raised by the node itself rather than by
    /// one of its descendants.
    pub(crate) fn is_own_none(&self) -> bool {
        matches!(self, Error::UnsupportedNone { path } if path.is_root())
    }

    fn push_outer(mut self, segment: PathSegment) -> Self {
        match &mut self {
            Error::Parse(_) => {}
            Error::TypeMismatch { path, .. }
            | Error::MissingKey { path, .. }
            | Error::InvalidEnumValue { path, .. }
            | Error::Encoding { path, .. }
            | Error::UnsupportedNone { path }
            | Error::Custom { path, .. } => path.push_outer(segment),
        }
        self
    }

    /// Records that the error happened under table key `key`.
    pub(crate) fn in_key(self, key: impl Into<String>) -> Self {
        self.push_outer(PathSegment::Key(key.into()))
    }

    /// Records that the error happened at array index `index`.
    pub(crate) fn in_index(self, index: usize) -> Self {
        self.push_outer(PathSegment::Index(index))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::encoding(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom {
            path: KeyPath::new(),
            msg: msg.to_string(),
        }
    }

    fn invalid_type(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(exp.to_string(), unexp.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingKey {
            path: KeyPath::new(),
            key: field.to_string(),
        }
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Error::InvalidEnumValue {
            path: KeyPath::new(),
            value: variant.to_string(),
            expected: expected.join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
