//! Key paths used to locate bridge errors inside a value tree.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A table key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// The route from the document root to a node, e.g. `b.c[1].a`.
///
/// Errors collect segments while they unwind out of nested containers, so
/// segments are stored innermost-first and reversed for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    reversed: Vec<PathSegment>,
}

impl KeyPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.reversed.is_empty()
    }

    /// Prepends a segment. Called by each enclosing container on the way out.
    pub(crate) fn push_outer(&mut self, segment: PathSegment) {
        self.reversed.push(segment);
    }

    /// Segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.reversed.iter().rev()
    }
}

impl FromIterator<PathSegment> for KeyPath {
    /// Builds a path from root-first segments.
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        let mut reversed: Vec<_> = iter.into_iter().collect();
        reversed.reverse();
        KeyPath { reversed }
    }
}

pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Writes `s` as a TOML basic string, with escapes.
pub(crate) fn write_basic_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

pub(crate) fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_basic_string(out, key);
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        let mut out = String::new();
        for (i, segment) in self.segments().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        out.push('.');
                    }
                    write_key(&mut out, key);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        f.write_str(&out)
    }
}
