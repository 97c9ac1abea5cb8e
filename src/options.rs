//! Configuration options for rendering TOML text.
//!
//! [`RenderOptions`] controls layout only. Whatever the options, rendered
//! text parses back to a tree equal to the one that was rendered.
//!
//! ## Examples
//!
//! ```rust
//! use tomlkit::{to_string_with_options, RenderOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { tags: Vec<&'static str> }
//!
//! let data = Data { tags: vec!["a", "b"] };
//!
//! let options = RenderOptions::new().with_multiline_arrays(true).with_indent(2);
//! let toml = to_string_with_options(&data, options).unwrap();
//! assert_eq!(toml, "tags = [\n  'a',\n  'b',\n]\n");
//! ```

/// Configuration options for TOML rendering.
///
/// # Examples
///
/// ```rust
/// use tomlkit::RenderOptions;
///
/// // Default layout
/// let options = RenderOptions::new();
///
/// // Indented sections, one array element per line
/// let options = RenderOptions::pretty();
///
/// // Custom configuration
/// let options = RenderOptions::new()
///     .with_indent_tables(true)
///     .with_literal_strings(false)
///     .with_indent(2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Indent nested `[section]` headers and their entries.
    pub indent_tables: bool,
    /// Prefer `'literal'` strings when the content allows it.
    pub literal_strings: bool,
    /// Render every array one element per line, not only those flagged
    /// multi-line.
    pub multiline_arrays: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: 4,
            indent_tables: false,
            literal_strings: true,
            multiline_arrays: false,
        }
    }
}

impl RenderOptions {
    /// Creates default options (flat sections, literal strings, 4-space
    /// indent).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlkit::RenderOptions;
    ///
    /// let options = RenderOptions::new();
    /// assert_eq!(options.indent, 4);
    /// assert!(!options.indent_tables);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with indented sections and multi-line arrays.
    #[must_use]
    pub fn pretty() -> Self {
        RenderOptions {
            indent_tables: true,
            multiline_arrays: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_indent_tables(mut self, indent_tables: bool) -> Self {
        self.indent_tables = indent_tables;
        self
    }

    /// When `false`, every string is written as a `"basic"` string.
    #[must_use]
    pub fn with_literal_strings(mut self, literal_strings: bool) -> Self {
        self.literal_strings = literal_strings;
        self
    }

    #[must_use]
    pub fn with_multiline_arrays(mut self, multiline_arrays: bool) -> Self {
        self.multiline_arrays = multiline_arrays;
        self
    }
}
