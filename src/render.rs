//! Tree to text.
//!
//! ## Layout
//!
//! Within a table, plain `key = value` entries come first, then sub-tables as
//! `[a.b]` sections and arrays of tables as `[[a.c]]` sections, each section
//! preceded by a blank line. An array is written as an array of tables when
//! it is non-empty and every element is a non-inline table; everything else
//! is written inline.
//!
//! ```rust
//! use tomlkit::{render, Table};
//!
//! let owner = Table::new();
//! owner.insert("name", "Tom");
//! let doc = Table::new();
//! doc.insert("title", "TOML");
//! doc.insert("owner", owner);
//!
//! assert_eq!(render(&doc), "title = 'TOML'\n\n[owner]\nname = 'Tom'\n");
//! ```

use crate::path::{write_basic_string, write_key};
use crate::{Array, RenderOptions, Table, Value};

/// Renders a table as a TOML document using the default options.
#[must_use]
pub fn render(table: &Table) -> String {
    render_with_options(table, &RenderOptions::default())
}

/// Renders a table as a TOML document.
///
/// The output parses back to a tree equal to `table` as long as every date
/// and time in it is in range (see [`Date::try_new`](crate::Date::try_new)
/// and [`Time::try_new`](crate::Time::try_new)).
#[must_use]
pub fn render_with_options(table: &Table, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(options);
    renderer.table_body(table, &mut Vec::new());
    log::debug!("rendered {} bytes of TOML", renderer.out.len());
    renderer.out
}

/// Renders a single value in inline form.
pub(crate) fn inline_value(value: &Value, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(options);
    renderer.value(value, 0, false);
    renderer.out
}

struct Renderer<'a> {
    out: String,
    options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Renderer {
            out: String::with_capacity(256),
            options,
        }
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level * self.options.indent {
            self.out.push(' ');
        }
    }

    fn section_level(&self, path: &[String]) -> usize {
        if self.options.indent_tables {
            path.len().saturating_sub(1)
        } else {
            0
        }
    }

    fn table_body(&mut self, table: &Table, path: &mut Vec<String>) {
        let level = self.section_level(path);
        let entries: Vec<(String, Value)> = table.iter().collect();

        for (key, value) in &entries {
            if is_section(value) {
                continue;
            }
            self.indent(level);
            write_key(&mut self.out, key);
            self.out.push_str(" = ");
            self.value(value, level, false);
            self.out.push('\n');
        }

        for (key, value) in &entries {
            match value {
                Value::Table(sub) if !sub.is_inline() => {
                    path.push(key.clone());
                    self.header(path, false);
                    self.table_body(sub, path);
                    path.pop();
                }
                Value::Array(items) if is_table_array(items) => {
                    path.push(key.clone());
                    for item in items.iter() {
                        if let Value::Table(sub) = item {
                            self.header(path, true);
                            self.table_body(&sub, path);
                        }
                    }
                    path.pop();
                }
                _ => {}
            }
        }
    }

    fn header(&mut self, path: &[String], array: bool) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.indent(self.section_level(path));
        self.out.push_str(if array { "[[" } else { "[" });
        for (i, key) in path.iter().enumerate() {
            if i > 0 {
                self.out.push('.');
            }
            write_key(&mut self.out, key);
        }
        self.out.push_str(if array { "]]\n" } else { "]\n" });
    }

    /// Writes a value in inline position. Inside inline tables arrays stay on
    /// one line.
    fn value(&mut self, value: &Value, level: usize, in_inline_table: bool) {
        match value {
            Value::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.out.push_str(&i.to_string()),
            Value::Float(f) => self.out.push_str(&format_float(*f)),
            Value::String(s) => self.string(s),
            Value::Date(d) => self.out.push_str(&d.to_string()),
            Value::Time(t) => self.out.push_str(&t.to_string()),
            Value::DateTime(dt) => self.out.push_str(&dt.to_string()),
            Value::Array(a) => self.array(a, level, in_inline_table),
            Value::Table(t) => self.inline_table(t, level),
        }
    }

    fn array(&mut self, array: &Array, level: usize, in_inline_table: bool) {
        let items = array.to_vec();
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        let multiline =
            !in_inline_table && (array.is_multiline() || self.options.multiline_arrays);
        if multiline {
            self.out.push_str("[\n");
            for item in &items {
                self.indent(level + 1);
                self.value(item, level + 1, false);
                self.out.push_str(",\n");
            }
            self.indent(level);
            self.out.push(']');
        } else {
            self.out.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.value(item, level, in_inline_table);
            }
            self.out.push_str(" ]");
        }
    }

    fn inline_table(&mut self, table: &Table, level: usize) {
        let entries: Vec<(String, Value)> = table.iter().collect();
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{ ");
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            write_key(&mut self.out, key);
            self.out.push_str(" = ");
            self.value(value, level, true);
        }
        self.out.push_str(" }");
    }

    fn string(&mut self, s: &str) {
        if self.options.literal_strings && can_be_literal(s) {
            self.out.push('\'');
            self.out.push_str(s);
            self.out.push('\'');
        } else {
            write_basic_string(&mut self.out, s);
        }
    }
}

fn is_table_array(array: &Array) -> bool {
    !array.is_empty()
        && array
            .iter()
            .all(|item| matches!(item, Value::Table(t) if !t.is_inline()))
}

/// Whether a table entry is written as a `[section]` rather than `key = value`.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Table(t) => !t.is_inline(),
        Value::Array(a) => is_table_array(a),
        _ => false,
    }
}

// literal strings cannot hold `'` or control characters other than tab
fn can_be_literal(s: &str) -> bool {
    !s.contains('\'') && !s.chars().any(|c| c.is_control() && c != '\t')
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f == f64::INFINITY {
        "inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        // Debug keeps a `.0` on whole numbers and uses exponents for extremes
        format!("{f:?}")
    }
}
