//! Text to tree.
//!
//! Parsing is delegated to the `toml` crate; this module converts its output
//! into the shared [`Table`]/[`Array`] tree and its errors into
//! [`ParseError`]s with 1-indexed line/column spans.

use crate::datetime::Temporal;
use crate::error::{ParseError, Span};
use crate::{Array, Integer, Table, Value};

/// Parses a TOML document into a fresh table.
///
/// On success the returned table is independent: nothing else holds a handle
/// to it or any container inside it. On failure no tree is produced.
///
/// Integers come back in decimal format, tables as block tables and arrays as
/// single-line arrays; the source layout is not recorded.
///
/// # Examples
///
/// ```rust
/// use tomlkit::parse_document;
///
/// let doc = parse_document("title = 'TOML'\n[owner]\nname = 'Tom'").unwrap();
/// assert_eq!(doc.get("owner").and_then(|o| o.get("name")).unwrap().as_str(), Some("Tom"));
///
/// let err = parse_document("String = 'Hello, World!").unwrap_err();
/// assert_eq!((err.span().begin.line, err.span().begin.column), (1, 24));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] when `text` is not valid TOML.
pub fn parse_document(text: &str) -> Result<Table, ParseError> {
    let parsed: toml::Table = toml::from_str(text).map_err(|err| convert_error(text, &err))?;
    log::debug!("parsed TOML document with {} top-level keys", parsed.len());
    convert_table(parsed).map_err(|message| ParseError {
        message,
        span: Span::from_range(text, 0..0),
    })
}

fn convert_error(text: &str, err: &toml::de::Error) -> ParseError {
    let range = err.span().unwrap_or(text.len()..text.len());
    let span = Span::from_range(text, range);
    log::debug!(
        "TOML parse error at {}:{}: {}",
        span.begin.line,
        span.begin.column,
        err.message()
    );
    ParseError {
        message: err.message().trim_end().to_string(),
        span,
    }
}

fn convert_table(table: toml::Table) -> Result<Table, String> {
    log::trace!("converting table with {} keys", table.len());
    let converted = Table::with_capacity(table.len());
    for (key, value) in table {
        converted.insert(key, convert_value(value)?);
    }
    Ok(converted)
}

fn convert_value(value: toml::Value) -> Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(Integer::new(i)),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Boolean(b),
        toml::Value::Datetime(dt) => match Temporal::try_from(dt).map_err(|e| e.to_string())? {
            Temporal::Date(d) => Value::Date(d),
            Temporal::Time(t) => Value::Time(t),
            Temporal::DateTime(dt) => Value::DateTime(dt),
        },
        toml::Value::Array(items) => {
            let array = Array::new();
            for item in items {
                array.push(convert_value(item)?);
            }
            Value::Array(array)
        }
        toml::Value::Table(table) => Value::Table(convert_table(table)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Position;
    use crate::{Date, DateTime, Offset, Time};

    #[test]
    fn test_every_kind() {
        let doc = parse_document(
            r#"
bool = true
int = 0xff
float = 2724.49
string = "Hello"
date = 2021-05-20
time = 04:27:05.000000294
local = 2021-05-20T04:27:05
zoned = 2021-05-20T04:27:05Z
array = [1, "two"]
inline = { a = 1 }
"#,
        )
        .unwrap();

        assert_eq!(doc.get("bool"), Some(Value::from(true)));
        let int = doc.get("int").unwrap().as_integer_value().unwrap();
        assert_eq!(int.value(), 255);
        assert!(int.is_plain());
        assert_eq!(doc.get("float"), Some(Value::from(2724.49)));
        assert_eq!(doc.get("date"), Some(Value::from(Date::new(2021, 5, 20))));
        assert_eq!(doc.get("time"), Some(Value::from(Time::new(4, 27, 5, 294))));
        assert_eq!(
            doc.get("local"),
            Some(Value::from(DateTime::new(
                Date::new(2021, 5, 20),
                Time::new(4, 27, 5, 0)
            )))
        );
        assert_eq!(
            doc.get("zoned").and_then(|v| v.as_datetime()).unwrap().offset,
            Some(Offset::Z)
        );
        assert_eq!(doc.get("array").unwrap().as_array().unwrap().len(), 2);
        assert!(!doc.get("inline").unwrap().as_table().unwrap().is_inline());
    }

    #[test]
    fn test_key_order_is_kept() {
        let doc = parse_document("z = 1\na = 2\nm = 3").unwrap();
        assert_eq!(doc.keys(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_error_span_on_second_line() {
        let err = parse_document("Array = [\nBool = flse\nDate = 2021-05-20").unwrap_err();
        assert_eq!(err.span().begin.line, 2);
        assert_eq!(err.span().begin.column, 1);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_unterminated_string_points_past_the_end() {
        let text = "String = 'Hello, World!";
        let err = parse_document(text).unwrap_err();
        assert_eq!(err.span().begin, Position::locate(text, text.len()));
        assert_eq!(err.span().begin, Position { line: 1, column: 24 });
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_document("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        assert!(parse_document("a = 1\na = 2").is_err());
    }
}
