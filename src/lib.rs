//! # tomlkit
//!
//! A mutable TOML value tree with a Serde bridge.
//!
//! ## What's in the box?
//!
//! - **Value tree**: [`Value`] nodes with shared, mutable [`Array`] and
//!   [`Table`] containers. Cloning a container aliases it; mutations through
//!   any handle are visible through every other one.
//! - **Text round-trip**: [`parse_document`] turns TOML text into a
//!   [`Table`] and [`render`] turns it back. Parse errors carry a 1-indexed
//!   line/column [`Span`].
//! - **Serde bridge**: [`to_value`]/[`to_table`] encode any `Serialize` type
//!   into a tree, [`from_value`]/[`from_table`] decode trees into any
//!   `Deserialize` type. Errors carry the key path that led to them.
//! - **Display formats**: [`Integer`] remembers whether it should be written
//!   as decimal, `0x`, `0o` or `0b`, without affecting equality.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tomlkit = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Encoding and Decoding
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tomlkit::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let toml = to_string(&user).unwrap();
//! assert_eq!(toml, "id = 123\nname = 'Alice'\nactive = true\n");
//!
//! let user_back: User = from_str(&toml).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Editing a Document
//!
//! ```rust
//! use tomlkit::{parse_document, render, Value};
//!
//! let doc = parse_document("[server]\nports = [8080]").unwrap();
//! let server = doc.get("server").unwrap();
//! server.get("ports").unwrap().as_array().unwrap().push(8081);
//! server.set("host", "localhost");
//!
//! assert_eq!(
//!     render(&doc),
//!     "[server]\nports = [ 8080, 8081 ]\nhost = 'localhost'\n"
//! );
//! ```
//!
//! ## Threading
//!
//! Containers use `Rc<RefCell<..>>` and are neither `Send` nor `Sync`. Build
//! and use a tree on one thread; move plain Rust values across threads
//! instead.
//!
//! ## Logging
//!
//! The crate emits `debug!`/`trace!` records through the [`log`] facade when
//! parsing and rendering. Install any logger to see them.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding a struct and reading it back
//! - **`dynamic_values.rs`** - building and editing trees by hand
//! - **`display_formats.rs`** - hexadecimal, octal and binary integers
//!
//! Run any example with: `cargo run --example <name>`

mod array;
pub mod datetime;
pub mod de;
pub mod error;
pub mod macros;
pub mod number;
pub mod options;
mod parse;
pub mod path;
mod render;
pub mod ser;
mod table;
pub mod value;

pub use array::Array;
pub use datetime::{Date, DateTime, DatetimeError, Offset, Time};
pub use de::ValueDeserializer;
pub use error::{Error, ParseError, Position, Result, Span};
pub use number::{Integer, IntegerFormat, IntegerParseError};
pub use options::RenderOptions;
pub use parse::parse_document;
pub use path::{KeyPath, PathSegment};
pub use render::{render, render_with_options};
pub use ser::ValueSerializer;
pub use table::Table;
pub use value::{Index, Kind, Value};

use serde::{Deserialize, Serialize};

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use tomlkit::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TOML representation (unit values,
/// `None` outside a struct field, out-of-range `u64`, non-string map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer).map_err(|err| {
        log::debug!("encode failed: {err}");
        err
    })
}

/// Convert any `T: Serialize` to a document [`Table`].
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `value` does not encode to a table, plus
/// every error [`to_value`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_table<T>(value: &T) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Table(table) => Ok(table),
        other => Err(Error::encoding(format!(
            "a TOML document must be a table, found {}",
            other.type_name()
        ))),
    }
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// # Examples
///
/// ```rust
/// use tomlkit::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded as a document (see
/// [`to_table`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RenderOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with indented sections and
/// multi-line arrays.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded as a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RenderOptions::pretty())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded as a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: RenderOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let table = to_table(value)?;
    Ok(render_with_options(&table, &options))
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error when the tree's shape does not match `T`; the error's
/// [`path`](Error::path) names the offending node.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value)).map_err(|err| {
        log::debug!("decode failed: {err}");
        err
    })
}

/// Deserialize an instance of type `T` from a document [`Table`].
///
/// The table is read, not consumed: the caller's handle stays valid.
///
/// # Errors
///
/// Returns an error when the table's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_table<T>(table: &Table) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_value(Value::Table(table.clone()))
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use tomlkit::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid TOML, or a decode error
/// if it cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let table = parse_document(s)?;
    from_table(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let toml = to_string(&point).unwrap();
        let point_back: Point = from_str(&toml).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let toml = to_string(&user()).unwrap();
        assert_eq!(
            toml,
            "id = 123\nname = 'Alice'\nactive = true\ntags = [ 'admin', 'user' ]\n"
        );
        let user_back: User = from_str(&toml).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let toml = to_string_pretty(&user()).unwrap();
        assert!(toml.contains("tags = [\n    'admin',\n    'user',\n]"));
        let user_back: User = from_str(&toml).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value.get("x"), Some(Value::from(1)));
        assert_eq!(value.get("y"), Some(Value::from(2)));
    }

    #[test]
    fn test_document_root_must_be_table() {
        let err = to_string(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
        assert!(to_value(&vec![1, 2, 3]).unwrap().is_array());
    }

    #[test]
    fn test_from_table_leaves_table_usable() {
        let table = to_table(&Point { x: 3, y: 4 }).unwrap();
        let point: Point = from_table(&table).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = from_str::<Point>("x = ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.path().is_none());
    }
}
