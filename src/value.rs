//! Dynamic representation of TOML data.
//!
//! This module provides the [`Value`] enum, one node of a TOML tree. Scalars
//! are stored inline; arrays and tables are shared handles (see
//! [`Array`] and [`Table`]), so cloning a container value aliases it.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomlkit::{toml_value, Value};
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let table = toml_value!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(table.is_table());
//! ```
//!
//! ### Reading and Writing Through a Node
//!
//! ```rust
//! use tomlkit::{toml_value, Value};
//!
//! let doc = toml_value!({ "ports": [8080, 8081] });
//! let ports = doc.get("ports").unwrap();
//! assert_eq!(ports.get(1).and_then(|v| v.as_integer()), Some(8081));
//!
//! // containers are shared, so the write is visible through `doc`
//! assert!(ports.set(1, 9090));
//! assert_eq!(doc.get("ports").unwrap().get(1), Some(Value::from(9090)));
//!
//! // mismatched subscripts are no-ops
//! assert!(!doc.set(0, 1));
//! assert!(doc.get(0).is_none());
//! ```

use crate::datetime::{Temporal, TEMPORAL_FIELD};
use crate::number::INTEGER_NAME;
use crate::{Array, Date, DateTime, Integer, RenderOptions, Table, Time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single node of a TOML tree.
///
/// Equality is structural: containers compare by content, table key order
/// and rendering flags are ignored, and integers compare by numeric value.
#[derive(Clone, Debug)]
pub enum Value {
    Boolean(bool),
    Integer(Integer),
    Float(f64),
    String(String),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    Array(Array),
    Table(Table),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    Integer,
    Float,
    String,
    Date,
    Time,
    DateTime,
    Array,
    Table,
}

impl Kind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Date => "date",
            Kind::Time => "time",
            Kind::DateTime => "date-time",
            Kind::Array => "array",
            Kind::Table => "table",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::DateTime(_) => Kind::DateTime,
            Value::Array(_) => Kind::Array,
            Value::Table(_) => Kind::Table,
        }
    }

    /// The name of this value's kind, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_time(&self) -> bool {
        matches!(self, Value::Time(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlkit::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    /// assert_eq!(Value::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns its numeric value.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(i.value()),
            _ => None,
        }
    }

    /// If the value is an integer, returns it with its display format.
    #[inline]
    #[must_use]
    pub fn as_integer_value(&self) -> Option<Integer> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Integers are not converted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlkit::Value;
    ///
    /// assert_eq!(Value::from(2.5).as_float(), Some(2.5));
    /// assert_eq!(Value::from(2).as_float(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_time(&self) -> Option<Time> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// If the value is an array, returns its handle. Mutations through the
    /// handle are visible in the tree.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If the value is a table, returns its handle. Mutations through the
    /// handle are visible in the tree.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Looks up a child by array index or table key.
    ///
    /// Returns `None` when the index kind does not match the node (a key on
    /// an array, an index on a scalar) or the child is absent.
    #[must_use]
    pub fn get<I: Index>(&self, index: I) -> Option<Value> {
        index.index_into(self)
    }

    /// Writes a child by array index or table key.
    ///
    /// A key on a table inserts or replaces. An index on an array replaces an
    /// existing element. Anything else leaves the tree untouched and returns
    /// `false`.
    pub fn set<I: Index>(&self, index: I, value: impl Into<Value>) -> bool {
        index.store_into(self, value.into())
    }

    /// Copies this value; containers are duplicated recursively instead of
    /// aliased.
    #[must_use]
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Array(a) => Value::Array(a.deep_clone()),
            Value::Table(t) => Value::Table(t.deep_clone()),
            other => other.clone(),
        }
    }

    pub(crate) fn references(&self, ptr: *const ()) -> bool {
        match self {
            Value::Array(a) => a.references(ptr),
            Value::Table(t) => t.references(ptr),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// A subscript usable with [`Value::get`] and [`Value::set`]: `usize` for
/// arrays, `&str`/`String` for tables.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into(&self, value: &Value) -> Option<Value>;

    #[doc(hidden)]
    fn store_into(&self, value: &Value, child: Value) -> bool;
}

impl Index for usize {
    fn index_into(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Array(a) => a.get(*self),
            _ => None,
        }
    }

    fn store_into(&self, value: &Value, child: Value) -> bool {
        match value {
            Value::Array(a) => a.set(*self, child),
            _ => false,
        }
    }
}

impl Index for str {
    fn index_into(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Table(t) => t.get(self),
            _ => None,
        }
    }

    fn store_into(&self, value: &Value, child: Value) -> bool {
        match value {
            Value::Table(t) => {
                t.insert(self, child);
                true
            }
            _ => false,
        }
    }
}

impl Index for String {
    fn index_into(&self, value: &Value) -> Option<Value> {
        self.as_str().index_into(value)
    }

    fn store_into(&self, value: &Value, child: Value) -> bool {
        self.as_str().store_into(value, child)
    }
}

impl<T: Index + ?Sized> Index for &T {
    fn index_into(&self, value: &Value) -> Option<Value> {
        (**self).index_into(value)
    }

    fn store_into(&self, value: &Value, child: Value) -> bool {
        (**self).store_into(value, child)
    }
}

impl fmt::Display for Value {
    /// Formats the value as an inline TOML value (`[ 1, 2 ]`, `{ a = 1 }`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::inline_value(self, &RenderOptions::default()))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => i.serialize(serializer),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => d.serialize(serializer),
            Value::Time(t) => t.serialize(serializer),
            Value::DateTime(dt) => dt.serialize(serializer),
            Value::Array(a) => a.serialize(serializer),
            Value::Table(t) => t.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::from)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let array = Array::new();
                while let Some(elem) = seq.next_element::<Value>()? {
                    array.push(elem);
                }
                Ok(Value::Array(array))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let table = Table::new();
                let Some(first) = map.next_key::<String>()? else {
                    return Ok(Value::Table(table));
                };
                // temporal and formatted integer nodes arrive as a single
                // private field holding their literal
                if first == TEMPORAL_FIELD {
                    let literal: String = map.next_value()?;
                    return match Temporal::parse(&literal).map_err(de::Error::custom)? {
                        Temporal::Date(d) => Ok(Value::Date(d)),
                        Temporal::Time(t) => Ok(Value::Time(t)),
                        Temporal::DateTime(dt) => Ok(Value::DateTime(dt)),
                    };
                }
                if first == INTEGER_NAME {
                    let literal: String = map.next_value()?;
                    let integer: Integer = literal.parse().map_err(de::Error::custom)?;
                    return Ok(Value::Integer(integer));
                }

                table.insert(first, map.next_value::<Value>()?);
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_integer()
            .ok_or_else(|| crate::Error::type_mismatch("integer", value.type_name()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_float()
            .ok_or_else(|| crate::Error::type_mismatch("float", value.type_name()))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::type_mismatch("boolean", value.type_name()))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(Integer::new(i64::from(value)))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

impl From<Time> for Value {
    fn from(value: Time) -> Self {
        Value::Time(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into())
    }
}
