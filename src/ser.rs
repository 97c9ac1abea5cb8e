//! Encoding Rust values into TOML trees.
//!
//! This module provides [`ValueSerializer`], a `serde::Serializer` whose
//! output is a [`Value`]. Text output is produced afterwards by the renderer,
//! so anything that can be encoded can also be written with
//! [`to_string`](crate::to_string).
//!
//! ## Mapping
//!
//! - structs and maps become tables; keys must be strings
//! - sequences and tuples become arrays
//! - `None` fields are left out of their table; `None` anywhere else (an
//!   array element, the document root) is an [`Error::UnsupportedNone`]
//! - unit variants become strings; other variants become a single-key table
//!   named after the variant
//! - byte buffers become base64 strings
//! - [`Integer`](crate::Integer), [`Date`](crate::Date), [`Time`](crate::Time)
//!   and [`DateTime`](crate::DateTime) keep their TOML kind and display format
//!
//! ```rust
//! use tomlkit::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32, label: Option<String> }
//!
//! let value = to_value(&Point { x: 1, y: 2, label: None }).unwrap();
//! let table = value.as_table().unwrap();
//! assert_eq!(table.keys(), vec!["x", "y"]);
//! ```

use crate::datetime::{Temporal, DATETIME_NAME, DATE_NAME, TIME_NAME};
use crate::number::INTEGER_NAME;
use crate::{Array, Error, Integer, Result, Table, Value};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{ser, Serialize};

/// Serializer producing a [`Value`] tree.
pub struct ValueSerializer;

/// Collects array elements, optionally wrapped in a variant table.
pub struct SerializeVec {
    items: Array,
    variant: Option<&'static str>,
}

/// Collects table entries, optionally wrapped in a variant table.
pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::from)
            .map_err(|_| Error::encoding(format!("integer {v} is out of range for TOML")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::String(STANDARD.encode(v)))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::unsupported_none())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::encoding("unit values have no TOML representation"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::encoding(format!(
            "unit struct `{name}` has no TOML representation"
        )))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match name {
            INTEGER_NAME => {
                let literal = literal_of(value)?;
                let integer: Integer = literal.parse().map_err(<Error as ser::Error>::custom)?;
                Ok(Value::Integer(integer))
            }
            DATE_NAME | TIME_NAME | DATETIME_NAME => {
                let literal = literal_of(value)?;
                match Temporal::parse(&literal).map_err(<Error as ser::Error>::custom)? {
                    Temporal::Date(d) => Ok(Value::Date(d)),
                    Temporal::Time(t) => Ok(Value::Time(t)),
                    Temporal::DateTime(dt) => Ok(Value::DateTime(dt)),
                }
            }
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(ValueSerializer).map_err(|e| e.in_key(variant))?;
        Ok(Value::Table(Table::from_iter([(variant, inner)])))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None))
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

/// Extracts the literal string a private newtype carries.
fn literal_of<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    match value.serialize(ValueSerializer)? {
        Value::String(s) => Ok(s),
        other => Err(Error::encoding(format!(
            "expected a literal string, found {}",
            other.type_name()
        ))),
    }
}

fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => Value::Table(Table::from_iter([(name, value)])),
        None => value,
    }
}

impl SerializeVec {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeVec {
            items: Array::new(),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let index = self.items.len();
        let encoded = value.serialize(ValueSerializer).map_err(|e| {
            let e = e.in_index(index);
            match self.variant {
                Some(variant) => e.in_key(variant),
                None => e,
            }
        })?;
        self.items.push(encoded);
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Array(self.items))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            table: Table::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    /// Stores one entry. An absent (`None`) value leaves the key out.
    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        match value.serialize(ValueSerializer) {
            Ok(encoded) => {
                self.table.insert(key, encoded);
                Ok(())
            }
            Err(e) if e.is_own_none() => Ok(()),
            Err(e) => {
                let e = e.in_key(key);
                Err(match self.variant {
                    Some(variant) => e.in_key(variant),
                    None => e,
                })
            }
        }
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Table(self.table))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::encoding(format!(
                "table keys must be strings, found {}",
                other.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::encoding("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}
