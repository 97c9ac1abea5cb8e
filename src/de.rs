//! Decoding TOML trees into Rust values.
//!
//! This module provides [`ValueDeserializer`], a `serde::Deserializer` that
//! reads from an existing [`Value`]. Parsing happens first (see
//! [`parse_document`](crate::parse_document)), so decoding never sees text.
//!
//! ## Kind checks
//!
//! Typed requests are strict: asking for an integer on a float node, or a
//! table on an array node, fails with [`Error::TypeMismatch`]. Errors raised
//! inside nested containers carry the key path that led to them.
//!
//! ```rust
//! use tomlkit::{from_str, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Server { port: u16 }
//!
//! #[derive(Deserialize, Debug)]
//! struct Config { servers: Vec<Server> }
//!
//! let err = from_str::<Config>("servers = [{ port = 80 }, { port = 'x' }]").unwrap_err();
//! assert_eq!(err.path().unwrap().to_string(), "servers[1].port");
//! ```

use crate::datetime::{DATETIME_NAME, DATE_NAME, TEMPORAL_FIELD, TIME_NAME};
use crate::number::INTEGER_NAME;
use crate::{Error, Kind, Result, Table, Value};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::{self, IntoDeserializer};
use std::iter;

/// Deserializer reading from a [`Value`] tree.
///
/// Containers are snapshotted as they are entered, so the tree is not
/// borrowed while a visitor runs.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.value.type_name())
    }

    fn integer(&self) -> Result<i64> {
        self.value.as_integer().ok_or_else(|| self.mismatch("integer"))
    }

    fn float(&self) -> Result<f64> {
        self.value.as_float().ok_or_else(|| self.mismatch("float"))
    }

    /// Hands a literal string to a visitor expecting one of the private
    /// newtypes.
    fn visit_literal<'de, V>(self, kind: Kind, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let literal = match (&self.value, kind) {
            (Value::Integer(i), Kind::Integer) => i.to_string(),
            (Value::Date(d), Kind::Date) => d.to_string(),
            (Value::Time(t), Kind::Time) => t.to_string(),
            (Value::DateTime(dt), Kind::DateTime) => dt.to_string(),
            _ => return Err(self.mismatch(kind.name())),
        };
        visitor.visit_string(literal)
    }
}

/// Single-entry map carrying a node literal under a private field name.
fn literal_map<'de, V>(field: &'static str, literal: String, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    let mut map = de::value::MapDeserializer::<_, Error>::new(iter::once((field, literal)));
    let value = visitor.visit_map(&mut map)?;
    map.end()?;
    Ok(value)
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Integer(i) if i.is_plain() => visitor.visit_i64(i.value()),
            Value::Integer(i) => literal_map(INTEGER_NAME, i.to_string(), visitor),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Date(d) => literal_map(TEMPORAL_FIELD, d.to_string(), visitor),
            Value::Time(t) => literal_map(TEMPORAL_FIELD, t.to_string(), visitor),
            Value::DateTime(dt) => literal_map(TEMPORAL_FIELD, dt.to_string(), visitor),
            Value::Array(a) => visit_array(a.to_vec(), visitor),
            Value::Table(t) => visit_table(&t, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Boolean(b) => visitor.visit_bool(b),
            _ => Err(self.mismatch("boolean")),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            _ => Err(self.mismatch("string")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    /// Accepts a base64 string or an array of integers in `0..=255`.
    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::String(s) => {
                let bytes = STANDARD
                    .decode(s)
                    .map_err(|e| <Error as de::Error>::custom(format!("invalid base64: {e}")))?;
                visitor.visit_byte_buf(bytes)
            }
            Value::Array(a) => {
                let mut bytes = Vec::with_capacity(a.len());
                for (index, item) in a.iter().enumerate() {
                    let byte = item
                        .as_integer()
                        .and_then(|i| u8::try_from(i).ok())
                        .ok_or_else(|| {
                            Error::type_mismatch("byte", item.type_name()).in_index(index)
                        })?;
                    bytes.push(byte);
                }
                visitor.visit_byte_buf(bytes)
            }
            _ => Err(self.mismatch("bytes")),
        }
    }

    /// A node that exists is always `Some`; absent keys never reach here.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("unit"))
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("unit"))
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match name {
            INTEGER_NAME => self.visit_literal(Kind::Integer, visitor),
            DATE_NAME => self.visit_literal(Kind::Date, visitor),
            TIME_NAME => self.visit_literal(Kind::Time, visitor),
            DATETIME_NAME => self.visit_literal(Kind::DateTime, visitor),
            _ => visitor.visit_newtype_struct(self),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(a) => visit_array(a.to_vec(), visitor),
            _ => Err(self.mismatch("array")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::Table(t) => visit_table(t, visitor),
            _ => Err(self.mismatch("table")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    /// Unit variants are strings; other variants are a table with exactly
    /// one key naming the variant.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::String(s) => visitor.visit_enum(s.clone().into_deserializer()),
            Value::Table(t) => {
                let mut entries = t.iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(<Error as de::Error>::custom(format!(
                        "expected a table with exactly one key, found {} keys",
                        t.len()
                    ))),
                }
            }
            _ => Err(self.mismatch("string or table")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

fn visit_array<'de, V>(items: Vec<Value>, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    let len = items.len();
    let mut seq = SeqDeserializer::new(items);
    let value = visitor.visit_seq(&mut seq)?;
    if seq.iter.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

fn visit_table<'de, V>(table: &Table, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    visitor.visit_map(MapDeserializer::new(table))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
    index: usize,
}

impl SeqDeserializer {
    fn new(items: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
            index: 0,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => {
                let index = self.index;
                self.index += 1;
                seed.deserialize(ValueDeserializer::new(value))
                    .map(Some)
                    .map_err(|e| e.in_index(index))
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(String, Value)>,
    pending: Option<(String, Value)>,
}

impl MapDeserializer {
    fn new(table: &Table) -> Self {
        MapDeserializer {
            iter: table.iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let decoded = seed
                    .deserialize(ValueDeserializer::new(Value::String(key.clone())))
                    .map_err(|e| e.in_key(key.clone()))?;
                self.pending = Some((key, value));
                Ok(Some(decoded))
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => seed
                .deserialize(ValueDeserializer::new(value))
                .map_err(|e| e.in_key(key)),
            None => Err(<Error as de::Error>::custom(
                "next_value_seed called before next_key_seed",
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant.clone())))?;
        Ok((
            variant,
            VariantDeserializer {
                variant: self.variant,
                value: self.value,
            },
        ))
    }
}

struct VariantDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Err(Error::type_mismatch("unit variant", self.value.type_name()).in_key(self.variant))
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        let variant = self.variant;
        seed.deserialize(ValueDeserializer::new(self.value))
            .map_err(|e| e.in_key(variant))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = self.variant;
        de::Deserializer::deserialize_seq(ValueDeserializer::new(self.value), visitor)
            .map_err(|e| e.in_key(variant))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = self.variant;
        de::Deserializer::deserialize_map(ValueDeserializer::new(self.value), visitor)
            .map_err(|e| e.in_key(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Date, Integer, IntegerFormat};
    use serde::Deserialize;
    use std::collections::HashMap;

    fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T> {
        T::deserialize(ValueDeserializer::new(value))
    }

    #[test]
    fn test_scalars_are_strict() {
        assert_eq!(decode::<i32>(Value::from(7)).unwrap(), 7);
        assert!(matches!(
            decode::<f64>(Value::from(7)).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
        assert!(matches!(
            decode::<String>(Value::from(true)).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
        assert_eq!(decode::<f32>(Value::from(0.5)).unwrap(), 0.5);
    }

    #[test]
    fn test_integer_out_of_range_for_target() {
        assert!(decode::<u8>(Value::from(300)).is_err());
        assert!(decode::<u32>(Value::from(-1)).is_err());
    }

    #[test]
    fn test_type_mismatch_names_both_kinds() {
        let err = decode::<Vec<i64>>(Value::from("text")).unwrap_err();
        match err {
            Error::TypeMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, "array");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_element_errors_carry_index() {
        let arr: Array = vec![Value::from(1), Value::from("two")].into();
        let err = decode::<Vec<i64>>(Value::from(arr)).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "[1]");
    }

    #[test]
    fn test_map_of_values() {
        let table = Table::new();
        table.insert("a", 1);
        table.insert("b", 2);
        let map: HashMap<String, i64> = decode(Value::from(table)).unwrap();
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_enum_forms() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum E {
            Plain,
            Wrapped(i64),
            Pair(i64, i64),
        }

        assert_eq!(decode::<E>(Value::from("Plain")).unwrap(), E::Plain);

        let wrapped = Table::new();
        wrapped.insert("Wrapped", 5);
        assert_eq!(decode::<E>(Value::from(wrapped)).unwrap(), E::Wrapped(5));

        let pair = Table::new();
        pair.insert("Pair", vec![1, 2]);
        assert_eq!(decode::<E>(Value::from(pair)).unwrap(), E::Pair(1, 2));

        let err = decode::<E>(Value::from("Missing")).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref value, .. } if value == "Missing"));
    }

    #[test]
    fn test_private_newtypes_check_kind() {
        let hex = Integer::new(255).with_format(IntegerFormat::Hexadecimal);
        let decoded: Integer = decode(Value::from(hex)).unwrap();
        assert_eq!(decoded.format(), IntegerFormat::Hexadecimal);

        let date: Date = decode(Value::from(Date::new(2021, 5, 20))).unwrap();
        assert_eq!(date, Date::new(2021, 5, 20));

        assert!(matches!(
            decode::<Date>(Value::from("2021-05-20")).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_value_round_trips_through_any() {
        let table = Table::new();
        table.insert("when", Date::new(2021, 5, 20));
        table.insert(
            "mask",
            Integer::new(0b1010).with_format(IntegerFormat::Binary),
        );
        let decoded: Value = decode(Value::from(table.clone())).unwrap();
        assert_eq!(decoded, Value::from(table));
        let mask = decoded.get("mask").and_then(|v| v.as_integer_value()).unwrap();
        assert_eq!(mask.format(), IntegerFormat::Binary);
    }

    #[test]
    fn test_bytes_from_base64_or_array() {
        #[derive(Debug, PartialEq)]
        struct Raw(Vec<u8>);
        impl<'de> Deserialize<'de> for Raw {
            fn deserialize<D: de::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
                struct V;
                impl<'de> de::Visitor<'de> for V {
                    type Value = Raw;
                    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                        f.write_str("bytes")
                    }
                    fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Raw, E> {
                        Ok(Raw(v))
                    }
                }
                d.deserialize_byte_buf(V)
            }
        }

        assert_eq!(
            decode::<Raw>(Value::from("aGVsbG8=")).unwrap(),
            Raw(b"hello".to_vec())
        );
        assert_eq!(
            decode::<Raw>(Value::from(vec![104, 105])).unwrap(),
            Raw(b"hi".to_vec())
        );
        let err = decode::<Raw>(Value::from(vec![1, 256])).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "[1]");
    }
}
