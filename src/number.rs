//! Integers with render-only display metadata.
//!
//! TOML integers may be written in decimal, hexadecimal, octal or binary. The
//! numeral base is not part of the value: `0xEA64` and `60004` are the same
//! integer. [`Integer`] carries the base (and hex digit case) alongside the
//! value so a tree built in code can be rendered the way it was written,
//! while equality and hashing only ever look at the numeric value.
//!
//! ```rust
//! use tomlkit::{Integer, IntegerFormat};
//!
//! let hex = Integer::new(0xEA64).with_format(IntegerFormat::Hexadecimal).with_uppercase(true);
//! assert_eq!(hex.to_string(), "0xEA64");
//! assert_eq!(hex, Integer::new(60004));
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Private newtype name used to carry a formatted integer literal through
/// the serde bridge without losing its display format.
pub(crate) const INTEGER_NAME: &str = "$__tomlkit_private_integer";

/// Numeral base used when rendering an [`Integer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IntegerFormat {
    #[default]
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl IntegerFormat {
    /// The literal prefix for this base, empty for decimal.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            IntegerFormat::Decimal => "",
            IntegerFormat::Hexadecimal => "0x",
            IntegerFormat::Octal => "0o",
            IntegerFormat::Binary => "0b",
        }
    }

    #[must_use]
    pub const fn radix(&self) -> u32 {
        match self {
            IntegerFormat::Decimal => 10,
            IntegerFormat::Hexadecimal => 16,
            IntegerFormat::Octal => 8,
            IntegerFormat::Binary => 2,
        }
    }
}

/// A 64-bit TOML integer plus its display format.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer {
    value: i64,
    format: IntegerFormat,
    uppercase: bool,
}

impl Integer {
    /// Creates a decimal integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Integer {
            value,
            format: IntegerFormat::Decimal,
            uppercase: false,
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: IntegerFormat) -> Self {
        self.format = format;
        self
    }

    /// Selects upper-case hexadecimal digits. Ignored for the other bases.
    #[must_use]
    pub const fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn format(&self) -> IntegerFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub const fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    /// Returns `true` when the integer carries no display metadata.
    #[inline]
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self.format, IntegerFormat::Decimal) && !self.uppercase
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::new(value)
    }
}

impl From<Integer> for i64 {
    fn from(value: Integer) -> Self {
        value.value
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // TOML has no signed hex/octal/binary literals.
        if self.value < 0 {
            return write!(f, "{}", self.value);
        }
        match (self.format, self.uppercase) {
            (IntegerFormat::Decimal, _) => write!(f, "{}", self.value),
            (IntegerFormat::Hexadecimal, true) => write!(f, "0x{:X}", self.value),
            (IntegerFormat::Hexadecimal, false) => write!(f, "0x{:x}", self.value),
            (IntegerFormat::Octal, _) => write!(f, "0o{:o}", self.value),
            (IntegerFormat::Binary, _) => write!(f, "0b{:b}", self.value),
        }
    }
}

/// Error returned when a string is not a TOML integer literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid integer literal `{0}`")]
pub struct IntegerParseError(String);

impl FromStr for Integer {
    type Err = IntegerParseError;

    /// Parses a TOML integer literal, recording its base and digit case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IntegerParseError(s.to_string());
        let format = match s.get(..2) {
            Some("0x") => IntegerFormat::Hexadecimal,
            Some("0o") => IntegerFormat::Octal,
            Some("0b") => IntegerFormat::Binary,
            _ => IntegerFormat::Decimal,
        };
        let digits = &s[format.prefix().len()..];
        // TOML has no signed hex/octal/binary literals
        if format != IntegerFormat::Decimal && digits.starts_with(['+', '-']) {
            return Err(invalid());
        }
        let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
        if cleaned.is_empty() {
            return Err(invalid());
        }
        let value = i64::from_str_radix(&cleaned, format.radix()).map_err(|_| invalid())?;
        let uppercase = format == IntegerFormat::Hexadecimal
            && cleaned.chars().any(|c| c.is_ascii_uppercase());
        Ok(Integer {
            value,
            format,
            uppercase,
        })
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_plain() {
            serializer.serialize_i64(self.value)
        } else {
            serializer.serialize_newtype_struct(INTEGER_NAME, &self.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IntegerVisitor;

        impl<'de> de::Visitor<'de> for IntegerVisitor {
            type Value = Integer;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML integer")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Integer, E> {
                Ok(Integer::new(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Integer, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Integer::new)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_str<E>(self, value: &str) -> Result<Integer, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Integer, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }

            /// Formatted integers reach self-describing consumers (flatten,
            /// untagged) as a map with one private field.
            fn visit_map<A>(self, mut map: A) -> Result<Integer, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                match map.next_key::<String>()? {
                    Some(key) if key == INTEGER_NAME => {
                        let literal: String = map.next_value()?;
                        literal.parse().map_err(de::Error::custom)
                    }
                    _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
                }
            }
        }

        deserializer.deserialize_newtype_struct(INTEGER_NAME, IntegerVisitor)
    }
}
