//! Shared, mutable TOML tables.
//!
//! [`Table`] wraps an [`IndexMap`] so keys keep their insertion order, which
//! is the order the renderer writes them in. Like [`Array`](crate::Array) it
//! is a handle: clones alias the same entries.
//!
//! Equality ignores key order and the inline/block rendering flag.
//!
//! ## Examples
//!
//! ```rust
//! use tomlkit::{Table, Value};
//!
//! let table = Table::new();
//! table.insert("name", "Alice");
//! table.insert("age", 30);
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str().map(String::from)), Some("Alice".into()));
//!
//! let parsed: Table = "age = 30\nname = 'Alice'".parse().unwrap();
//! assert_eq!(table, parsed);
//! ```

use crate::{ParseError, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Debug, Default)]
struct TableData {
    entries: IndexMap<String, Value>,
    inline: bool,
}

/// A reference-counted handle to an ordered map of string keys to values.
///
/// Mutating methods take `&self`; the handle is single-threaded (`!Send`).
#[derive(Clone, Default)]
pub struct Table {
    inner: Rc<RefCell<TableData>>,
}

impl Table {
    /// Creates an empty table that renders as a `[section]`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table that renders as `{ key = value }`.
    #[must_use]
    pub fn new_inline() -> Self {
        let table = Self::new();
        table.set_inline(true);
        table
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            inner: Rc::new(RefCell::new(TableData {
                entries: IndexMap::with_capacity(capacity),
                inline: false,
            })),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Returns the value stored under `key`.
    ///
    /// Container values come back as handles aliasing the stored ones.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().entries.get(key).cloned()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// A new key goes to the end; replacing a key keeps its position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let value = self.adopt(value.into());
        self.inner.borrow_mut().entries.insert(key.into(), value)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().entries.shift_remove(key)
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    /// Keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    /// Iterates over a snapshot of the entries, in insertion order.
    pub fn iter(&self) -> std::vec::IntoIter<(String, Value)> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.inner.borrow().inline
    }

    pub fn set_inline(&self, inline: bool) {
        self.inner.borrow_mut().inline = inline;
    }

    /// Copies this table and every container below it.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let data = self.inner.borrow();
        let copy = Table::with_capacity(data.entries.len());
        {
            let mut target = copy.inner.borrow_mut();
            target.entries = data
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_clone()))
                .collect();
            target.inline = data.inline;
        }
        copy
    }

    /// Returns `true` when both handles refer to the same table.
    #[must_use]
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.inner) as *const ()
    }

    /// Whether the container at `ptr` is this table or lies below it.
    pub(crate) fn references(&self, ptr: *const ()) -> bool {
        self.as_ptr() == ptr
            || self
                .inner
                .borrow()
                .entries
                .values()
                .any(|v| v.references(ptr))
    }

    // Storing an ancestor inside itself would create a cycle; store a copy.
    fn adopt(&self, value: Value) -> Value {
        if value.references(self.as_ptr()) {
            value.deep_clone()
        } else {
            value
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.borrow().entries == other.inner.borrow().entries
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.borrow().entries.iter()).finish()
    }
}

impl fmt::Display for Table {
    /// Renders the table as a TOML document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}

impl FromStr for Table {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_document(s)
    }
}

impl<K, V> FromIterator<(K, V)> for Table
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl IntoIterator for &Table {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.inner.borrow().entries.iter())
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::invalid_type(
                serde::de::Unexpected::Other(other.type_name()),
                &"a table",
            )),
        }
    }
}
