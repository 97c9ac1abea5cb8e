//! Shared, mutable TOML arrays.
//!
//! [`Array`] is a handle: cloning it (or the [`Value`] that wraps it) yields a
//! second handle to the same elements, and a mutation through either one is
//! visible through both. Use [`Array::deep_clone`] for an independent copy.
//!
//! ```rust
//! use tomlkit::{Array, Value};
//!
//! let arr: Array = vec!["Hello", "World"].into();
//! let alias = arr.clone();
//! alias.push(2024);
//! assert_eq!(arr.len(), 3);
//! assert_eq!(arr.get(2).and_then(|v| v.as_integer()), Some(2024));
//! ```

use crate::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ArrayData {
    items: Vec<Value>,
    multiline: bool,
}

/// A reference-counted handle to an ordered list of values.
///
/// Mutating methods take `&self`; the handle is single-threaded (`!Send`).
#[derive(Clone, Default)]
pub struct Array {
    inner: Rc<RefCell<ArrayData>>,
}

impl Array {
    /// Creates an empty array that renders inline (`[ 1, 2 ]`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array that renders one element per line.
    #[must_use]
    pub fn new_multiline() -> Self {
        let array = Self::new();
        array.set_multiline(true);
        array
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    /// Returns the element at `index`, or `None` when out of range.
    ///
    /// Container elements come back as handles aliasing the stored ones.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.borrow().items.get(index).cloned()
    }

    /// Replaces the element at `index`. Out-of-range indices are ignored and
    /// reported by returning `false`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        let value = self.adopt(value.into());
        let mut data = self.inner.borrow_mut();
        match data.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: impl Into<Value>) {
        let value = self.adopt(value.into());
        self.inner.borrow_mut().items.push(value);
    }

    /// Inserts at `index`, shifting later elements up. An index past the end
    /// appends.
    pub fn insert(&self, index: usize, value: impl Into<Value>) {
        let value = self.adopt(value.into());
        let mut data = self.inner.borrow_mut();
        let index = index.min(data.items.len());
        data.items.insert(index, value);
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// down. Returns `None` when out of range.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut data = self.inner.borrow_mut();
        if index < data.items.len() {
            Some(data.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().items.clear();
    }

    /// Iterates over a snapshot of the elements taken at call time.
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().items.clone()
    }

    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.inner.borrow().multiline
    }

    pub fn set_multiline(&self, multiline: bool) {
        self.inner.borrow_mut().multiline = multiline;
    }

    /// Copies this array and every container below it.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let data = self.inner.borrow();
        let copy = Array::new();
        {
            let mut target = copy.inner.borrow_mut();
            target.items = data.items.iter().map(Value::deep_clone).collect();
            target.multiline = data.multiline;
        }
        copy
    }

    /// Returns `true` when both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.inner) as *const ()
    }

    /// Whether the container at `ptr` is this array or lies below it.
    pub(crate) fn references(&self, ptr: *const ()) -> bool {
        self.as_ptr() == ptr || self.inner.borrow().items.iter().any(|v| v.references(ptr))
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

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.borrow().items == other.inner.borrow().items
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.borrow().items.iter()).finish()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::inline_value(
            &Value::Array(self.clone()),
            &crate::RenderOptions::default(),
        ))
    }
}

impl<T: Into<Value>> FromIterator<T> for Array {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let array = Array::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}

impl<T: Into<Value>> From<Vec<T>> for Array {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl IntoIterator for &Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.inner.borrow().items.iter())
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(array) => Ok(array),
            other => Err(serde::de::Error::invalid_type(
                serde::de::Unexpected::Other(other.type_name()),
                &"an array",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove_shift_elements() {
        let arr: Array = vec![
            Value::from("Hello"),
            Value::from("World"),
            Value::from(1234567890),
            Value::from(134509.25043),
            Value::from(true),
        ]
        .into();
        assert_eq!(arr.len(), 5);

        arr.push("Hello");
        assert_eq!(arr.len(), 6);
        assert_eq!(arr.get(5).unwrap().as_str(), Some("Hello"));

        assert_eq!(arr.remove(0).unwrap().as_str(), Some("Hello"));
        assert_eq!(arr.get(0).unwrap().as_str(), Some("World"));

        let expected: Array = vec![
            Value::from("World"),
            Value::from(1234567890),
            Value::from(134509.25043),
            Value::from(true),
            Value::from("Hello"),
        ]
        .into();
        assert_eq!(arr, expected);
    }

    #[test]
    fn test_out_of_range_is_absent() {
        let arr: Array = vec![1, 2].into();
        assert!(arr.get(2).is_none());
        assert!(arr.remove(7).is_none());
        assert!(!arr.set(2, 3));
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let arr: Array = vec![1, 2].into();
        arr.insert(10, 3);
        arr.insert(0, 0);
        let values: Vec<i64> = arr.iter().filter_map(|v| v.as_integer()).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_aliasing_and_deep_clone() {
        let arr: Array = vec![1].into();
        let alias = arr.clone();
        let copy = arr.deep_clone();
        alias.push(2);
        assert_eq!(arr.len(), 2);
        assert_eq!(copy.len(), 1);
        assert!(arr.ptr_eq(&alias));
        assert!(!arr.ptr_eq(&copy));
    }

    #[test]
    fn test_self_insertion_stores_a_copy() {
        let arr: Array = vec![1].into();
        arr.push(arr.clone());
        assert_eq!(arr.len(), 2);
        let nested = arr.get(1).unwrap();
        let nested = nested.as_array().unwrap();
        assert!(!nested.ptr_eq(&arr));
        assert_eq!(nested.len(), 1);
    }

    #[test]
    fn test_multiline_flag_does_not_affect_equality() {
        let a: Array = vec![1, 2].into();
        let b: Array = vec![1, 2].into();
        b.set_multiline(true);
        assert_eq!(a, b);
    }
}
