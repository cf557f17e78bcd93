//! Attribute store with dot-path addressing.
//!
//! A [`Map`] maps string keys to [`Value`]s. Values can themselves be maps,
//! and every accessor takes a path such as `"request.url"` that walks nested
//! maps one segment at a time.
//!
//! A `.` inside a literal key cannot be addressed: it is always read as a
//! path separator.
//!
//! A lookup whose intermediate segment is not a map finds nothing. The walk
//! never falls back to reading the remaining segments from the node it
//! stopped on, so `"name.url"` against `{"name": "tyler", "url": "x"}` is
//! `None`, not `"x"`.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{Error, Result};
use crate::value::Value;

/// Separator between segments of a path.
pub const PATH_SEPARATOR: char = '.';

/// Split a path into its parent segments and its final segment.
fn split_path(path: &str) -> (impl Iterator<Item = &str>, &str) {
    let (parents, last) = match path.rsplit_once(PATH_SEPARATOR) {
        Some((parents, last)) => (Some(parents), last),
        None => (None, path),
    };
    (
        parents
            .into_iter()
            .flat_map(|p| p.split(PATH_SEPARATOR)),
        last,
    )
}

/// A mapping from string keys to dynamically typed values.
///
/// ```
/// use stew::{Map, Value, map};
///
/// let mut m = map! { "name" => "Mat", "age" => 29 };
/// m.set("subobj.active", true);
///
/// assert_eq!(m.get("name"), Some(&Value::from("Mat")));
/// assert!(m.has("subobj.active"));
/// assert_eq!(m.get_bool("subobj.active"), Ok(true));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Map {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Map::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Create a map from a flat `key, value, key, value, ...` list.
    ///
    /// Prefer [`map!`](crate::map!) or [`Map::with`] where the pairs are known
    /// at compile time.
    ///
    /// # Panics
    ///
    /// Panics if `pairs` has an odd length, or if any key position holds a
    /// value that is not a string. Both indicate a mistake at the call site.
    #[must_use]
    pub fn from_pairs(pairs: Vec<Value>) -> Self {
        assert!(
            pairs.len() % 2 == 0,
            "Map::from_pairs needs an even number of values following the key, value pattern, got {}",
            pairs.len()
        );

        let mut map = Map::new();
        let mut iter = pairs.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            let key = match key {
                Value::Str(k) => k,
                other => panic!(
                    "Map::from_pairs keys must be strings, found {}",
                    other.type_name()
                ),
            };
            map.entries.insert(key, value);
        }
        map
    }

    /// Look up the value at `path`.
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// segment holds something other than a map, or when the stored value is
    /// [`Value::Null`].
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (parents, last) = split_path(path);
        let mut node = self;
        for segment in parents {
            node = node.entries.get(segment)?.as_map()?;
        }
        node.entries.get(last).filter(|v| !v.is_null())
    }

    /// Mutable form of [`Map::get`].
    #[must_use]
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        let (parents, last) = split_path(path);
        let mut node = self;
        for segment in parents {
            node = node.entries.get_mut(segment)?.as_map_mut()?;
        }
        node.entries.get_mut(last).filter(|v| !v.is_null())
    }

    fn typed<'a, T>(
        &'a self,
        path: &str,
        expected: &'static str,
        view: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(path).ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })?;
        view(value).ok_or_else(|| Error::UnexpectedType {
            path: path.to_string(),
            expected,
            found: value.type_name(),
        })
    }

    /// Get the nested map at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if nothing is stored at `path`, or
    /// `Error::UnexpectedType` if the stored value is not a map.
    pub fn get_map(&self, path: &str) -> Result<&Map> {
        self.typed(path, "map", Value::as_map)
    }

    /// Mutable form of [`Map::get_map`].
    ///
    /// # Errors
    ///
    /// Same as [`Map::get_map`].
    pub fn get_map_mut(&mut self, path: &str) -> Result<&mut Map> {
        let value = self.get_mut(path).ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })?;
        let found = value.type_name();
        value.as_map_mut().ok_or_else(|| Error::UnexpectedType {
            path: path.to_string(),
            expected: "map",
            found,
        })
    }

    /// Get the string at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if nothing is stored at `path`, or
    /// `Error::UnexpectedType` if the stored value is not a string.
    pub fn get_str(&self, path: &str) -> Result<&str> {
        self.typed(path, "string", Value::as_str)
    }

    /// Get the boolean at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::UnexpectedType`.
    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.typed(path, "bool", Value::as_bool)
    }

    /// Get the integer at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::UnexpectedType`.
    pub fn get_i64(&self, path: &str) -> Result<i64> {
        self.typed(path, "int", Value::as_i64)
    }

    /// Get the number at `path`. Integers widen to `f64`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::UnexpectedType`.
    pub fn get_f64(&self, path: &str) -> Result<f64> {
        self.typed(path, "number", Value::as_f64)
    }

    /// Get the array at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` or `Error::UnexpectedType`.
    pub fn get_array(&self, path: &str) -> Result<&[Value]> {
        self.typed(path, "array", Value::as_array)
    }

    /// Get the value at `path`, or `default` if nothing (or null) is stored
    /// there. Stored `false` and `0` are returned as-is.
    #[must_use]
    pub fn get_or_default<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Get the string at `path`, or `default` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if a non-string value is stored at `path`.
    pub fn get_str_or<'a>(&'a self, path: &str, default: &'a str) -> Result<&'a str> {
        match self.get_str(path) {
            Err(Error::NotFound { .. }) => Ok(default),
            other => other,
        }
    }

    /// Store `value` at `path`, creating intermediate maps as needed.
    ///
    /// An intermediate segment that holds a non-map value is replaced by a
    /// new empty map. Never fails.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        let (parents, last) = split_path(path);
        let mut node = &mut *self;
        for segment in parents {
            let slot = node
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Value::Map(Map::new()));
            if !matches!(slot, Value::Map(_)) {
                log::debug!(
                    "set {path:?}: replacing {} at segment {segment:?} with a map",
                    slot.type_name()
                );
                *slot = Value::Map(Map::new());
            }
            node = match slot {
                Value::Map(child) => child,
                _ => unreachable!("intermediate slot was just made a map"),
            };
        }
        node.entries.insert(last.to_string(), value.into());
        self
    }

    /// Whether a non-null value is stored at `path`.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Copy of this map. Mutating the copy never affects the original.
    #[must_use]
    pub fn copy(&self) -> Map {
        self.clone()
    }

    /// Copy of this map without the given top-level keys.
    #[must_use]
    pub fn exclude(&self, keys: &[&str]) -> Map {
        self.entries
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// New map with `other`'s top-level entries laid over a copy of this one.
    ///
    /// On conflicting keys `other` wins. Nested maps are replaced, not merged.
    #[must_use]
    pub fn merge(&self, other: &Map) -> Map {
        let mut merged = self.copy();
        merged.merge_here(other);
        merged
    }

    /// In-place form of [`Map::merge`].
    pub fn merge_here(&mut self, other: &Map) -> &mut Self {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
        self
    }

    /// Insert a top-level entry, returning the previous value.
    ///
    /// Unlike [`Map::set`], `key` is taken literally and never split.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a top-level entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Borrow the underlying key/value mapping.
    #[must_use]
    pub fn as_inner(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    /// Take the underlying key/value mapping.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl From<BTreeMap<String, Value>> for Map {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
