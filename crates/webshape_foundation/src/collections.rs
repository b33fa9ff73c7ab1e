//! Persistent collections with structural sharing.
//!
//! A thin wrapper around the `im` crate's persistent structures, giving
//! declarations a name-keyed map that remembers the order in which entries
//! were authored.

use std::fmt;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persistent map from name to value that iterates in insertion order.
///
/// Cloning is O(1). Replacing an existing key keeps its original position.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderedMap<V: Clone> {
    order: im::Vector<String>,
    entries: im::HashMap<String, V>,
}

impl<V: Clone> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            order: im::Vector::new(),
            entries: im::HashMap::new(),
        }
    }
}

impl<V: Clone> OrderedMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Gets a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Gets a mutable reference to a value by name.
    ///
    /// Only the entry's path is copied; the rest stays shared.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(name)
    }

    /// Returns true if the map contains the name.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inserts a value, returning the previous value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), value);
        if previous.is_none() {
            self.order.push_back(name);
        }
        previous
    }

    /// Returns a new map with the value inserted.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: V) -> Self {
        let mut new = self.clone();
        new.insert(name, value);
        new
    }

    /// Removes a value by name.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let removed = self.entries.remove(name)?;
        if let Some(pos) = self.order.iter().position(|n| n == name) {
            self.order.remove(pos);
        }
        Some(removed)
    }

    /// Returns an iterator over `(name, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order.iter().filter_map(move |name| {
            self.entries
                .get(name)
                .map(|value| (name.as_str(), value))
        })
    }

    /// Returns an iterator over names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for OrderedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Clone + PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.entries == other.entries
    }
}

impl<V: Clone + Eq> Eq for OrderedMap<V> {}

impl<K: Into<String>, V: Clone> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
