//! Sets of key identifiers.

use std::fmt;

/// An ordered set of distinct key identifiers.
///
/// Keys keep the order in which they were first inserted, so iteration and
/// persisted output are stable. Inserting a key that is already present is a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeySet {
    keys: Vec<String>,
}

impl KeySet {
    /// Create an empty key set.
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Insert a key. Returns `true` if the key was not already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove a key. Returns `true` if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Append every key of `other` that is not already present.
    pub fn union_with(&mut self, other: &Self) {
        for key in &other.keys {
            if !self.contains(key) {
                self.keys.push(key.clone());
            }
        }
    }

    /// Concatenate two sets, keeping the keys of `self` first.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.union_with(other);
        merged
    }

    /// Remove all keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the set has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the keys in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// View the keys as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for KeySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl IntoIterator for KeySet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl fmt::Display for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keys.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_ignores_duplicates() {
        let mut keys = KeySet::new();
        assert!(keys.insert("space"));
        assert!(!keys.insert("space"));
        assert!(keys.insert("w"));
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.iter().collect::<Vec<_>>(), ["space", "w"]);
    }

    #[test]
    fn remove_absent_key() {
        let mut keys: KeySet = ["a", "b"].into_iter().collect();
        assert!(!keys.remove("c"));
        assert!(keys.remove("a"));
        assert!(!keys.contains("a"));
        assert!(keys.contains("b"));
    }

    #[test]
    fn union_keeps_order() {
        let left: KeySet = ["up", "w"].into_iter().collect();
        let right: KeySet = ["w", "kp8"].into_iter().collect();

        let merged = left.union(&right);
        assert_eq!(merged.iter().collect::<Vec<_>>(), ["up", "w", "kp8"]);
        // Inputs untouched
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn display() {
        let keys: KeySet = ["a", "mouse_l"].into_iter().collect();
        assert_eq!(keys.to_string(), "[a, mouse_l]");
        assert_eq!(KeySet::new().to_string(), "[]");
    }
}
