//! Occurrence counting with deterministic ranking.
//!
//! A [`FrequencyTable`] remembers the order in which keys were first seen so
//! ranking can break count ties by first appearance instead of by hash or
//! key order.

use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key → count mapping that preserves first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: PartialEq> PartialEq for FrequencyTable<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Count `n` occurrences of `key`.
    pub fn add_n(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Count for `key`, 0 when never seen.
    pub fn get(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// The `n` most frequent entries, descending by count, ties by first-seen.
    ///
    /// `n == 0` yields nothing; `n` beyond the key count yields every entry.
    pub fn top_n(&self, n: usize) -> Vec<(K, u64)> {
        if n == 0 {
            return Vec::new();
        }
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// The single most frequent entry, if any.
    pub fn most_common(&self) -> Option<(&K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (key, count) in self.iter() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

/// Serialises as a map in first-seen order.
impl<K: Serialize> Serialize for FrequencyTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Serialise ranked `(key, count)` pairs as an ordered map.
pub(crate) fn serialize_ranked<K, S>(ranked: &[(K, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(ranked.len()))?;
    for (key, count) in ranked {
        map.serialize_entry(key, count)?;
    }
    map.end()
}

/// Count occurrences of each item.
pub fn count<K, I>(items: I) -> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    items.into_iter().collect()
}

/// Rank a table; see [`FrequencyTable::top_n`].
pub fn top_n<K: Eq + Hash + Clone>(table: &FrequencyTable<K>, n: usize) -> Vec<(K, u64)> {
    table.top_n(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        let table = count(["a", "b", "a", "c", "b", "a"]);
        assert_eq!(table.get(&"a"), 3);
        assert_eq!(table.get(&"b"), 2);
        assert_eq!(table.get(&"c"), 1);
        assert_eq!(table.get(&"z"), 0);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_top_n_tie_breaks_by_first_seen() {
        let table = count(["a", "b", "a", "c", "b", "a", "b"]);
        assert_eq!(top_n(&table, 1), vec![("a", 3)]);

        let table = count(["b", "a", "a", "c", "b", "a", "b"]);
        assert_eq!(top_n(&table, 1), vec![("b", 3)]);
        assert_eq!(top_n(&table, 2), vec![("b", 3), ("a", 3)]);
    }

    #[test]
    fn test_top_n_bounds() {
        let table = count(["x", "y", "y"]);
        assert!(top_n(&table, 0).is_empty());
        assert_eq!(top_n(&table, 10), vec![("y", 2), ("x", 1)]);
        assert!(top_n(&FrequencyTable::<String>::new(), 3).is_empty());
    }

    #[test]
    fn test_most_common() {
        let table = count(["sad", "happy", "happy", "sad"]);
        assert_eq!(table.most_common(), Some((&"sad", 2)));
        assert_eq!(FrequencyTable::<&str>::new().most_common(), None);
    }

    #[test]
    fn test_iter_first_seen_order() {
        let table = count(["z", "a", "m", "a"]);
        let keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let table = count(vec!["zebra".to_string(), "apple".to_string(), "zebra".to_string()]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zebra":2,"apple":1}"#);
    }
}
