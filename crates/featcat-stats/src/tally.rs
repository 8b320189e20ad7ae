//! Frequency counting with discovery order
//!
//! A [`Tally`] counts occurrences of keys. Unlike a plain `BTreeMap` or
//! `HashMap`, it remembers the order in which each key was first seen, so
//! callers can reproduce "first appearance" ordering when they need it, and
//! it offers a deterministic descending-by-count ordering for ranked lists.
//!
//! # Ordering
//!
//! [`Tally::into_sorted_desc`] sorts by descending count. Keys with equal
//! counts are ordered by ascending key, which keeps output reproducible
//! regardless of input order.
//!
//! # Examples
//!
//! ```
//! use featcat_stats::tally::Tally;
//!
//! let mut tally = Tally::new();
//! tally.increment("Bureau");
//! tally.increment("Cash Flow");
//! tally.increment("Bureau");
//!
//! assert_eq!(tally.total(), 3);
//! assert_eq!(
//!     tally.into_sorted_desc(),
//!     vec![("Bureau", 2), ("Cash Flow", 1)]
//! );
//! ```

use std::{collections::HashMap, hash::Hash};

/// Counts of keyed values, remembering first-discovery order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }
}

impl<K> Tally<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Adds `n` occurrences of `key`.
    ///
    /// Adding zero still registers the key, so it appears in the output
    /// with a count of zero.
    pub fn add(&mut self, key: K, n: usize) {
        if let Some(count) = self.counts.get_mut(&key) {
            *count += n;
        } else {
            self.order.push(key.clone());
            self.counts.insert(key, n);
        }
    }

    /// Returns the count for `key`, or zero if it was never seen.
    #[must_use]
    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(key, count)` pairs in first-discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.order.iter().map(|key| (key, self.counts[key]))
    }

    /// Consumes the tally, returning `(key, count)` pairs in discovery order.
    #[must_use]
    pub fn into_discovery_order(mut self) -> Vec<(K, usize)> {
        self.order
            .into_iter()
            .map(|key| {
                let count = self.counts.remove(&key).unwrap_or(0);
                (key, count)
            })
            .collect()
    }
}

impl<K> Tally<K>
where
    K: Eq + Hash + Clone + Ord,
{
    /// Consumes the tally, returning `(key, count)` pairs sorted by
    /// descending count, ties broken by ascending key.
    #[must_use]
    pub fn into_sorted_desc(self) -> Vec<(K, usize)> {
        let mut entries = self.into_discovery_order();
        sort_desc_by_count(&mut entries, |(key, count)| (key, *count));
        entries
    }
}

impl<K> FromIterator<K> for Tally<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut tally = Self::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}

/// Sorts items by descending count, ties broken by ascending name.
///
/// `key_fn` projects each item onto its `(name, count)` pair. The sort is
/// stable, so items equal on both remain in their original relative order.
pub fn sort_desc_by_count<T, N, F>(items: &mut [T], key_fn: F)
where
    N: Ord + ?Sized,
    F: Fn(&T) -> (&N, usize),
{
    items.sort_by(|a, b| {
        let (a_name, a_count) = key_fn(a);
        let (b_name, b_count) = key_fn(b);
        b_count.cmp(&a_count).then_with(|| a_name.cmp(b_name))
    });
}
