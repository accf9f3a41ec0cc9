use std::{cmp::Reverse, collections::BTreeMap, fmt};

use derive_more::Deref;
use itertools::Itertools;

/// Occurrence counts of extracted keys.
///
/// Derefs to the underlying map for reading, but the only way to change it is
/// [`FrequencyStore::add`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deref)]
pub struct FrequencyStore(BTreeMap<String, usize>);

impl FrequencyStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Bump the count of `key` by one.
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        log::trace!("add: {key:?}");
        *self.0.entry(key).or_default() += 1;
    }

    /// Number of times `key` has been added, zero if never.
    pub fn count(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entries with the most common first, ties broken by key.
    pub fn by_count(&self) -> Vec<(&str, usize)> {
        self.0
            .iter()
            .map(|(k, &n)| (k.as_str(), n))
            .sorted_by_key(|&(k, n)| (Reverse(n), k))
            .collect()
    }
}

impl fmt::Display for FrequencyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, n) in self.by_count() {
            writeln!(f, "{key:32} {n}")?;
        }
        Ok(())
    }
}
