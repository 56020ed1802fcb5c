use std::collections::btree_map;
use std::collections::BTreeMap;

/// Symbol counts used to seed tree construction.
///
/// Backed by a `BTreeMap` so symbols always come out in ascending order,
/// which keeps heap seeding independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }

    /// Count every byte in `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let counts = bytes.iter().copied().fold(BTreeMap::new(), |mut acc, byte| {
            *acc.entry(byte).or_insert(0u64) += 1;
            acc
        });
        FrequencyTable { counts }
    }

    /// Set the count for `symbol`, returning the previous count if any.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, or `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        FrequencyTable {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(u8, u64); N]> for FrequencyTable {
    fn from(pairs: [(u8, u64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (u8, u64);
    type IntoIter = btree_map::IntoIter<u8, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
