//! Sorted destination set.

use std::collections::TryReserveError;

use wc_core::Koord;

/// Duplicate-free set of destinations, kept sorted for binary search.
///
/// Sets are small (tens of entries on a typical tile) so a sorted vector
/// beats a hash set on both memory and lookup time.  Every growing operation
/// goes through `try_reserve` so allocation failure surfaces as an error
/// instead of an abort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationSet {
    items: Vec<Koord>,
}

impl DestinationSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(n)?;
        Ok(Self { items })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn contains(&self, dest: Koord) -> bool {
        self.items.binary_search(&dest).is_ok()
    }

    /// Insert `dest` if absent.  Returns `true` iff it was added.
    pub fn insert_unique(&mut self, dest: Koord) -> Result<bool, TryReserveError> {
        match self.items.binary_search(&dest) {
            Ok(_) => Ok(false),
            Err(pos) => {
                self.items.try_reserve(1)?;
                self.items.insert(pos, dest);
                Ok(true)
            }
        }
    }

    /// Remove `dest` if present.  Returns `true` iff it was removed.
    pub fn remove(&mut self, dest: Koord) -> bool {
        match self.items.binary_search(&dest) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Add every member of `other` (linear merge of two sorted vectors).
    pub fn union_with(&mut self, other: &DestinationSet) -> Result<(), TryReserveError> {
        if other.is_empty() {
            return Ok(());
        }
        let mut merged = Vec::new();
        merged.try_reserve_exact(self.items.len() + other.items.len())?;
        let (a, b) = (&self.items, &other.items);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        self.items = merged;
        Ok(())
    }

    /// Make room for at least `n` members in total.
    pub fn reserve_total(&mut self, n: usize) -> Result<(), TryReserveError> {
        let extra = n.saturating_sub(self.items.len());
        self.items.try_reserve(extra)
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<Koord> {
        self.items.get(i).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Koord] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = Koord> + '_ {
        self.items.iter().copied()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<Koord> for DestinationSet {
    fn from_iter<I: IntoIterator<Item = Koord>>(iter: I) -> Self {
        let mut items: Vec<Koord> = iter.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }
}
