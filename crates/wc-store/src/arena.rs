//! One generation's append-only arena of destination sets.

use wc_core::{Generation, Koord, SetIndex};

use crate::{DestinationSet, StoreError, StoreResult};

// ── SetHandle ─────────────────────────────────────────────────────────────────

/// Generation-tagged reference to a set in an [`Arena`].
///
/// The `epoch` records which incarnation of the arena the handle was issued
/// by.  [`Arena::reset`] bumps the epoch, so any handle that survived a reset
/// is detectably stale.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetHandle {
    generation: Generation,
    epoch:      u32,
    index:      SetIndex,
}

impl SetHandle {
    #[inline]
    pub fn generation(self) -> Generation {
        self.generation
    }

    #[inline]
    pub fn index(self) -> SetIndex {
        self.index
    }

    #[inline]
    pub fn epoch(self) -> u32 {
        self.epoch
    }
}

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Append-only sequence of destination sets for one generation.
///
/// Individual sets are never freed; [`reset`](Self::reset) discards the whole
/// arena.  Access always goes through a [`SetHandle`]; handles from another
/// generation or an earlier epoch trip a debug assertion and resolve to
/// nothing in release builds.
#[derive(Debug)]
pub struct Arena {
    generation: Generation,
    epoch:      u32,
    sets:       Vec<DestinationSet>,
    /// Maximum number of sets this arena may hold.
    limit:      Option<usize>,
}

impl Arena {
    pub fn new(generation: Generation, limit: Option<usize>) -> Self {
        Self { generation, epoch: 0, sets: Vec::new(), limit }
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[inline]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Number of sets allocated since the last reset.
    #[inline]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// `true` if `handle` was issued by this arena since its last reset.
    #[inline]
    pub fn is_live(&self, handle: SetHandle) -> bool {
        handle.generation == self.generation
            && handle.epoch == self.epoch
            && handle.index.index() < self.sets.len()
    }

    /// Append `set` and return its handle.
    ///
    /// # Errors
    ///
    /// [`StoreError::AllocationExhausted`] if the configured set limit is
    /// reached or the index space is full; [`StoreError::TryReserve`] if the
    /// allocator refuses to grow the arena.  Both are logged here.
    pub fn allocate(&mut self, set: DestinationSet) -> StoreResult<SetHandle> {
        let count = self.sets.len();
        let index = SetIndex::try_from(count).ok().filter(|i| *i != SetIndex::INVALID);
        let Some(index) = index.filter(|_| self.limit.is_none_or(|l| count < l)) else {
            log::error!(
                "route arena {} exhausted at {} destination sets",
                self.generation, count
            );
            return Err(StoreError::AllocationExhausted {
                generation: self.generation,
                sets:       count,
            });
        };
        if let Err(e) = self.sets.try_reserve(1) {
            log::error!("route arena {} failed to grow past {count} sets: {e}", self.generation);
            return Err(e.into());
        }
        self.sets.push(set);
        Ok(SetHandle { generation: self.generation, epoch: self.epoch, index })
    }

    /// Resolve `handle`, asserting liveness in debug builds.
    pub fn get(&self, handle: SetHandle) -> Option<&DestinationSet> {
        self.assert_live(handle);
        if handle.generation != self.generation || handle.epoch != self.epoch {
            return None;
        }
        self.sets.get(handle.index.index())
    }

    pub fn get_mut(&mut self, handle: SetHandle) -> Option<&mut DestinationSet> {
        self.assert_live(handle);
        if handle.generation != self.generation || handle.epoch != self.epoch {
            return None;
        }
        self.sets.get_mut(handle.index.index())
    }

    /// Handle for the set at `index`, if one has been allocated there since
    /// the last reset.
    pub fn handle_at(&self, index: SetIndex) -> Option<SetHandle> {
        (index.index() < self.sets.len())
            .then_some(SetHandle { generation: self.generation, epoch: self.epoch, index })
    }

    pub fn contains(&self, handle: SetHandle, dest: Koord) -> bool {
        self.get(handle).is_some_and(|s| s.contains(dest))
    }

    /// Insert `dest` into the set behind `handle`.  A stale handle inserts
    /// nothing and returns `false`.
    pub fn insert(&mut self, handle: SetHandle, dest: Koord) -> StoreResult<bool> {
        match self.get_mut(handle) {
            Some(set) => Ok(set.insert_unique(dest)?),
            None => Ok(false),
        }
    }

    pub fn remove(&mut self, handle: SetHandle, dest: Koord) -> bool {
        self.get_mut(handle).is_some_and(|s| s.remove(dest))
    }

    /// Discard every set and invalidate all outstanding handles.
    pub fn reset(&mut self) {
        self.sets = Vec::new();
        self.epoch = self.epoch.wrapping_add(1);
    }

    #[inline]
    fn assert_live(&self, handle: SetHandle) {
        debug_assert!(
            handle.generation == self.generation && handle.epoch == self.epoch,
            "stale route set handle {handle:?}: arena {} is at epoch {}",
            self.generation,
            self.epoch,
        );
    }
}
