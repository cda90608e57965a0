//! The two-generation store shared by every tile.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use wc_core::{Generation, Koord};

use crate::{Arena, DestinationSet, SetHandle, StoreResult};

/// Two independent arenas, one per [`Generation`], each behind its own lock.
///
/// # Locking discipline
///
/// Every mutating or allocating operation takes the generation's write lock
/// for that single call only.  The driver keeps one generation *hot*
/// (written by background passes) and the other *stable* (read by vehicles),
/// so read locks on the stable generation are never contended by a writer.
///
/// Locks are not poisoned in practice (no code panics while holding one),
/// but a poisoned lock is entered anyway: the cache is advisory and a
/// half-written arena only ever lives in the hot generation.
///
/// Share across threads with `Arc<GenerationStore>`.
#[derive(Debug)]
pub struct GenerationStore {
    arenas: [RwLock<Arena>; Generation::COUNT],
}

impl GenerationStore {
    /// Store with unbounded arenas.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Store whose arenas each hold at most `limit` sets.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            arenas: Generation::BOTH.map(|g| RwLock::new(Arena::new(g, limit))),
        }
    }

    /// Shared access to one generation's arena.
    pub fn read(&self, generation: Generation) -> RwLockReadGuard<'_, Arena> {
        self.arenas[generation.index()]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to one generation's arena.  Hold the guard for one
    /// logical operation only.
    pub fn write(&self, generation: Generation) -> RwLockWriteGuard<'_, Arena> {
        self.arenas[generation.index()]
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Discard all of `generation`'s sets at once.
    ///
    /// Every `RouteSlot` still pointing into `generation` becomes stale; the
    /// caller must clear those slots first.
    pub fn reset(&self, generation: Generation) {
        let mut arena = self.write(generation);
        log::debug!(
            "resetting route arena {generation} ({} sets, epoch {})",
            arena.set_count(),
            arena.epoch()
        );
        arena.reset();
    }

    pub fn set_count(&self, generation: Generation) -> usize {
        self.read(generation).set_count()
    }

    // ── Single-call convenience wrappers ──────────────────────────────────

    pub fn allocate(&self, generation: Generation, set: DestinationSet) -> StoreResult<SetHandle> {
        self.write(generation).allocate(set)
    }

    pub fn insert(&self, handle: SetHandle, dest: Koord) -> StoreResult<bool> {
        self.write(handle.generation()).insert(handle, dest)
    }

    pub fn contains(&self, handle: SetHandle, dest: Koord) -> bool {
        self.read(handle.generation()).contains(handle, dest)
    }

    pub fn remove(&self, handle: SetHandle, dest: Koord) -> bool {
        self.write(handle.generation()).remove(handle, dest)
    }

    /// Member `i` of the set behind `handle`.
    pub fn get(&self, handle: SetHandle, i: usize) -> Option<Koord> {
        self.read(handle.generation()).get(handle).and_then(|s| s.get(i))
    }
}

impl Default for GenerationStore {
    fn default() -> Self {
        Self::new()
    }
}
