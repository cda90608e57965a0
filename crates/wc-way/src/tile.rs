//! Per-tile route tables.

use wc_core::{Bucket, Direction, Generation, Koord, TilePos};
use wc_store::{Arena, GenerationStore, RouteSlot, StoreResult};

use crate::TileNeighbours;

/// Answer to "which way to `dest` from here?".
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RouteHint {
    /// Step onto this neighbouring tile.
    Next(TilePos),
    /// No further hop from this tile: the destination is served here or is
    /// known to be unreachable.
    Local,
    /// The cache has no answer; the caller must fall back to a full search.
    Unknown,
}

impl RouteHint {
    #[inline]
    pub fn next_tile(self) -> Option<TilePos> {
        match self {
            RouteHint::Next(p) => Some(p),
            _ => None,
        }
    }
}

/// Route slots of one road tile: one table per generation, five buckets per
/// table (N, E, S, W, Local).
///
/// Slots are plain `Copy` data; their arena sets live in a
/// [`GenerationStore`] that every method takes explicitly.  Table `g` only
/// ever references generation `g`.
#[derive(Clone, Debug)]
pub struct WayTile {
    pos:    TilePos,
    tables: [[RouteSlot; Bucket::COUNT]; Generation::COUNT],
}

impl WayTile {
    pub fn new(pos: TilePos) -> Self {
        Self {
            pos,
            tables: [[RouteSlot::Empty; Bucket::COUNT]; Generation::COUNT],
        }
    }

    #[inline]
    pub fn pos(&self) -> TilePos {
        self.pos
    }

    #[inline]
    pub fn slot(&self, generation: Generation, bucket: Bucket) -> RouteSlot {
        self.tables[generation.index()][bucket.index()]
    }

    #[inline]
    pub fn slot_mut(&mut self, generation: Generation, bucket: Bucket) -> &mut RouteSlot {
        &mut self.tables[generation.index()][bucket.index()]
    }

    #[inline]
    pub fn table(&self, generation: Generation) -> &[RouteSlot; Bucket::COUNT] {
        &self.tables[generation.index()]
    }

    /// Replace a whole table (used when loading).
    pub fn set_table(&mut self, generation: Generation, table: [RouteSlot; Bucket::COUNT]) {
        self.tables[generation.index()] = table;
    }

    /// Bucket for a hop from this tile to `next_tile`: its direction when the
    /// tiles are adjacent, otherwise `Local` (including `TilePos::INVALID`).
    pub fn bucket_for(&self, next_tile: TilePos) -> Bucket {
        self.pos
            .direction_to(next_tile)
            .map_or(Bucket::Local, Bucket::from_direction)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Next tile on the cached route to `dest`.
    ///
    /// The Local bucket is checked first and wins outright.  Otherwise the
    /// four directional buckets are scanned starting at `start_bucket`
    /// (mod 4); the first one claiming `dest` whose neighbour still exists
    /// is returned.  A claim without a neighbour is stale and skipped.
    pub fn next_on_route_to<N: TileNeighbours + ?Sized>(
        &self,
        dest:         Koord,
        generation:   Generation,
        start_bucket: u8,
        store:        &GenerationStore,
        neighbours:   &N,
    ) -> RouteHint {
        let arena = store.read(generation);
        let table = self.table(generation);
        if table[Bucket::Local.index()].contains(&arena, dest) {
            return RouteHint::Local;
        }
        let start = start_bucket as usize;
        for i in start..start + 4 {
            let dir = Direction::from_index_wrapping(i);
            if !table[dir.index()].contains(&arena, dest) {
                continue;
            }
            match neighbours.neighbour(self.pos, dir) {
                Some(next) => return RouteHint::Next(next),
                None => log::trace!("stale {dir} hint to {dest} on tile {}", self.pos),
            }
        }
        RouteHint::Unknown
    }

    /// `true` if the cache holds an answer for `dest` on this tile, either a
    /// next hop or a Local entry.
    pub fn has_route<N: TileNeighbours + ?Sized>(
        &self,
        dest:       Koord,
        generation: Generation,
        store:      &GenerationStore,
        neighbours: &N,
    ) -> bool {
        self.next_on_route_to(dest, generation, 0, store, neighbours) != RouteHint::Unknown
    }

    // ── Unlinked maintenance ──────────────────────────────────────────────

    /// Record that `dest` is reached via `next_tile`, without any sharing.
    ///
    /// `dest` is first moved out of whichever other bucket held it, so the
    /// tile keeps at most one direction per destination.
    pub fn add_route(
        &mut self,
        dest:       Koord,
        next_tile:  TilePos,
        generation: Generation,
        store:      &GenerationStore,
    ) -> StoreResult<bool> {
        let target = self.bucket_for(next_tile);
        let mut arena = store.write(generation);
        let table = &mut self.tables[generation.index()];
        if table[target.index()].contains(&arena, dest) {
            return Ok(false);
        }
        for bucket in Bucket::ALL {
            if bucket != target && table[bucket.index()].remove(&mut arena, dest) {
                break;
            }
        }
        table[target.index()].insert_unique(&mut arena, dest, None)
    }

    /// Remove `dest` from the first bucket holding it.
    pub fn remove_route(&mut self, dest: Koord, generation: Generation, store: &GenerationStore) -> bool {
        let mut arena = store.write(generation);
        self.tables[generation.index()]
            .iter_mut()
            .any(|slot| slot.remove(&mut arena, dest))
    }

    /// Empty one table ahead of a reset of its generation.
    pub fn clear_generation(&mut self, generation: Generation) {
        for slot in &mut self.tables[generation.index()] {
            slot.clear();
        }
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Sum of bucket sizes in one table.
    pub fn route_count(&self, generation: Generation, store: &GenerationStore) -> usize {
        let arena = store.read(generation);
        self.table(generation).iter().map(|s| s.count(&arena)).sum()
    }

    pub fn is_empty(&self, generation: Generation, store: &GenerationStore) -> bool {
        let arena = store.read(generation);
        self.table(generation).iter().all(|s| s.is_empty(&arena))
    }

    /// Every destination in one table, sorted and de-duplicated.
    pub fn destinations(&self, generation: Generation, store: &GenerationStore) -> Vec<Koord> {
        let guard = store.read(generation);
        let arena: &Arena = &guard;
        let mut all: Vec<Koord> = self
            .table(generation)
            .iter()
            .flat_map(|s| s.iter(arena))
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}
