//! Populating route slots along a backward walk.
//!
//! A walk starts at the tiles serving a destination and moves outwards
//! against the direction of travel.  At each tile the caller tells the
//! walker which neighbour the tile should step onto; the walker records the
//! destination in the matching bucket and hands the previously visited
//! tile's slot to [`RouteSlot::insert_unique`] as a sharing hint.
//!
//! ```text
//!   walker.add(&mut t0, d, t1_pos)   // t0 --E--> t1
//!   walker.inc()
//!   walker.add(&mut t_prev, d, t0_pos) ...
//! ```
//!
//! The walker holds no lock between calls.  It pins one generation at
//! [`begin`](BacktraceWalker::begin) and every `add` takes that generation's
//! write lock for the single insert.

use wc_core::{Bucket, Generation, Koord, TilePos};
use wc_store::{GenerationStore, LinkMode, RouteSlot, StoreResult};

use crate::{BacktracePlan, RoadGrid, WayError, WayResult, WayTile};

/// Counters for one walk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkStats {
    /// Calls to `add` that recorded a destination for the first time.
    pub steps:  u64,
    /// Of those, how many left the slot sharing a neighbour's set.
    pub linked: u64,
}

impl std::ops::AddAssign for WalkStats {
    fn add_assign(&mut self, rhs: Self) {
        self.steps += rhs.steps;
        self.linked += rhs.linked;
    }
}

/// The slot most recently written, remembered as a sharing hint.
#[derive(Copy, Clone, Debug)]
struct Visited {
    pos:    TilePos,
    slot:   RouteSlot,
    bucket: Bucket,
}

pub struct BacktraceWalker<'s> {
    store:      &'s GenerationStore,
    generation: Generation,
    linking:    bool,
    current:    Option<Visited>,
    last:       Option<Visited>,
    stats:      WalkStats,
}

impl<'s> BacktraceWalker<'s> {
    /// Start a walk writing into `generation`, with linking enabled.
    pub fn begin(store: &'s GenerationStore, generation: Generation) -> Self {
        Self {
            store,
            generation,
            linking: true,
            current: None,
            last: None,
            stats: WalkStats::default(),
        }
    }

    /// With linking off every `add` is a plain [`WayTile::add_route`].
    pub fn with_linking(mut self, linking: bool) -> Self {
        self.linking = linking;
        self
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Record on `tile` that `dest` is reached by stepping onto `next_tile`
    /// (`TilePos::INVALID` for the Local bucket).  Returns `true` iff `dest`
    /// was new to the bucket.
    ///
    /// The last visited slot is offered as a link only when it belongs to
    /// `next_tile`; sharing the set of an unrelated tile would be harmless
    /// but never saves memory.
    pub fn add(&mut self, tile: &mut WayTile, dest: Koord, next_tile: TilePos) -> StoreResult<bool> {
        let bucket = tile.bucket_for(next_tile);
        let added = if self.linking {
            let hint = self
                .last
                .filter(|v| v.pos == next_tile)
                .map(|v| (v.slot, v.bucket));
            let mut arena = self.store.write(self.generation);
            tile.slot_mut(self.generation, bucket)
                .insert_unique(&mut arena, dest, hint)?
        } else {
            tile.add_route(dest, next_tile, self.generation, self.store)?
        };

        let slot = tile.slot(self.generation, bucket);
        if added {
            self.stats.steps += 1;
            if matches!(slot.link_mode(), Some(LinkMode::Linked(_))) {
                self.stats.linked += 1;
            }
        }
        self.current = Some(Visited { pos: tile.pos(), slot, bucket });
        Ok(added)
    }

    /// Make the tile just written the sharing hint for the next `add`.
    pub fn inc(&mut self) {
        if let Some(v) = self.current.take() {
            self.last = Some(v);
        }
    }

    /// Use `tile`'s slot holding `dest` as the sharing hint, as if the walk
    /// had just come from there.  Used when the walk jumps back to a branch.
    pub fn revisit(&mut self, tile: &WayTile, dest: Koord) {
        let arena = self.store.read(self.generation);
        self.current = None;
        self.last = Bucket::ALL.into_iter().rev().find_map(|bucket| {
            let slot = tile.slot(self.generation, bucket);
            slot.contains(&arena, dest)
                .then_some(Visited { pos: tile.pos(), slot, bucket })
        });
    }

    /// Replay a planned backward walk over `grid`.
    pub fn apply(&mut self, grid: &mut RoadGrid, plan: &BacktracePlan) -> WayResult<()> {
        let dest = plan.destination;
        for step in &plan.steps {
            let contiguous = self.last.is_some_and(|v| v.pos == step.next);
            if step.next.is_valid() && !contiguous {
                if let Some(next) = grid.tile(step.next) {
                    self.revisit(next, dest);
                }
            }
            let tile = grid
                .tile_mut(step.tile)
                .ok_or(WayError::TileNotFound(step.tile))?;
            self.add(tile, dest, step.next)?;
            self.inc();
        }
        self.current = None;
        self.last = None;
        Ok(())
    }

    /// Finish the walk.
    pub fn end(self) -> WalkStats {
        self.stats
    }
}
