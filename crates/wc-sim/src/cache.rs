//! The `RouteCache` driver and its read-only view.

use std::sync::Arc;

use wc_core::{CacheConfig, Generation, Koord, TilePos, VehicleRng};
use wc_store::GenerationStore;
use wc_way::{BacktracePlan, BacktraceWalker, RoadGrid, RouteHint, plan_backtrace};

use crate::{CacheObserver, CacheResult};

// ── PassStats ─────────────────────────────────────────────────────────────────

/// Summary of one completed pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// The generation written, stable once the pass returns.
    pub generation:   Generation,
    pub destinations: usize,
    /// Destinations with no road tile serving them.
    pub unserved:     usize,
    /// Destination entries newly recorded on a tile.
    pub steps:        u64,
    /// Of those, entries that ended up sharing a neighbour's set.
    pub linked:       u64,
    /// Sets allocated in the written generation.
    pub sets:         usize,
    /// Plan batches applied; each held at most `plan_batch` plans.
    pub batches:      usize,
}

// ── RouteReader ───────────────────────────────────────────────────────────────

/// Read-only view of one generation, handed to vehicles and observers.
///
/// Cheap to copy.  Lookups take the generation's read lock per call.
#[derive(Copy, Clone)]
pub struct RouteReader<'a> {
    grid:       &'a RoadGrid,
    store:      &'a GenerationStore,
    generation: Generation,
}

impl<'a> RouteReader<'a> {
    pub fn new(grid: &'a RoadGrid, store: &'a GenerationStore, generation: Generation) -> Self {
        Self { grid, store, generation }
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[inline]
    pub fn grid(&self) -> &'a RoadGrid {
        self.grid
    }

    #[inline]
    pub fn store(&self) -> &'a GenerationStore {
        self.store
    }

    /// Next tile from `pos` towards `dest`.  An unknown tile has no answer.
    pub fn next_hop(&self, pos: TilePos, dest: Koord, start_bucket: u8) -> RouteHint {
        match self.grid.tile(pos) {
            Some(tile) => tile.next_on_route_to(dest, self.generation, start_bucket, self.store, self.grid),
            None => RouteHint::Unknown,
        }
    }

    pub fn has_route(&self, pos: TilePos, dest: Koord) -> bool {
        self.next_hop(pos, dest, 0) != RouteHint::Unknown
    }

    /// [`next_hop`](Self::next_hop) with the start direction drawn from the
    /// vehicle's own RNG.
    pub fn next_hop_for_vehicle(&self, pos: TilePos, dest: Koord, rng: &mut VehicleRng) -> RouteHint {
        self.next_hop(pos, dest, rng.start_bucket())
    }
}

// ── RouteCache ────────────────────────────────────────────────────────────────

/// Owns a road grid and drives double-buffered recomputation of its route
/// tables.
///
/// Readers always see the stable generation.  A pass writes only the hot
/// generation and flips only after every destination applied cleanly, so a
/// failed or abandoned pass is never observable.
///
/// Create via [`RouteCacheBuilder`][crate::RouteCacheBuilder].
pub struct RouteCache {
    pub(crate) config: CacheConfig,
    pub(crate) grid:   RoadGrid,
    pub(crate) store:  Arc<GenerationStore>,
    pub(crate) stable: Generation,
    #[cfg(feature = "parallel")]
    pub(crate) pool:   Option<rayon::ThreadPool>,
}

impl RouteCache {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn grid(&self) -> &RoadGrid {
        &self.grid
    }

    pub fn store(&self) -> &Arc<GenerationStore> {
        &self.store
    }

    /// The generation vehicles read.
    #[inline]
    pub fn stable(&self) -> Generation {
        self.stable
    }

    /// The generation the next pass writes.
    #[inline]
    pub fn hot(&self) -> Generation {
        self.stable.other()
    }

    pub fn reader(&self) -> RouteReader<'_> {
        RouteReader::new(&self.grid, &self.store, self.stable)
    }

    /// Give up the grid, e.g. to save it.
    pub fn into_grid(self) -> RoadGrid {
        self.grid
    }

    // ── Passes ────────────────────────────────────────────────────────────

    /// Rebuild all routes to `destinations` into the hot generation, then
    /// make it stable.
    ///
    /// Destinations are planned and applied `plan_batch` at a time, so a
    /// pass holds at most one batch of plans.
    ///
    /// # Errors
    ///
    /// Allocation failures abort the pass.  The stable generation is left
    /// untouched and the partly written hot generation is discarded by the
    /// next pass.
    pub fn recompute<O: CacheObserver>(
        &mut self,
        destinations: &[Koord],
        observer:     &mut O,
    ) -> CacheResult<PassStats> {
        let mut stats = self.begin_pass(destinations.len(), observer);
        self.run_batches(destinations, &mut stats, observer)?;
        self.finish_pass(stats, observer)
    }

    /// Like [`recompute`](Self::recompute), running `foreground` against the
    /// current stable generation while the first batch is planned.
    ///
    /// With the `parallel` feature the two run concurrently via
    /// `rayon::join`; without it the foreground runs first.  Later batches
    /// write into the grid and start once the foreground has returned.
    pub fn recompute_alongside<O, F, T>(
        &mut self,
        destinations: &[Koord],
        observer:     &mut O,
        foreground:   F,
    ) -> CacheResult<(PassStats, T)>
    where
        O: CacheObserver,
        F: FnOnce(&RouteReader<'_>) -> T + Send,
        T: Send,
    {
        let mut stats = self.begin_pass(destinations.len(), observer);
        let (head, tail) = destinations.split_at(self.config.plan_batch.min(destinations.len()));
        let reader = self.reader();

        #[cfg(not(feature = "parallel"))]
        let (plans, fg) = {
            let fg = foreground(&reader);
            (self.plan_all(head), fg)
        };

        #[cfg(feature = "parallel")]
        let (plans, fg) = self.in_pool(|| {
            rayon::join(|| plan_parallel(&self.grid, head), || foreground(&reader))
        });

        self.run_batch(&plans, &mut stats, observer)?;
        drop(plans);
        self.run_batches(tail, &mut stats, observer)?;
        let stats = self.finish_pass(stats, observer)?;
        Ok((stats, fg))
    }

    /// Remove the stable routes to `dest` along the chain starting at `pos`.
    pub fn delete_route_to(&mut self, pos: TilePos, dest: Koord) -> CacheResult<usize> {
        Ok(wc_way::delete_route_to(&mut self.grid, pos, dest, self.stable, &self.store)?)
    }

    // ── Pass phases ───────────────────────────────────────────────────────

    fn begin_pass<O: CacheObserver>(&mut self, destinations: usize, observer: &mut O) -> PassStats {
        let hot = self.hot();
        observer.on_pass_start(hot, destinations);
        log::debug!("route pass into {hot}: {destinations} destinations");
        self.grid.clear_generation(hot);
        self.store.reset(hot);
        PassStats { generation: hot, destinations, ..PassStats::default() }
    }

    fn run_batches<O: CacheObserver>(
        &mut self,
        destinations: &[Koord],
        stats:        &mut PassStats,
        observer:     &mut O,
    ) -> CacheResult<()> {
        for batch in destinations.chunks(self.config.plan_batch.max(1)) {
            let plans = self.plan_all(batch);
            self.run_batch(&plans, stats, observer)?;
        }
        Ok(())
    }

    fn plan_all(&self, destinations: &[Koord]) -> Vec<BacktracePlan> {
        #[cfg(feature = "parallel")]
        {
            self.in_pool(|| plan_parallel(&self.grid, destinations))
        }

        #[cfg(not(feature = "parallel"))]
        {
            destinations.iter().map(|&d| plan_backtrace(&self.grid, d)).collect()
        }
    }

    #[cfg(feature = "parallel")]
    fn in_pool<T: Send>(&self, f: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    fn run_batch<O: CacheObserver>(
        &mut self,
        plans:    &[BacktracePlan],
        stats:    &mut PassStats,
        observer: &mut O,
    ) -> CacheResult<()> {
        if plans.is_empty() {
            return Ok(());
        }
        for plan in plans {
            observer.on_destination_planned(plan);
        }
        stats.batches += 1;
        if let Err(e) = self.apply(plans, stats) {
            log::warn!(
                "route pass into {} abandoned, {} stays stable: {e}",
                stats.generation, self.stable
            );
            return Err(e);
        }
        Ok(())
    }

    fn finish_pass<O: CacheObserver>(&mut self, mut stats: PassStats, observer: &mut O) -> CacheResult<PassStats> {
        let hot = stats.generation;
        stats.sets = self.store.set_count(hot);
        self.stable = hot;
        log::debug!(
            "route generation {hot} now stable: {} steps, {} linked, {} sets",
            stats.steps, stats.linked, stats.sets
        );
        observer.on_flip(&self.reader());
        observer.on_pass_end(&stats);
        Ok(stats)
    }

    fn apply(&mut self, plans: &[BacktracePlan], stats: &mut PassStats) -> CacheResult<()> {
        for plan in plans {
            if plan.is_empty() {
                stats.unserved += 1;
                continue;
            }
            let mut walker = BacktraceWalker::begin(&self.store, stats.generation)
                .with_linking(self.config.link_destinations);
            walker.apply(&mut self.grid, plan)?;
            let walk = walker.end();
            stats.steps += walk.steps;
            stats.linked += walk.linked;
        }
        Ok(())
    }
}

#[cfg(feature = "parallel")]
fn plan_parallel(grid: &RoadGrid, destinations: &[Koord]) -> Vec<BacktracePlan> {
    use rayon::prelude::*;

    destinations.par_iter().map(|&d| plan_backtrace(grid, d)).collect()
}
