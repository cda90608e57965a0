//! Fluent builder for constructing a [`RouteCache`].

use std::sync::Arc;

use wc_core::{CacheConfig, Generation};
use wc_store::GenerationStore;
use wc_way::RoadGrid;

use crate::{CacheError, CacheResult, RouteCache};

/// Fluent builder for [`RouteCache`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                                  |
/// |----------------|----------------------------------------------------------|
/// | `.store(s)`    | New store bounded by `max_sets_per_generation`           |
/// | `.stable(g)`   | `Generation::FIRST`                                      |
///
/// Pass `.store(..)` and `.stable(..)` when resuming from a loaded save.
///
/// # Example
///
/// ```rust,ignore
/// let mut cache = RouteCacheBuilder::new(config, grid)
///     .store(Arc::clone(&store))
///     .stable(Generation::SECOND)
///     .build()?;
/// ```
pub struct RouteCacheBuilder {
    config: CacheConfig,
    grid:   RoadGrid,
    store:  Option<Arc<GenerationStore>>,
    stable: Generation,
}

impl RouteCacheBuilder {
    pub fn new(config: CacheConfig, grid: RoadGrid) -> Self {
        Self { config, grid, store: None, stable: Generation::FIRST }
    }

    /// Share an existing store, e.g. one the grid's routes were loaded into.
    pub fn store(mut self, store: Arc<GenerationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Which generation vehicles read from until the first pass completes.
    pub fn stable(mut self, generation: Generation) -> Self {
        self.stable = generation;
        self
    }

    /// Validate the config, build the worker pool, and return the cache.
    pub fn build(self) -> CacheResult<RouteCache> {
        self.config
            .validate()
            .map_err(|e| CacheError::Config(e.to_string()))?;

        let store = self.store.unwrap_or_else(|| {
            Arc::new(GenerationStore::with_limit(self.config.max_sets_per_generation))
        });

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("route-plan-{i}"))
                    .build()
                    .map_err(|e| CacheError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        Ok(RouteCache {
            config: self.config,
            grid:   self.grid,
            store,
            stable: self.stable,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
