//! Pass observer trait for progress reporting and data collection.

use wc_core::Generation;
use wc_way::BacktracePlan;

use crate::{PassStats, RouteReader};

/// Callbacks invoked by [`RouteCache::recompute`][crate::RouteCache::recompute]
/// at key points of a pass.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — pass logger
///
/// ```rust,ignore
/// struct PassLogger;
///
/// impl CacheObserver for PassLogger {
///     fn on_pass_end(&mut self, stats: &PassStats) {
///         println!("{}: {} steps, {} linked", stats.generation, stats.steps, stats.linked);
///     }
/// }
/// ```
pub trait CacheObserver {
    /// Called before the hot generation is cleared.
    fn on_pass_start(&mut self, _hot: Generation, _destinations: usize) {}

    /// Called once per destination after the plan phase, in destination
    /// order, before anything is written.
    fn on_destination_planned(&mut self, _plan: &BacktracePlan) {}

    /// Called right after the hot generation became stable.
    ///
    /// Provides a read-only view of the new stable routes so writers can dump
    /// them without the cache knowing about any output format.
    fn on_flip(&mut self, _reader: &RouteReader<'_>) {}

    /// Called once after a successful pass.  Not called when the pass fails.
    fn on_pass_end(&mut self, _stats: &PassStats) {}
}

/// A [`CacheObserver`] that does nothing.
pub struct NoopObserver;

impl CacheObserver for NoopObserver {}
