//! `wc-sim` — double-buffered driver for the route cache.
//!
//! # Pass structure
//!
//! ```text
//! recompute(destinations):
//!   ① Clear     — empty the hot table of every tile, reset the hot arena.
//!   ② Plan      — backward search per destination of the next
//!                 `plan_batch`, read-only (parallel with the `parallel`
//!                 feature; the first batch optionally alongside a
//!                 foreground closure reading the stable side).
//!   ③ Apply     — replay the batch through a BacktraceWalker into the
//!                 hot generation, in destination order.  ② and ③ repeat
//!                 until every destination is applied.
//!   ④ Flip      — the hot generation becomes stable.  Skipped on error.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Runs the plan phase on Rayon's thread pool.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wc_core::CacheConfig;
//! use wc_sim::{NoopObserver, RouteCacheBuilder};
//!
//! let mut cache = RouteCacheBuilder::new(CacheConfig::default(), grid).build()?;
//! cache.recompute(&stops, &mut NoopObserver)?;
//! let hint = cache.reader().next_hop(tile, stop, 0);
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod observer;


pub use builder::RouteCacheBuilder;
pub use cache::{PassStats, RouteCache, RouteReader};
pub use error::{CacheError, CacheResult};
pub use observer::{CacheObserver, NoopObserver};
