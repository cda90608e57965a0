//! Cache configuration.

use crate::{WcError, WcResult};

/// Top-level route cache configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and passed to the cache builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Master RNG seed for per-vehicle start directions.  The same seed
    /// always produces the same direction choices.
    pub seed: u64,

    /// Worker thread count for background passes.  `None` uses all logical
    /// cores.
    pub num_threads: Option<usize>,

    /// Share destination sets between consecutive tiles of a backtrace.
    /// When `false` every tile stores its own sets and a destination is
    /// moved out of any other bucket before it is inserted.
    pub link_destinations: bool,

    /// Upper bound on destination sets allocated per generation.  Reaching
    /// it fails the pass with an allocation error instead of growing.
    /// `None` means unbounded.
    pub max_sets_per_generation: Option<usize>,

    /// Destinations planned before their plans are applied.  Bounds how
    /// many backtrace plans a pass holds at once.
    pub plan_batch: usize,
}

impl CacheConfig {
    /// Reject settings the cache cannot run with.
    pub fn validate(&self) -> WcResult<()> {
        if self.num_threads == Some(0) {
            return Err(WcError::Config("num_threads must be at least 1".into()));
        }
        if self.max_sets_per_generation == Some(0) {
            return Err(WcError::Config(
                "max_sets_per_generation must be at least 1".into(),
            ));
        }
        if self.plan_batch == 0 {
            return Err(WcError::Config("plan_batch must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            seed:                    0,
            num_threads:             None,
            link_destinations:       true,
            max_sets_per_generation: None,
            plan_batch:              64,
        }
    }
}
