use std::collections::TryReserveError;

use thiserror::Error;
use wc_core::Generation;

/// Errors produced by `wc-store`.
///
/// Both variants mean the arena could not grow.  They are fatal to the pass
/// that hit them; the generation being written must not be exposed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("arena {generation} exhausted at {sets} destination sets")]
    AllocationExhausted { generation: Generation, sets: usize },

    #[error("allocation failed: {0}")]
    TryReserve(#[from] TryReserveError),
}

pub type StoreResult<T> = Result<T, StoreError>;
