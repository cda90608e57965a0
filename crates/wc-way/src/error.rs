//! Way-subsystem error type.

use thiserror::Error;

use wc_core::TilePos;
use wc_store::StoreError;

/// Errors produced by `wc-way`.
#[derive(Debug, Error)]
pub enum WayError {
    #[error("no road tile at {0}")]
    TileNotFound(TilePos),

    #[error("tiles {0} and {1} are not orthogonally adjacent")]
    NotAdjacent(TilePos, TilePos),

    #[error("route store error: {0}")]
    Store(#[from] StoreError),
}

pub type WayResult<T> = Result<T, WayError>;
