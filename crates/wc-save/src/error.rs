//! Save/load error type.

use thiserror::Error;

use wc_core::{Generation, TilePos};
use wc_store::StoreError;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A linked record names a set that no earlier record carried.
    #[error("corrupt save: linked record references unknown set {index} in {generation}")]
    CorruptSave { generation: Generation, index: u32 },

    #[error("corrupt save: unknown link mode marker {0}")]
    UnknownLinkMode(i16),

    #[error("save holds {found} tiles but the grid has {expected}")]
    TileCountMismatch { expected: usize, found: usize },

    #[error("save references tile {0} which is not in the grid")]
    UnknownTile(TilePos),

    #[error("unsupported table count {0} (expected 1 or 2)")]
    TableSlots(u8),

    #[error("route store error: {0}")]
    Store(#[from] StoreError),
}

pub type SaveResult<T> = Result<T, SaveError>;
