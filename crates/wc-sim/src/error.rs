use thiserror::Error;

use wc_store::StoreError;
use wc_way::WayError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("route cache configuration error: {0}")]
    Config(String),

    #[error("way error during pass: {0}")]
    Way(#[from] WayError),

    #[error("route store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
