//! Framework error type.
//!
//! Sub-crates define their own error enums and convert lower-level errors
//! into them via `From` impls.  `WcError` covers the failures that can happen
//! before any cache state exists: bad configuration and out-of-range indices.

use thiserror::Error;

/// The top-level error type for `wc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("bucket index {0} out of range (expected 0..5)")]
    InvalidBucket(u8),

    #[error("generation {0} out of range (expected 0 or 1)")]
    InvalidGeneration(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `wc-core`.
pub type WcResult<T> = Result<T, WcError>;
