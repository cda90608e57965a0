//! `wc-store` — generation arenas and the per-bucket `RouteSlot` handle.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                        |
//! |-----------|-----------------------------------------------------------------|
//! | [`set`]   | `DestinationSet` — sorted, duplicate-free `Vec<Koord>`          |
//! | [`arena`] | `Arena` (one generation), `SetHandle`                           |
//! | [`store`] | `GenerationStore` — two `RwLock<Arena>`s with reset lifecycle   |
//! | [`slot`]  | `RouteSlot` (`Empty` / `Single` / `Shared`), `LinkMode`         |
//! | [`error`] | `StoreError`, `StoreResult<T>`                                  |
//!
//! # Memory model
//!
//! A slot holding one destination stores it inline.  Only slots with two or
//! more destinations reference a set in an arena, and consecutive tiles of a
//! backtrace share one set instead of each owning a copy.  Arenas are never
//! compacted: a whole generation is discarded at once with
//! [`GenerationStore::reset`], and every handle into it becomes stale (a
//! debug assertion fires if a stale handle is dereferenced).

pub mod arena;
pub mod error;
pub mod set;
pub mod slot;
pub mod store;

#[cfg(test)]
mod tests;

pub use arena::{Arena, SetHandle};
pub use error::{StoreError, StoreResult};
pub use set::DestinationSet;
pub use slot::{LinkMode, RouteSlot};
pub use store::GenerationStore;
