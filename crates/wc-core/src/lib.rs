//! `wc-core` — foundational types for the `waycache` route hint cache.
//!
//! This crate is a dependency of every other `wc-*` crate.  It has no `wc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `TileId`, `SetIndex`                     |
//! | [`geo`]         | `Koord` (destination), `TilePos`, `Direction`         |
//! | [`bucket`]      | `Bucket` (N/E/S/W/Local), `Generation`                |
//! | [`config`]      | `CacheConfig`                                         |
//! | [`rng`]         | `VehicleRng` (per-vehicle start direction)            |
//! | [`error`]       | `WcError`, `WcResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod bucket;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bucket::{Bucket, Generation};
pub use config::CacheConfig;
pub use error::{WcError, WcResult};
pub use geo::{Direction, Koord, TilePos};
pub use ids::{SetIndex, TileId, VehicleId};
pub use rng::VehicleRng;
