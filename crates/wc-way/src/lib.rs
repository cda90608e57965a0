//! `wc-way` — road tiles and their cached direction hints.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`tile`]      | `WayTile` (2 tables × 5 buckets of `RouteSlot`), `RouteHint` |
//! | [`grid`]      | `RoadGrid`, `RoadGridBuilder`, `TileNeighbours`              |
//! | [`backtrace`] | `BacktraceWalker` — populates slots along a backward walk    |
//! | [`search`]    | `plan_backtrace` — backward BFS producing walker steps       |
//! | [`routes`]    | `delete_route_to`, `delete_all_routes_from_here`             |
//! | [`error`]     | `WayError`, `WayResult<T>`                                   |
//!
//! # Lookup model
//!
//! A vehicle on tile `T` heading for destination `D` asks `T` which bucket
//! claims `D`.  The answer is a one-hop hint, not a path: the next tile is
//! asked again when the vehicle gets there.  Hints may be stale; a bucket
//! whose neighbour no longer exists is skipped.

pub mod backtrace;
pub mod error;
pub mod grid;
pub mod routes;
pub mod search;
pub mod tile;


pub use backtrace::{BacktraceWalker, WalkStats};
pub use error::{WayError, WayResult};
pub use grid::{RoadGrid, RoadGridBuilder, TileNeighbours};
pub use routes::{delete_all_routes_from_here, delete_route_to};
pub use search::{plan_backtrace, BacktracePlan, BacktraceStep};
pub use tile::{RouteHint, WayTile};
