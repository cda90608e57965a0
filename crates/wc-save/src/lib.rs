//! `wc-save` — binary persistence of route tables.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`format`] | `SaveFormat`, `RecordLayout` (current and legacy layouts)      |
//! | [`wire`]   | Little-endian primitives: `u32`, destinations, tile positions  |
//! | [`codec`]  | `SlotWriter` / `SlotReader` for slot records and whole tiles   |
//! | [`grid`]   | `save_grid`, `load_grid` and their file-path variants          |
//! | [`error`]  | `SaveError`, `SaveResult<T>`                                   |
//!
//! # Record format
//!
//! One record per (table, bucket), all integers little-endian:
//!
//! ```text
//! count: u32
//!   0    -> empty
//!   1    -> x: i16, y: i16
//!   >= 2 -> (-2, index_hi) (-(1 + mode), index_lo) [count - 2 destinations]
//! ```
//!
//! `mode` 0..=4 marks a record that references a set saved earlier by its
//! bucket, 5 marks the record carrying the set.  A first field whose `x` is
//! not -2 is a flat legacy list of `count` destinations.

pub mod codec;
pub mod error;
pub mod format;
pub mod grid;
pub mod wire;


pub use codec::{SlotReader, SlotWriter};
pub use error::{SaveError, SaveResult};
pub use format::{RecordLayout, SaveFormat};
pub use grid::{load_grid, load_grid_file, save_grid, save_grid_file};
