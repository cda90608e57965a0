//! `wc-output` — diagnostic dumps of the route cache.
//!
//! | Backend | Files created       |
//! |---------|---------------------|
//! | CSV     | `route_table.csv`   |
//!
//! The backend implements [`RouteTableWriter`] and is driven by
//! [`DumpObserver`], which implements `wc_sim::CacheObserver` and dumps the
//! newly stable generation after every flip.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wc_output::{CsvWriter, DumpObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = DumpObserver::new(writer);
//! cache.recompute(&stops, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DumpObserver;
pub use row::{RouteDumpRow, SlotSharing, dump_rows};
pub use writer::RouteTableWriter;
