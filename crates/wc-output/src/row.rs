//! Plain data rows and their extraction from a route reader.

use std::fmt;

use wc_core::{Bucket, Koord, TilePos};
use wc_store::{LinkMode, RouteSlot};
use wc_sim::RouteReader;

/// How a slot stores its destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSharing {
    /// A single destination held in the slot itself.
    Inline,
    /// Owns its arena set.
    Master,
    /// Shares the set of the neighbour slot in this bucket.
    Linked(Bucket),
}

impl fmt::Display for SlotSharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSharing::Inline => f.write_str("inline"),
            SlotSharing::Master => f.write_str("master"),
            SlotSharing::Linked(b) => write!(f, "linked:{b}"),
        }
    }
}

/// One non-empty bucket of one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDumpRow {
    pub tile:         TilePos,
    /// Table (generation) index.
    pub table:        u8,
    pub bucket:       Bucket,
    /// Members in sorted order.
    pub destinations: Vec<Koord>,
    pub sharing:      SlotSharing,
}

/// Rows for every non-empty bucket of the reader's generation, in grid
/// order then bucket order.
pub fn dump_rows(reader: &RouteReader<'_>) -> Vec<RouteDumpRow> {
    let generation = reader.generation();
    let arena = reader.store().read(generation);
    let mut rows = Vec::new();
    for tile in reader.grid().tiles() {
        for bucket in Bucket::ALL {
            let slot = tile.slot(generation, bucket);
            let destinations: Vec<Koord> = slot.iter(&arena).collect();
            if destinations.is_empty() {
                continue;
            }
            let sharing = match slot {
                RouteSlot::Shared { link: LinkMode::Linked(b), .. } => SlotSharing::Linked(b),
                RouteSlot::Shared { .. } => SlotSharing::Master,
                _ => SlotSharing::Inline,
            };
            rows.push(RouteDumpRow {
                tile: tile.pos(),
                table: generation.index() as u8,
                bucket,
                destinations,
                sharing,
            });
        }
    }
    rows
}
