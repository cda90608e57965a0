//! Versions of the route-table layout.

use wc_core::Generation;

use crate::{SaveError, SaveResult};

/// How one table of a tile is laid out on disk.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RecordLayout {
    /// `count` then `count` × (destination, next tile position).
    FlatTile,
    /// `count` then `count` × (destination, `u8` neighbour index).  Indices
    /// 0..=3 are N, E, S, W; anything else is the Local bucket.
    FlatNeighbour,
    /// Five slot records stored in N, S, E, W, Local order.
    ContainerNsew,
    /// Five slot records in bucket order.  The only layout ever written.
    Container,
}

/// Layout of the route tables inside a tile's save stream.
///
/// Supplied by the surrounding save framework, which knows the file version.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SaveFormat {
    table_slots: u8,
    layout:      RecordLayout,
}

impl SaveFormat {
    /// What [`SlotWriter`](crate::SlotWriter) produces.
    pub const CURRENT: SaveFormat = SaveFormat { table_slots: 2, layout: RecordLayout::Container };

    pub fn new(table_slots: u8, layout: RecordLayout) -> SaveResult<Self> {
        if !(1..=Generation::COUNT as u8).contains(&table_slots) {
            return Err(SaveError::TableSlots(table_slots));
        }
        Ok(Self { table_slots, layout })
    }

    #[inline]
    pub fn table_slots(&self) -> u8 {
        self.table_slots
    }

    #[inline]
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Generations stored in the file, in file order.
    pub fn generations(&self) -> impl Iterator<Item = Generation> + use<> {
        Generation::BOTH.into_iter().take(self.table_slots as usize)
    }
}

impl Default for SaveFormat {
    fn default() -> Self {
        Self::CURRENT
    }
}
