//! Slot and tile records.
//!
//! Sharing survives a round trip through the `(generation, index)` key in
//! each shared record's header.  The writer emits the full set the first
//! time it meets a set and a bare reference every later time, so a reader
//! replaying records in file order always sees the set before any
//! reference to it.  Indices are remapped on load: the reader allocates
//! fresh sets and keeps a key → handle table for the references.

use std::io::{Read, Write};

use rustc_hash::{FxHashMap, FxHashSet};

use wc_core::{Bucket, Direction, Generation, Koord};
use wc_store::{Arena, DestinationSet, GenerationStore, LinkMode, RouteSlot, SetHandle};

use crate::wire::{read_koord, read_tile_pos, read_u32, read_u8, write_koord, write_u32};
use crate::{RecordLayout, SaveError, SaveFormat, SaveResult};

/// Header `x` of the first field of a shared record.
const SHARED_MARKER: i16 = -2;
/// `mode` of a record carrying its set.  0..=4 are link buckets.
const MODE_MASTER: i16 = 5;

pub(crate) fn split_index(index: u32) -> (i16, i16) {
    ((index >> 16) as u16 as i16, (index & 0xFFFF) as u16 as i16)
}

pub(crate) fn join_index(hi: i16, lo: i16) -> u32 {
    (u32::from(hi as u16) << 16) | u32::from(lo as u16)
}

// ── SlotWriter ────────────────────────────────────────────────────────────────

/// Writes slot records, remembering which sets have been written in full.
///
/// Use one writer for everything that ends up in the same file.
#[derive(Default)]
pub struct SlotWriter {
    written: FxHashSet<SetHandle>,
}

impl SlotWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct sets written in full so far.
    pub fn sets_written(&self) -> usize {
        self.written.len()
    }

    /// Write one record.
    ///
    /// The first record of a set is its master.  Later records reference it
    /// and carry their link direction.  A slot that was master in memory but
    /// is written as a reference has no link direction, so its own `bucket`
    /// is stored instead and it reloads as `Linked(bucket)`.  Only the link
    /// direction is lost this way; the slot still shares the same set.
    ///
    /// Shared slots with fewer than two members are written as plain
    /// empty or single records.
    pub fn write_slot<W: Write>(
        &mut self,
        w:      &mut W,
        slot:   &RouteSlot,
        bucket: Bucket,
        arena:  &Arena,
    ) -> SaveResult<()> {
        let members = slot.as_slice(arena);
        let handle = match slot.handle() {
            Some(h) if members.len() >= 2 => h,
            _ => {
                write_u32(w, members.len() as u32)?;
                if let Some(&k) = members.first() {
                    write_koord(w, k)?;
                }
                return Ok(());
            }
        };

        let first = self.written.insert(handle);
        let mode = if first {
            MODE_MASTER
        } else {
            match slot.link_mode() {
                Some(LinkMode::Linked(b)) => b.index() as i16,
                _ => bucket.index() as i16,
            }
        };
        let count = if first { members.len() as u32 + 2 } else { 2 };
        let (hi, lo) = split_index(handle.index().0);

        write_u32(w, count)?;
        write_koord(w, Koord::new(SHARED_MARKER, hi))?;
        write_koord(w, Koord::new(-1 - mode, lo))?;
        if first {
            for &k in members {
                write_koord(w, k)?;
            }
        }
        Ok(())
    }

    /// Write every table of `tile` in the current layout.
    pub fn write_tile<W: Write>(
        &mut self,
        w:     &mut W,
        tile:  &wc_way::WayTile,
        store: &GenerationStore,
    ) -> SaveResult<()> {
        for generation in SaveFormat::CURRENT.generations() {
            let arena = store.read(generation);
            for bucket in Bucket::ALL {
                self.write_slot(w, &tile.slot(generation, bucket), bucket, &arena)?;
            }
        }
        Ok(())
    }
}

// ── SlotReader ────────────────────────────────────────────────────────────────

/// Reads slot records written by [`SlotWriter`] or an older layout.
///
/// Use one reader for a whole file: references are resolved against every
/// set read so far.
pub struct SlotReader {
    format:  SaveFormat,
    handles: FxHashMap<(Generation, u32), SetHandle>,
}

impl SlotReader {
    pub fn new(format: SaveFormat) -> Self {
        Self { format, handles: FxHashMap::default() }
    }

    #[inline]
    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Read one record into generation `generation`'s arena.
    pub fn read_slot<R: Read>(
        &mut self,
        r:          &mut R,
        generation: Generation,
        arena:      &mut Arena,
    ) -> SaveResult<RouteSlot> {
        let count = read_u32(r)?;
        match count {
            0 => return Ok(RouteSlot::Empty),
            1 => return Ok(RouteSlot::Single(read_koord(r)?)),
            _ => {}
        }

        let first = read_koord(r)?;
        let second = read_koord(r)?;
        if first.x != SHARED_MARKER {
            return read_flat(r, arena, count, [first, second]);
        }

        let index = join_index(first.y, second.y);
        let mode = -1 - i32::from(second.x);
        if mode == i32::from(MODE_MASTER) {
            let set = (2..count)
                .map(|_| read_koord(r))
                .collect::<std::io::Result<DestinationSet>>()?;
            let handle = arena.allocate(set)?;
            if self.handles.insert((generation, index), handle).is_some() {
                log::warn!("set {index} in {generation} saved in full more than once; keeping the last");
            }
            return Ok(RouteSlot::Shared { handle, link: LinkMode::Master });
        }

        let bucket = u8::try_from(mode)
            .ok()
            .and_then(|m| Bucket::from_index(m).ok())
            .ok_or(SaveError::UnknownLinkMode(second.x))?;
        let Some(&handle) = self.handles.get(&(generation, index)) else {
            log::warn!("linked route record references set {index} in {generation} before it was saved");
            return Err(SaveError::CorruptSave { generation, index });
        };
        if count > 2 {
            log::warn!("dropping {} destinations trailing a linked route record", count - 2);
            for _ in 2..count {
                read_koord(r)?;
            }
        }
        Ok(RouteSlot::Shared { handle, link: LinkMode::Linked(bucket) })
    }

    /// Read every table the format holds into `tile`, replacing its contents.
    pub fn read_tile<R: Read>(
        &mut self,
        r:     &mut R,
        tile:  &mut wc_way::WayTile,
        store: &GenerationStore,
    ) -> SaveResult<()> {
        for generation in self.format.generations() {
            tile.clear_generation(generation);
            match self.format.layout() {
                RecordLayout::FlatTile => {
                    let count = read_u32(r)?;
                    let mut arena = store.write(generation);
                    for _ in 0..count {
                        let dest = read_koord(r)?;
                        let next = read_tile_pos(r)?;
                        let bucket = tile.bucket_for(next);
                        tile.slot_mut(generation, bucket).insert_unique(&mut arena, dest, None)?;
                    }
                }
                RecordLayout::FlatNeighbour => {
                    let count = read_u32(r)?;
                    let mut arena = store.write(generation);
                    for _ in 0..count {
                        let dest = read_koord(r)?;
                        let bucket = match read_u8(r)? {
                            n @ 0..=3 => Bucket::from_direction(Direction::from_index_wrapping(n as usize)),
                            _ => Bucket::Local,
                        };
                        tile.slot_mut(generation, bucket).insert_unique(&mut arena, dest, None)?;
                    }
                }
                RecordLayout::ContainerNsew | RecordLayout::Container => {
                    let mut table = [RouteSlot::Empty; Bucket::COUNT];
                    {
                        let mut arena = store.write(generation);
                        for slot in &mut table {
                            *slot = self.read_slot(r, generation, &mut arena)?;
                        }
                    }
                    if self.format.layout() == RecordLayout::ContainerNsew {
                        table.swap(Bucket::East.index(), Bucket::South.index());
                    }
                    tile.set_table(generation, table);
                }
            }
        }
        Ok(())
    }
}

/// Legacy record: `count` destinations with no sharing information.
fn read_flat<R: Read>(
    r:     &mut R,
    arena: &mut Arena,
    count: u32,
    head:  [Koord; 2],
) -> SaveResult<RouteSlot> {
    let mut slot = RouteSlot::Empty;
    for dest in head {
        slot.insert_unique(arena, dest, None)?;
    }
    for _ in 2..count {
        let dest = read_koord(r)?;
        slot.insert_unique(arena, dest, None)?;
    }
    Ok(slot)
}
