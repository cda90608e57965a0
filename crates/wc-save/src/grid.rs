//! Whole-grid route files.
//!
//! ```text
//! tile_count: u32
//! tile_count × { pos: (x: i16, y: i16, z: i8), tables }
//! ```
//!
//! Tiles are written in grid order; the reader matches them by position.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use wc_core::Generation;
use wc_store::GenerationStore;
use wc_way::RoadGrid;

use crate::wire::{read_tile_pos, read_u32, write_tile_pos, write_u32};
use crate::{SaveError, SaveFormat, SaveResult, SlotReader, SlotWriter};

/// Write the route tables of every tile in `grid`.
pub fn save_grid<W: Write>(w: &mut W, grid: &RoadGrid, store: &GenerationStore) -> SaveResult<()> {
    let mut writer = SlotWriter::new();
    write_u32(w, grid.len() as u32)?;
    for tile in grid.tiles() {
        write_tile_pos(w, tile.pos())?;
        writer.write_tile(w, tile, store)?;
    }
    log::debug!("saved routes of {} tiles ({} shared sets)", grid.len(), writer.sets_written());
    Ok(())
}

/// Replace every route table of `grid` with the contents of `r`.
///
/// Both generations of `store` are reset first.  `grid` must have the same
/// tiles as the grid that was saved.
pub fn load_grid<R: Read>(
    r:      &mut R,
    grid:   &mut RoadGrid,
    store:  &GenerationStore,
    format: SaveFormat,
) -> SaveResult<()> {
    let found = read_u32(r)? as usize;
    if found != grid.len() {
        return Err(SaveError::TileCountMismatch { expected: grid.len(), found });
    }

    for generation in Generation::BOTH {
        grid.clear_generation(generation);
        store.reset(generation);
    }

    let mut reader = SlotReader::new(format);
    for _ in 0..found {
        let pos = read_tile_pos(r)?;
        let tile = grid.tile_mut(pos).ok_or(SaveError::UnknownTile(pos))?;
        reader.read_tile(r, tile, store)?;
    }
    Ok(())
}

/// [`save_grid`] into a new file at `path`.
pub fn save_grid_file(path: &Path, grid: &RoadGrid, store: &GenerationStore) -> SaveResult<()> {
    let mut w = BufWriter::new(File::create(path)?);
    save_grid(&mut w, grid, store)?;
    w.flush()?;
    Ok(())
}

/// [`load_grid`] from the file at `path`.
pub fn load_grid_file(
    path:   &Path,
    grid:   &mut RoadGrid,
    store:  &GenerationStore,
    format: SaveFormat,
) -> SaveResult<()> {
    let mut r = BufReader::new(File::open(path)?);
    load_grid(&mut r, grid, store, format)
}
