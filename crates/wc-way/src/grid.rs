//! Road tile grid and builder.
//!
//! # Data layout
//!
//! Tiles are stored densely in a `Vec<WayTile>` indexed by `TileId`, with a
//! parallel `exits` bitmask per tile (`N=1, E=2, S=4, W=8`) recording the
//! directions a vehicle may leave the tile in.  An `FxHashMap` maps positions
//! to ids; position lookups are the hot path of every route query.
//!
//! A one-way road is a tile pair where only one side has the exit bit set.

use rustc_hash::FxHashMap;

use wc_core::{Direction, Generation, Koord, TileId, TilePos};

use crate::{WayError, WayResult, WayTile};

// ── TileNeighbours ────────────────────────────────────────────────────────────

/// Live road adjacency, consulted to turn a cached direction into a tile.
///
/// The cache never trusts its own buckets for this: a bucket can outlive the
/// road it points along.
pub trait TileNeighbours {
    /// The road tile a vehicle reaches by leaving `from` towards `dir`, or
    /// `None` if there is no such connection.
    fn neighbour(&self, from: TilePos, dir: Direction) -> Option<TilePos>;
}

// ── RoadGrid ──────────────────────────────────────────────────────────────────

/// All road tiles of a map with their route tables and connectivity.
///
/// Do not construct directly; use [`RoadGridBuilder`].
pub struct RoadGrid {
    index: FxHashMap<TilePos, TileId>,
    tiles: Vec<WayTile>,
    exits: Vec<u8>,
}

impl RoadGrid {
    /// Grid with no tiles.
    pub fn empty() -> Self {
        RoadGridBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn tile_id(&self, pos: TilePos) -> Option<TileId> {
        self.index.get(&pos).copied()
    }

    #[inline]
    pub fn tile(&self, pos: TilePos) -> Option<&WayTile> {
        self.tile_id(pos).map(|id| &self.tiles[id.index()])
    }

    #[inline]
    pub fn tile_mut(&mut self, pos: TilePos) -> Option<&mut WayTile> {
        let id = self.tile_id(pos)?;
        Some(&mut self.tiles[id.index()])
    }

    /// Like [`tile`](Self::tile) but with an error for a missing tile.
    pub fn require(&self, pos: TilePos) -> WayResult<&WayTile> {
        self.tile(pos).ok_or(WayError::TileNotFound(pos))
    }

    #[inline]
    pub fn by_id(&self, id: TileId) -> &WayTile {
        &self.tiles[id.index()]
    }

    /// Exit bitmask of tile `id`.
    #[inline]
    pub fn exits(&self, id: TileId) -> u8 {
        self.exits[id.index()]
    }

    /// `true` if a vehicle may leave `from` towards `dir`.
    pub fn can_leave(&self, from: TilePos, dir: Direction) -> bool {
        self.tile_id(from)
            .is_some_and(|id| self.exits[id.index()] & dir.bit() != 0)
    }

    /// Tiles in id order.
    pub fn tiles(&self) -> &[WayTile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [WayTile] {
        &mut self.tiles
    }

    /// Ground-level road tiles a vehicle can use to reach `dest`: the tile
    /// on `dest` itself, else the road tiles orthogonally next to it.
    pub fn access_tiles(&self, dest: Koord) -> Vec<TilePos> {
        let on_site = TilePos::ground(dest);
        if self.index.contains_key(&on_site) {
            return vec![on_site];
        }
        Direction::NESW
            .iter()
            .filter_map(|&d| on_site.step(d))
            .filter(|p| self.index.contains_key(p))
            .collect()
    }

    /// Empty table `generation` on every tile.
    pub fn clear_generation(&mut self, generation: Generation) {
        for tile in &mut self.tiles {
            tile.clear_generation(generation);
        }
    }
}

impl TileNeighbours for RoadGrid {
    fn neighbour(&self, from: TilePos, dir: Direction) -> Option<TilePos> {
        if !self.can_leave(from, dir) {
            return None;
        }
        let to = from.step(dir)?;
        self.index.contains_key(&to).then_some(to)
    }
}

// ── RoadGridBuilder ───────────────────────────────────────────────────────────

/// Construct a [`RoadGrid`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use wc_core::TilePos;
/// use wc_way::RoadGridBuilder;
///
/// let mut b = RoadGridBuilder::new();
/// let a = TilePos::new(0, 0, 0);
/// let c = TilePos::new(1, 0, 0);
/// b.add_road(a, c).unwrap();
/// let grid = b.build();
/// assert_eq!(grid.len(), 2);
/// ```
pub struct RoadGridBuilder {
    index: FxHashMap<TilePos, TileId>,
    tiles: Vec<TilePos>,
    exits: Vec<u8>,
}

impl RoadGridBuilder {
    pub fn new() -> Self {
        Self { index: FxHashMap::default(), tiles: Vec::new(), exits: Vec::new() }
    }

    /// Pre-allocate for the expected number of tiles.
    pub fn with_capacity(tiles: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(tiles);
        Self { index, tiles: Vec::with_capacity(tiles), exits: Vec::with_capacity(tiles) }
    }

    /// Add a road tile with no connections.  Adding the same position twice
    /// returns the existing id.
    pub fn add_tile(&mut self, pos: TilePos) -> TileId {
        if let Some(&id) = self.index.get(&pos) {
            return id;
        }
        let id = TileId(self.tiles.len() as u32);
        self.index.insert(pos, id);
        self.tiles.push(pos);
        self.exits.push(0);
        id
    }

    /// Connect `from` to `to` in that direction only.
    pub fn add_one_way(&mut self, from: TilePos, to: TilePos) -> WayResult<()> {
        let dir = from.direction_to(to).ok_or(WayError::NotAdjacent(from, to))?;
        let id = self.add_tile(from);
        self.add_tile(to);
        self.exits[id.index()] |= dir.bit();
        Ok(())
    }

    /// Connect two adjacent tiles in both directions.
    pub fn add_road(&mut self, a: TilePos, b: TilePos) -> WayResult<()> {
        self.add_one_way(a, b)?;
        self.add_one_way(b, a)
    }

    /// Connect consecutive positions of `path` in both directions.
    pub fn add_path(&mut self, path: &[TilePos]) -> WayResult<()> {
        for pair in path.windows(2) {
            self.add_road(pair[0], pair[1])?;
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Consume the builder and produce a [`RoadGrid`] with empty route tables.
    pub fn build(self) -> RoadGrid {
        RoadGrid {
            tiles: self.tiles.into_iter().map(WayTile::new).collect(),
            index: self.index,
            exits: self.exits,
        }
    }
}

impl Default for RoadGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
