//! Map coordinates and cardinal directions.
//!
//! `Koord` is the 2-D coordinate of a destination (a stop or building that
//! generates traffic).  `TilePos` is the position of a road tile, which also
//! carries a height so bridges and tunnels over the same ground square stay
//! distinct.  Both use `i16` components, matching the two signed 16-bit
//! fields the save format stores per destination.
//!
//! The y axis grows southwards: north of `(x, y)` is `(x, y - 1)`.

use std::fmt;

// ── Koord ─────────────────────────────────────────────────────────────────────

/// A 2-D map coordinate.  Used as the destination key throughout the cache.
///
/// Ordered by `x` then `y`; destination sets keep their members sorted in
/// this order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Koord {
    pub x: i16,
    pub y: i16,
}

impl Koord {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `dir`, or `None` if it would
    /// leave the `i16` range.
    pub fn step(self, dir: Direction) -> Option<Koord> {
        let (dx, dy) = dir.offset();
        Some(Koord {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for Koord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ── TilePos ───────────────────────────────────────────────────────────────────

/// Position of a road tile: ground coordinate plus height level.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i16,
    pub y: i16,
    pub z: i8,
}

impl TilePos {
    /// Sentinel meaning "no tile".  Passing it as the next tile of a
    /// backtrace step records the destination in the Local/Unreachable bucket.
    pub const INVALID: TilePos = TilePos { x: -1, y: -1, z: -1 };

    #[inline]
    pub const fn new(x: i16, y: i16, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Ground-level tile at `k`.
    #[inline]
    pub const fn ground(k: Koord) -> Self {
        Self { x: k.x, y: k.y, z: 0 }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// The 2-D coordinate of this tile.
    #[inline]
    pub fn koord(self) -> Koord {
        Koord { x: self.x, y: self.y }
    }

    /// Same-height tile one step in `dir`, or `None` at the edge of the
    /// coordinate range.
    pub fn step(self, dir: Direction) -> Option<TilePos> {
        let k = self.koord().step(dir)?;
        Some(TilePos { x: k.x, y: k.y, z: self.z })
    }

    /// Direction of `other` as seen from `self` when the two tiles are
    /// orthogonally adjacent on the map.  Height is ignored (ramps connect
    /// tiles of different `z`).  Returns `None` for the same square,
    /// diagonal or distant tiles, and for the invalid sentinel.
    pub fn direction_to(self, other: TilePos) -> Option<Direction> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let dx = other.x as i32 - self.x as i32;
        let dy = other.y as i32 - self.y as i32;
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0)  => Some(Direction::East),
            (0, 1)  => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _       => None,
        }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four cardinal directions, in the fixed N, E, S, W order used
/// for bucket indices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in bucket order.
    pub const NESW: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).  Any value is reduced modulo 4 so
    /// rotating scans can pass `start + i` directly.
    #[inline]
    pub fn from_index_wrapping(i: usize) -> Direction {
        Self::NESW[i & 3]
    }

    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East  => Direction::West,
            Direction::South => Direction::North,
            Direction::West  => Direction::East,
        }
    }

    /// `(dx, dy)` of one step in this direction.
    #[inline]
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::East  => (1, 0),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
        }
    }

    /// Single-bit mask (`N=1, E=2, S=4, W=8`) for connectivity bitsets.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::East  => "east",
            Direction::South => "south",
            Direction::West  => "west",
        })
    }
}
