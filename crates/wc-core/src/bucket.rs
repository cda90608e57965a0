//! Direction buckets and generation selectors.
//!
//! Every road tile keeps five destination buckets per table: one per cardinal
//! direction, plus a `Local` bucket at index 4.  A destination in `Local`
//! means "no further hop from this tile": either the destination is served
//! right here, or it is known to be unreachable (negative cache).

use std::fmt;

use crate::{Direction, WcError};

// ── Bucket ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bucket {
    North = 0,
    East  = 1,
    South = 2,
    West  = 3,
    Local = 4,
}

impl Bucket {
    /// Number of buckets per table.
    pub const COUNT: usize = 5;

    /// All buckets in index order.
    pub const ALL: [Bucket; Self::COUNT] =
        [Bucket::North, Bucket::East, Bucket::South, Bucket::West, Bucket::Local];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: u8) -> Result<Bucket, WcError> {
        Self::ALL
            .get(i as usize)
            .copied()
            .ok_or(WcError::InvalidBucket(i))
    }

    #[inline]
    pub fn from_direction(dir: Direction) -> Bucket {
        Self::ALL[dir.index()]
    }

    /// The cardinal direction of a directional bucket; `None` for `Local`.
    #[inline]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Bucket::Local => None,
            b => Some(Direction::NESW[b.index()]),
        }
    }
}

impl From<Direction> for Bucket {
    fn from(dir: Direction) -> Bucket {
        Bucket::from_direction(dir)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(d) => d.fmt(f),
            None    => f.write_str("local"),
        }
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Selects one of the two double-buffered generations.
///
/// At any time one generation is *stable* (read by vehicles) and the other
/// is *hot* (written by background passes).  Table slot `g` of every way
/// tile belongs to generation `g`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(u8);

impl Generation {
    pub const COUNT: usize = 2;

    pub const FIRST: Generation = Generation(0);
    pub const SECOND: Generation = Generation(1);

    pub const BOTH: [Generation; Self::COUNT] = [Self::FIRST, Self::SECOND];

    pub fn new(g: u8) -> Result<Generation, WcError> {
        if (g as usize) < Self::COUNT {
            Ok(Generation(g))
        } else {
            Err(WcError::InvalidGeneration(g))
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The other generation of the pair.
    #[inline]
    pub fn other(self) -> Generation {
        Generation(self.0 ^ 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}
