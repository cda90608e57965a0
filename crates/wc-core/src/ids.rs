//! Typed index wrappers.
//!
//! Tiles, vehicles and arena sets are all addressed by dense `u32` indices.
//! Wrapping each in its own type keeps a set index from being used to look
//! up a tile.  The inner integer stays `pub` for the save codec and for
//! dense `Vec` indexing.

use std::fmt;

/// Declare a `u32` index newtype with an `INVALID` (all ones) sentinel.
macro_rules! index_type {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Never issued; marks an unset index.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        /// Fails for indices beyond the inner integer's range.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

index_type! {
    /// A vehicle agent asking the cache for directions.
    pub struct VehicleId(u32);
}

index_type! {
    /// Index of a road tile in a `RoadGrid`'s tile vector.
    pub struct TileId(u32);
}

index_type! {
    /// Index of a destination set inside one generation arena.
    ///
    /// 32 bits because the save format splits it into two 16-bit halves.
    pub struct SetIndex(u32);
}
