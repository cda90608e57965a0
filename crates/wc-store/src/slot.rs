//! The per-bucket destination slot.
//!
//! # Representation
//!
//! | Variant  | Meaning                                           | Arena use |
//! |----------|---------------------------------------------------|-----------|
//! | `Empty`  | no destinations                                   | none      |
//! | `Single` | exactly one destination, stored inline            | none      |
//! | `Shared` | a non-empty set living in an arena                | one set   |
//!
//! A `Shared` slot is either the `Master` of its set (it allocated it) or is
//! `Linked` to a set allocated by the tile it routes through, in which case
//! the bucket recorded is the direction of that tile's slot.
//!
//! # Linking
//!
//! During a backtrace every tile passes the slot of the tile it steps into
//! as `link`.  A straight run of tiles toward the same destinations ends up
//! referencing one arena set.  The moment a linked tile needs a destination
//! its neighbour does not have, it gets a private copy (copy-on-write), so
//! diverging branches never write into each other's sets.

use std::slice;

use wc_core::{Bucket, Koord};

use crate::{Arena, DestinationSet, SetHandle, StoreResult};

/// Ownership of a `Shared` slot's set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkMode {
    /// This slot allocated the set.
    Master,
    /// This slot adopted the set of the neighbouring slot in `Bucket`.
    Linked(Bucket),
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteSlot {
    #[default]
    Empty,
    Single(Koord),
    Shared { handle: SetHandle, link: LinkMode },
}

impl RouteSlot {
    // ── Reads ─────────────────────────────────────────────────────────────

    /// Members as a sorted slice.  A stale `Shared` handle reads as empty.
    pub fn as_slice<'a>(&'a self, arena: &'a Arena) -> &'a [Koord] {
        match self {
            RouteSlot::Empty => &[],
            RouteSlot::Single(k) => slice::from_ref(k),
            RouteSlot::Shared { handle, .. } => match arena.get(*handle) {
                Some(set) => set.as_slice(),
                None => &[],
            },
        }
    }

    pub fn contains(&self, arena: &Arena, dest: Koord) -> bool {
        match *self {
            RouteSlot::Empty => false,
            RouteSlot::Single(k) => k == dest,
            RouteSlot::Shared { handle, .. } => arena.contains(handle, dest),
        }
    }

    pub fn count(&self, arena: &Arena) -> usize {
        self.as_slice(arena).len()
    }

    pub fn is_empty(&self, arena: &Arena) -> bool {
        self.as_slice(arena).is_empty()
    }

    /// Member `i` in sorted order.
    pub fn get(&self, arena: &Arena, i: usize) -> Option<Koord> {
        self.as_slice(arena).get(i).copied()
    }

    pub fn iter<'a>(&'a self, arena: &'a Arena) -> impl Iterator<Item = Koord> + 'a {
        self.as_slice(arena).iter().copied()
    }

    /// The arena set this slot references, if any.
    #[inline]
    pub fn handle(&self) -> Option<SetHandle> {
        match *self {
            RouteSlot::Shared { handle, .. } => Some(handle),
            _ => None,
        }
    }

    #[inline]
    pub fn link_mode(&self) -> Option<LinkMode> {
        match *self {
            RouteSlot::Shared { link, .. } => Some(link),
            _ => None,
        }
    }

    /// `true` if both slots denote the same storage: the same arena set, the
    /// same inline destination, or both empty.
    pub fn same_set(&self, other: &RouteSlot) -> bool {
        match (self, other) {
            (RouteSlot::Empty, RouteSlot::Empty) => true,
            (RouteSlot::Single(a), RouteSlot::Single(b)) => a == b,
            (RouteSlot::Shared { handle: a, .. }, RouteSlot::Shared { handle: b, .. }) => a == b,
            _ => false,
        }
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Add `dest`, returning `true` iff it was not already present.
    ///
    /// `link` is the slot of the tile this one routes through, together with
    /// that slot's bucket.  It is only a deduplication hint: the result is
    /// the same set of members with or without it, apart from the link's own
    /// members being merged in when this slot has to be copied.  A slot whose
    /// members plus `dest` are all in the link's set re-points to it instead
    /// of copying.
    ///
    /// # Errors
    ///
    /// Propagates arena allocation failure.  The slot is left unchanged.
    pub fn insert_unique(
        &mut self,
        arena: &mut Arena,
        dest:  Koord,
        link:  Option<(RouteSlot, Bucket)>,
    ) -> StoreResult<bool> {
        // Only a live shared link can be adopted or merged from.
        let link = link.and_then(|(slot, bucket)| slot.handle().map(|h| (h, bucket)));

        match *self {
            RouteSlot::Empty => {
                *self = RouteSlot::Single(dest);
                Ok(true)
            }

            RouteSlot::Single(current) => {
                if current == dest {
                    return Ok(false);
                }
                if let Some((link_handle, bucket)) = link {
                    if arena.contains(link_handle, current) && arena.contains(link_handle, dest) {
                        *self = RouteSlot::Shared { handle: link_handle, link: LinkMode::Linked(bucket) };
                        return Ok(true);
                    }
                }
                let mut set = DestinationSet::with_capacity(2)?;
                set.insert_unique(current)?;
                set.insert_unique(dest)?;
                let handle = arena.allocate(set)?;
                *self = RouteSlot::Shared { handle, link: LinkMode::Master };
                Ok(true)
            }

            RouteSlot::Shared { handle, link: mode } => {
                if arena.contains(handle, dest) {
                    return Ok(false);
                }
                match (mode, link) {
                    (LinkMode::Master, None) => arena.insert(handle, dest),
                    (_, Some((link_handle, bucket))) if link_handle != handle => {
                        let covered = arena.contains(link_handle, dest)
                            && arena
                                .get(handle)
                                .is_some_and(|ours| ours.iter().all(|k| arena.contains(link_handle, k)));
                        if covered {
                            *self = RouteSlot::Shared { handle: link_handle, link: LinkMode::Linked(bucket) };
                            return Ok(true);
                        }
                        let mut set = arena.get(handle).cloned().unwrap_or_default();
                        if let Some(theirs) = arena.get(link_handle) {
                            set.union_with(theirs)?;
                        }
                        set.insert_unique(dest)?;
                        *self = RouteSlot::Shared { handle: arena.allocate(set)?, link: LinkMode::Master };
                        Ok(true)
                    }
                    // Linked without a hint, or hinted at our own set: writing
                    // into the shared set would leak `dest` to the tiles we
                    // share with, so take a private copy first.
                    _ => {
                        let mut set = arena.get(handle).cloned().unwrap_or_default();
                        set.insert_unique(dest)?;
                        *self = RouteSlot::Shared { handle: arena.allocate(set)?, link: LinkMode::Master };
                        Ok(true)
                    }
                }
            }
        }
    }

    /// Remove `dest`, returning `true` iff it was present.
    ///
    /// A `Shared` slot stays `Shared` even if its set shrinks to one member
    /// or none, and the removal is visible to every slot sharing the set.
    pub fn remove(&mut self, arena: &mut Arena, dest: Koord) -> bool {
        match *self {
            RouteSlot::Empty => false,
            RouteSlot::Single(k) if k == dest => {
                *self = RouteSlot::Empty;
                true
            }
            RouteSlot::Single(_) => false,
            RouteSlot::Shared { handle, .. } => arena.remove(handle, dest),
        }
    }

    /// Make this slot the master of its own arena set with room for `n`
    /// members, ahead of a bulk fill.  No-op for an inline slot when `n <= 1`.
    pub fn resize(&mut self, arena: &mut Arena, n: usize) -> StoreResult<()> {
        let handle = match *self {
            RouteSlot::Empty | RouteSlot::Single(_) if n <= 1 => return Ok(()),
            RouteSlot::Shared { handle, link: LinkMode::Master } => handle,
            _ => {
                let set: DestinationSet = match *self {
                    RouteSlot::Single(k) => [k].into_iter().collect(),
                    RouteSlot::Shared { handle, .. } => arena.get(handle).cloned().unwrap_or_default(),
                    RouteSlot::Empty => DestinationSet::new(),
                };
                let handle = arena.allocate(set)?;
                *self = RouteSlot::Shared { handle, link: LinkMode::Master };
                handle
            }
        };
        if let Some(set) = arena.get_mut(handle) {
            set.reserve_total(n)?;
        }
        Ok(())
    }

    /// Detach to `Empty` without touching any shared set.
    #[inline]
    pub fn clear(&mut self) {
        *self = RouteSlot::Empty;
    }
}
