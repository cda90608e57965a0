//! Unit tests for wc-store.

use wc_core::{Bucket, Generation, Koord};

use crate::{Arena, DestinationSet, LinkMode, RouteSlot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn k(x: i16, y: i16) -> Koord {
    Koord::new(x, y)
}

fn arena() -> Arena {
    Arena::new(Generation::FIRST, None)
}

/// Five slots in a line, each linked to the previous one, all holding `dests`.
///
/// Mirrors a backtrace that walked T0 → T4 eastwards from the destination:
/// every tile passes its predecessor's East slot as the link hint.
fn linked_chain(arena: &mut Arena, dests: &[Koord]) -> [RouteSlot; 5] {
    let mut slots = [RouteSlot::Empty; 5];
    for &d in dests {
        for i in 0..slots.len() {
            let link = (i > 0).then(|| (slots[i - 1], Bucket::East));
            slots[i].insert_unique(arena, d, link).unwrap();
        }
    }
    slots
}

// ── DestinationSet ────────────────────────────────────────────────────────────

#[cfg(test)]
mod destination_set {
    use super::*;

    #[test]
    fn insert_keeps_sorted_and_unique() {
        let mut s = DestinationSet::new();
        assert!(s.insert_unique(k(3, 0)).unwrap());
        assert!(s.insert_unique(k(1, 5)).unwrap());
        assert!(!s.insert_unique(k(3, 0)).unwrap());
        assert_eq!(s.as_slice(), &[k(1, 5), k(3, 0)]);
    }

    #[test]
    fn remove_missing_is_false() {
        let mut s: DestinationSet = [k(1, 1)].into_iter().collect();
        assert!(!s.remove(k(2, 2)));
        assert!(s.remove(k(1, 1)));
        assert!(s.is_empty());
    }

    #[test]
    fn union_merges_without_duplicates() {
        let mut a: DestinationSet = [k(0, 0), k(2, 0), k(4, 0)].into_iter().collect();
        let b: DestinationSet = [k(1, 0), k(2, 0), k(5, 0)].into_iter().collect();
        a.union_with(&b).unwrap();
        assert_eq!(a.as_slice(), &[k(0, 0), k(1, 0), k(2, 0), k(4, 0), k(5, 0)]);
    }

    #[test]
    fn from_iter_dedups() {
        let s: DestinationSet = [k(2, 2), k(1, 1), k(2, 2)].into_iter().collect();
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(0), Some(k(1, 1)));
    }
}

// ── Arena ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arena {
    use super::*;
    use crate::StoreError;

    #[test]
    fn allocate_returns_sequential_indices() {
        let mut a = arena();
        let h0 = a.allocate(DestinationSet::new()).unwrap();
        let h1 = a.allocate(DestinationSet::new()).unwrap();
        assert_eq!(h0.index().0, 0);
        assert_eq!(h1.index().0, 1);
        assert_eq!(a.set_count(), 2);
        assert_eq!(a.handle_at(h1.index()), Some(h1));
    }

    #[test]
    fn limit_raises_allocation_exhausted() {
        let mut a = Arena::new(Generation::SECOND, Some(1));
        a.allocate(DestinationSet::new()).unwrap();
        let err = a.allocate(DestinationSet::new()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::AllocationExhausted { generation, sets: 1 } if generation == Generation::SECOND
        ));
    }

    #[test]
    fn reset_invalidates_handles() {
        let mut a = arena();
        let h = a.allocate(DestinationSet::new()).unwrap();
        assert!(a.is_live(h));
        a.reset();
        assert!(!a.is_live(h));
        assert_eq!(a.set_count(), 0);
        assert_eq!(a.epoch(), 1);
    }
}

// ── RouteSlot ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_slot {
    use super::*;

    #[test]
    fn empty_to_single_to_shared() {
        let mut a = arena();
        let mut s = RouteSlot::Empty;
        assert!(s.insert_unique(&mut a, k(1, 1), None).unwrap());
        assert_eq!(s, RouteSlot::Single(k(1, 1)));
        assert_eq!(a.set_count(), 0, "single destination must not touch the arena");

        assert!(s.insert_unique(&mut a, k(2, 2), None).unwrap());
        assert_eq!(s.link_mode(), Some(LinkMode::Master));
        assert_eq!(s.count(&a), 2);
        assert_eq!(a.set_count(), 1);
    }

    /// P1: repeated inserts are idempotent.
    #[test]
    fn insert_is_set_semantics() {
        let mut a = arena();
        let mut s = RouteSlot::Empty;
        for d in [k(5, 5), k(1, 1), k(5, 5), k(3, 3), k(1, 1)] {
            s.insert_unique(&mut a, d, None).unwrap();
            assert!(s.contains(&a, d));
            assert!(!s.insert_unique(&mut a, d, None).unwrap());
        }
        assert_eq!(s.count(&a), 3);
    }

    /// P2: a one-member slot reads the same inline or in the arena.
    #[test]
    fn single_and_one_element_shared_are_indistinguishable() {
        let mut a = arena();
        let inline = RouteSlot::Single(k(7, 7));
        let mut shared = RouteSlot::Single(k(7, 7));
        shared.resize(&mut a, 4).unwrap();
        assert!(shared.handle().is_some());

        assert_eq!(inline.count(&a), shared.count(&a));
        assert_eq!(inline.is_empty(&a), shared.is_empty(&a));
        assert_eq!(inline.get(&a, 0), shared.get(&a, 0));
        assert_eq!(inline.get(&a, 1), shared.get(&a, 1));
        assert_eq!(inline.contains(&a, k(7, 7)), shared.contains(&a, k(7, 7)));
        assert_eq!(inline.contains(&a, k(0, 0)), shared.contains(&a, k(0, 0)));
    }

    #[test]
    fn resize_small_inline_is_noop() {
        let mut a = arena();
        let mut s = RouteSlot::Single(k(1, 1));
        s.resize(&mut a, 1).unwrap();
        assert_eq!(s, RouteSlot::Single(k(1, 1)));
        let mut e = RouteSlot::Empty;
        e.resize(&mut a, 0).unwrap();
        assert_eq!(e, RouteSlot::Empty);
        assert_eq!(a.set_count(), 0);
    }

    #[test]
    fn remove_single() {
        let mut a = arena();
        let mut s = RouteSlot::Single(k(1, 1));
        assert!(!s.remove(&mut a, k(2, 2)));
        assert!(s.remove(&mut a, k(1, 1)));
        assert_eq!(s, RouteSlot::Empty);
        assert!(!s.remove(&mut a, k(1, 1)));
    }

    #[test]
    fn remove_shared_does_not_demote() {
        let mut a = arena();
        let mut s = RouteSlot::Empty;
        s.insert_unique(&mut a, k(1, 1), None).unwrap();
        s.insert_unique(&mut a, k(2, 2), None).unwrap();
        assert!(s.remove(&mut a, k(1, 1)));
        assert!(s.remove(&mut a, k(2, 2)));
        assert!(s.handle().is_some());
        assert!(s.is_empty(&a));
        assert_eq!(s.count(&a), 0);
    }

    #[test]
    fn clear_detaches_without_touching_set() {
        let mut a = arena();
        let slots = linked_chain(&mut a, &[k(1, 1), k(2, 2)]);
        let mut first = slots[0];
        first.clear();
        assert_eq!(first, RouteSlot::Empty);
        assert_eq!(slots[1].count(&a), 2);
    }
}

// ── Linking ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod linking {
    use super::*;

    /// P3, single-destination form: every tile keeps its destination inline.
    #[test]
    fn single_destination_chain_stays_inline() {
        let mut a = arena();
        let d1 = k(10, 10);
        let d2 = k(20, 20);
        let mut slots = linked_chain(&mut a, &[d1]);
        for s in &slots {
            assert_eq!(s.count(&a), 1);
            assert!(s.same_set(&slots[0]));
        }

        let link = Some((slots[1], Bucket::East));
        assert!(slots[2].insert_unique(&mut a, d2, link).unwrap());
        assert_eq!(slots[2].count(&a), 2);
        for s in &slots[3..] {
            assert_eq!(s.count(&a), 1);
            assert_eq!(s.get(&a, 0), Some(d1));
            assert!(!s.contains(&a, d2));
        }
    }

    #[test]
    fn chain_converges_on_one_set() {
        let mut a = arena();
        let slots = linked_chain(&mut a, &[k(1, 1), k(2, 2)]);
        assert_eq!(a.set_count(), 1, "only T0 allocates");
        assert_eq!(slots[0].link_mode(), Some(LinkMode::Master));
        for s in &slots[1..] {
            assert!(s.same_set(&slots[0]));
            assert_eq!(s.link_mode(), Some(LinkMode::Linked(Bucket::East)));
            assert_eq!(s.count(&a), 2);
        }
    }

    /// P3, shared form: a divergent insert in the middle of the chain gets a
    /// private copy and leaves the downstream tiles' shared set alone.
    #[test]
    fn divergent_insert_copies_on_write() {
        let mut a = arena();
        let (d0, d1, d2) = (k(1, 1), k(2, 2), k(3, 3));
        let mut slots = linked_chain(&mut a, &[d0, d1]);
        let shared = slots[3];

        let link = Some((slots[1], Bucket::East));
        assert!(slots[2].insert_unique(&mut a, d2, link).unwrap());

        assert!(!slots[2].same_set(&shared));
        assert_eq!(slots[2].count(&a), 3);
        assert_eq!(slots[2].link_mode(), Some(LinkMode::Master));
        for i in [0, 1, 3, 4] {
            assert!(slots[i].same_set(&shared), "T{i} must keep the shared set");
            assert_eq!(slots[i].count(&a), 2);
            assert!(!slots[i].contains(&a, d2));
        }
    }

    #[test]
    fn linked_insert_without_hint_copies() {
        let mut a = arena();
        let mut slots = linked_chain(&mut a, &[k(1, 1), k(2, 2)]);
        assert!(slots[4].insert_unique(&mut a, k(9, 9), None).unwrap());
        assert!(!slots[4].same_set(&slots[3]));
        assert!(!slots[3].contains(&a, k(9, 9)));
    }

    #[test]
    fn copy_merges_link_members() {
        let mut a = arena();
        let mut near = RouteSlot::Empty;
        for d in [k(1, 1), k(2, 2), k(3, 3)] {
            near.insert_unique(&mut a, d, None).unwrap();
        }
        let mut far = RouteSlot::Empty;
        far.insert_unique(&mut a, k(7, 7), None).unwrap();
        far.insert_unique(&mut a, k(8, 8), None).unwrap();

        far.insert_unique(&mut a, k(1, 1), Some((near, Bucket::West))).unwrap();
        for d in [k(1, 1), k(2, 2), k(3, 3), k(7, 7), k(8, 8)] {
            assert!(far.contains(&a, d));
        }
        assert_eq!(near.count(&a), 3);
    }

    #[test]
    fn covered_slot_relinks_without_copying() {
        let mut a = arena();
        let mut near = RouteSlot::Empty;
        for d in [k(1, 1), k(2, 2), k(3, 3)] {
            near.insert_unique(&mut a, d, None).unwrap();
        }
        let mut far = RouteSlot::Empty;
        far.insert_unique(&mut a, k(1, 1), None).unwrap();
        far.insert_unique(&mut a, k(2, 2), None).unwrap();
        assert_eq!(a.set_count(), 2);

        assert!(far.insert_unique(&mut a, k(3, 3), Some((near, Bucket::West))).unwrap());
        assert!(far.same_set(&near));
        assert_eq!(far.link_mode(), Some(LinkMode::Linked(Bucket::West)));
        assert_eq!(a.set_count(), 2);
    }

    #[test]
    fn single_link_needs_both_members() {
        let mut a = arena();
        let mut near = RouteSlot::Empty;
        near.insert_unique(&mut a, k(1, 1), None).unwrap();
        near.insert_unique(&mut a, k(2, 2), None).unwrap();

        let mut far = RouteSlot::Single(k(5, 5));
        far.insert_unique(&mut a, k(1, 1), Some((near, Bucket::North))).unwrap();
        assert!(!far.same_set(&near), "(5,5) is not in the link's set");
        assert_eq!(a.set_count(), 2);
    }

    #[test]
    fn master_insert_is_seen_by_linked_tiles() {
        let mut a = arena();
        let mut slots = linked_chain(&mut a, &[k(1, 1), k(2, 2)]);
        slots[0].insert_unique(&mut a, k(3, 3), None).unwrap();
        assert!(slots[4].contains(&a, k(3, 3)));
    }

    #[test]
    fn allocation_failure_leaves_slot_unchanged() {
        let mut a = Arena::new(Generation::FIRST, Some(1));
        let mut filler = RouteSlot::Single(k(0, 0));
        filler.insert_unique(&mut a, k(0, 1), None).unwrap();

        let mut s = RouteSlot::Single(k(1, 1));
        assert!(s.insert_unique(&mut a, k(2, 2), None).is_err());
        assert_eq!(s, RouteSlot::Single(k(1, 1)));
    }
}

// ── GenerationStore ───────────────────────────────────────────────────────────

#[cfg(test)]
mod generation_store {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::GenerationStore;

    #[test]
    fn generations_are_independent() {
        let store = GenerationStore::new();
        let h = store.allocate(Generation::FIRST, DestinationSet::new()).unwrap();
        store.insert(h, k(1, 1)).unwrap();
        assert!(store.contains(h, k(1, 1)));
        assert_eq!(store.set_count(Generation::FIRST), 1);
        assert_eq!(store.set_count(Generation::SECOND), 0);

        store.reset(Generation::SECOND);
        assert!(store.contains(h, k(1, 1)));
        assert_eq!(store.get(h, 0), Some(k(1, 1)));
        assert!(store.remove(h, k(1, 1)));
    }

    #[test]
    fn concurrent_writers_are_linearised() {
        let store = Arc::new(GenerationStore::new());
        let h = store.allocate(Generation::SECOND, DestinationSet::new()).unwrap();
        let workers: Vec<_> = (0..4i16)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100i16 {
                        store.insert(h, k(t, i)).unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        let arena = store.read(Generation::SECOND);
        assert_eq!(arena.get(h).unwrap().len(), 400);
    }

    /// P6: a slot still pointing into a reset generation trips the liveness
    /// assertion when queried.
    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "stale route set handle")]
    fn stale_slot_query_panics_in_debug() {
        let store = GenerationStore::new();
        let mut s = RouteSlot::Empty;
        {
            let mut a = store.write(Generation::FIRST);
            s.insert_unique(&mut a, k(1, 1), None).unwrap();
            s.insert_unique(&mut a, k(2, 2), None).unwrap();
        }
        store.reset(Generation::FIRST);
        let a = store.read(Generation::FIRST);
        let _ = s.contains(&a, k(1, 1));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn stale_slot_reads_empty_in_release() {
        let store = GenerationStore::new();
        let mut s = RouteSlot::Empty;
        {
            let mut a = store.write(Generation::FIRST);
            s.insert_unique(&mut a, k(1, 1), None).unwrap();
            s.insert_unique(&mut a, k(2, 2), None).unwrap();
        }
        store.reset(Generation::FIRST);
        let a = store.read(Generation::FIRST);
        assert!(!s.contains(&a, k(1, 1)));
        assert_eq!(s.count(&a), 0);
    }
}
