//! Unit tests for wc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SetIndex, TileId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = TileId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TileId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(SetIndex::default(), SetIndex::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(SetIndex(7).to_string(), "SetIndex#7");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Direction, Koord, TilePos};

    #[test]
    fn koord_ordering_is_x_then_y() {
        assert!(Koord::new(1, 9) < Koord::new(2, 0));
        assert!(Koord::new(1, 0) < Koord::new(1, 1));
    }

    #[test]
    fn step_and_direction_agree() {
        let p = TilePos::new(5, 5, 0);
        for dir in Direction::NESW {
            let q = p.step(dir).unwrap();
            assert_eq!(p.direction_to(q), Some(dir));
            assert_eq!(q.direction_to(p), Some(dir.reverse()));
        }
    }

    #[test]
    fn north_is_negative_y() {
        assert_eq!(TilePos::new(0, 5, 0).step(Direction::North), Some(TilePos::new(0, 4, 0)));
    }

    #[test]
    fn direction_ignores_height() {
        let a = TilePos::new(0, 0, 0);
        let b = TilePos::new(1, 0, 2);
        assert_eq!(a.direction_to(b), Some(Direction::East));
    }

    #[test]
    fn non_adjacent_has_no_direction() {
        let a = TilePos::new(0, 0, 0);
        assert_eq!(a.direction_to(TilePos::new(1, 1, 0)), None);
        assert_eq!(a.direction_to(TilePos::new(2, 0, 0)), None);
        assert_eq!(a.direction_to(a), None);
        assert_eq!(a.direction_to(TilePos::INVALID), None);
    }

    #[test]
    fn step_off_the_map_edge() {
        assert_eq!(Koord::new(i16::MAX, 0).step(Direction::East), None);
        assert_eq!(Koord::new(0, i16::MIN).step(Direction::North), None);
    }

    #[test]
    fn wrapping_index() {
        assert_eq!(Direction::from_index_wrapping(5), Direction::East);
        assert_eq!(Direction::West.bit(), 8);
    }
}

#[cfg(test)]
mod bucket {
    use crate::{Bucket, Direction, Generation, WcError};

    #[test]
    fn bucket_indices() {
        assert_eq!(Bucket::Local.index(), 4);
        assert_eq!(Bucket::from_direction(Direction::South), Bucket::South);
        assert_eq!(Bucket::from_index(1).unwrap(), Bucket::East);
        assert!(matches!(Bucket::from_index(5), Err(WcError::InvalidBucket(5))));
        assert_eq!(Bucket::Local.direction(), None);
    }

    #[test]
    fn generation_pair() {
        assert_eq!(Generation::FIRST.other(), Generation::SECOND);
        assert_eq!(Generation::SECOND.other(), Generation::FIRST);
        assert_eq!(Generation::new(1).unwrap().index(), 1);
        assert!(Generation::new(2).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::CacheConfig;

    #[test]
    fn default_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(CacheConfig::default().link_destinations);
    }

    #[test]
    fn zero_threads_rejected() {
        let cfg = CacheConfig { num_threads: Some(0), ..CacheConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_set_limit_rejected() {
        let cfg = CacheConfig { max_sets_per_generation: Some(0), ..CacheConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_plan_batch_rejected() {
        let cfg = CacheConfig { plan_batch: 0, ..CacheConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{VehicleId, VehicleRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = VehicleRng::new(12345, VehicleId(0));
        let mut r2 = VehicleRng::new(12345, VehicleId(0));
        for _ in 0..100 {
            assert_eq!(r1.start_bucket(), r2.start_bucket());
        }
    }

    #[test]
    fn start_bucket_in_bounds() {
        let mut rng = VehicleRng::new(0, VehicleId(3));
        for _ in 0..1000 {
            assert!(rng.start_bucket() < 4);
        }
    }

    #[test]
    fn all_start_buckets_occur() {
        let mut rng = VehicleRng::new(9, VehicleId(1));
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[rng.start_bucket() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
