//! Integration tests for wc-output.

use wc_core::{Bucket, CacheConfig, Koord, TilePos};
use wc_sim::{NoopObserver, RouteCache, RouteCacheBuilder};
use wc_way::RoadGridBuilder;

fn k(x: i16, y: i16) -> Koord {
    Koord::new(x, y)
}

fn t(x: i16, y: i16) -> TilePos {
    TilePos::new(x, y, 0)
}

/// Straight road (0,0)..(3,0) with routes to two destinations served at (0,0).
fn routed_line() -> RouteCache {
    let mut b = RoadGridBuilder::new();
    b.add_path(&[t(0, 0), t(1, 0), t(2, 0), t(3, 0)]).unwrap();
    let mut cache = RouteCacheBuilder::new(CacheConfig::default(), b.build()).build().unwrap();
    cache.recompute(&[k(0, 0), k(-1, 0)], &mut NoopObserver).unwrap();
    cache
}

#[cfg(test)]
mod rows {
    use super::*;
    use crate::{SlotSharing, dump_rows};

    #[test]
    fn one_row_per_non_empty_bucket() {
        let cache = routed_line();
        let rows = dump_rows(&cache.reader());

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].tile, t(0, 0));
        assert_eq!(rows[0].bucket, Bucket::Local);
        assert_eq!(rows[0].sharing, SlotSharing::Master);
        assert_eq!(rows[0].destinations, vec![k(-1, 0), k(0, 0)]);
        assert_eq!(rows[1].sharing, SlotSharing::Linked(Bucket::Local));
        assert_eq!(rows[2].sharing, SlotSharing::Linked(Bucket::West));
        assert!(rows.iter().all(|r| r.table == 1));
    }

    #[test]
    fn sharing_labels() {
        assert_eq!(SlotSharing::Inline.to_string(), "inline");
        assert_eq!(SlotSharing::Linked(Bucket::East).to_string(), "linked:east");
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::DumpObserver;
    use crate::row::dump_rows;
    use crate::writer::RouteTableWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("route_table.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["x", "y", "z", "table", "bucket", "destinations", "shared"]);
    }

    #[test]
    fn csv_rows_round_trip() {
        let dir = tmp();
        let cache = routed_line();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_rows(&dump_rows(&cache.reader())).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("route_table.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "0");            // x
        assert_eq!(&rows[0][4], "4");            // bucket: local
        assert_eq!(&rows[0][5], "-1:0 0:0");     // destinations
        assert_eq!(&rows[0][6], "master");
        assert_eq!(&rows[3][0], "3");
        assert_eq!(&rows[3][6], "linked:west");
    }

    #[test]
    fn observer_dumps_after_each_flip() {
        let dir = tmp();
        let mut b = RoadGridBuilder::new();
        b.add_path(&[t(0, 0), t(1, 0)]).unwrap();
        let mut cache = RouteCacheBuilder::new(CacheConfig::default(), b.build()).build().unwrap();

        let mut obs = DumpObserver::new(CsvWriter::new(dir.path()).unwrap());
        cache.recompute(&[k(0, 0)], &mut obs).unwrap();
        cache.recompute(&[k(1, 0)], &mut obs).unwrap();
        obs.finish();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.dumps(), 2);

        let mut rdr = ::csv::Reader::from_path(dir.path().join("route_table.csv")).unwrap();
        let tables: Vec<String> = rdr.records().map(|r| r.unwrap()[3].to_owned()).collect();
        assert_eq!(tables, ["1", "1", "0", "0"]);
    }
}
