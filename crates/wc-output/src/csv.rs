//! CSV output backend.
//!
//! Creates `route_table.csv` in the configured output directory.  Every dump
//! appends its rows; the `table` column tells dumps of different
//! generations apart.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RouteTableWriter;
use crate::{OutputResult, RouteDumpRow};

/// Writes route tables to one CSV file.
pub struct CsvWriter {
    routes:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `route_table.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join("route_table.csv"))?;
        routes.write_record(["x", "y", "z", "table", "bucket", "destinations", "shared"])?;
        Ok(Self { routes, finished: false })
    }
}

impl RouteTableWriter for CsvWriter {
    fn write_rows(&mut self, rows: &[RouteDumpRow]) -> OutputResult<()> {
        for row in rows {
            let destinations: Vec<String> = row.destinations.iter().map(|k| format!("{}:{}", k.x, k.y)).collect();
            self.routes.write_record(&[
                row.tile.x.to_string(),
                row.tile.y.to_string(),
                row.tile.z.to_string(),
                row.table.to_string(),
                row.bucket.index().to_string(),
                destinations.join(" "),
                row.sharing.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        Ok(())
    }
}
