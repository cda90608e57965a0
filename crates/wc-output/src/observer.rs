//! `DumpObserver<W>` — bridges `CacheObserver` to a `RouteTableWriter`.

use wc_sim::{CacheObserver, RouteReader};

use crate::row::dump_rows;
use crate::writer::RouteTableWriter;
use crate::{OutputError, OutputResult};

/// A [`CacheObserver`] that dumps the new stable generation to any
/// [`RouteTableWriter`] after every flip.
///
/// Errors from the writer are stored internally because `CacheObserver`
/// methods have no return value.  After the passes, call
/// [`finish`](Self::finish) and check [`take_error`](Self::take_error).
pub struct DumpObserver<W: RouteTableWriter> {
    writer:     W,
    dumps:      usize,
    last_error: Option<OutputError>,
}

impl<W: RouteTableWriter> DumpObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, dumps: 0, last_error: None }
    }

    /// Number of flips dumped so far.
    pub fn dumps(&self) -> usize {
        self.dumps
    }

    /// Flush the writer.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files afterwards).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RouteTableWriter> CacheObserver for DumpObserver<W> {
    fn on_flip(&mut self, reader: &RouteReader<'_>) {
        let rows = dump_rows(reader);
        self.dumps += 1;
        let result = self.writer.write_rows(&rows);
        self.store_err(result);
    }
}
