//! The `RouteTableWriter` trait implemented by dump backends.

use crate::{OutputResult, RouteDumpRow};

/// Sink for route table rows.
///
/// Errors are stored by [`DumpObserver`](crate::DumpObserver) and retrieved
/// with its `take_error`.
pub trait RouteTableWriter {
    /// Write every row of one dump.
    fn write_rows(&mut self, rows: &[RouteDumpRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
