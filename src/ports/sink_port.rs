//! Port for the export destination.

use crate::domain::entities::TableSnapshot;
use crate::domain::errors::Result;
use std::path::Path;

/// Writes a table snapshot to a file.
pub trait SinkPort: Send + Sync {
    /// Drains `snapshot` into `path` and returns the number of data rows.
    ///
    /// Implementations must leave either the complete file or nothing: a
    /// failure halfway through may not replace what was at `path` before.
    fn write_snapshot(&self, snapshot: TableSnapshot<'_>, path: &Path) -> Result<u64>;
}
