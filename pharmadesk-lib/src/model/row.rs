//! TableRow trait: the contract between entities and the table engine

use super::CellValue;
use super::Role;

/// A row the table engine can filter, sort and select.
///
/// Every row exposes a stable, globally unique `id` used as the identity key
/// for selection, clipboard copy and mutation targeting. Rows are immutable
/// snapshots of fetched data: mutation is always a write to the server
/// followed by a wholesale refetch, never an in-place edit.
pub trait TableRow: Clone + Send + Sync + 'static {
    /// The stable unique identifier of this row.
    fn id(&self) -> &str;

    /// Returns the value of the named cell.
    ///
    /// Unknown keys yield [`CellValue::Null`], which filters as the empty
    /// string and sorts first.
    fn cell(&self, key: &str) -> CellValue;

    /// The role this row belongs to, for rows that carry one (user rows).
    ///
    /// Row-gated column visibility compares this against the viewer's role.
    fn role(&self) -> Option<Role> {
        None
    }
}
