use stay_model::RowRef;

use crate::error::Result;

/// Positional access to the backing worksheet.
///
/// Rows and columns are 1-based, matching A1 notation; row 1 is the header.
/// Implementations are the hosted client ([`crate::SheetsClient`]) and the
/// in-memory store used by tests ([`crate::MemorySheet`]).
pub trait SheetStore {
    /// Every row of the worksheet in sheet order, header row included.
    ///
    /// An empty worksheet yields an empty vector; that is a valid state,
    /// not an error.
    fn read_all(&self) -> Result<Vec<Vec<String>>>;

    /// Appends one row after the last non-empty row.
    fn append_row(&mut self, cells: &[String]) -> Result<()>;

    /// Overwrites a horizontal run of cells in `row`, starting at
    /// `start_col` (1-based). Cells outside the run are untouched.
    fn update_cells(&mut self, row: RowRef, start_col: usize, cells: &[String]) -> Result<()>;

    /// Removes the row entirely. Every later row shifts up by one, so any
    /// previously captured [`RowRef`] past this row goes stale.
    fn delete_row(&mut self, row: RowRef) -> Result<()>;
}
