//! # Sheet Client Trait
//!
//! The seam between Mightee POS and whatever remote spreadsheet service
//! backs it. Everything above this trait is testable against
//! [`MemorySheets`](crate::memory::MemorySheets).
//!
//! ## The Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SheetClient Implementations                        │
//! │                                                                         │
//! │  InventoryRepository ─┐                                                 │
//! │  SalesLogRepository  ─┤                        ┌── Google Sheets/etc.   │
//! │  StocksRepository    ─┼──► trait SheetClient ──┤   (production, out     │
//! │  PartitionManager    ─┘                        │    of this repo)       │
//! │                                                └── MemorySheets         │
//! │                                                    (tests, offline)     │
//! │                                                                         │
//! │  One client == one spreadsheet. Worksheets are addressed by name.       │
//! │  Credential handling belongs to the implementor, not to this crate.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use mightee_core::types::{CellAddress, CellRange};

use crate::error::LedgerResult;

/// A grid of cell values as read from or written to a range.
///
/// Outer vec = rows, inner vec = columns. `None` is a blank cell; writing
/// `None` blanks the target cell.
pub type Grid = Vec<Vec<Option<String>>>;

/// Synchronous-feeling, blocking-per-call access to one remote
/// spreadsheet. Every method is a single round trip; nothing here batches
/// or caches.
#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Reads one cell. `Ok(None)` means the cell is blank.
    async fn read_cell(&self, sheet: &str, cell: CellAddress) -> LedgerResult<Option<String>>;

    /// Writes one cell.
    async fn write_cell(&self, sheet: &str, cell: CellAddress, value: &str) -> LedgerResult<()>;

    /// Reads a rectangular range. The returned grid always has exactly
    /// `range.row_count() × range.col_count()` entries.
    async fn read_range(&self, sheet: &str, range: CellRange) -> LedgerResult<Grid>;

    /// Writes a rectangular range. The grid must match the range shape;
    /// `None` entries blank their cells.
    async fn write_range(&self, sheet: &str, range: CellRange, grid: Grid) -> LedgerResult<()>;

    /// Appends one row immediately below the last occupied row.
    async fn append_row(&self, sheet: &str, values: Vec<String>) -> LedgerResult<()>;

    /// Duplicates an existing worksheet under a new name, data included.
    async fn duplicate_sheet(&self, source: &str, new_name: &str) -> LedgerResult<()>;

    /// Lists the worksheet names in the spreadsheet.
    async fn list_sheet_names(&self) -> LedgerResult<Vec<String>>;
}
