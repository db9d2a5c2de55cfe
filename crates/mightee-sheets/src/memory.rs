//! # In-Memory Sheet Client
//!
//! A complete [`SheetClient`] over plain maps. Every test in the
//! workspace runs against it, and it doubles as an offline backend when
//! no spreadsheet service is reachable.
//!
//! ## Semantics Matched to the Remote Service
//! - Blank cells read as `None`; writing `None` in a range blanks a cell
//! - `append_row` lands at (max occupied row) + 1
//! - `duplicate_sheet` copies data; duplicating onto a taken name fails
//! - Sheet name order is creation order, like worksheet tabs

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use mightee_core::types::{CellAddress, CellRange};

use crate::client::{Grid, SheetClient};
use crate::error::{LedgerError, LedgerResult};

/// Cell store for one worksheet: (row, col) → value.
type SheetData = BTreeMap<(u32, u32), String>;

#[derive(Default)]
struct Inner {
    /// Worksheets in creation order (tab order).
    sheets: Vec<(String, SheetData)>,

    /// Pending injected outcomes; each client call consumes one.
    /// `Some(err)` fails the call, `None` lets it through.
    fail_queue: Vec<Option<LedgerError>>,
}

impl Inner {
    fn sheet(&self, name: &str) -> LedgerResult<&SheetData> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
            .ok_or_else(|| LedgerError::SheetNotFound {
                name: name.to_string(),
            })
    }

    fn sheet_mut(&mut self, name: &str) -> LedgerResult<&mut SheetData> {
        self.sheets
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
            .ok_or_else(|| LedgerError::SheetNotFound {
                name: name.to_string(),
            })
    }

    fn take_injected_failure(&mut self) -> Option<LedgerError> {
        if self.fail_queue.is_empty() {
            None
        } else {
            self.fail_queue.remove(0)
        }
    }
}

/// In-memory spreadsheet.
///
/// Interior mutability via `Mutex` because the trait takes `&self`; locks
/// are held only for the duration of one map operation.
#[derive(Default)]
pub struct MemorySheets {
    inner: Mutex<Inner>,
}

impl MemorySheets {
    /// Creates an empty spreadsheet with no worksheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty worksheet. No-op if it already exists.
    pub fn create_sheet(&self, name: &str) {
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        if !inner.sheets.iter().any(|(n, _)| n == name) {
            inner.sheets.push((name.to_string(), SheetData::new()));
        }
    }

    /// Sets one cell directly, creating the worksheet if needed.
    /// Test/seeding helper; production writes go through the trait.
    pub fn set_cell(&self, sheet: &str, cell: CellAddress, value: &str) {
        self.create_sheet(sheet);
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        let data = inner.sheet_mut(sheet).expect("sheet just created");
        data.insert((cell.row, cell.col), value.to_string());
    }

    /// Reads one cell without going through the async trait. Test helper.
    pub fn cell(&self, sheet: &str, cell: CellAddress) -> Option<String> {
        let inner = self.inner.lock().expect("memory sheets mutex poisoned");
        inner
            .sheet(sheet)
            .ok()
            .and_then(|d| d.get(&(cell.row, cell.col)).cloned())
    }

    /// Number of occupied rows in a worksheet. Test helper.
    pub fn occupied_rows(&self, sheet: &str) -> usize {
        let inner = self.inner.lock().expect("memory sheets mutex poisoned");
        inner
            .sheet(sheet)
            .map(|d| {
                let mut rows: Vec<u32> = d.keys().map(|(r, _)| *r).collect();
                rows.sort_unstable();
                rows.dedup();
                rows.len()
            })
            .unwrap_or(0)
    }

    /// Queues errors to be returned by the next client calls, in order.
    /// Lets tests exercise the retry loop deterministically.
    pub fn inject_failures(&self, errors: Vec<LedgerError>) {
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        inner.fail_queue.extend(errors.into_iter().map(Some));
    }

    /// Queues one error to fire after the next `successes` calls go
    /// through. Lets tests fail a multi-step flow partway.
    pub fn inject_failure_after(&self, successes: usize, error: LedgerError) {
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        inner.fail_queue.extend((0..successes).map(|_| None));
        inner.fail_queue.push(Some(error));
    }

    fn guard(&self) -> LedgerResult<()> {
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        match inner.take_injected_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetClient for MemorySheets {
    async fn read_cell(&self, sheet: &str, cell: CellAddress) -> LedgerResult<Option<String>> {
        self.guard()?;
        let inner = self.inner.lock().expect("memory sheets mutex poisoned");
        Ok(inner.sheet(sheet)?.get(&(cell.row, cell.col)).cloned())
    }

    async fn write_cell(&self, sheet: &str, cell: CellAddress, value: &str) -> LedgerResult<()> {
        self.guard()?;
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        inner
            .sheet_mut(sheet)?
            .insert((cell.row, cell.col), value.to_string());
        Ok(())
    }

    async fn read_range(&self, sheet: &str, range: CellRange) -> LedgerResult<Grid> {
        self.guard()?;
        let inner = self.inner.lock().expect("memory sheets mutex poisoned");
        let data = inner.sheet(sheet)?;

        let mut grid = Vec::with_capacity(range.row_count() as usize);
        for row in range.start.row..=range.end.row {
            let mut cells = Vec::with_capacity(range.col_count() as usize);
            for col in range.start.col..=range.end.col {
                cells.push(data.get(&(row, col)).cloned());
            }
            grid.push(cells);
        }
        Ok(grid)
    }

    async fn write_range(&self, sheet: &str, range: CellRange, grid: Grid) -> LedgerResult<()> {
        self.guard()?;
        if grid.len() != range.row_count() as usize {
            return Err(LedgerError::GridShapeMismatch {
                expected: range.row_count() as usize,
                got: grid.len(),
            });
        }

        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        let data = inner.sheet_mut(sheet)?;

        for (row_offset, cells) in grid.iter().enumerate() {
            let row = range.start.row + row_offset as u32;
            for (col_offset, value) in cells.iter().enumerate() {
                let col = range.start.col + col_offset as u32;
                match value {
                    Some(v) => {
                        data.insert((row, col), v.clone());
                    }
                    None => {
                        data.remove(&(row, col));
                    }
                }
            }
        }
        Ok(())
    }

    async fn append_row(&self, sheet: &str, values: Vec<String>) -> LedgerResult<()> {
        self.guard()?;
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");
        let data = inner.sheet_mut(sheet)?;

        let next_row = data.keys().map(|(r, _)| *r).max().unwrap_or(0) + 1;
        for (col_offset, value) in values.into_iter().enumerate() {
            data.insert((next_row, col_offset as u32 + 1), value);
        }
        Ok(())
    }

    async fn duplicate_sheet(&self, source: &str, new_name: &str) -> LedgerResult<()> {
        self.guard()?;
        let mut inner = self.inner.lock().expect("memory sheets mutex poisoned");

        if inner.sheets.iter().any(|(n, _)| n == new_name) {
            return Err(LedgerError::SheetAlreadyExists {
                name: new_name.to_string(),
            });
        }
        let data = inner.sheet(source)?.clone();
        inner.sheets.push((new_name.to_string(), data));
        Ok(())
    }

    async fn list_sheet_names(&self) -> LedgerResult<Vec<String>> {
        self.guard()?;
        let inner = self.inner.lock().expect("memory sheets mutex poisoned");
        Ok(inner.sheets.iter().map(|(n, _)| n.clone()).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_cell_roundtrip_and_blank() {
        let sheets = MemorySheets::new();
        sheets.create_sheet("Inventory");

        assert_eq!(sheets.read_cell("Inventory", addr("C6")).await.unwrap(), None);

        sheets.write_cell("Inventory", addr("C6"), "4").await.unwrap();
        assert_eq!(
            sheets.read_cell("Inventory", addr("C6")).await.unwrap(),
            Some("4".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_sheet_errors() {
        let sheets = MemorySheets::new();
        let err = sheets.read_cell("Nope", addr("A1")).await;
        assert!(matches!(err, Err(LedgerError::SheetNotFound { .. })));
    }

    #[tokio::test]
    async fn test_range_shape() {
        let sheets = MemorySheets::new();
        sheets.set_cell("S", addr("B4"), "1");
        sheets.set_cell("S", addr("B6"), "3");

        let range = CellRange::column(2, 4, 6);
        let grid = sheets.read_range("S", range).await.unwrap();
        assert_eq!(
            grid,
            vec![
                vec![Some("1".to_string())],
                vec![None],
                vec![Some("3".to_string())],
            ]
        );
    }

    #[tokio::test]
    async fn test_write_range_blanks_with_none() {
        let sheets = MemorySheets::new();
        sheets.set_cell("S", addr("A2"), "old");

        let range = CellRange::new(addr("A2"), addr("B2"));
        sheets
            .write_range("S", range, vec![vec![None, Some("new".into())]])
            .await
            .unwrap();

        assert_eq!(sheets.cell("S", addr("A2")), None);
        assert_eq!(sheets.cell("S", addr("B2")), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_write_range_rejects_wrong_shape() {
        let sheets = MemorySheets::new();
        sheets.create_sheet("S");
        let range = CellRange::column(1, 1, 3);
        let err = sheets.write_range("S", range, vec![vec![None]]).await;
        assert!(matches!(
            err,
            Err(LedgerError::GridShapeMismatch { expected: 3, got: 1 })
        ));
    }

    #[tokio::test]
    async fn test_append_lands_below_last_occupied_row() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Log", addr("A1"), "header");

        sheets
            .append_row("Log", vec!["a".into(), "b".into()])
            .await
            .unwrap();
        sheets.append_row("Log", vec!["c".into()]).await.unwrap();

        assert_eq!(sheets.cell("Log", addr("A2")), Some("a".to_string()));
        assert_eq!(sheets.cell("Log", addr("B2")), Some("b".to_string()));
        assert_eq!(sheets.cell("Log", addr("A3")), Some("c".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_copies_data_once() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Template", addr("C6"), "9");

        sheets.duplicate_sheet("Template", "Copy").await.unwrap();
        assert_eq!(sheets.cell("Copy", addr("C6")), Some("9".to_string()));

        let err = sheets.duplicate_sheet("Template", "Copy").await;
        assert!(matches!(err, Err(LedgerError::SheetAlreadyExists { .. })));

        assert_eq!(
            sheets.list_sheet_names().await.unwrap(),
            vec!["Template".to_string(), "Copy".to_string()]
        );
    }

    #[tokio::test]
    async fn test_injected_failures_consumed_in_order() {
        let sheets = MemorySheets::new();
        sheets.create_sheet("S");
        sheets.inject_failures(vec![LedgerError::rate_limited("quota")]);

        let err = sheets.read_cell("S", addr("A1")).await;
        assert!(matches!(err, Err(LedgerError::RateLimited { .. })));

        // Queue drained - next call succeeds
        assert!(sheets.read_cell("S", addr("A1")).await.is_ok());
    }
}
