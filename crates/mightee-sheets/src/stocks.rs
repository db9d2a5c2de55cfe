//! # Stocks Ledger
//!
//! Batch read and save of the raw-material stocks sheet. Independent of
//! the order flow and not partitioned by day.
//!
//! ## Sheet Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │        A              B                  C             D                │
//! │  ┌────────────┬──────────────────┬─────────────┬────────────────┐      │
//! │  │ Stock      │ Beginning        │ Quantity In │ Ending         │ ← hdr │
//! │  ├────────────┼──────────────────┼─────────────┼────────────────┤      │
//! │  │ Buko       │ 50               │ 20          │ 30             │ row 4 │
//! │  │ Sugar      │ 12.5             │             │ 8              │ row 5 │
//! │  │ ...        │                  │             │                │       │
//! │  └────────────┴──────────────────┴─────────────┴────────────────┘      │
//! │                                                                         │
//! │  The name column and row order are fixed configuration. Saving          │
//! │  writes back ONLY cells whose edited value is non-blank; a blank        │
//! │  edit preserves whatever the sheet already holds.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use mightee_core::types::{CellAddress, CellRange, StockRow};
use mightee_core::validation::parse_balance;

use crate::client::SheetClient;
use crate::config::StocksSettings;
use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Columns
// =============================================================================

const COL_BEGINNING: u32 = 2; // B
const COL_QUANTITY_IN: u32 = 3; // C
const COL_ENDING: u32 = 4; // D

// =============================================================================
// Stock Edit
// =============================================================================

/// One edited grid row as it comes back from the form. `None` or a
/// blank string means "leave that cell alone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEdit {
    pub beginning_balance: Option<String>,
    pub quantity_in: Option<String>,
    pub ending_balance: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    let s = value.as_deref()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// =============================================================================
// Stocks Repository
// =============================================================================

/// Batch operations on the stocks worksheet.
pub struct StocksRepository<'a, C: SheetClient> {
    client: &'a C,
    sheet: &'a str,
    layout: &'a StocksSettings,
}

impl<'a, C: SheetClient> StocksRepository<'a, C> {
    pub(crate) fn new(client: &'a C, sheet: &'a str, layout: &'a StocksSettings) -> Self {
        StocksRepository {
            client,
            sheet,
            layout,
        }
    }

    fn column_range(&self, col: u32) -> CellRange {
        CellRange::column(col, self.layout.first_row, self.layout.last_row())
    }

    /// Reads the three balance columns for the fixed row list.
    pub async fn read_all(&self) -> LedgerResult<Vec<StockRow>> {
        let beginning = self
            .client
            .read_range(self.sheet, self.column_range(COL_BEGINNING))
            .await?;
        let quantity_in = self
            .client
            .read_range(self.sheet, self.column_range(COL_QUANTITY_IN))
            .await?;
        let ending = self
            .client
            .read_range(self.sheet, self.column_range(COL_ENDING))
            .await?;

        let rows = self
            .layout
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| StockRow {
                name: name.clone(),
                beginning_balance: parse_balance(beginning[i][0].as_deref()),
                quantity_in: parse_balance(quantity_in[i][0].as_deref()),
                ending_balance: parse_balance(ending[i][0].as_deref()),
            })
            .collect();

        Ok(rows)
    }

    /// Saves a batch of edits, one per fixed row, in row order.
    ///
    /// Only non-blank edited values are written; blanks preserve the
    /// previous cell. Every non-blank value must parse as a number;
    /// validation happens before the first write, so a bad value aborts
    /// the whole save. Returns the number of cells written.
    pub async fn save(&self, edits: &[StockEdit]) -> LedgerResult<usize> {
        if edits.len() != self.layout.names.len() {
            return Err(LedgerError::GridShapeMismatch {
                expected: self.layout.names.len(),
                got: edits.len(),
            });
        }

        // Validate everything up front
        for edit in edits {
            for value in [
                &edit.beginning_balance,
                &edit.quantity_in,
                &edit.ending_balance,
            ] {
                if let Some(s) = non_blank(value) {
                    if parse_balance(Some(s)).is_none() {
                        return Err(LedgerError::InvalidNumber {
                            value: s.to_string(),
                        });
                    }
                }
            }
        }

        let mut written = 0;
        for (i, edit) in edits.iter().enumerate() {
            let row = self.layout.first_row + i as u32;
            let cells = [
                (COL_BEGINNING, &edit.beginning_balance),
                (COL_QUANTITY_IN, &edit.quantity_in),
                (COL_ENDING, &edit.ending_balance),
            ];
            for (col, value) in cells {
                if let Some(s) = non_blank(value) {
                    self.client
                        .write_cell(self.sheet, CellAddress::new(col, row), s)
                        .await?;
                    written += 1;
                }
            }
        }

        debug!(sheet = %self.sheet, written, "Stock edits saved");
        Ok(written)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
