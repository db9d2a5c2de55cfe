//! # Stocks Handlers
//!
//! The stocks ledger editor: load the grid, save the non-blank edits.
//! Entirely separate from the order flow.

use tracing::{debug, info};

use mightee_core::types::StockRow;
use mightee_sheets::{SheetClient, StockEdit};

use crate::error::PosError;
use crate::PosContext;

/// Cache key for the stocks grid snapshot.
const CACHE_KEY: &str = "stock_rows";

/// Loads the stocks grid, from cache when nothing has been written since
/// the last load.
pub async fn stock_rows<C: SheetClient>(ctx: &PosContext<C>) -> Result<Vec<StockRow>, PosError> {
    if let Some(rows) = ctx.cache.get::<Vec<StockRow>>(CACHE_KEY) {
        debug!("stock_rows served from cache");
        return Ok(rows);
    }

    let rows = ctx.ledger.stocks().read_all().await?;
    ctx.cache.put(CACHE_KEY, &rows);
    debug!(rows = rows.len(), "stock_rows loaded");
    Ok(rows)
}

/// Saves a batch of edits (one per fixed row) and drops the snapshots.
///
/// Only non-blank values are written; blanks preserve the sheet. Returns
/// the number of cells written.
pub async fn save_stock_edits<C: SheetClient>(
    ctx: &PosContext<C>,
    edits: &[StockEdit],
) -> Result<usize, PosError> {
    let written = ctx.ledger.stocks().save(edits).await?;
    ctx.cache.invalidate();

    info!(written, "Stock edits saved");
    Ok(written)
}

// =============================================================================
// Unit Tests
// =============================================================================
