//! # Report Handlers
//!
//! Display snapshots of today's sheets, for the tables the form shows
//! below the widgets.
//!
//! ## Rerun Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every operator action triggers a full redisplay            │
//! │                                                                         │
//! │  rerun ──► today_inventory ──cache hit──► snapshot, zero remote calls   │
//! │       └──► today_sales     ──cache miss─► ensure partition + reads      │
//! │                                                                         │
//! │  Rendering is a pure function of the returned snapshot. The cache is    │
//! │  time-unbounded; only a write (commit, undo, stock save) drops it.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mightee_core::catalog;
use mightee_core::types::{CellAddress, Selection};
use mightee_sheets::{Grid, SheetClient};

use crate::error::PosError;
use crate::PosContext;

/// Cache key for the inventory snapshot.
const INVENTORY_KEY: &str = "today_inventory";

/// Cache key for the sales snapshot.
const SALES_KEY: &str = "today_sales";

/// How many sales-log rows the display reads below the header.
const SALES_DISPLAY_ROWS: u32 = 100;

// =============================================================================
// Snapshot DTOs
// =============================================================================

/// One tallied catalog cell on today's inventory sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub selection: Selection,
    pub cell: CellAddress,
    pub tally: i64,
}

/// Today's inventory sheet as the form displays it, one row per
/// catalog entry in sheet column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub date: NaiveDate,
    pub sheet: String,
    pub rows: Vec<InventoryRow>,
    pub total_units: i64,
}

/// Today's sales log as the form displays it: the raw data rows below
/// the header, trailing blank rows trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSnapshot {
    pub date: NaiveDate,
    pub sheet: String,
    pub rows: Grid,
}

// =============================================================================
// Handlers
// =============================================================================

/// Today's tallies, one per catalog cell.
///
/// Served from cache between writes; a miss resolves the partition
/// (creating it on the first call of the day) and re-reads every cell.
pub async fn today_inventory<C: SheetClient>(
    ctx: &PosContext<C>,
) -> Result<InventorySnapshot, PosError> {
    if let Some(snapshot) = ctx.cache.get::<InventorySnapshot>(INVENTORY_KEY) {
        debug!("today_inventory served from cache");
        return Ok(snapshot);
    }

    let partitions = ctx.ledger.partitions();
    let partition = partitions.ensure(partitions.today()).await?;
    let inventory = ctx.ledger.inventory();

    let mut rows = Vec::with_capacity(catalog::CATALOG.len());
    let mut total_units = 0;
    for entry in catalog::CATALOG.iter() {
        let tally = inventory.current(&partition.inventory, entry.cell).await?;
        total_units += tally;
        rows.push(InventoryRow {
            selection: entry.selection,
            cell: entry.cell,
            tally,
        });
    }

    let snapshot = InventorySnapshot {
        date: partition.date,
        sheet: partition.inventory,
        rows,
        total_units,
    };
    ctx.cache.put(INVENTORY_KEY, &snapshot);
    debug!(total_units, "today_inventory loaded");
    Ok(snapshot)
}

/// Today's sales-log rows, for the sales table.
pub async fn today_sales<C: SheetClient>(ctx: &PosContext<C>) -> Result<SalesSnapshot, PosError> {
    if let Some(snapshot) = ctx.cache.get::<SalesSnapshot>(SALES_KEY) {
        debug!("today_sales served from cache");
        return Ok(snapshot);
    }

    let partitions = ctx.ledger.partitions();
    let partition = partitions.ensure(partitions.today()).await?;

    let mut rows = ctx
        .ledger
        .sales_log()
        .recent(&partition.sales_log, SALES_DISPLAY_ROWS)
        .await?;
    while rows
        .last()
        .map_or(false, |row| row.iter().all(Option::is_none))
    {
        rows.pop();
    }

    let snapshot = SalesSnapshot {
        date: partition.date,
        sheet: partition.sales_log,
        rows,
    };
    ctx.cache.put(SALES_KEY, &snapshot);
    debug!(rows = snapshot.rows.len(), "today_sales loaded");
    Ok(snapshot)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mightee_core::types::{Packaging, Product, Variant};
    use mightee_sheets::{Ledger, MemorySheets, SheetsConfig};

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn juice_small() -> Selection {
        Selection::new(Product::BukoJuice, Packaging::Cup, Variant::Small)
    }

    fn test_context() -> PosContext<MemorySheets> {
        let sheets = MemorySheets::new();
        sheets.create_sheet("Inventory");
        sheets.set_cell("SalesLog", addr("A1"), "Date");
        PosContext::new(Ledger::new(sheets, SheetsConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_fresh_day_shows_all_zeroes() {
        let ctx = test_context();

        let snapshot = today_inventory(&ctx).await.unwrap();
        assert_eq!(snapshot.rows.len(), 14);
        assert!(snapshot.rows.iter().all(|r| r.tally == 0));
        assert_eq!(snapshot.total_units, 0);
        assert!(snapshot.sheet.starts_with("Inventory_"));
    }

    #[tokio::test]
    async fn test_inventory_rows_follow_catalog_order() {
        let ctx = test_context();

        let partitions = ctx.ledger.partitions();
        let partition = partitions.ensure(partitions.today()).await.unwrap();
        ctx.ledger
            .inventory()
            .increment(&partition.inventory, addr("C6"), 2)
            .await
            .unwrap();
        ctx.ledger
            .inventory()
            .increment(&partition.inventory, addr("O6"), 1)
            .await
            .unwrap();

        let snapshot = today_inventory(&ctx).await.unwrap();
        assert_eq!(snapshot.rows[0].selection, juice_small());
        assert_eq!(snapshot.rows[0].tally, 2);
        assert_eq!(snapshot.rows[12].tally, 1);
        assert_eq!(snapshot.total_units, 3);
    }

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let ctx = test_context();
        let first = today_inventory(&ctx).await.unwrap();

        // A direct sheet change is invisible until something invalidates
        ctx.ledger.client().set_cell(&first.sheet, addr("C6"), "9");
        let second = today_inventory(&ctx).await.unwrap();
        assert_eq!(first, second);

        ctx.cache.invalidate();
        let third = today_inventory(&ctx).await.unwrap();
        assert_eq!(third.rows[0].tally, 9);
    }

    #[tokio::test]
    async fn test_sales_snapshot_trims_trailing_blanks() {
        let ctx = test_context();

        let partitions = ctx.ledger.partitions();
        let partition = partitions.ensure(partitions.today()).await.unwrap();
        let record = mightee_core::types::SaleRecord {
            date: partition.date,
            time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            product: Product::BukoJuice,
            packaging: Packaging::Cup,
            variant: Variant::Small,
            quantity: 2,
            amount: mightee_core::Money::from_pesos(130),
        };
        ctx.ledger
            .sales_log()
            .append(&partition.sales_log, &record)
            .await
            .unwrap();

        let snapshot = today_sales(&ctx).await.unwrap();
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(
            snapshot.rows[0][0],
            Some(partition.date.format("%Y-%m-%d").to_string())
        );
        assert_eq!(snapshot.rows[0][6], Some("130.00".to_string()));
    }

    #[tokio::test]
    async fn test_empty_log_yields_no_rows() {
        let ctx = test_context();
        let snapshot = today_sales(&ctx).await.unwrap();
        assert!(snapshot.rows.is_empty());
    }
}
