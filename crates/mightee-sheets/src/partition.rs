//! # Daily Partition Manager
//!
//! One date-stamped copy of the inventory and sales-log sheets per
//! calendar day, created lazily on first use.
//!
//! ## Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 ensure(date) - idempotent per sheet                     │
//! │                                                                         │
//! │  list_sheet_names()                                                     │
//! │       │                                                                 │
//! │       ├── "Inventory_2024-06-01" missing?                               │
//! │       │      duplicate("Inventory") ──► write "0" to every catalog cell │
//! │       │                                                                 │
//! │       └── "SalesLog_2024-06-01" missing?                                │
//! │              duplicate("SalesLog") ──► blank all rows below the header  │
//! │                                                                         │
//! │  Both checks are PER SHEET, not transactional across the pair: a        │
//! │  failure in between leaves the partition half-created, and the next     │
//! │  call retries only the missing half. There is no rollback.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mightee_core::catalog;
use mightee_core::types::{CellAddress, CellRange};

use crate::client::SheetClient;
use crate::config::SheetsConfig;
use crate::error::LedgerResult;

// =============================================================================
// Constants
// =============================================================================

/// How many data rows below the header get blanked in a fresh sales-log
/// copy. The template sheets are far smaller than this window.
const LOG_CLEAR_ROWS: u32 = 500;

/// Sales-log column count: date, time, product, packaging, variant,
/// quantity, amount.
pub const LOG_COLUMNS: u32 = 7;

// =============================================================================
// Daily Partition
// =============================================================================

/// Resolved handles to "today's" sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPartition {
    pub date: NaiveDate,
    pub inventory: String,
    pub sales_log: String,
}

// =============================================================================
// Partition Manager
// =============================================================================

/// Lazily creates and resolves daily sheet copies.
pub struct PartitionManager<'a, C: SheetClient> {
    client: &'a C,
    config: &'a SheetsConfig,
}

impl<'a, C: SheetClient> PartitionManager<'a, C> {
    pub(crate) fn new(client: &'a C, config: &'a SheetsConfig) -> Self {
        PartitionManager { client, config }
    }

    /// The stall's fixed-offset timezone.
    fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.config.partition.utc_offset_hours * 3600)
            .expect("offset validated to ±14h")
    }

    /// Current timestamp in the stall's timezone.
    pub fn now_local(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone())
    }

    /// Today's date in the stall's timezone.
    pub fn today(&self) -> NaiveDate {
        self.now_local().date_naive()
    }

    /// The date-qualified name of a daily copy.
    pub fn partition_name(base: &str, date: NaiveDate) -> String {
        format!("{}_{}", base, date.format("%Y-%m-%d"))
    }

    /// Ensures both daily copies exist for `date` and resolves handles.
    ///
    /// Repeated calls after creation are pure lookups with no mutation.
    pub async fn ensure(&self, date: NaiveDate) -> LedgerResult<DailyPartition> {
        let inventory = Self::partition_name(&self.config.spreadsheet.inventory_template, date);
        let sales_log = Self::partition_name(&self.config.spreadsheet.sales_template, date);

        let existing = self.client.list_sheet_names().await?;

        if !existing.iter().any(|n| n == &inventory) {
            self.create_inventory_copy(&inventory).await?;
        } else {
            debug!(sheet = %inventory, "Inventory partition already exists");
        }

        if !existing.iter().any(|n| n == &sales_log) {
            self.create_sales_log_copy(&sales_log).await?;
        } else {
            debug!(sheet = %sales_log, "Sales-log partition already exists");
        }

        Ok(DailyPartition {
            date,
            inventory,
            sales_log,
        })
    }

    /// Duplicates the inventory template and zeroes every tracked cell,
    /// so yesterday's tallies never leak into a fresh day.
    async fn create_inventory_copy(&self, name: &str) -> LedgerResult<()> {
        self.client
            .duplicate_sheet(&self.config.spreadsheet.inventory_template, name)
            .await?;

        for cell in catalog::tracked_cells() {
            self.client.write_cell(name, cell, "0").await?;
        }

        info!(sheet = %name, "Inventory partition created and zeroed");
        Ok(())
    }

    /// Duplicates the sales-log template and blanks the data rows below
    /// the header.
    async fn create_sales_log_copy(&self, name: &str) -> LedgerResult<()> {
        self.client
            .duplicate_sheet(&self.config.spreadsheet.sales_template, name)
            .await?;

        let clear_range = CellRange::new(
            CellAddress::new(1, 2),
            CellAddress::new(LOG_COLUMNS, 1 + LOG_CLEAR_ROWS),
        );
        let blank_grid = vec![vec![None; LOG_COLUMNS as usize]; LOG_CLEAR_ROWS as usize];
        self.client.write_range(name, clear_range, blank_grid).await?;

        info!(sheet = %name, "Sales-log partition created and cleared");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySheets;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn seeded_sheets() -> MemorySheets {
        let sheets = MemorySheets::new();
        // Templates carry stale content the daily copy must not inherit
        sheets.set_cell("Inventory", addr("C6"), "42");
        sheets.set_cell("SalesLog", addr("A1"), "Date");
        sheets.set_cell("SalesLog", addr("A2"), "2024-05-31");
        sheets.set_cell("SalesLog", addr("G2"), "130.00");
        sheets
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_partition_name_format() {
        assert_eq!(
            PartitionManager::<MemorySheets>::partition_name("Inventory", date()),
            "Inventory_2024-06-01"
        );
    }

    #[tokio::test]
    async fn test_ensure_creates_zeroed_inventory_copy() {
        let sheets = seeded_sheets();
        let config = SheetsConfig::default();
        let manager = PartitionManager::new(&sheets, &config);

        let partition = manager.ensure(date()).await.unwrap();
        assert_eq!(partition.inventory, "Inventory_2024-06-01");
        assert_eq!(partition.sales_log, "SalesLog_2024-06-01");

        // Every tracked cell zeroed, template untouched
        for cell in catalog::tracked_cells() {
            assert_eq!(
                sheets.cell("Inventory_2024-06-01", cell),
                Some("0".to_string())
            );
        }
        assert_eq!(sheets.cell("Inventory", addr("C6")), Some("42".to_string()));
    }

    #[tokio::test]
    async fn test_ensure_clears_log_rows_below_header() {
        let sheets = seeded_sheets();
        let config = SheetsConfig::default();
        let manager = PartitionManager::new(&sheets, &config);

        manager.ensure(date()).await.unwrap();

        let copy = "SalesLog_2024-06-01";
        assert_eq!(sheets.cell(copy, addr("A1")), Some("Date".to_string()));
        assert_eq!(sheets.cell(copy, addr("A2")), None);
        assert_eq!(sheets.cell(copy, addr("G2")), None);
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let sheets = seeded_sheets();
        let config = SheetsConfig::default();
        let manager = PartitionManager::new(&sheets, &config);

        let first = manager.ensure(date()).await.unwrap();

        // A day's worth of tallies accumulates...
        sheets.set_cell("Inventory_2024-06-01", addr("C6"), "5");

        // ...and the second call is a pure lookup that clobbers nothing
        let second = manager.ensure(date()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            sheets.cell("Inventory_2024-06-01", addr("C6")),
            Some("5".to_string())
        );

        let names = sheets.list_sheet_names().await.unwrap();
        assert_eq!(
            names.iter().filter(|n| n.starts_with("Inventory_")).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_ensure_retries_only_the_missing_half() {
        let sheets = seeded_sheets();
        let config = SheetsConfig::default();
        let manager = PartitionManager::new(&sheets, &config);

        // A previous run created the inventory half and died before the
        // log half; its tallies must survive the retry.
        sheets.set_cell("Inventory_2024-06-01", addr("C6"), "3");

        let partition = manager.ensure(date()).await.unwrap();
        assert_eq!(
            sheets.cell(&partition.inventory, addr("C6")),
            Some("3".to_string())
        );
        assert_eq!(sheets.cell(&partition.sales_log, addr("A1")), Some("Date".to_string()));
    }

    #[tokio::test]
    async fn test_separate_dates_get_separate_copies() {
        let sheets = seeded_sheets();
        let config = SheetsConfig::default();
        let manager = PartitionManager::new(&sheets, &config);

        manager.ensure(date()).await.unwrap();
        manager
            .ensure(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
            .await
            .unwrap();

        let names = sheets.list_sheet_names().await.unwrap();
        assert!(names.contains(&"Inventory_2024-06-01".to_string()));
        assert!(names.contains(&"Inventory_2024-06-02".to_string()));
    }
}
