//! # Sales Log
//!
//! Append-only record of committed line items on the day's log sheet.
//!
//! Row layout (columns A..G):
//! `date | time | product | packaging | variant | quantity | amount`

use tracing::debug;

use mightee_core::types::{CellAddress, CellRange, SaleRecord};

use crate::client::{Grid, SheetClient};
use crate::error::LedgerResult;
use crate::partition::LOG_COLUMNS;

/// Append/read operations on a day's sales-log sheet.
pub struct SalesLogRepository<'a, C: SheetClient> {
    client: &'a C,
}

impl<'a, C: SheetClient> SalesLogRepository<'a, C> {
    pub(crate) fn new(client: &'a C) -> Self {
        SalesLogRepository { client }
    }

    /// Appends one committed line item to the log.
    pub async fn append(&self, sheet: &str, record: &SaleRecord) -> LedgerResult<()> {
        let row = vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.time.format("%H:%M:%S").to_string(),
            record.product.to_string(),
            record.packaging.to_string(),
            record.variant.to_string(),
            record.quantity.to_string(),
            record.amount.to_decimal_string(),
        ];

        self.client.append_row(sheet, row).await?;
        debug!(
            sheet,
            product = %record.product,
            quantity = record.quantity,
            amount = %record.amount,
            "Sale logged"
        );
        Ok(())
    }

    /// Reads up to `max_rows` data rows below the header, for display.
    pub async fn recent(&self, sheet: &str, max_rows: u32) -> LedgerResult<Grid> {
        let range = CellRange::new(
            CellAddress::new(1, 2),
            CellAddress::new(LOG_COLUMNS, 1 + max_rows),
        );
        self.client.read_range(sheet, range).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySheets;
    use chrono::{NaiveDate, NaiveTime};
    use mightee_core::money::Money;
    use mightee_core::types::{Packaging, Product, Variant};

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn record() -> SaleRecord {
        SaleRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 5).unwrap(),
            product: Product::BukoJuice,
            packaging: Packaging::Cup,
            variant: Variant::Small,
            quantity: 2,
            amount: Money::from_pesos(130),
        }
    }

    #[tokio::test]
    async fn test_append_writes_seven_columns() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Log", addr("A1"), "Date");
        let repo = SalesLogRepository::new(&sheets);

        repo.append("Log", &record()).await.unwrap();

        assert_eq!(sheets.cell("Log", addr("A2")), Some("2024-06-01".to_string()));
        assert_eq!(sheets.cell("Log", addr("B2")), Some("14:30:05".to_string()));
        assert_eq!(sheets.cell("Log", addr("C2")), Some("Buko Juice".to_string()));
        assert_eq!(sheets.cell("Log", addr("D2")), Some("Cup".to_string()));
        assert_eq!(sheets.cell("Log", addr("E2")), Some("Small".to_string()));
        assert_eq!(sheets.cell("Log", addr("F2")), Some("2".to_string()));
        assert_eq!(sheets.cell("Log", addr("G2")), Some("130.00".to_string()));
    }

    #[tokio::test]
    async fn test_appends_stack_in_order() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Log", addr("A1"), "Date");
        let repo = SalesLogRepository::new(&sheets);

        repo.append("Log", &record()).await.unwrap();
        let mut second = record();
        second.product = Product::Pizza;
        second.packaging = Packaging::Box;
        second.variant = Variant::Supreme;
        second.quantity = 1;
        second.amount = Money::from_pesos(250);
        repo.append("Log", &second).await.unwrap();

        assert_eq!(sheets.cell("Log", addr("C2")), Some("Buko Juice".to_string()));
        assert_eq!(sheets.cell("Log", addr("C3")), Some("Pizza".to_string()));
        assert_eq!(sheets.cell("Log", addr("G3")), Some("250.00".to_string()));
    }

    #[tokio::test]
    async fn test_recent_reads_data_rows() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Log", addr("A1"), "Date");
        let repo = SalesLogRepository::new(&sheets);
        repo.append("Log", &record()).await.unwrap();

        let grid = repo.recent("Log", 3).await.unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][0], Some("2024-06-01".to_string()));
        assert_eq!(grid[1][0], None);
    }
}
