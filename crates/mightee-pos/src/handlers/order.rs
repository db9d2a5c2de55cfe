//! # Order Handlers
//!
//! Cart manipulation plus the undo flow for already-committed entries.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Order │────►│ Tendered │────►│Committed │        │
//! │  │  Order   │     │          │     │          │     │  + clear │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │                 │                              │
//! │                   add_item          complete_checkout                   │
//! │                   remove_item       (checkout.rs)                       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_order ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mightee_core::{catalog, CheckoutState, LineItem, Money, OrderSession, Selection};
use mightee_sheets::SheetClient;

use crate::error::PosError;
use crate::PosContext;

/// Order snapshot handed to the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub checkout: CheckoutState,
    pub last_change_due: Option<Money>,
}

impl From<&OrderSession> for OrderView {
    fn from(session: &OrderSession) -> Self {
        OrderView {
            items: session.items.clone(),
            total: session.total(),
            checkout: session.checkout,
            last_change_due: session.last_change_due,
        }
    }
}

/// Returns the current order contents.
pub fn view_order<C: SheetClient>(ctx: &PosContext<C>) -> OrderView {
    debug!("view_order");
    ctx.session.with_session(|s| OrderView::from(s))
}

/// Adds a selection to the order, freezing its catalog price.
pub fn add_item<C: SheetClient>(
    ctx: &PosContext<C>,
    selection: Selection,
    quantity: i64,
) -> Result<OrderView, PosError> {
    debug!(selection = %selection, quantity, "add_item");

    ctx.session.with_session_mut(|s| {
        s.add_item(selection, quantity)?;
        Ok(OrderView::from(&*s))
    })
}

/// Removes the item at a display position.
pub fn remove_item<C: SheetClient>(
    ctx: &PosContext<C>,
    index: usize,
) -> Result<OrderView, PosError> {
    debug!(index, "remove_item");

    ctx.session.with_session_mut(|s| {
        s.remove_item(index)?;
        Ok(OrderView::from(&*s))
    })
}

/// Empties the order and resets the checkout flow.
pub fn clear_order<C: SheetClient>(ctx: &PosContext<C>) -> OrderView {
    debug!("clear_order");

    ctx.session.with_session_mut(|s| {
        s.clear();
        OrderView::from(&*s)
    })
}

/// Reverses an entry already recorded on today's inventory sheet.
///
/// This is the one flow that decrements the ledger: the tally cell is
/// walked back (floored at zero) with the bounded retry loop. Returns
/// the new tally.
pub async fn undo_entry<C: SheetClient>(
    ctx: &PosContext<C>,
    selection: Selection,
    quantity: i64,
) -> Result<i64, PosError> {
    mightee_core::validation::validate_quantity(quantity)?;
    let entry = catalog::lookup(selection)?;

    let partitions = ctx.ledger.partitions();
    let partition = partitions.ensure(partitions.today()).await?;

    let result = ctx
        .ledger
        .inventory()
        .decrement(&partition.inventory, entry.cell, quantity)
        .await;
    // Some attempts may have written before a later failure; drop
    // snapshots either way
    ctx.cache.invalidate();
    let new_tally = result?;

    info!(selection = %selection, quantity, new_tally, "Entry undone");
    Ok(new_tally)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mightee_core::types::{CellAddress, Packaging, Product, Variant};
    use mightee_sheets::{Ledger, MemorySheets, SheetsConfig};

    fn juice_small() -> Selection {
        Selection::new(Product::BukoJuice, Packaging::Cup, Variant::Small)
    }

    fn test_context() -> PosContext<MemorySheets> {
        let sheets = MemorySheets::new();
        sheets.create_sheet("Inventory");
        sheets.set_cell(
            "SalesLog",
            CellAddress::parse("A1").unwrap(),
            "Date",
        );
        PosContext::new(Ledger::new(sheets, SheetsConfig::default()).unwrap())
    }

    #[test]
    fn test_add_and_view() {
        let ctx = test_context();

        let view = add_item(&ctx, juice_small(), 2).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total, Money::from_pesos(130));

        let view = view_order(&ctx);
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_remove_stale_index_maps_to_error_code() {
        let ctx = test_context();
        add_item(&ctx, juice_small(), 1).unwrap();

        let err = remove_item(&ctx, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::IndexOutOfRange);
    }

    #[test]
    fn test_clear_resets() {
        let ctx = test_context();
        add_item(&ctx, juice_small(), 2).unwrap();

        let view = clear_order(&ctx);
        assert!(view.items.is_empty());
        assert_eq!(view.checkout, CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_undo_entry_decrements_today() {
        let ctx = test_context();

        // Record today's partition with a tally of 4
        let partitions = ctx.ledger.partitions();
        let partition = partitions.ensure(partitions.today()).await.unwrap();
        let cell = catalog::lookup(juice_small()).unwrap().cell;
        ctx.ledger
            .inventory()
            .increment(&partition.inventory, cell, 4)
            .await
            .unwrap();

        let new_tally = undo_entry(&ctx, juice_small(), 1).await.unwrap();
        assert_eq!(new_tally, 3);
    }

    #[tokio::test]
    async fn test_undo_entry_invalidates_cache() {
        let ctx = test_context();
        let partitions = ctx.ledger.partitions();
        partitions.ensure(partitions.today()).await.unwrap();

        ctx.cache.put("today_inventory", &vec![1, 2, 3]);
        undo_entry(&ctx, juice_small(), 1).await.unwrap();
        assert_eq!(ctx.cache.get::<Vec<i32>>("today_inventory"), None);
    }
}
