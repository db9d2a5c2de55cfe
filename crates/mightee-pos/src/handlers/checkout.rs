//! # Checkout Handlers
//!
//! Submit, tender, and the deferred commit.
//!
//! ## The Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    complete_checkout                                    │
//! │                                                                         │
//! │  1. commit_plan()        ── session must be ReadyToComplete             │
//! │  2. ensure(today)        ── lazily create today's sheet copies          │
//! │  3. per line item:                                                      │
//! │       increment tally cell  (read-modify-write, no retry)               │
//! │       append sales-log row                                              │
//! │  4. finish()             ── clear cart, remember change, back to Idle   │
//! │  5. invalidate cache                                                    │
//! │                                                                         │
//! │  A failure inside step 3 leaves earlier items applied and later ones    │
//! │  not - there is no compensating rollback. The session stays in          │
//! │  ReadyToComplete so the operator sees the error; retrying the           │
//! │  completion re-applies EVERY item and double-counts the ones that       │
//! │  already landed. Accepted risk, reproduced from the deployed system.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use chrono::{NaiveDate, NaiveTime};
use mightee_core::types::SaleRecord;
use mightee_core::{CheckoutPlan, LineItem, Money, Selection};
use mightee_sheets::{DailyPartition, SheetClient};

use crate::error::PosError;
use crate::handlers::order::OrderView;
use crate::PosContext;

// =============================================================================
// Response DTOs
// =============================================================================

/// Outcome of a tender attempt that covered the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub total: Money,
    pub cash_received: Money,
    pub change: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub selection: Selection,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&LineItem> for ReceiptItem {
    fn from(item: &LineItem) -> Self {
        ReceiptItem {
            selection: item.selection,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

/// What the operator sees after a completed checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub receipt_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub items: Vec<ReceiptItem>,
    pub total: Money,
    pub cash_received: Money,
    pub change: Money,
}

// =============================================================================
// Handlers
// =============================================================================

/// Moves a non-empty order into AwaitingPayment.
pub fn submit_order<C: SheetClient>(ctx: &PosContext<C>) -> Result<OrderView, PosError> {
    debug!("submit_order");

    ctx.session.with_session_mut(|s| {
        s.submit()?;
        Ok(OrderView::from(&*s))
    })
}

/// Records the cash received and computes the change.
///
/// An insufficient amount surfaces as an error and leaves the session in
/// AwaitingPayment with the cart untouched.
pub fn tender_cash<C: SheetClient>(
    ctx: &PosContext<C>,
    cash_received: Money,
) -> Result<TenderResponse, PosError> {
    debug!(cash_received = %cash_received, "tender_cash");

    ctx.session.with_session_mut(|s| {
        let change = s.tender(cash_received)?;
        Ok(TenderResponse {
            total: s.total(),
            cash_received,
            change,
        })
    })
}

/// The explicit completion: applies every line item to the ledger, logs
/// it, clears the cart.
pub async fn complete_checkout<C: SheetClient>(
    ctx: &PosContext<C>,
) -> Result<ReceiptResponse, PosError> {
    let plan = ctx.session.with_session(|s| s.commit_plan())?;
    let receipt_id = Uuid::new_v4().to_string();

    debug!(receipt_id = %receipt_id, items = plan.items.len(), "complete_checkout");

    let partitions = ctx.ledger.partitions();
    let now = partitions.now_local();
    let date = now.date_naive();
    let time = now.time();

    let commit = async {
        let partition = partitions.ensure(date).await?;
        apply_plan(ctx, &plan, &partition, date, time).await?;
        Ok::<_, PosError>(())
    }
    .await;

    // Snapshots drop even on failure - some writes may already have landed
    ctx.cache.invalidate();
    commit?;

    let change = ctx.session.with_session_mut(|s| s.finish())?;

    info!(
        receipt_id = %receipt_id,
        total = %plan.total,
        cash_received = %plan.cash_received,
        change = %change,
        items = plan.items.len(),
        "Checkout completed"
    );

    Ok(ReceiptResponse {
        receipt_id,
        date,
        time,
        items: plan.items.iter().map(ReceiptItem::from).collect(),
        total: plan.total,
        cash_received: plan.cash_received,
        change,
    })
}

/// One tally increment plus one log append per line item, in cart order.
async fn apply_plan<C: SheetClient>(
    ctx: &PosContext<C>,
    plan: &CheckoutPlan,
    partition: &DailyPartition,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<(), PosError> {
    for item in &plan.items {
        ctx.ledger
            .inventory()
            .increment(&partition.inventory, item.cell, item.quantity)
            .await?;

        let record = SaleRecord {
            date,
            time,
            product: item.selection.product,
            packaging: item.selection.packaging,
            variant: item.selection.variant,
            quantity: item.quantity,
            amount: item.line_total(),
        };
        ctx.ledger
            .sales_log()
            .append(&partition.sales_log, &record)
            .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
