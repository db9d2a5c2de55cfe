//! # Order Session
//!
//! The in-memory, per-session cart: an ordered sequence of line items
//! plus the checkout state riding along with it.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Session Operations                             │
//! │                                                                         │
//! │  Operator Action          Session Change                                │
//! │  ───────────────          ──────────────                                │
//! │                                                                         │
//! │  Add selection ──────────► items.push(line)   (price frozen here)       │
//! │                                                                         │
//! │  Remove row ─────────────► items.remove(i)    (by display position)     │
//! │                                                                         │
//! │  New order / cancel ─────► clear()            (checkout back to Idle)   │
//! │                                                                         │
//! │  Insertion order IS display order IS removal order.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::checkout::CheckoutState;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CellAddress, Selection};
use crate::validation::validate_quantity;

// =============================================================================
// Line Item
// =============================================================================

/// One priced entry in an in-progress order.
///
/// ## Price Freezing
/// The unit price and tally cell are captured from the catalog when the
/// item is added. The session never re-resolves them, so a cart displays
/// consistent data for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub selection: Selection,
    pub quantity: i64,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Inventory tally cell at time of adding (frozen).
    pub cell: CellAddress,
}

impl LineItem {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Session
// =============================================================================

/// The shopping cart for one interactive session.
///
/// ## Invariants
/// - Items keep insertion order; removal is by position
/// - Every quantity is ≥ 1
/// - Cleared on successful checkout or explicit reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSession {
    /// Line items, insertion order.
    pub items: Vec<LineItem>,

    /// Where this session is in the checkout flow.
    pub checkout: CheckoutState,

    /// Change handed back on the most recent completed checkout, kept
    /// around so the UI can keep showing it after the cart resets.
    pub last_change_due: Option<Money>,
}

impl OrderSession {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selection to the order, freezing its price and tally cell.
    ///
    /// There is no item-count limit; the same selection may appear on
    /// several rows. Quantity must be ≥ 1.
    pub fn add_item(&mut self, selection: Selection, quantity: i64) -> CoreResult<&LineItem> {
        validate_quantity(quantity)?;
        let entry = catalog::lookup(selection)?;

        self.items.push(LineItem {
            selection,
            quantity,
            unit_price: entry.unit_price,
            cell: entry.cell,
        });
        Ok(self.items.last().expect("just pushed"))
    }

    /// Removes the item at `index` (display position) and returns it.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Sum of line totals. Pure, no side effect.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// Empties the order and resets checkout to Idle.
    pub fn clear(&mut self) {
        self.items.clear();
        self.checkout = CheckoutState::Idle;
    }

    /// Checks if the order has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of line items (rows, not units).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all rows.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Packaging, Product, Variant};

    fn juice_small() -> Selection {
        Selection::new(Product::BukoJuice, Packaging::Cup, Variant::Small)
    }

    fn pizza_supreme() -> Selection {
        Selection::new(Product::Pizza, Packaging::Box, Variant::Supreme)
    }

    #[test]
    fn test_add_item_freezes_price_and_cell() {
        let mut session = OrderSession::new();
        let item = session.add_item(juice_small(), 2).unwrap();

        assert_eq!(item.unit_price, Money::from_pesos(65));
        assert_eq!(item.cell.to_string(), "C6");
        assert_eq!(item.line_total(), Money::from_pesos(130));
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let mut session = OrderSession::new();
        let err = session.add_item(juice_small(), 0);
        assert!(matches!(err, Err(CoreError::InvalidQuantity { quantity: 0 })));
        assert!(session.is_empty());
    }

    #[test]
    fn test_total_over_add_remove_sequence() {
        let mut session = OrderSession::new();
        session.add_item(juice_small(), 2).unwrap();
        session.add_item(pizza_supreme(), 1).unwrap();
        assert_eq!(session.total(), Money::from_pesos(380));

        let removed = session.remove_item(0).unwrap();
        assert_eq!(removed.selection, juice_small());
        assert_eq!(session.total(), Money::from_pesos(250));

        session.add_item(juice_small(), 3).unwrap();
        assert_eq!(session.total(), Money::from_pesos(445));
    }

    #[test]
    fn test_same_selection_keeps_separate_rows() {
        let mut session = OrderSession::new();
        session.add_item(juice_small(), 1).unwrap();
        session.add_item(juice_small(), 2).unwrap();

        assert_eq!(session.item_count(), 2);
        assert_eq!(session.total_quantity(), 3);
    }

    #[test]
    fn test_remove_item_stale_index() {
        let mut session = OrderSession::new();
        session.add_item(juice_small(), 1).unwrap();

        let err = session.remove_item(3);
        assert!(matches!(err, Err(CoreError::IndexOutOfRange { index: 3, len: 1 })));
        assert_eq!(session.item_count(), 1);
    }

    #[test]
    fn test_clear_resets_checkout() {
        let mut session = OrderSession::new();
        session.add_item(juice_small(), 1).unwrap();
        session.submit().unwrap();

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.checkout, CheckoutState::Idle);
    }
}
