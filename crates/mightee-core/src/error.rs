//! # Error Types
//!
//! Domain-specific error types for mightee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mightee-core errors (this file)                                        │
//! │  └── CoreError        - Order/checkout/catalog rule violations          │
//! │                                                                         │
//! │  mightee-sheets errors (separate crate)                                 │
//! │  └── LedgerError      - Remote spreadsheet failures                     │
//! │                                                                         │
//! │  mightee-pos errors (app crate)                                         │
//! │  └── PosError         - What the rendering layer sees                   │
//! │                                                                         │
//! │  Flow: CoreError ─┐                                                     │
//! │                   ├──► PosError ──► operator-visible message            │
//! │       LedgerError ┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (selection, index, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;
use crate::types::Selection;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent order and checkout rule violations. They are surfaced
/// to the operator as messages; none of them is retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no entry for the selection.
    ///
    /// ## When This Occurs
    /// Never through the fixed UI choices: every reachable combination
    /// has exactly one catalog entry. Hitting this is a programming
    /// contract violation, not a runtime condition.
    #[error("No catalog entry for {0}")]
    SelectionNotFound(Selection),

    /// Line item quantity below one.
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Removal index no longer matches the order (stale UI row).
    #[error("Item {index} is out of range for an order of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Cash received does not cover the order total.
    #[error("Insufficient payment: received {received}, need {required}")]
    InsufficientPayment { required: Money, received: Money },

    /// Submit pressed with nothing in the order.
    #[error("Order is empty")]
    EmptyOrder,

    /// A checkout operation arrived in the wrong state.
    ///
    /// ## When This Occurs
    /// - Tendering cash before the order was submitted
    /// - Completing a checkout that was never tendered
    #[error("Cannot {operation} while checkout is {state}")]
    InvalidCheckoutState {
        operation: &'static str,
        state: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
