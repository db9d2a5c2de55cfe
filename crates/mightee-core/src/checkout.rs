//! # Checkout Flow
//!
//! The short state machine that turns a priced cart into a commit.
//!
//! ## States and Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout State Machine                              │
//! │                                                                         │
//! │              submit()              tender(cash ≥ total)                 │
//! │   ┌──────┐  non-empty   ┌──────────────────┐         ┌───────────────┐  │
//! │   │ Idle │─────────────►│ AwaitingPayment  │────────►│ReadyToComplete│  │
//! │   └──────┘              │ {cash_received}  │         │ {cash, change}│  │
//! │      ▲                  └──────────────────┘         └───────┬───────┘  │
//! │      │                        │    ▲                         │          │
//! │      │                tender(cash < total)              finish()        │
//! │      │                InsufficientPayment,              (ledger commit  │
//! │      │                stays AwaitingPayment              happens here)  │
//! │      └───────────────────────────────────────────────────────┘          │
//! │                                                                         │
//! │  The commit is DEFERRED: payment validation and the remote write are    │
//! │  separate steps, so the operator sees the change due before any         │
//! │  ledger mutation happens. No transition skips ReadyToComplete.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::{LineItem, OrderSession};

// =============================================================================
// Checkout State
// =============================================================================

/// Where a session currently is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Building the order; nothing submitted.
    #[default]
    Idle,

    /// Order submitted, waiting for cash. Holds whatever amount the
    /// operator last entered so an insufficient tender can be redisplayed.
    AwaitingPayment { cash_received: Money },

    /// Payment validated; change held for display until the explicit
    /// completion confirms the commit.
    ReadyToComplete { cash_received: Money, change: Money },
}

impl CheckoutState {
    /// Short label used in wrong-state error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::AwaitingPayment { .. } => "awaiting payment",
            CheckoutState::ReadyToComplete { .. } => "ready to complete",
        }
    }
}

// =============================================================================
// Checkout Plan
// =============================================================================

/// Everything the commit step needs, cloned out of a session that is in
/// ReadyToComplete. The session itself stays untouched until
/// [`OrderSession::finish`] confirms the commit went through.
#[derive(Debug, Clone)]
pub struct CheckoutPlan {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub cash_received: Money,
    pub change: Money,
}

// =============================================================================
// Transitions
// =============================================================================

impl OrderSession {
    /// Idle → AwaitingPayment. Only a non-empty order can be submitted.
    pub fn submit(&mut self) -> CoreResult<()> {
        match self.checkout {
            CheckoutState::Idle => {
                if self.is_empty() {
                    return Err(CoreError::EmptyOrder);
                }
                self.checkout = CheckoutState::AwaitingPayment {
                    cash_received: Money::zero(),
                };
                Ok(())
            }
            state => Err(CoreError::InvalidCheckoutState {
                operation: "submit",
                state: state.name(),
            }),
        }
    }

    /// Records the cash received.
    ///
    /// If it covers the total: AwaitingPayment → ReadyToComplete and the
    /// change is returned. If it falls short: the state stays
    /// AwaitingPayment (with the entered amount retained) and
    /// [`CoreError::InsufficientPayment`] is returned - the cart is not
    /// modified either way.
    pub fn tender(&mut self, cash_received: Money) -> CoreResult<Money> {
        match self.checkout {
            CheckoutState::AwaitingPayment { .. } => {
                let total = self.total();
                if cash_received < total {
                    self.checkout = CheckoutState::AwaitingPayment { cash_received };
                    return Err(CoreError::InsufficientPayment {
                        required: total,
                        received: cash_received,
                    });
                }
                let change = cash_received - total;
                self.checkout = CheckoutState::ReadyToComplete {
                    cash_received,
                    change,
                };
                Ok(change)
            }
            state => Err(CoreError::InvalidCheckoutState {
                operation: "tender",
                state: state.name(),
            }),
        }
    }

    /// Change due, once payment has been validated.
    pub fn change_due(&self) -> Option<Money> {
        match self.checkout {
            CheckoutState::ReadyToComplete { change, .. } => Some(change),
            _ => None,
        }
    }

    /// Clones out what the commit step needs. Valid only in
    /// ReadyToComplete; the session is left as-is so a failed commit can
    /// be surfaced without losing the order.
    pub fn commit_plan(&self) -> CoreResult<CheckoutPlan> {
        match self.checkout {
            CheckoutState::ReadyToComplete {
                cash_received,
                change,
            } => Ok(CheckoutPlan {
                items: self.items.clone(),
                total: self.total(),
                cash_received,
                change,
            }),
            state => Err(CoreError::InvalidCheckoutState {
                operation: "complete",
                state: state.name(),
            }),
        }
    }

    /// ReadyToComplete → Idle, after the ledger mutations succeeded.
    ///
    /// Clears the cart, remembers the change for display and returns it.
    pub fn finish(&mut self) -> CoreResult<Money> {
        match self.checkout {
            CheckoutState::ReadyToComplete { change, .. } => {
                self.items.clear();
                self.checkout = CheckoutState::Idle;
                self.last_change_due = Some(change);
                Ok(change)
            }
            state => Err(CoreError::InvalidCheckoutState {
                operation: "complete",
                state: state.name(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
