//! # mightee-pos: Session State and Handlers for Mightee POS
//!
//! The orchestration layer. One [`PosContext`] per operator session; one
//! handler per operator action. The rendering layer calls a handler,
//! then re-renders as a pure function of the returned snapshot - no
//! ambient globals, no hidden state.
//!
//! ## Handler Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Operator Actions                                  │
//! │                                                                         │
//! │  Order building        Checkout               Side flows                │
//! │  ──────────────        ────────               ──────────                │
//! │  order::add_item       checkout::submit_order stocks::stock_rows        │
//! │  order::remove_item    checkout::tender_cash  stocks::save_stock_edits  │
//! │  order::clear_order    checkout::complete_    report::today_inventory   │
//! │  order::view_order       checkout             report::today_sales       │
//! │  order::undo_entry                                                      │
//! │                                                                         │
//! │  Each handler takes &PosContext. State lives in the context; the        │
//! │  spreadsheet is the only thing that outlives a session.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod handlers;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::SnapshotCache;
pub use error::{ErrorCode, PosError};
pub use session::SessionState;

use mightee_sheets::{Ledger, SheetClient};

// =============================================================================
// POS Context
// =============================================================================

/// Everything one operator session works with: the order state, the
/// spreadsheet ledger, and the display snapshot cache.
pub struct PosContext<C: SheetClient> {
    pub session: SessionState,
    pub ledger: Ledger<C>,
    pub cache: SnapshotCache,
}

impl<C: SheetClient> PosContext<C> {
    /// Creates a fresh session over a ledger.
    pub fn new(ledger: Ledger<C>) -> Self {
        PosContext {
            session: SessionState::new(),
            ledger,
            cache: SnapshotCache::new(),
        }
    }
}
