//! # mightee-core: Pure Business Logic for Mightee POS
//!
//! This crate is the **heart** of Mightee POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mightee POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer (external)                   │   │
//! │  │    Selection widgets ──► Cart view ──► Tender ──► Change view   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mightee-pos handlers                         │   │
//! │  │    add_item, submit_order, tender_cash, complete_checkout       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mightee-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  checkout │   │   │
//! │  │   │ Selection │  │   Money   │  │  CATALOG  │  │   state   │   │   │
//! │  │   │ CellAddr  │  │  centavos │  │  lookup   │  │  machine  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SPREADSHEET • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  mightee-sheets (Ledger Layer)                  │   │
//! │  │        SheetClient trait, partitions, increments, stocks        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Selection, CellAddress, StockRow, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The static selection → (cell, price) table
//! - [`order`] - Line items and the order session
//! - [`checkout`] - The checkout state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and cell-value parsing rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: spreadsheet, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all amounts are centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mightee_core::Money` instead of
// `use mightee_core::money::Money`

pub use checkout::{CheckoutPlan, CheckoutState};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::{LineItem, OrderSession};
pub use types::*;
