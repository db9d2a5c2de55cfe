//! # mightee-sheets: Spreadsheet Ledger Layer for Mightee POS
//!
//! This crate provides every operation against the remote spreadsheet
//! that acts as the stall's persistent store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mightee POS Data Flow                             │
//! │                                                                         │
//! │  Handler (complete_checkout)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   mightee-sheets (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │  Repositories  │    │ SheetClient  │  │   │
//! │  │   │  (facade)     │    │ inventory.rs   │    │  (the seam)  │  │   │
//! │  │   │               │◄───│ sales_log.rs   │───►│              │  │   │
//! │  │   │ config +      │    │ stocks.rs      │    │ MemorySheets │  │   │
//! │  │   │ client        │    │ partition.rs   │    │ or remote    │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Remote spreadsheet (daily copies: Inventory_2024-06-01, ...)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The `SheetClient` trait every backend implements
//! - [`memory`] - In-memory client for tests and offline use
//! - [`config`] - TOML + env configuration
//! - [`inventory`] - The increment/decrement tally protocol
//! - [`partition`] - Lazy daily sheet copies
//! - [`sales_log`] - Append-only sales log
//! - [`stocks`] - Stocks ledger batch read/save
//! - [`error`] - Ledger error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mightee_sheets::{Ledger, MemorySheets, SheetsConfig};
//!
//! let ledger = Ledger::new(MemorySheets::new(), SheetsConfig::default())?;
//!
//! let partition = ledger.partitions().ensure(date).await?;
//! ledger.inventory().increment(&partition.inventory, cell, 2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod partition;
pub mod sales_log;
pub mod stocks;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{Grid, SheetClient};
pub use config::SheetsConfig;
pub use error::{LedgerError, LedgerResult};
pub use memory::MemorySheets;
pub use partition::DailyPartition;
pub use stocks::StockEdit;

use inventory::InventoryRepository;
use partition::PartitionManager;
use sales_log::SalesLogRepository;
use stocks::StocksRepository;

// =============================================================================
// Ledger Facade
// =============================================================================

/// One spreadsheet plus its configuration; hands out repositories.
///
/// Owns the client. Repositories borrow it, so they are created per
/// operation - they carry no state of their own.
pub struct Ledger<C: SheetClient> {
    client: C,
    config: SheetsConfig,
}

impl<C: SheetClient> Ledger<C> {
    /// Creates a ledger over a client, validating the configuration.
    pub fn new(client: C, config: SheetsConfig) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Ledger { client, config })
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The active configuration.
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// Inventory tally operations.
    pub fn inventory(&self) -> InventoryRepository<'_, C> {
        InventoryRepository::new(&self.client, &self.config.retry)
    }

    /// Daily partition management.
    pub fn partitions(&self) -> PartitionManager<'_, C> {
        PartitionManager::new(&self.client, &self.config)
    }

    /// Sales-log appends and reads.
    pub fn sales_log(&self) -> SalesLogRepository<'_, C> {
        SalesLogRepository::new(&self.client)
    }

    /// Stocks ledger batch operations.
    pub fn stocks(&self) -> StocksRepository<'_, C> {
        StocksRepository::new(
            &self.client,
            &self.config.spreadsheet.stocks_sheet,
            &self.config.stocks,
        )
    }
}
