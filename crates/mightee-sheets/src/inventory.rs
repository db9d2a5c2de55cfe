//! # Inventory Tally Protocol
//!
//! Read-modify-write increments against the daily inventory sheet.
//!
//! ## The Protocol (and its race)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    increment(cell, delta)                               │
//! │                                                                         │
//! │  1. read cell        ──► missing / non-numeric counts as 0              │
//! │  2. write current+Δ  ──► plain overwrite                                │
//! │                                                                         │
//! │  NON-ATOMIC. Two sessions incrementing the same cell can both read      │
//! │  the same stale value and the second write wins:                        │
//! │                                                                         │
//! │     session A: read 4 ─────────── write 6                               │
//! │     session B: ──── read 4 ──────────────── write 5   (A's +2 lost)     │
//! │                                                                         │
//! │  No locking, no versioning, no server-side add. This matches the        │
//! │  deployed behavior and is deliberately NOT corrected here.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `decrement` retries, and only because removal corrections are
//! where operators hammer the API fast enough to trip rate limits.

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tracing::{debug, info, warn};

use mightee_core::types::CellAddress;
use mightee_core::validation::parse_tally;

use crate::client::SheetClient;
use crate::config::RetrySettings;
use crate::error::LedgerResult;

/// Tally operations over one [`SheetClient`].
pub struct InventoryRepository<'a, C: SheetClient> {
    client: &'a C,
    retry: &'a RetrySettings,
}

impl<'a, C: SheetClient> InventoryRepository<'a, C> {
    pub(crate) fn new(client: &'a C, retry: &'a RetrySettings) -> Self {
        InventoryRepository { client, retry }
    }

    /// Reads the current tally of a cell (missing/non-numeric = 0).
    pub async fn current(&self, sheet: &str, cell: CellAddress) -> LedgerResult<i64> {
        let value = self.client.read_cell(sheet, cell).await?;
        Ok(parse_tally(value.as_deref()))
    }

    /// Adds `delta` to a tally cell and returns the new value.
    ///
    /// One read, one write, no atomicity; see the module docs for the
    /// lost-update race this carries under concurrent sessions.
    pub async fn increment(&self, sheet: &str, cell: CellAddress, delta: i64) -> LedgerResult<i64> {
        let current = self.current(sheet, cell).await?;
        let new_value = current + delta;
        self.client
            .write_cell(sheet, cell, &new_value.to_string())
            .await?;

        debug!(sheet, cell = %cell, delta, new_value, "Tally incremented");
        Ok(new_value)
    }

    /// Subtracts `delta` from a tally cell, flooring at zero, and returns
    /// the new value.
    ///
    /// Wrapped in a bounded retry loop (default 5 attempts, exponential
    /// backoff with jitter) to absorb rate-limit and transport failures.
    /// Non-retryable errors surface immediately.
    pub async fn decrement(&self, sheet: &str, cell: CellAddress, delta: i64) -> LedgerResult<i64> {
        let mut backoff = self.create_backoff();
        let mut attempt: u32 = 1;

        loop {
            match self.try_decrement(sheet, cell, delta).await {
                Ok(new_value) => {
                    if attempt > 1 {
                        info!(sheet, cell = %cell, attempt, "Decrement succeeded after retry");
                    }
                    return Ok(new_value);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = backoff
                        .next_backoff()
                        .unwrap_or_else(|| self.retry.max_backoff());
                    warn!(
                        sheet,
                        cell = %cell,
                        attempt,
                        ?delay,
                        error = %e,
                        "Decrement failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(sheet, cell = %cell, attempt, error = %e, "Decrement abandoned");
                    return Err(e);
                }
            }
        }
    }

    /// One decrement attempt: same read-modify-write as increment, with
    /// a floor at zero.
    async fn try_decrement(&self, sheet: &str, cell: CellAddress, delta: i64) -> LedgerResult<i64> {
        let current = self.current(sheet, cell).await?;
        let new_value = (current - delta).max(0);
        self.client
            .write_cell(sheet, cell, &new_value.to_string())
            .await?;

        debug!(sheet, cell = %cell, delta, new_value, "Tally decremented");
        Ok(new_value)
    }

    /// Exponential backoff with the crate's default jitter.
    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.retry.initial_backoff(),
            max_interval: self.retry.max_backoff(),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::memory::MemorySheets;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    fn retry() -> RetrySettings {
        RetrySettings::default()
    }

    #[tokio::test]
    async fn test_increment_from_blank() {
        let sheets = MemorySheets::new();
        sheets.create_sheet("Inv");
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let new_value = repo.increment("Inv", addr("C6"), 2).await.unwrap();
        assert_eq!(new_value, 2);
        assert_eq!(sheets.cell("Inv", addr("C6")), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_increment_adds_to_existing() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "7");
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        assert_eq!(repo.increment("Inv", addr("C6"), 3).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_increment_treats_garbage_as_zero() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "n/a");
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        assert_eq!(repo.increment("Inv", addr("C6"), 4).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_increment_then_decrement_restores() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("O6"), "5");
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        repo.increment("Inv", addr("O6"), 3).await.unwrap();
        let restored = repo.decrement("Inv", addr("O6"), 3).await.unwrap();
        assert_eq!(restored, 5);
    }

    #[tokio::test]
    async fn test_decrement_floors_at_zero() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "2");
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let new_value = repo.decrement("Inv", addr("C6"), 10).await.unwrap();
        assert_eq!(new_value, 0);
        assert_eq!(sheets.cell("Inv", addr("C6")), Some("0".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_decrement_retries_through_rate_limits() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "4");
        sheets.inject_failures(vec![
            LedgerError::rate_limited("quota"),
            LedgerError::unavailable("connection reset"),
        ]);
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let new_value = repo.decrement("Inv", addr("C6"), 1).await.unwrap();
        assert_eq!(new_value, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decrement_gives_up_after_max_attempts() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "4");
        // One failure per attempt, so all five attempts fail
        sheets.inject_failures(
            (0..5).map(|_| LedgerError::rate_limited("quota")).collect(),
        );
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let err = repo.decrement("Inv", addr("C6"), 1).await;
        assert!(matches!(err, Err(LedgerError::RateLimited { .. })));
        // Untouched - every attempt failed before the write
        assert_eq!(sheets.cell("Inv", addr("C6")), Some("4".to_string()));
    }

    #[tokio::test]
    async fn test_decrement_does_not_retry_missing_sheet() {
        let sheets = MemorySheets::new();
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let err = repo.decrement("Nope", addr("C6"), 1).await;
        assert!(matches!(err, Err(LedgerError::SheetNotFound { .. })));
    }

    #[tokio::test]
    async fn test_increment_never_retries() {
        let sheets = MemorySheets::new();
        sheets.set_cell("Inv", addr("C6"), "4");
        sheets.inject_failures(vec![LedgerError::rate_limited("quota")]);
        let retry = retry();
        let repo = InventoryRepository::new(&sheets, &retry);

        let err = repo.increment("Inv", addr("C6"), 1).await;
        assert!(matches!(err, Err(LedgerError::RateLimited { .. })));
        assert_eq!(sheets.cell("Inv", addr("C6")), Some("4".to_string()));
    }
}
